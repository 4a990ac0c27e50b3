//! Processed-statement corpus reader.
//!
//! The corpus is a (usually gzipped) two-column TSV: statement hash, then the
//! statement JSON. Some JSON cells were written with one or more extra layers
//! of backslash escaping; those are unescaped and re-parsed a bounded number
//! of times before the row is considered unreadable.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;
use ptmcur_common::{PtmcurError, Result, Statement, StatementKind};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Parse attempts per JSON cell, including the first.
pub const MAX_PARSE_ATTEMPTS: u32 = 5;

#[derive(Debug, Clone, Default, Serialize)]
pub struct CorpusStats {
    pub rows: usize,
    pub repaired: usize,
    pub unsupported: usize,
    pub malformed: usize,
    pub filtered: usize,
    pub kept: usize,
}

/// Read the corpus at `path`, keeping statements accepted by `keep`.
/// Files ending in `.gz` are decompressed on the fly.
pub fn read_corpus<F>(path: &Path, keep: F) -> Result<(Vec<Statement>, CorpusStats)>
where
    F: FnMut(&Statement) -> bool,
{
    info!(path = %path.display(), "Reading statement corpus");
    let file = File::open(path)?;
    if path.extension().and_then(|s| s.to_str()) == Some("gz") {
        read_corpus_from(GzDecoder::new(file), keep)
    } else {
        read_corpus_from(file, keep)
    }
}

pub fn read_corpus_from<R, F>(reader: R, mut keep: F) -> Result<(Vec<Statement>, CorpusStats)>
where
    R: Read,
    F: FnMut(&Statement) -> bool,
{
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut stats = CorpusStats::default();
    let mut statements = Vec::new();
    for record in rdr.records() {
        let record = record?;
        stats.rows += 1;
        if stats.rows % 100_000 == 0 {
            debug!(rows = stats.rows, kept = stats.kept, "Corpus progress");
        }

        let (Some(hash_cell), Some(json_cell)) = (record.get(0), record.get(1)) else {
            warn!(row = stats.rows, "Corpus row has fewer than two columns");
            stats.malformed += 1;
            continue;
        };

        let (value, attempts) = parse_statement_json(json_cell)?;
        if attempts > 1 {
            stats.repaired += 1;
        }

        let stmt_type = value.get("type").and_then(Value::as_str).unwrap_or_default();
        if StatementKind::from_type_name(stmt_type).is_none() {
            stats.unsupported += 1;
            continue;
        }

        let mut stmt: Statement = match serde_json::from_value(value) {
            Ok(stmt) => stmt,
            Err(e) => {
                warn!(row = stats.rows, error = %e, "Skipping unreadable statement");
                stats.malformed += 1;
                continue;
            }
        };
        if stmt.hash == 0 {
            match hash_cell.trim().parse() {
                Ok(hash) => stmt.hash = hash,
                Err(_) => {
                    warn!(row = stats.rows, hash = hash_cell, "Statement has no usable hash, skipping");
                    stats.malformed += 1;
                    continue;
                }
            }
        }

        if keep(&stmt) {
            stats.kept += 1;
            statements.push(stmt);
        } else {
            stats.filtered += 1;
        }
    }

    info!(
        rows = stats.rows,
        kept = stats.kept,
        repaired = stats.repaired,
        unsupported = stats.unsupported,
        malformed = stats.malformed,
        "Corpus read"
    );
    Ok((statements, stats))
}

/// Parse a JSON cell, unescaping between attempts.
/// Returns the value and the number of attempts it took.
pub fn parse_statement_json(raw: &str) -> Result<(Value, u32)> {
    let mut text = raw.to_string();
    let mut attempt = 1;
    loop {
        match serde_json::from_str(&text) {
            Ok(value) => return Ok((value, attempt)),
            Err(source) if attempt >= MAX_PARSE_ATTEMPTS => {
                return Err(PtmcurError::JsonRepair { attempts: attempt, source });
            }
            Err(_) => {
                text = unescape_backslashes(&text);
                attempt += 1;
            }
        }
    }
}

/// Resolve one level of backslash escapes (`\\`, `\"`, `\n`, `\xNN`, ...).
/// Unknown escapes are kept as written.
pub fn unescape_backslashes(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'\\' || i + 1 == bytes.len() {
            out.push(bytes[i]);
            i += 1;
            continue;
        }
        let next = bytes[i + 1];
        i += 2;
        match next {
            b'\\' => out.push(b'\\'),
            b'"' => out.push(b'"'),
            b'\'' => out.push(b'\''),
            b'n' => out.push(b'\n'),
            b't' => out.push(b'\t'),
            b'r' => out.push(b'\r'),
            b'\n' => {}
            b'x' => match bytes.get(i..i + 2).and_then(hex_byte) {
                Some(b) => {
                    out.push(b);
                    i += 2;
                }
                None => out.extend_from_slice(b"\\x"),
            },
            other => {
                out.push(b'\\');
                out.push(other);
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_byte(digits: &[u8]) -> Option<u8> {
    let s = std::str::from_utf8(digits).ok()?;
    u8::from_str_radix(s, 16).ok()
}
