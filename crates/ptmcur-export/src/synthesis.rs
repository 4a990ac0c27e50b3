//! Row synthesis: one candidate row per (modification, regulation) pair of a
//! resolved group.
//!
//! Precedence rules:
//! - EFFECT: regulation comment, then modification comment, then the
//!   regulation statement type.
//! - TAX_ID: regulation comment, then modification comment, then 9606.
//! - DIRECT: "NO" only when the modification comment says so.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use ptmcur_common::amino_acids;
use ptmcur_common::{Agent, PtmcurError, Result};
use regex::Regex;
use tracing::debug;

use crate::comment::CommentField;
use crate::grouping::CuratedTuple;
use crate::resolver::{single_effect, ResolvedGroup};
use crate::row::{join_sentences, ExportRow};
use crate::scope::ExportScope;

pub const DEFAULT_TAX_ID: &str = "9606";

/// Reading artifacts left in machine-read evidence sentences.
const TEXT_ARTIFACTS: &[&str] = &[
    "[XREF_BIBR]",
    "[XREF_FIG]",
    "[XREF_TABLE]",
    "[XREF_SUPPLEMENTARY]",
    "(XREF_BIBR)",
    "(XREF_FIG)",
    "(XREF_TABLE)",
    "(XREF_SUPPLEMENTARY)",
    "XREF_BIBR",
    "XREF_FIG",
    "XREF_TABLE",
    "XREF_SUPPLEMENTARY",
];

pub fn synthesize(group: &ResolvedGroup, scope: &ExportScope) -> Result<Vec<ExportRow>> {
    let mut rows = Vec::with_capacity(group.modifications.len() * group.regulations.len());
    for m in &group.modifications {
        for r in &group.regulations {
            rows.push(synthesize_row(group, m, r, scope)?);
        }
    }
    debug!(key = %group.key, n_rows = rows.len(), "Synthesized candidate rows");
    Ok(rows)
}

fn synthesize_row(
    group: &ResolvedGroup,
    m: &CuratedTuple,
    r: &CuratedTuple,
    scope: &ExportScope,
) -> Result<ExportRow> {
    let key = &group.key;

    let effect = match single_effect(key, &r.comment)? {
        Some(e) => e.to_string(),
        None => match single_effect(key, &m.comment)? {
            Some(e) => e.to_string(),
            None => r.statement.kind.default_effect().unwrap_or_default().to_string(),
        },
    };

    let tax_id = r.comment.first(CommentField::Taxid)
        .or_else(|| m.comment.first(CommentField::Taxid))
        .unwrap_or(DEFAULT_TAX_ID)
        .to_string();

    let cell_data = r.comment.first(CommentField::CellData)
        .or_else(|| m.comment.first(CommentField::CellData))
        .unwrap_or("")
        .to_string();

    let direct = match m.comment.first(CommentField::Direct) {
        Some(d) if d.trim().eq_ignore_ascii_case("no") => "NO",
        _ => "YES",
    };

    let annotator = select_curator(m, r)
        .map(curator_initials)
        .ok_or_else(|| PtmcurError::MissingCurator { context: key.to_string() })?;

    let modification = &m.statement;
    let (id_a, database_a) = grounding(modification.controller.as_ref());
    let (id_b, database_b) = grounding(Some(&modification.target));

    Ok(ExportRow {
        entity_a: modification.controller_name().to_string(),
        type_a: "protein".to_string(),
        id_a,
        database_a,
        entity_b: modification.target.name.clone(),
        type_b: "protein".to_string(),
        id_b,
        database_b,
        effect,
        mechanism: scope.mechanism().to_string(),
        residue: residue_label(modification.residue.as_deref(), modification.position.as_deref()),
        tax_id,
        cell_data,
        pmid: key.pmid.clone(),
        direct: direct.to_string(),
        annotator,
        sentence: collect_sentences(m, r),
        ..Default::default()
    })
}

/// `S` + `"15"` → `"S15"`; empty unless both parts are present and valid.
pub fn residue_label(residue: Option<&str>, position: Option<&str>) -> String {
    let aa = residue.and_then(amino_acids::lookup);
    let position = position.map(str::trim).filter(|p| !p.is_empty());
    match (aa, position) {
        (Some(aa), Some(pos)) => format!("{}{}", aa.code, pos),
        _ => String::new(),
    }
}

/// Strip reading artifacts and normalise whitespace. `None` stays `None`.
pub fn sanitize_text(text: Option<&str>) -> Option<String> {
    let mut cleaned = text?.to_string();
    for artifact in TEXT_ARTIFACTS {
        cleaned = cleaned.replace(artifact, "");
    }
    let cleaned = whitespace_regex().replace_all(&cleaned, " ");
    let cleaned = cleaned.trim();
    (!cleaned.is_empty()).then(|| cleaned.to_string())
}

fn whitespace_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s{2,}").expect("static regex"))
}

fn collect_sentences(m: &CuratedTuple, r: &CuratedTuple) -> String {
    let mut sentences = BTreeSet::new();
    sentences.extend(sanitize_text(m.evidence.text.as_deref()));
    sentences.extend(sanitize_text(r.evidence.text.as_deref()));
    for tuple in [m, r] {
        sentences.extend(
            tuple.comment.get(CommentField::Sentence)
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        );
    }
    join_sentences(&sentences)
}

/// Lexicographically first curator of the two curations.
fn select_curator<'a>(m: &'a CuratedTuple, r: &'a CuratedTuple) -> Option<&'a str> {
    [m, r]
        .into_iter()
        .filter_map(|t| t.curation.as_ref()?.curator.as_deref())
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .min()
}

/// `"j.smith@x.org"` → `"jsmith"`. A local part without a dot is used as is.
pub fn curator_initials(curator: &str) -> String {
    let local = curator.split('@').next().unwrap_or(curator);
    let mut parts = local.split('.');
    let first = parts.next().unwrap_or("");
    match parts.next() {
        Some(last) => {
            let initial: String = first.chars().take(1).collect();
            format!("{initial}{last}")
        }
        None => local.to_string(),
    }
}

/// (ID, DATABASE) preferring UniProt.
fn grounding(agent: Option<&Agent>) -> (String, String) {
    if let Some(up) = agent.and_then(|a| a.db_ref("UP")) {
        return (up.to_string(), "UNIPROT".to_string());
    }
    if let Some(hgnc) = agent.and_then(|a| a.db_ref("HGNC")) {
        return (hgnc.to_string(), "HGNC".to_string());
    }
    (String::new(), "UNIPROT".to_string())
}
