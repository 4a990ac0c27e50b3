//! Curator comment parsing.
//!
//! Curators annotate a correct curation with a free-text comment of
//! `KEY:VALUE` segments separated by `;`, e.g.
//! `EFFECT:down-regulates activity;TAXID:10090;SENTENCE:...`.
//! Parsing never fails: a malformed segment stops parsing and whatever was
//! read before it is returned.

use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::warn;

/// Known malformed comments from earlier curation rounds, mapped to the
/// comment the curator meant to write.
const BUILTIN_CORRECTIONS: &[(&str, &str)] = &[
    ("up-regulates", "EFFECT:up-regulates"),
    ("down-regulates", "EFFECT:down-regulates"),
    ("up-regulates activity", "EFFECT:up-regulates activity"),
    ("down-regulates activity", "EFFECT:down-regulates activity"),
    ("EFFEC:up-regulates", "EFFECT:up-regulates"),
    ("EFFECT:up-regulates activity;DIRECT;NO", "EFFECT:up-regulates activity;DIRECT:NO"),
    ("EFFECT:down-regulates activity;DIRECT;NO", "EFFECT:down-regulates activity;DIRECT:NO"),
    (
        "EFFECT:down-regulates activity, MECHANISM:dephosphorylation",
        "EFFECT:down-regulates activity;MECHANISM:dephosphorylation",
    ),
];

/// Semantic buckets a comment can fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentField {
    Effect,
    Mechanism,
    Direct,
    CellData,
    Taxid,
    Sentence,
}

impl CommentField {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommentField::Effect    => "effect",
            CommentField::Mechanism => "mechanism",
            CommentField::Direct    => "direct",
            CommentField::CellData  => "cell_data",
            CommentField::Taxid     => "taxid",
            CommentField::Sentence  => "sentence",
        }
    }
}

/// Recognised segment keys, matched exactly. `RESIDUE` is accepted but has no bucket.
enum SegmentKey {
    Field(CommentField),
    Residue,
}

impl SegmentKey {
    fn parse(key: &str) -> Option<Self> {
        match key {
            "EFFECT"    => Some(SegmentKey::Field(CommentField::Effect)),
            "MECHANISM" => Some(SegmentKey::Field(CommentField::Mechanism)),
            "DIRECT"    => Some(SegmentKey::Field(CommentField::Direct)),
            "CELL"      => Some(SegmentKey::Field(CommentField::CellData)),
            "TAXID"     => Some(SegmentKey::Field(CommentField::Taxid)),
            "SENTENCE"  => Some(SegmentKey::Field(CommentField::Sentence)),
            "RESIDUE"   => Some(SegmentKey::Residue),
            _ => None,
        }
    }
}

/// Structured overrides read from one curator comment.
/// Keys keep first-insertion order; values keep comment order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedComment {
    fields: IndexMap<CommentField, Vec<String>>,
}

impl ParsedComment {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, field: CommentField) -> bool {
        self.fields.contains_key(&field)
    }

    /// All values for a field; empty when the comment did not set it.
    pub fn get(&self, field: CommentField) -> &[String] {
        self.fields.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn first(&self, field: CommentField) -> Option<&str> {
        self.get(field).first().map(String::as_str)
    }

    pub fn push(&mut self, field: CommentField, value: impl Into<String>) {
        self.fields.entry(field).or_default().push(value.into());
    }

    /// Remove a field so later stages do not apply it again.
    pub fn remove(&mut self, field: CommentField) -> Vec<String> {
        self.fields.shift_remove(&field).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CommentField, &[String])> {
        self.fields.iter().map(|(k, v)| (*k, v.as_slice()))
    }
}

/// Comment parser holding the correction table.
/// Build once per run and share by reference.
#[derive(Debug, Clone)]
pub struct CommentParser {
    corrections: HashMap<String, String>,
}

impl Default for CommentParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CommentParser {
    /// Parser with the built-in correction table.
    pub fn new() -> Self {
        let corrections = BUILTIN_CORRECTIONS
            .iter()
            .map(|(from, to)| (from.to_string(), to.to_string()))
            .collect();
        Self { corrections }
    }

    /// Built-in table extended (or overridden) by configured corrections.
    pub fn with_corrections<I>(extra: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut parser = Self::new();
        parser.corrections.extend(extra);
        parser
    }

    pub fn n_corrections(&self) -> usize {
        self.corrections.len()
    }

    pub fn parse(&self, raw: Option<&str>) -> ParsedComment {
        let mut parsed = ParsedComment::default();

        let raw = match raw {
            Some(r) if !r.trim().is_empty() => r,
            _ => return parsed,
        };

        let comment = self
            .corrections
            .get(raw)
            .map(String::as_str)
            .unwrap_or(raw);
        let comment = comment.strip_suffix(';').unwrap_or(comment);

        for segment in comment.split(';') {
            let Some((key, value)) = segment.split_once(':') else {
                warn!(comment = raw, segment, "Comment segment has no KEY:VALUE form, ignoring the rest");
                break;
            };
            match SegmentKey::parse(key) {
                Some(SegmentKey::Field(field)) => parsed.push(field, value),
                Some(SegmentKey::Residue) => {}
                None => {
                    warn!(comment = raw, key, "Unknown comment key, ignoring the rest");
                    break;
                }
            }
        }

        parsed
    }
}
