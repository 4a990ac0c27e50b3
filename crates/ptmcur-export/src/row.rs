//! The 26-column curation row.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Exact export header, in column order.
pub const HEADER: [&str; 26] = [
    "ENTITYA", "TYPEA", "IDA", "DATABASEA",
    "ENTITYB", "TYPEB", "IDB", "DATABASEB",
    "EFFECT", "MECHANISM", "RESIDUE", "SEQUENCE",
    "TAX_ID", "CELL_DATA", "TISSUE_DATA",
    "MODULATOR_COMPLEX", "TARGET_COMPLEX",
    "MODIFICATIONA", "MODASEQ", "MODIFICATIONB", "MODBSEQ",
    "PMID", "DIRECT", "NOTES", "ANNOTATOR", "SENTENCE",
];

/// Separator between evidence sentences in the SENTENCE column.
pub const SENTENCE_SEPARATOR: &str = "|";

/// Field order must match [`HEADER`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExportRow {
    #[serde(rename = "ENTITYA")]           pub entity_a: String,
    #[serde(rename = "TYPEA")]             pub type_a: String,
    #[serde(rename = "IDA")]               pub id_a: String,
    #[serde(rename = "DATABASEA")]         pub database_a: String,
    #[serde(rename = "ENTITYB")]           pub entity_b: String,
    #[serde(rename = "TYPEB")]             pub type_b: String,
    #[serde(rename = "IDB")]               pub id_b: String,
    #[serde(rename = "DATABASEB")]         pub database_b: String,
    #[serde(rename = "EFFECT")]            pub effect: String,
    #[serde(rename = "MECHANISM")]         pub mechanism: String,
    #[serde(rename = "RESIDUE")]           pub residue: String,
    #[serde(rename = "SEQUENCE")]          pub sequence: String,
    #[serde(rename = "TAX_ID")]            pub tax_id: String,
    #[serde(rename = "CELL_DATA")]         pub cell_data: String,
    #[serde(rename = "TISSUE_DATA")]       pub tissue_data: String,
    #[serde(rename = "MODULATOR_COMPLEX")] pub modulator_complex: String,
    #[serde(rename = "TARGET_COMPLEX")]    pub target_complex: String,
    #[serde(rename = "MODIFICATIONA")]     pub modification_a: String,
    #[serde(rename = "MODASEQ")]           pub mod_a_seq: String,
    #[serde(rename = "MODIFICATIONB")]     pub modification_b: String,
    #[serde(rename = "MODBSEQ")]           pub mod_b_seq: String,
    #[serde(rename = "PMID")]              pub pmid: String,
    #[serde(rename = "DIRECT")]            pub direct: String,
    #[serde(rename = "NOTES")]             pub notes: String,
    #[serde(rename = "ANNOTATOR")]         pub annotator: String,
    #[serde(rename = "SENTENCE")]          pub sentence: String,
}

impl ExportRow {
    pub fn has_site(&self) -> bool {
        !self.residue.is_empty()
    }

    /// The SENTENCE column as a set.
    pub fn sentences(&self) -> BTreeSet<String> {
        split_sentences(&self.sentence)
    }

    /// Copy of this row with SENTENCE replaced.
    pub fn with_sentences(&self, sentences: &BTreeSet<String>) -> Self {
        Self {
            sentence: join_sentences(sentences),
            ..self.clone()
        }
    }
}

pub fn split_sentences(sentence: &str) -> BTreeSet<String> {
    sentence
        .split(SENTENCE_SEPARATOR)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn join_sentences<'a, I>(sentences: I) -> String
where
    I: IntoIterator<Item = &'a String>,
{
    sentences
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(SENTENCE_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentence_set_helpers() {
        let row = ExportRow { sentence: "b|a|b".into(), ..Default::default() };
        let set = row.sentences();
        assert_eq!(set.len(), 2);
        assert_eq!(row.with_sentences(&set).sentence, "a|b");
        assert!(ExportRow::default().sentences().is_empty());
    }
}
