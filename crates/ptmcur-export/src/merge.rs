//! Row deduplication for one pair-group.
//!
//! Two passes:
//! 1. site folding: rows without a residue are folded into residue-bearing
//!    rows with the same EFFECT;
//! 2. identity merging: rows equal on (EFFECT, MECHANISM, RESIDUE) collapse
//!    into their first member with the union of their sentences.

use indexmap::IndexMap;
use tracing::warn;

use crate::row::ExportRow;

pub fn merge_rows(rows: Vec<ExportRow>) -> Vec<ExportRow> {
    merge_identical(fold_sites(rows))
}

/// Fold site-less rows into site-bearing rows of matching EFFECT.
///
/// Only applies when both kinds of row exist. The result is then exactly one
/// row per (site-less, site-bearing) pair sharing an EFFECT; rows of either
/// kind without such a partner are dropped.
pub fn fold_sites(rows: Vec<ExportRow>) -> Vec<ExportRow> {
    let any_site = rows.iter().any(ExportRow::has_site);
    let any_siteless = rows.iter().any(|r| !r.has_site());
    if !(any_site && any_siteless) {
        return rows;
    }

    let (site_less, site_bearing): (Vec<_>, Vec<_>) = rows.into_iter().partition(|r| !r.has_site());

    let mut folded = Vec::with_capacity(site_bearing.len());
    for with_site in &site_bearing {
        for without_site in site_less.iter().filter(|r| r.effect == with_site.effect) {
            let mut sentences = with_site.sentences();
            sentences.extend(without_site.sentences());
            folded.push(with_site.with_sentences(&sentences));
        }
    }

    let unmatched_site_less = site_less
        .iter()
        .filter(|r| !site_bearing.iter().any(|s| s.effect == r.effect))
        .count();
    let unmatched_site_bearing = site_bearing
        .iter()
        .filter(|r| !site_less.iter().any(|s| s.effect == r.effect))
        .count();
    if unmatched_site_less + unmatched_site_bearing > 0 {
        warn!(
            unmatched_site_less,
            unmatched_site_bearing,
            "Dropped rows with no matching-effect partner during site folding"
        );
    }

    folded
}

/// Collapse rows sharing (EFFECT, MECHANISM, RESIDUE).
pub fn merge_identical(rows: Vec<ExportRow>) -> Vec<ExportRow> {
    let mut by_identity: IndexMap<(String, String, String), Vec<ExportRow>> = IndexMap::new();
    for row in rows {
        let key = (row.effect.clone(), row.mechanism.clone(), row.residue.clone());
        by_identity.entry(key).or_default().push(row);
    }

    by_identity
        .into_values()
        .filter_map(|members| match members.len() {
            0 => None,
            1 => members.into_iter().next(),
            _ => {
                let sentences = members.iter().flat_map(ExportRow::sentences).collect();
                Some(members[0].with_sentences(&sentences))
            }
        })
        .collect()
}
