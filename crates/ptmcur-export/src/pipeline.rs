//! End-to-end export of curated modification/regulation pairs.
//!
//! Orchestrates one export run:
//!   1. Select curations of the run's batch, squash duplicates, keep `correct`
//!   2. Correlate each curation with its statement and evidence
//!   3. Parse curator comments
//!   4. Group by (controller, target, publication)
//!   5. Resolve each group, synthesize rows, merge rows
//!
//! Writing the CSV is left to the caller (`csv_export::write_csv`).

use std::collections::HashMap;
use std::rc::Rc;

use indexmap::IndexMap;
use ptmcur_common::{Curation, Evidence, Result, Statement};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::comment::CommentParser;
use crate::grouping::{group_by_pair, CuratedTuple};
use crate::merge::merge_rows;
use crate::resolver::resolve;
use crate::row::ExportRow;
use crate::scope::ExportScope;
use crate::synthesis::synthesize;

// ── Job config ────────────────────────────────────────────────────────────────

/// Parameters for a single export run.
#[derive(Debug, Clone)]
pub struct ExportJob {
    pub scope: ExportScope,
    /// Curation batch (`source` field) to export, e.g. "signor_dephos".
    /// `None` accepts every batch.
    pub curation_source: Option<String>,
}

// ── Result summary ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize)]
pub struct ExportStats {
    pub curations_selected: usize,
    pub curations_unmatched: usize,
    pub groups: usize,
    pub groups_resolved: usize,
    pub rows_synthesized: usize,
    pub rows_exported: usize,
}

#[derive(Debug, Clone)]
pub struct ExportResult {
    pub rows: Vec<ExportRow>,
    pub stats: ExportStats,
}

// ── Curation selection ───────────────────────────────────────────────────────

/// Curations of one batch tagged `correct`, one per (pa_hash, source_hash).
/// Later duplicates replace earlier ones; first-seen order is kept.
pub fn select_curations(curations: &[Curation], source: Option<&str>) -> Vec<Curation> {
    let mut unique: IndexMap<(i64, i64), &Curation> = IndexMap::new();
    for cur in curations {
        if let Some(source) = source {
            if cur.source.as_deref() != Some(source) {
                continue;
            }
        }
        unique.insert((cur.pa_hash, cur.source_hash), cur);
    }
    debug!(n_unique = unique.len(), "Curations after squashing duplicates");

    unique
        .into_values()
        .filter(|cur| cur.is_correct())
        .cloned()
        .collect()
}

// ── Correlation ──────────────────────────────────────────────────────────────

/// Join curations with the statements and evidences they refer to.
/// Returns the tuples and the number of curations that matched nothing.
pub fn curated_tuples(
    statements: &[Statement],
    curations: &[Curation],
    parser: &CommentParser,
) -> (Vec<CuratedTuple>, usize) {
    let stmts_by_hash: HashMap<i64, Rc<Statement>> = statements
        .iter()
        .map(|s| (s.hash, Rc::new(s.clone())))
        .collect();
    let ev_by_source_hash: HashMap<i64, &Evidence> = statements
        .iter()
        .flat_map(|s| s.evidence.iter())
        .filter_map(|ev| ev.source_hash.map(|h| (h, ev)))
        .collect();

    let mut tuples = Vec::with_capacity(curations.len());
    let mut unmatched = 0usize;
    for cur in curations {
        let (Some(stmt), Some(ev)) = (
            stmts_by_hash.get(&cur.pa_hash),
            ev_by_source_hash.get(&cur.source_hash),
        ) else {
            warn!(pa_hash = cur.pa_hash, source_hash = cur.source_hash, "Curation refers to a statement or evidence not in the snapshot");
            unmatched += 1;
            continue;
        };
        tuples.push(CuratedTuple {
            statement: Rc::clone(stmt),
            evidence: (*ev).clone(),
            curation: Some(cur.clone()),
            comment: parser.parse(cur.text.as_deref()),
        });
    }
    (tuples, unmatched)
}

// ── Orchestrator ─────────────────────────────────────────────────────────────

/// Run the export over an already loaded snapshot and curation list.
///
/// Fails only on data-quality violations (several effects in one comment,
/// a row without a curator); groups that cannot be resolved are skipped.
#[instrument(skip_all, fields(mechanism = job.scope.mechanism()))]
pub fn run_export(
    job: &ExportJob,
    statements: &[Statement],
    curations: &[Curation],
    parser: &CommentParser,
) -> Result<ExportResult> {
    let mut stats = ExportStats::default();

    let selected = select_curations(curations, job.curation_source.as_deref());
    stats.curations_selected = selected.len();
    info!("Found {} correct curations", selected.len());

    let (tuples, unmatched) = curated_tuples(statements, &selected, parser);
    stats.curations_unmatched = unmatched;

    let groups = group_by_pair(tuples);
    stats.groups = groups.len();

    let mut rows = Vec::new();
    for (key, members) in &groups {
        debug!(%key, n = members.len(), "Resolving group");
        for member in members {
            debug!(
                stmt_type = member.statement.kind.type_name(),
                text = member.evidence.text.as_deref().unwrap_or(""),
                "  member"
            );
        }

        let Some(resolved) = resolve(key, members, &job.scope)? else {
            continue;
        };
        stats.groups_resolved += 1;

        let candidates = synthesize(&resolved, &job.scope)?;
        stats.rows_synthesized += candidates.len();
        rows.extend(merge_rows(candidates));
    }
    stats.rows_exported = rows.len();

    info!(
        groups = stats.groups,
        resolved = stats.groups_resolved,
        synthesized = stats.rows_synthesized,
        exported = stats.rows_exported,
        "Export finished"
    );
    Ok(ExportResult { rows, stats })
}
