//! End-to-end candidate pipeline.
//!
//! Orchestrates one candidate job:
//!   1. Read the processed-statement corpus, admitting in-scope statements
//!   2. Load all curations
//!   3. Select novel modifications with same-paper regulations
//!   4. Write the sorted snapshot curators work from (and the export reads)

use std::path::PathBuf;

use ptmcur_common::Result;
use ptmcur_export::ExportScope;
use serde::Serialize;
use tracing::{info, instrument};

use crate::candidates::{admits, select_candidates, CandidateStats};
use crate::corpus::{read_corpus, CorpusStats};
use crate::curations::CurationSource;
use crate::gene_lists::SemanticConstraint;
use crate::snapshot::write_snapshot;

// ── Job config ────────────────────────────────────────────────────────────────

/// Parameters for a single candidate run.
#[derive(Debug, Clone)]
pub struct CandidateJob {
    pub scope: ExportScope,
    pub corpus_path: PathBuf,
    pub snapshot_path: PathBuf,
}

impl CandidateJob {
    /// `<mod_key>s_with_reg_sorted.json` under `dir`.
    pub fn default_snapshot_name(scope: &ExportScope) -> String {
        format!("{}s_with_reg_sorted.json", scope.mechanism())
    }
}

// ── Result summary ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct CandidateRunSummary {
    pub corpus: CorpusStats,
    pub curations: usize,
    pub candidates: CandidateStats,
    pub snapshot_path: PathBuf,
}

// ── Orchestrator ─────────────────────────────────────────────────────────────

#[instrument(skip_all, fields(mechanism = job.scope.mechanism()))]
pub fn run_candidates(
    job: &CandidateJob,
    constraint: Option<&SemanticConstraint>,
    curation_source: &dyn CurationSource,
) -> Result<CandidateRunSummary> {
    let (statements, corpus) = read_corpus(&job.corpus_path, |stmt| admits(stmt, &job.scope, constraint))?;
    info!(
        "Got {} statements of type {} and regulation types {:?}",
        statements.len(),
        job.scope.mechanism(),
        job.scope.regulation_types.iter().map(|r| r.as_str()).collect::<Vec<_>>()
    );

    let curations = curation_source.curations()?;
    let result = select_candidates(statements, &curations, &job.scope);
    write_snapshot(&job.snapshot_path, &result.statements)?;

    Ok(CandidateRunSummary {
        corpus,
        curations: curations.len(),
        candidates: result.stats,
        snapshot_path: job.snapshot_path.clone(),
    })
}
