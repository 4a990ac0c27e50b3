//! Candidate selection for a curation batch.
//!
//! Picks modification statements of one type that SIGNOR does not already
//! have, together with the regulation statements reported for the same
//! enzyme/substrate pair in the same paper, so curators can judge the
//! modification and its regulatory effect side by side.

use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap, HashSet};

use indexmap::{IndexMap, IndexSet};
use ptmcur_common::{Curation, Statement};
use ptmcur_export::ExportScope;
use serde::Serialize;
use tracing::{debug, info};

use crate::gene_lists::SemanticConstraint;

/// Curation tags that count as a positive judgment when filtering.
pub const CORRECT_TAGS: &[&str] = &["correct", "act_vs_amt", "hypothesis"];

const SIGNOR_SOURCE: &str = "signor";

type Pair = (String, String);

#[derive(Debug, Clone, Default, Serialize)]
pub struct CandidateStats {
    pub input: usize,
    pub after_curation_filter: usize,
    pub novel_modifications: usize,
    pub relevant: usize,
    pub unique: usize,
}

#[derive(Debug, Clone)]
pub struct CandidateResult {
    pub statements: Vec<Statement>,
    pub stats: CandidateStats,
}

/// Per-statement admission test applied while reading the corpus: statement
/// type in scope, HGNC-grounded controller and target, no self-regulation,
/// and the enzyme-class constraint if there is one.
pub fn admits(stmt: &Statement, scope: &ExportScope, constraint: Option<&SemanticConstraint>) -> bool {
    if !(scope.is_modification(stmt) || scope.is_regulation(stmt)) {
        return false;
    }
    let Some(controller) = &stmt.controller else {
        return false;
    };
    if !controller.has_ref("HGNC") || !stmt.target.has_ref("HGNC") {
        return false;
    }
    if controller.name == stmt.target.name {
        return false;
    }
    constraint.map_or(true, |c| c.is_satisfied_by(stmt))
}

/// Drop statements whose curations are all negative. Uncurated statements stay.
pub fn filter_by_curation(statements: Vec<Statement>, curations: &[Curation]) -> Vec<Statement> {
    let mut correct: HashSet<i64> = HashSet::new();
    let mut incorrect: HashSet<i64> = HashSet::new();
    for cur in curations {
        if CORRECT_TAGS.contains(&cur.tag.as_str()) {
            correct.insert(cur.pa_hash);
        } else {
            incorrect.insert(cur.pa_hash);
        }
    }
    statements
        .into_iter()
        .filter(|s| !incorrect.contains(&s.hash) || correct.contains(&s.hash))
        .collect()
}

/// Sites SIGNOR already records for each enzyme/substrate pair.
#[derive(Debug, Default)]
struct SignorCoverage {
    positions: HashMap<Pair, BTreeSet<String>>,
    site_less: HashSet<Pair>,
}

impl SignorCoverage {
    fn from_modifications<'a>(mods: impl Iterator<Item = &'a Statement>) -> Self {
        let mut coverage = Self::default();
        for stmt in mods {
            let from_signor = stmt
                .evidence
                .iter()
                .any(|ev| ev.source_api.as_deref() == Some(SIGNOR_SOURCE));
            if !from_signor {
                continue;
            }
            match &stmt.position {
                Some(pos) => {
                    coverage.positions.entry(stmt.pair()).or_default().insert(pos.clone());
                }
                None => {
                    coverage.site_less.insert(stmt.pair());
                }
            }
        }
        coverage
    }

    /// Whether SIGNOR already covers this modification. Known positions take
    /// precedence over a site-less entry for the same pair.
    fn covers(&self, stmt: &Statement) -> bool {
        let pair = stmt.pair();
        if let Some(known) = self.positions.get(&pair) {
            return stmt.position.as_ref().map_or(true, |p| known.contains(p));
        }
        self.site_less.contains(&pair) && stmt.position.is_none()
    }
}

/// Select and order the candidate statements of one batch.
pub fn select_candidates(
    statements: Vec<Statement>,
    curations: &[Curation],
    scope: &ExportScope,
) -> CandidateResult {
    let mut stats = CandidateStats { input: statements.len(), ..Default::default() };

    let stmts = filter_by_curation(statements, curations);
    stats.after_curation_filter = stmts.len();
    info!("Filtered to {} statements by curation", stmts.len());

    let coverage = SignorCoverage::from_modifications(stmts.iter().filter(|s| scope.is_modification(s)));

    // Novel modifications, by pair
    let mut novel: IndexMap<Pair, HashSet<usize>> = IndexMap::new();
    for (idx, stmt) in stmts.iter().enumerate() {
        if scope.is_modification(stmt) && !coverage.covers(stmt) {
            novel.entry(stmt.pair()).or_default().insert(idx);
        }
    }
    stats.novel_modifications = novel.values().map(HashSet::len).sum();
    debug!(pairs = novel.len(), mods = stats.novel_modifications, "Novel modifications");

    // Statements of those pairs, by paper
    let mut by_paper: IndexMap<&str, IndexMap<Pair, IndexSet<usize>>> = IndexMap::new();
    for (idx, stmt) in stmts.iter().enumerate() {
        let pair = stmt.pair();
        if !novel.contains_key(&pair) {
            continue;
        }
        for ev in &stmt.evidence {
            let Some(pmid) = ev.pmid.as_deref().filter(|p| !p.is_empty()) else {
                continue;
            };
            by_paper
                .entry(pmid)
                .or_default()
                .entry(pair.clone())
                .or_default()
                .insert(idx);
        }
    }

    // Keep papers reporting both a novel modification and a regulation
    let mut relevant: IndexSet<usize> = IndexSet::new();
    for (paper, pairs) in &by_paper {
        for (pair, members) in pairs {
            let novel_mods: Vec<usize> = members
                .iter()
                .copied()
                .filter(|idx| novel[pair].contains(idx))
                .collect();
            let regulations: Vec<usize> = members
                .iter()
                .copied()
                .filter(|&idx| scope.is_regulation(&stmts[idx]))
                .collect();
            if novel_mods.is_empty() || regulations.is_empty() {
                continue;
            }
            debug!(paper, a = %pair.0, b = %pair.1, "Paper has modification and regulation");
            relevant.extend(novel_mods);
            relevant.extend(regulations);
        }
    }
    stats.relevant = relevant.len();

    let merged = merge_by_hash(relevant.into_iter().map(|idx| &stmts[idx]));
    let sorted = sort_for_curation(merged, scope);
    stats.unique = sorted.len();
    info!(
        input = stats.input,
        relevant = stats.relevant,
        unique = stats.unique,
        "Selected {} candidate statements",
        sorted.len()
    );

    CandidateResult { statements: sorted, stats }
}

/// Collapse statements sharing a hash, pooling their evidence.
/// Evidence is ordered by pmid.
pub fn merge_by_hash<'a>(statements: impl IntoIterator<Item = &'a Statement>) -> Vec<Statement> {
    let mut by_hash: IndexMap<i64, Statement> = IndexMap::new();
    for stmt in statements {
        match by_hash.get_mut(&stmt.hash) {
            Some(existing) => {
                for ev in &stmt.evidence {
                    if !existing.evidence.contains(ev) {
                        existing.evidence.push(ev.clone());
                    }
                }
            }
            None => {
                by_hash.insert(stmt.hash, stmt.clone());
            }
        }
    }
    by_hash
        .into_values()
        .map(|mut stmt| {
            stmt.evidence.sort_by(|a, b| {
                a.pmid.as_deref().unwrap_or("").cmp(b.pmid.as_deref().unwrap_or(""))
            });
            stmt
        })
        .collect()
}

/// Order pairs by how much modification evidence they have, modifications
/// first within a pair, then by statement evidence count.
pub fn sort_for_curation(mut statements: Vec<Statement>, scope: &ExportScope) -> Vec<Statement> {
    let mut mod_evidence: HashMap<Pair, usize> = HashMap::new();
    for stmt in statements.iter().filter(|s| scope.is_modification(s)) {
        *mod_evidence.entry(stmt.pair()).or_default() += stmt.evidence.len();
    }
    statements.sort_by_cached_key(|stmt| {
        let pair = stmt.pair();
        let group_evidence = mod_evidence.get(&pair).copied().unwrap_or(0);
        let type_rank = if scope.is_modification(stmt) { 0 } else { 1 };
        (Reverse(group_evidence), pair, type_rank, Reverse(stmt.evidence.len()))
    });
    statements
}

#[cfg(test)]
mod tests {
    use super::*;
    use ptmcur_common::{Agent, Evidence, ModType, RegulationFamily, StatementKind};

    const DEPHOS: StatementKind = StatementKind::Modification(ModType::Dephosphorylation);

    fn scope() -> ExportScope {
        ExportScope::new(ModType::Dephosphorylation, [RegulationFamily::Activity])
    }

    fn stmt(kind: StatementKind, a: &str, b: &str, hash: i64, pos: Option<&str>, evs: &[(&str, &str)]) -> Statement {
        let mut s = Statement::new(
            kind,
            Some(Agent::new(a).with_ref("HGNC", "1")),
            Agent::new(b).with_ref("HGNC", "2"),
        );
        s.hash = hash;
        s.residue = pos.map(|_| "S".to_string());
        s.position = pos.map(str::to_string);
        s.evidence = evs
            .iter()
            .map(|(api, pmid)| Evidence {
                source_api: Some(api.to_string()),
                pmid: Some(pmid.to_string()),
                ..Default::default()
            })
            .collect();
        s
    }

    fn curation(pa_hash: i64, tag: &str) -> Curation {
        Curation {
            pa_hash,
            source_hash: 0,
            tag: tag.into(),
            source: None,
            text: None,
            curator: None,
        }
    }

    #[test]
    fn test_admits() {
        let s = scope();
        assert!(admits(&stmt(DEPHOS, "PTPN1", "INSR", 1, None, &[]), &s, None));
        assert!(!admits(&stmt(DEPHOS, "INSR", "INSR", 1, None, &[]), &s, None));
        assert!(!admits(&stmt(StatementKind::IncreaseAmount, "PTPN1", "INSR", 1, None, &[]), &s, None));

        let mut ungrounded = stmt(DEPHOS, "PTPN1", "INSR", 1, None, &[]);
        ungrounded.target = Agent::new("INSR").with_ref("UP", "P06213");
        assert!(!admits(&ungrounded, &s, None));

        let constraint = SemanticConstraint::Phosphatase(crate::gene_lists::GeneList::from_text("PTPN2"));
        assert!(!admits(&stmt(DEPHOS, "PTPN1", "INSR", 1, None, &[]), &s, Some(&constraint)));
    }

    #[test]
    fn test_curation_filter() {
        let stmts = vec![
            stmt(DEPHOS, "A", "B", 1, None, &[]),
            stmt(DEPHOS, "A", "B", 2, None, &[]),
            stmt(DEPHOS, "A", "B", 3, None, &[]),
            stmt(DEPHOS, "A", "B", 4, None, &[]),
        ];
        let curations = vec![
            curation(2, "incorrect"),
            curation(3, "incorrect"),
            curation(3, "correct"),
            curation(4, "hypothesis"),
        ];
        let kept: Vec<i64> = filter_by_curation(stmts, &curations).iter().map(|s| s.hash).collect();
        assert_eq!(kept, vec![1, 3, 4]);
    }

    #[test]
    fn test_signor_known_sites_are_not_novel() {
        let stmts = vec![
            stmt(DEPHOS, "PTPN1", "INSR", 1, Some("1150"), &[("signor", "9")]),
            stmt(DEPHOS, "PTPN1", "INSR", 2, Some("1150"), &[("reach", "100")]),
            stmt(DEPHOS, "PTPN1", "INSR", 3, None, &[("reach", "100")]),
            stmt(DEPHOS, "PTPN1", "INSR", 4, Some("1151"), &[("reach", "100")]),
            stmt(StatementKind::Inhibition, "PTPN1", "INSR", 5, None, &[("reach", "100")]),
        ];
        let result = select_candidates(stmts, &[], &scope());
        let hashes: Vec<i64> = result.statements.iter().map(|s| s.hash).collect();
        assert_eq!(hashes, vec![4, 5]);
    }

    #[test]
    fn test_signor_site_less_entry_only_blocks_site_less_mods() {
        let stmts = vec![
            stmt(DEPHOS, "PPP2CA", "AKT1", 1, None, &[("signor", "9")]),
            stmt(DEPHOS, "PPP2CA", "AKT1", 2, None, &[("reach", "100")]),
            stmt(DEPHOS, "PPP2CA", "AKT1", 3, Some("473"), &[("reach", "100")]),
            stmt(StatementKind::Inhibition, "PPP2CA", "AKT1", 4, None, &[("reach", "100")]),
        ];
        let hashes: Vec<i64> = select_candidates(stmts, &[], &scope())
            .statements
            .iter()
            .map(|s| s.hash)
            .collect();
        assert_eq!(hashes, vec![3, 4]);
    }

    #[test]
    fn test_paper_needs_both_modification_and_regulation() {
        let stmts = vec![
            stmt(DEPHOS, "PTPN1", "INSR", 1, None, &[("reach", "100")]),
            stmt(StatementKind::Inhibition, "PTPN1", "INSR", 2, None, &[("reach", "200")]),
        ];
        let result = select_candidates(stmts, &[], &scope());
        assert!(result.statements.is_empty());
        assert_eq!(result.stats.novel_modifications, 1);
    }

    #[test]
    fn test_merge_by_hash_pools_evidence_sorted_by_pmid() {
        let a = stmt(DEPHOS, "PTPN1", "INSR", 1, None, &[("reach", "300")]);
        let b = stmt(DEPHOS, "PTPN1", "INSR", 1, None, &[("sparser", "100")]);
        let merged = merge_by_hash([&a, &b, &a]);
        assert_eq!(merged.len(), 1);
        let pmids: Vec<_> = merged[0].evidence.iter().map(|e| e.pmid.as_deref().unwrap()).collect();
        assert_eq!(pmids, vec!["100", "300"]);
    }

    #[test]
    fn test_sort_order() {
        let stmts = vec![
            stmt(StatementKind::Inhibition, "B", "Y", 1, None, &[("reach", "1"), ("reach", "2")]),
            stmt(DEPHOS, "A", "X", 2, None, &[("reach", "1")]),
            stmt(DEPHOS, "B", "Y", 3, None, &[("reach", "1")]),
            stmt(DEPHOS, "B", "Y", 4, Some("5"), &[("reach", "1"), ("reach", "2")]),
            stmt(StatementKind::Inhibition, "A", "X", 5, None, &[("reach", "1")]),
        ];
        let hashes: Vec<i64> = sort_for_curation(stmts, &scope()).iter().map(|s| s.hash).collect();
        assert_eq!(hashes, vec![4, 3, 1, 2, 5]);
    }
}
