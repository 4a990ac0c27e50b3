//! Grouping of curated evidence by interacting pair and publication.

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use ptmcur_common::{Curation, Evidence, Statement};

use crate::comment::ParsedComment;

/// One curated piece of evidence with the statement it supports.
/// Placeholder statements built during resolution carry no curation.
#[derive(Debug, Clone)]
pub struct CuratedTuple {
    pub statement: Rc<Statement>,
    pub evidence: Evidence,
    pub curation: Option<Curation>,
    pub comment: ParsedComment,
}

/// (controller name, target name, publication id)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey {
    pub controller: String,
    pub target: String,
    pub pmid: String,
}

impl PairKey {
    pub fn new(controller: impl Into<String>, target: impl Into<String>, pmid: impl Into<String>) -> Self {
        Self {
            controller: controller.into(),
            target: target.into(),
            pmid: pmid.into(),
        }
    }

    /// Enzyme/substrate for modifications, subject/object for regulations.
    pub fn of(stmt: &Statement, ev: &Evidence) -> Self {
        Self::new(
            stmt.controller_name(),
            stmt.target.name.as_str(),
            ev.pmid.as_deref().unwrap_or(""),
        )
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.controller, self.target, self.pmid)
    }
}

/// Groups in first-seen order; tuples keep input order within a group.
pub type PairGroups = IndexMap<PairKey, Vec<CuratedTuple>>;

pub fn group_by_pair<I>(tuples: I) -> PairGroups
where
    I: IntoIterator<Item = CuratedTuple>,
{
    let mut groups = PairGroups::new();
    for tuple in tuples {
        let key = PairKey::of(&tuple.statement, &tuple.evidence);
        groups.entry(key).or_default().push(tuple);
    }
    groups
}
