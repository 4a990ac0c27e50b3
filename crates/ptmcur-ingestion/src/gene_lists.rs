//! Enzyme-class gene lists and the semantic constraints built on them.
//!
//! A candidate dephosphorylation must be catalysed by a phosphatase, a
//! phosphorylation by a kinase, a ubiquitination by an E3 ligase. Each class
//! is a plain text file with one gene symbol per line.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use ptmcur_common::{ModType, PtmcurError, Result, Statement};
use tracing::info;

/// Evidence text that marks ubiquitination statements imported from UbiNet
/// rather than read from the literature.
const UBINET_TEXT: &str = "UbiNet 2.0";

#[derive(Debug, Clone, Default)]
pub struct GeneList {
    symbols: HashSet<String>,
}

impl GeneList {
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            PtmcurError::Config(format!("cannot read gene list {}: {e}", path.display()))
        })?;
        let list = Self::from_text(&text);
        info!(path = %path.display(), n = list.len(), "Loaded gene list");
        Ok(list)
    }

    /// One symbol per line; blank lines are ignored.
    pub fn from_text(text: &str) -> Self {
        let symbols = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();
        Self { symbols }
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains(symbol)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Enzyme-class requirement on a statement's controller.
#[derive(Debug, Clone)]
pub enum SemanticConstraint {
    Phosphatase(GeneList),
    Kinase(GeneList),
    UbiquitinLigase(GeneList),
}

impl SemanticConstraint {
    /// Which gene list a modification type needs, if any.
    pub fn required_list(mod_type: ModType) -> Option<&'static str> {
        match mod_type {
            ModType::Dephosphorylation => Some("phosphatases"),
            ModType::Phosphorylation => Some("kinases"),
            ModType::Ubiquitination => Some("e3_ligases"),
            _ => None,
        }
    }

    /// Build the constraint for `mod_type`, loading its list with `load`.
    /// `Ok(None)` for modification types without a constraint.
    pub fn for_mod_type<F>(mod_type: ModType, load: F) -> Result<Option<Self>>
    where
        F: FnOnce(&'static str) -> Result<GeneList>,
    {
        let Some(list_name) = Self::required_list(mod_type) else {
            return Ok(None);
        };
        let list = load(list_name)?;
        Ok(Some(match mod_type {
            ModType::Dephosphorylation => SemanticConstraint::Phosphatase(list),
            ModType::Phosphorylation => SemanticConstraint::Kinase(list),
            _ => SemanticConstraint::UbiquitinLigase(list),
        }))
    }

    pub fn is_satisfied_by(&self, stmt: &Statement) -> bool {
        let controller = stmt.controller_name();
        match self {
            SemanticConstraint::Phosphatase(list) | SemanticConstraint::Kinase(list) => {
                list.contains(controller)
            }
            SemanticConstraint::UbiquitinLigase(list) => {
                let from_ubinet = stmt
                    .evidence
                    .first()
                    .and_then(|ev| ev.text.as_deref())
                    == Some(UBINET_TEXT);
                !from_ubinet && list.contains(controller)
            }
        }
    }
}
