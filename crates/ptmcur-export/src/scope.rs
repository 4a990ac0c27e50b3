//! Which statements an export run pairs with each other.

use std::collections::BTreeSet;

use ptmcur_common::{ModType, RegulationFamily, Statement};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportScope {
    pub mod_type: ModType,
    pub regulation_types: BTreeSet<RegulationFamily>,
}

impl ExportScope {
    pub fn new(mod_type: ModType, regulation_types: impl IntoIterator<Item = RegulationFamily>) -> Self {
        Self {
            mod_type,
            regulation_types: regulation_types.into_iter().collect(),
        }
    }

    /// Exported MECHANISM, e.g. "dephosphorylation".
    pub fn mechanism(&self) -> &'static str {
        self.mod_type.mod_key()
    }

    pub fn is_modification(&self, stmt: &Statement) -> bool {
        stmt.kind.mod_type() == Some(self.mod_type)
    }

    pub fn is_regulation(&self, stmt: &Statement) -> bool {
        stmt.kind
            .regulation_family()
            .is_some_and(|family| self.regulation_types.contains(&family))
    }
}
