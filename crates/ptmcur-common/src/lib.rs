//! ptmcur-common: shared statement model and errors used across all ptmcur crates.

pub mod error;
pub mod entities;
pub mod amino_acids;

// Re-export commonly used types
pub use entities::{
    Agent, Curation, Evidence, ModType, RegulationFamily, Statement, StatementKind,
};
pub use error::{PtmcurError, Result};
