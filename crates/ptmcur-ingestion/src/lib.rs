//! ptmcur-ingestion: builds the candidate statement snapshot for a curation
//! batch.
//! - Processed-statement corpus reading (gzip TSV, escaped JSON repair)
//! - Enzyme-class gene lists and semantic constraints
//! - Curation service client with local cache
//! - Candidate selection and snapshot I/O

pub mod corpus;
pub mod gene_lists;
pub mod curations;
pub mod candidates;
pub mod snapshot;
pub mod pipeline;

pub use candidates::{select_candidates, CandidateResult, CandidateStats};
pub use curations::{CurationClient, CurationFile, CurationSource};
pub use gene_lists::{GeneList, SemanticConstraint};
pub use pipeline::{run_candidates, CandidateJob, CandidateRunSummary};
pub use snapshot::{read_snapshot, write_snapshot};
