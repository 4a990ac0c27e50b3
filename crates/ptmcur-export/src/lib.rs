//! ptmcur-export: turns curated modification/regulation evidence into
//! 26-column curation rows.
//!
//! Stages, in pipeline order: [`comment`] parsing, [`grouping`] by
//! (controller, target, publication), [`resolver`] pairing, [`synthesis`]
//! of candidate rows, [`merge`] and finally [`csv_export`].

pub mod comment;
pub mod scope;
pub mod grouping;
pub mod resolver;
pub mod row;
pub mod synthesis;
pub mod merge;
pub mod csv_export;
pub mod pipeline;

pub use comment::{CommentField, CommentParser, ParsedComment};
pub use csv_export::{write_csv, write_rows};
pub use pipeline::{run_export, select_curations, ExportJob, ExportResult, ExportStats};
pub use row::{ExportRow, HEADER};
pub use scope::ExportScope;
