use thiserror::Error;

#[derive(Debug, Error)]
pub enum PtmcurError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unsupported statement type: {0}")]
    UnsupportedStatement(String),

    #[error("{stmt_type} statement has no {role} agent")]
    MissingAgent { stmt_type: String, role: &'static str },

    #[error("Statement JSON still invalid after {attempts} decode attempts: {source}")]
    JsonRepair {
        attempts: u32,
        #[source]
        source: serde_json::Error,
    },

    #[error("Expected exactly one effect for {context}, found {}: {effects:?}", effects.len())]
    MultipleEffects { context: String, effects: Vec<String> },

    #[error("No curator recorded for row {context}")]
    MissingCurator { context: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PtmcurError>;
