use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SampPickError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Configuration(String),

    #[error("Math Domain Error: {0}")]
    MathDomain(String),

    #[error("Malformed Input in '{}' (line {line}): {reason}", .path.display())]
    MalformedInput {
        path: PathBuf,
        line: u64,
        reason: String,
    },

    #[error("Chart Rendering Error: {0}")]
    Chart(String),
}

pub type SpResult<T> = Result<T, SampPickError>;
