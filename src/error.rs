//! Error types for the vagueness crate

use thiserror::Error;

/// Main error type for the vagueness crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("{operation} is not supported by {dynamics} dynamics")]
    NotSupported {
        operation: &'static str,
        dynamics: String,
    },

    #[error("shape mismatch in {context}: expected {expected_rows}x{expected_cols}, got {rows}x{cols}")]
    ShapeMismatch {
        context: String,
        expected_rows: usize,
        expected_cols: usize,
        rows: usize,
        cols: usize,
    },

    #[error("ragged matrix: row {row} has {got} entries, expected {expected}")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("invalid prior distribution '{input}'. Expected one of: {expected}")]
    ParsePriorDistribution { input: String, expected: String },

    #[error("invalid dynamics '{input}'. Expected one of: {expected}")]
    ParseDynamics { input: String, expected: String },

    #[error("invalid numeric value '{value}' at row {row} of {context}")]
    ParseNumber {
        value: String,
        row: usize,
        context: String,
    },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("configuration parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
