//! Typed errors for the estimator library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// Errors that can occur during estimation operations.
#[derive(Debug, Error)]
pub enum EstimatorError {
    /// Completion provider unavailable or failed
    #[error("completion error: {0}")]
    Completion(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Retry budget spent without a parseable bedroom count
    #[error("no bedroom count extracted for {qpid} after {attempts} attempts")]
    ExtractionExhausted { qpid: String, attempts: usize },

    /// Record source produced an unusable row
    #[error("record error: {0}")]
    Records(String),

    /// CSV parsing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

/// Result type alias for estimation operations.
pub type Result<T> = std::result::Result<T, EstimatorError>;
