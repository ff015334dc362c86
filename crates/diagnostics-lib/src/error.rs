//! Error types for diagnostics documents

use thiserror::Error;

/// Errors raised while converting diagnostics to and from documents
#[derive(Debug, Error)]
pub enum DiagnosticsError {
    /// The aggregate could not be encoded
    #[error("failed to serialize application diagnostics: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The input was not a valid diagnostics document
    #[error("failed to parse application diagnostics: {0}")]
    Parse(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DiagnosticsError>;
