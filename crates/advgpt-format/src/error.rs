use std::path::PathBuf;

use crate::validation::ValidationError;

/// Errors that can occur while saving or loading a game document.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// The document failed validation; nothing was written or returned.
    #[error("game document failed validation with {} error(s)", .errors.len())]
    Invalid { errors: Vec<ValidationError> },

    /// The text is not well-formed JSON.
    #[error("parse error in {origin}: {detail}")]
    Parse { origin: String, detail: String },

    /// The JSON passed validation but a field has a type the schema rejects,
    /// e.g. a non-boolean `visited`.
    #[error("schema error in {origin}: {detail}")]
    Schema { origin: String, detail: String },

    /// The document could not be encoded as JSON.
    #[error("serialization error: {detail}")]
    Serialize { detail: String },

    /// Reading or writing the file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl FormatError {
    /// The validation errors behind an [`FormatError::Invalid`] refusal.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            FormatError::Invalid { errors } => errors.as_slice(),
            _ => &[],
        }
    }
}
