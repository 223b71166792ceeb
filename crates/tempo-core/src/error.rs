//! Error types for the planner library.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::backend::BackendError;

/// Comprehensive error type for all planner operations.
///
/// An empty eligible set is not an error: it yields an empty plan. Streamed
/// partials that are still missing fields are dropped quietly and never
/// surface here.
#[derive(Error, Debug)]
pub enum PlannerError {
    /// The generation backend cannot run at all
    #[error("Plan generation is unavailable: {reason}")]
    BackendUnavailable { reason: String },
    /// The backend ran but returned an error or an unusable payload
    #[error("Plan generation failed: {message}")]
    GenerationFailed { message: String },
    /// A newer generation superseded this one, or the caller cancelled it
    #[error("Plan generation was cancelled")]
    Cancelled,
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG base directory errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> PlannerError {
        PlannerError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl PlannerError {
    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a generation failure from any displayable message.
    pub fn generation_failed(message: impl fmt::Display) -> Self {
        PlannerError::GenerationFailed {
            message: message.to_string(),
        }
    }

    /// Returns true for errors raised by the generation backend.
    pub fn is_backend_error(&self) -> bool {
        matches!(
            self,
            PlannerError::BackendUnavailable { .. } | PlannerError::GenerationFailed { .. }
        )
    }
}

impl From<BackendError> for PlannerError {
    fn from(error: BackendError) -> Self {
        match error {
            BackendError::Unavailable(reason) => PlannerError::BackendUnavailable { reason },
            BackendError::Failed(message) => PlannerError::GenerationFailed { message },
            BackendError::Malformed(message) => PlannerError::GenerationFailed {
                message: format!("malformed response: {message}"),
            },
        }
    }
}

/// Result type alias for planner operations
pub type Result<T> = std::result::Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_errors_map_to_taxonomy() {
        let err: PlannerError = BackendError::Unavailable("model not downloaded".into()).into();
        assert!(matches!(err, PlannerError::BackendUnavailable { .. }));
        assert!(err.to_string().contains("model not downloaded"));

        let err: PlannerError = BackendError::Failed("quota exceeded".into()).into();
        assert!(matches!(err, PlannerError::GenerationFailed { .. }));

        let err: PlannerError = BackendError::Malformed("expected object".into()).into();
        assert!(err.to_string().contains("malformed response: expected object"));
        assert!(err.is_backend_error());
    }

    #[test]
    fn test_invalid_input_builder() {
        let err = PlannerError::invalid_input("maxSessionsPerDay").with_reason("must be positive");
        assert_eq!(
            err.to_string(),
            "Invalid input for field 'maxSessionsPerDay': must be positive"
        );
        assert!(!err.is_backend_error());
    }
}
