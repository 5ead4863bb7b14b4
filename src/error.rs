//! Error types.
//!
//! Malformed input is rejected at the boundary, before any search starts.
//! Running out of time is not an error: the search returns its best-so-far
//! result and flags it in [`SearchProgress`](crate::models::SearchProgress).

use thiserror::Error;

use crate::validation::ValidationError;

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Error returned by [`optimize`](crate::optimize).
#[derive(Debug, Error)]
pub enum OptimizeError {
    #[error("invalid input: {}", summarize(.0))]
    InvalidInput(Vec<ValidationError>),

    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
}

impl From<Vec<ValidationError>> for OptimizeError {
    fn from(errors: Vec<ValidationError>) -> Self {
        OptimizeError::InvalidInput(errors)
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_invalid_input_message_lists_all_errors() {
        let err = OptimizeError::from(vec![
            ValidationError::new(ValidationErrorKind::UnknownWorker, "Assignment 'a' references unknown worker 'E9'"),
            ValidationError::new(ValidationErrorKind::UnknownTask, "Assignment 'a' references unknown task 'T9'"),
        ]);
        let msg = err.to_string();
        assert!(msg.starts_with("invalid input"));
        assert!(msg.contains("E9"));
        assert!(msg.contains("T9"));
    }

    #[test]
    fn test_config_error_is_transparent() {
        let err = OptimizeError::from(ConfigError::Invalid("max_iterations must be > 0".into()));
        assert_eq!(err.to_string(), "Invalid configuration: max_iterations must be > 0");
    }
}
