//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

/// Evaluator error type
///
/// Only input validation ever reaches callers of the public evaluation API.
/// Network and config errors stay inside the signal collectors, where they
/// are downgraded to "signal unavailable".
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum EvaluatorError {
    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Network error
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Configuration error
    #[error("Config error: {0}")]
    ConfigError(String),
}

impl EvaluatorError {
    /// Whether it is expected behavior (bad user input), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::ValidationError(_))
    }
}

/// Evaluator Result type alias
pub type EvaluatorResult<T> = std::result::Result<T, EvaluatorError>;
