use thiserror::Error;

/// Reasons an expression could not be evaluated.
///
/// These are ordinary values: the preview path ignores them and keeps the last
/// confirmed result, the submit path shows an error marker.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationError {
    #[error("Invalid characters")]
    InvalidCharacters,
    #[error("Unbalanced parentheses")]
    UnbalancedParentheses,
    #[error("Computation error: {0}")]
    ComputationError(String),
}

/// Message prefix for a result that overflowed or divided by zero.
pub(crate) const NON_FINITE_PREFIX: &str = "Result is not a finite number";

impl EvaluationError {
    /// True when the text parsed but its value is not finite.
    pub fn is_non_finite(&self) -> bool {
        matches!(self, EvaluationError::ComputationError(message) if message.starts_with(NON_FINITE_PREFIX))
    }
}

/// Raw input that does not map onto any token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported input: {0:?}")]
pub struct Rejected(pub String);

pub type EvaluationResult<T> = Result<T, EvaluationError>;
