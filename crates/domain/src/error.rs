//! Unified error types for the domain layer
//!
//! Provides a common error type that can be used across all domain operations,
//! enabling consistent error handling without forcing adapters to use String or anyhow.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Business rule violation
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Creates a validation error for caller-supplied input that breaks a rule.
    ///
    /// # Example
    /// ```ignore
    /// if config.min_interactions > config.max_interactions {
    ///     return Err(DomainError::validation("min_interactions exceeds max_interactions"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a constraint violation error
    pub fn constraint(msg: impl Into<String>) -> Self {
        Self::Constraint(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = DomainError::validation("participants must differ");
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(err.to_string(), "Validation failed: participants must differ");
    }

    #[test]
    fn test_constraint_error() {
        let err = DomainError::constraint("turn 3 follows turn 1");
        assert!(matches!(err, DomainError::Constraint(_)));
        assert_eq!(err.to_string(), "Constraint violation: turn 3 follows turn 1");
    }

    #[test]
    fn test_parse_error() {
        let err = DomainError::parse("Unknown mood: furious");
        assert_eq!(err.to_string(), "Parse error: Unknown mood: furious");
    }
}
