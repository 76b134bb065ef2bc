//! Validation error types

use std::fmt;

/// Validation error for student input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// String doesn't match required format (e.g., ISO date)
    InvalidFormat { field: &'static str, reason: &'static str },
}

impl ValidationError {
    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            Self::Empty { field } | Self::InvalidFormat { field, .. } => field,
        }
    }

    /// True when the error comes from a missing value rather than a malformed one
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Empty { .. })
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::InvalidFormat { field, reason } => {
                write!(f, "{}: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::Empty { field: "name" };
        assert_eq!(err.to_string(), "name cannot be empty");

        let err = ValidationError::InvalidFormat {
            field: "birth date",
            reason: "expected YYYY-MM-DD",
        };
        assert_eq!(err.to_string(), "birth date: expected YYYY-MM-DD");
    }

    #[test]
    fn missing_vs_malformed() {
        assert!(ValidationError::Empty { field: "cpf" }.is_missing());
        assert!(!ValidationError::InvalidFormat {
            field: "birth date",
            reason: "bad"
        }
        .is_missing());
    }
}
