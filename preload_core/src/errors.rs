//! # Error Types
//!
//! Structured error types for preload_core. These errors are designed to be
//! informative for both humans and LLMs, providing enough context to
//! understand and fix issues programmatically.
//!
//! Calculations raise exactly one kind of error, `InvalidInput`, at the
//! point of the first violated precondition. There is no retry and no
//! partial result: an operation either returns a fully-computed value or
//! fails outright.
//!
//! ## Example
//!
//! ```rust
//! use preload_core::errors::{CalcError, CalcResult};
//!
//! fn validate_pitch(pitch_cm: f64) -> CalcResult<()> {
//!     if pitch_cm <= 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "thread_pitch_cm".to_string(),
//!             value: pitch_cm.to_string(),
//!             reason: "Thread pitch must be greater than zero".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for preload_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
///
/// Each variant provides specific context about what went wrong,
/// enabling programmatic error handling by LLMs and other consumers.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (zero/negative divisor, inverted torque
    /// ordering, negative safety factor, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Implant system or model not found in the catalog
    #[error("Implant system not found: {name}")]
    SystemNotFound { name: String },

    /// JSON serialization/deserialization error (catalog documents)
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a SystemNotFound error
    pub fn system_not_found(name: impl Into<String>) -> Self {
        CalcError::SystemNotFound { name: name.into() }
    }

    /// Create a SerializationError
    pub fn serialization_error(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::SystemNotFound { .. } => "SYSTEM_NOT_FOUND",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("thread_pitch_cm", "-0.04", "Thread pitch must be greater than zero");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            CalcError::invalid_input("stress_mpa", "0", "Stress must be positive").error_code(),
            "INVALID_INPUT"
        );
        assert_eq!(
            CalcError::system_not_found("Acme Dental").error_code(),
            "SYSTEM_NOT_FOUND"
        );
    }

    #[test]
    fn test_error_display() {
        let error = CalcError::invalid_input("screw_diameter_cm", "0", "Screw diameter must be positive");
        let msg = format!("{}", error);
        assert!(msg.contains("screw_diameter_cm"));
        assert!(msg.contains("positive"));
    }
}
