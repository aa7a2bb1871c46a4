//! Core types shared across the callback library
//!
//! This module defines the error taxonomy and the outcome type that the
//! gated action reports. Every failure here is local and synchronous: errors
//! are returned at the point of invocation and never recovered internally.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp type used by timestamping sinks
pub type Timestamp = DateTime<Utc>;

/// Result type for callback operations
pub type Result<T> = std::result::Result<T, CallbackError>;

/// Errors that can occur while dispatching callbacks
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CallbackError {
    /// The predicate rejected the credentials and no error callback was supplied
    #[error("Authentication failed for identity '{identity}'")]
    Authentication { identity: String },

    /// A callback was supplied or invoked with an incompatible argument count
    #[error("Arity mismatch for callback '{name}': expected {expected} argument(s), got {actual}")]
    ArityMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// A symbolic attribute shortcut could not be resolved against an element
    #[error("Unresolved name '{name}' on element {index}")]
    UnresolvedName { name: String, index: usize },
}

impl CallbackError {
    /// Shorthand for an arity mismatch against a (possibly anonymous) callback
    pub fn arity(name: Option<&str>, expected: usize, actual: usize) -> Self {
        CallbackError::ArityMismatch {
            name: name.unwrap_or("<anonymous>").to_string(),
            expected,
            actual,
        }
    }
}

/// Result of a successful `GatedAction::execute` call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The predicate accepted the credentials
    Success,
    /// The predicate rejected the credentials and the error callback ran
    Handled,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success => write!(f, "success"),
            Outcome::Handled => write!(f, "handled"),
        }
    }
}

impl Outcome {
    /// True if the predicate accepted the credentials
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CallbackError::Authentication {
            identity: "alice".to_string(),
        };
        assert_eq!(err.to_string(), "Authentication failed for identity 'alice'");

        let err = CallbackError::arity(None, 0, 2);
        assert_eq!(
            err.to_string(),
            "Arity mismatch for callback '<anonymous>': expected 0 argument(s), got 2"
        );

        let err = CallbackError::UnresolvedName {
            name: "user".to_string(),
            index: 3,
        };
        assert_eq!(err.to_string(), "Unresolved name 'user' on element 3");
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(format!("{}", Outcome::Success), "success");
        assert_eq!(format!("{}", Outcome::Handled), "handled");
        assert!(Outcome::Success.is_success());
        assert!(!Outcome::Handled.is_success());
    }
}
