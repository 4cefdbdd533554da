// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Error types for store collaborators.

use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors produced by store collaborators.
///
/// A lookup that simply finds nothing is `Ok(None)`, not an error; these
/// variants cover infrastructure failure and constraint violations so the
/// caller can tell "not there" apart from "store is down".
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be reached or failed mid-operation.
    #[error("store unavailable: {message}")]
    Unavailable {
        /// Description of the failure.
        message: String,
    },

    /// A uniqueness constraint was violated on create.
    #[error("duplicate value for {field}")]
    Duplicate {
        /// The field that collided.
        field: String,
    },

    /// A stored value could not be produced (e.g. hashing failed).
    #[error("store internal error: {message}")]
    Internal {
        /// Description of the failure.
        message: String,
    },
}

impl StoreError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a duplicate-value error.
    pub fn duplicate(field: impl Into<String>) -> Self {
        Self::Duplicate {
            field: field.into(),
        }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns `true` if this error is a transient infrastructure failure.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::unavailable("connection refused");
        assert_eq!(err.to_string(), "store unavailable: connection refused");

        let err = StoreError::duplicate("email");
        assert_eq!(err.to_string(), "duplicate value for email");
    }

    #[test]
    fn test_is_unavailable() {
        assert!(StoreError::unavailable("down").is_unavailable());
        assert!(!StoreError::duplicate("email").is_unavailable());
    }
}
