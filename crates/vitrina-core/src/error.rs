//! Error types for Vitrina.
//!
//! Cache reads and writes never fail: a miss or an expired entry is a
//! normal `None`. The variants below cover the few operations that can
//! reject their input (regex invalidation, configuration, filter encoding).
//!
//! # Example
//!
//! ```
//! use vitrina_core::{Result, VitrinaError};
//!
//! fn ttl_from_settings(ttl_ms: u64) -> Result<u64> {
//!     if ttl_ms == 0 {
//!         return Err(VitrinaError::validation_error(
//!             "cache.default_ttl_ms",
//!             "must be greater than zero",
//!         ));
//!     }
//!     Ok(ttl_ms)
//! }
//!
//! assert!(ttl_from_settings(0).is_err());
//! ```

use thiserror::Error;

/// Main error type for Vitrina operations.
#[derive(Debug, Error)]
pub enum VitrinaError {
    /// An invalidation pattern is not a valid regular expression.
    #[error("Invalid invalidation pattern '{pattern}': {cause}")]
    InvalidPattern {
        /// The pattern as supplied by the caller
        pattern: String,
        /// The regex compiler error
        #[source]
        cause: regex::Error,
    },

    /// Validation error for configuration values.
    #[error("Validation error for field '{field}': {message}")]
    ValidationError {
        /// Field that failed validation
        field: String,
        /// Description of the validation failure
        message: String,
    },

    /// A filter object could not be serialized into a key segment.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl VitrinaError {
    /// Creates an InvalidPattern error from a regex compile failure.
    pub fn invalid_pattern(pattern: impl Into<String>, cause: regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            cause,
        }
    }

    /// Creates a ValidationError.
    pub fn validation_error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates an Internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true if this error comes from an invalid regex.
    pub fn is_invalid_pattern(&self) -> bool {
        matches!(self, Self::InvalidPattern { .. })
    }

    /// Returns true if this is a validation error.
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Self::ValidationError { .. })
    }
}

/// Type alias for Results with VitrinaError.
pub type Result<T> = std::result::Result<T, VitrinaError>;
