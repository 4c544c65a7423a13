//! Unified error types for Retrace.
//!
//! This module provides the canonical error type for all cache and store
//! operations. An absent key is never an error: reads return `Ok(None)`
//! and callers check for the empty result instead of matching on a variant.

use thiserror::Error;

/// All Retrace errors.
///
/// This is the canonical error type for cache, store, instrumentation,
/// and replay operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The backing store cannot be reached or refused the operation.
    ///
    /// No retry policy is defined here; the failure propagates to the
    /// caller of the cache operation that triggered it.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A store key holds data of the wrong kind for the operation
    /// (e.g. `incr` on a list, `rpush` on a scalar, `incr` on
    /// non-integer bytes).
    #[error("wrong type: expected {expected}, got {actual}")]
    WrongType {
        /// Expected kind of data
        expected: String,
        /// Actual kind found under the key
        actual: String,
    },

    /// A typed read could not coerce the stored bytes.
    ///
    /// The store is value-type-agnostic at rest, so nothing validates
    /// stored content against a converter's expectations up front.
    #[error("conversion failed: {0}")]
    Conversion(String),

    /// I/O error while writing a replay transcript.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error (bug or invariant violation).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type for Retrace operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this is a store-unavailable error.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Error::Unavailable(_))
    }

    /// Check if this is a wrong-type error.
    pub fn is_wrong_type(&self) -> bool {
        matches!(self, Error::WrongType { .. })
    }

    /// Check if this is a conversion error.
    pub fn is_conversion(&self) -> bool {
        matches!(self, Error::Conversion(_))
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(e: std::string::FromUtf8Error) -> Self {
        Error::Conversion(e.to_string())
    }
}

impl From<std::num::ParseIntError> for Error {
    fn from(e: std::num::ParseIntError) -> Self {
        Error::Conversion(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates() {
        assert!(Error::Unavailable("down".into()).is_unavailable());
        assert!(Error::Conversion("bad int".into()).is_conversion());
        assert!(Error::WrongType {
            expected: "integer".into(),
            actual: "list".into(),
        }
        .is_wrong_type());
        assert!(!Error::Internal("bug".into()).is_conversion());
    }

    #[test]
    fn test_parse_error_converts_to_conversion() {
        let err: Error = "abc".parse::<i64>().unwrap_err().into();
        assert!(err.is_conversion());
    }
}
