//! Document store error types
//!
//! Any error here surfaces to HTTP clients as a server error carrying the
//! error's display text verbatim, so messages are written for that audience.

use std::io;

use thiserror::Error;

/// Result type for document store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Document store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// No store has been configured for this process
    #[error("Database not available")]
    Unavailable,

    /// Underlying file I/O failed
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    /// A persisted line failed checksum or format validation
    #[error("Data corruption in collection '{collection}' at line {line}: {reason}")]
    Corruption {
        collection: String,
        line: usize,
        reason: String,
    },

    /// Document could not be encoded or decoded as JSON
    #[error("Document serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Collection names are restricted to lowercase ASCII, digits and '_'
    #[error("Invalid collection name: '{0}'")]
    InvalidCollection(String),

    /// Only JSON objects can be stored as documents
    #[error("Document must be a JSON object")]
    NotAnObject,

    /// A thread panicked while holding the store lock
    #[error("Lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    /// Wraps an I/O error with a description of what was being attempted
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Builds a corruption error for a line of a collection file
    pub fn corruption(collection: &str, line: usize, reason: impl Into<String>) -> Self {
        Self::Corruption {
            collection: collection.to_string(),
            line,
            reason: reason.into(),
        }
    }

    /// Returns whether the persisted data itself is damaged
    pub fn is_corruption(&self) -> bool {
        matches!(self, StoreError::Corruption { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_message() {
        assert_eq!(StoreError::Unavailable.to_string(), "Database not available");
    }

    #[test]
    fn test_corruption_display_includes_location() {
        let err = StoreError::corruption("candidate", 7, "checksum mismatch");
        let display = err.to_string();
        assert!(display.contains("candidate"));
        assert!(display.contains("line 7"));
        assert!(err.is_corruption());
    }

    #[test]
    fn test_io_error_keeps_context() {
        let err = StoreError::io(
            "Failed to open collection file",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().starts_with("Failed to open collection file"));
        assert!(!err.is_corruption());
    }
}
