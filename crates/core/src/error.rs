//! Error types for the ledger core
//!
//! Every error is terminal for the current request: nothing here is retried
//! or recovered locally. We use `thiserror` for the `Display` and `Error`
//! implementations.

use thiserror::Error;

use crate::key::KeyError;
use crate::limits::LimitError;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Error types for the ledger core
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LedgerError {
    /// Composite key could not be built or parsed
    #[error("Key encoding error: {0}")]
    KeyEncoding(#[from] KeyError),

    /// Stored bytes or request payload could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Substrate read or write failed
    #[error("Store failure: {0}")]
    StoreFailure(String),

    /// A key read by the transaction changed before its writes were applied
    #[error("Write conflict: {0}")]
    Conflict(String),

    /// Iterator failed mid-scan
    #[error("Scan error: {0}")]
    Scan(String),

    /// Referenced user does not exist
    #[error("User with username '{username}' does not exist")]
    UserNotFound {
        /// Username that was looked up
        username: String,
    },

    /// Record violates a configured limit
    #[error("Limit exceeded: {0}")]
    Limit(#[from] LimitError),
}

impl LedgerError {
    /// Build a store failure from any displayable cause
    pub fn store_failure(cause: impl std::fmt::Display) -> Self {
        LedgerError::StoreFailure(cause.to_string())
    }

    /// Build a write conflict from any displayable cause
    pub fn conflict(cause: impl std::fmt::Display) -> Self {
        LedgerError::Conflict(cause.to_string())
    }

    /// Build a scan error from any displayable cause
    pub fn scan(cause: impl std::fmt::Display) -> Self {
        LedgerError::Scan(cause.to_string())
    }

    /// Build a user-not-found error
    pub fn user_not_found(username: impl Into<String>) -> Self {
        LedgerError::UserNotFound {
            username: username.into(),
        }
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(e: serde_json::Error) -> Self {
        LedgerError::Serialization(e.to_string())
    }
}
