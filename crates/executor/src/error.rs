//! Error types for command execution.
//!
//! All errors from command execution are represented by the [`Error`] enum.
//! Every error is terminal for the invocation that raised it: the write set
//! is discarded and the error is the invocation's only result. Callers see
//! the `Display` text; [`Error::code`] adds a stable code for clients that
//! want to branch on the category.

use serde::{Deserialize, Serialize};

/// Command execution errors.
///
/// # Categories
///
/// | Category | Variants | Description |
/// |----------|----------|-------------|
/// | Invocation | `InvalidArgumentCount`, `UnknownFunction` | Bad entry point call |
/// | Input | `DecodeError`, `KeyEncodingError`, `LimitExceeded` | Bad payload |
/// | Not Found | `UserNotFound` | Referenced user doesn't exist |
/// | Substrate | `StoreFailure`, `ScanError` | Ledger read/write/iterate failed |
/// | System | `Serialization`, `Config` | Response encoding or config file failed |
///
/// # Example
///
/// ```ignore
/// use rentledger_executor::{Error, Executor};
///
/// match executor.invoke("user_get_info", &[r#"{"username":"alice"}"#.into()]) {
///     Ok(output) => { /* handle success */ }
///     Err(Error::UserNotFound { username }) => {
///         println!("no such user '{}'", username);
///     }
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    // ==================== Invocation Errors ====================
    /// Wrong number of positional arguments
    #[error("Invalid argument count: expected {expected}, got {actual}.")]
    InvalidArgumentCount { expected: usize, actual: usize },

    /// No entry point with this name
    #[error("Unknown function: {name}")]
    UnknownFunction { name: String },

    // ==================== Input Errors ====================
    /// Request payload or stored body is not valid JSON of the expected shape
    #[error("Decode error: {reason}")]
    DecodeError { reason: String },

    /// A key segment could not be encoded
    #[error("Key encoding error: {reason}")]
    KeyEncodingError { reason: String },

    /// A record or key exceeds the configured limits
    #[error("Limit exceeded: {reason}")]
    LimitExceeded { reason: String },

    // ==================== Not Found ====================
    /// User does not exist
    #[error("User with this username does not exist: {username}")]
    UserNotFound { username: String },

    // ==================== Substrate Errors ====================
    /// Ledger read or write failed
    #[error("Store failure: {reason}")]
    StoreFailure { reason: String },

    /// Ledger iterator failed mid-scan
    #[error("Scan error: {reason}")]
    ScanError { reason: String },

    // ==================== System Errors ====================
    /// Response could not be encoded
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },

    /// Configuration file could not be read, parsed or written
    #[error("Config error: {reason}")]
    Config { reason: String },
}

impl Error {
    /// Stable machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidArgumentCount { .. } => "invalid_argument_count",
            Error::UnknownFunction { .. } => "unknown_function",
            Error::DecodeError { .. } => "decode_error",
            Error::KeyEncodingError { .. } => "key_encoding_error",
            Error::LimitExceeded { .. } => "limit_exceeded",
            Error::UserNotFound { .. } => "user_not_found",
            Error::StoreFailure { .. } => "store_failure",
            Error::ScanError { .. } => "scan_error",
            Error::Serialization { .. } => "serialization_error",
            Error::Config { .. } => "config_error",
        }
    }

    pub(crate) fn decode(cause: impl std::fmt::Display) -> Self {
        Error::DecodeError {
            reason: cause.to_string(),
        }
    }

    pub(crate) fn config(reason: impl Into<String>) -> Self {
        Error::Config {
            reason: reason.into(),
        }
    }
}
