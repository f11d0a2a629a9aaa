//! Error conversion from internal error types.
//!
//! This module provides conversions from ledger core errors to the
//! executor's [`Error`] type.

use rentledger_core::LedgerError;

use crate::Error;

/// Convert a LedgerError to an executor Error.
///
/// Messages are carried over verbatim; only the category is remapped.
impl From<LedgerError> for Error {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::KeyEncoding(e) => Error::KeyEncodingError {
                reason: e.to_string(),
            },
            LedgerError::Serialization(reason) => Error::DecodeError { reason },
            LedgerError::StoreFailure(reason) => Error::StoreFailure { reason },
            LedgerError::Conflict(reason) => Error::StoreFailure {
                reason: format!("Write conflict: {}", reason),
            },
            LedgerError::Scan(reason) => Error::ScanError { reason },
            LedgerError::UserNotFound { username } => Error::UserNotFound { username },
            LedgerError::Limit(e) => Error::LimitExceeded {
                reason: e.to_string(),
            },
        }
    }
}

/// Convert a ledger result to an executor result.
pub fn convert_result<T>(result: rentledger_core::Result<T>) -> crate::Result<T> {
    result.map_err(Error::from)
}
