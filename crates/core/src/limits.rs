//! Size limits for keys and record bodies
//!
//! This module defines configurable size limits that are enforced by the key
//! codec and the record store. Custom limits are read from `rentledger.toml`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Size limits for composite keys and stored record bodies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Maximum encoded composite key length in bytes (default: 1024)
    pub max_key_bytes: usize,

    /// Maximum number of segments in one composite key (default: 16)
    pub max_segments: usize,

    /// Maximum serialized record size in bytes (default: 1MB)
    pub max_value_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_key_bytes: 1024,
            max_segments: 16,
            max_value_bytes: 1024 * 1024, // 1MB
        }
    }
}

impl Limits {
    /// Create limits with small values for testing
    ///
    /// Lets unit tests exercise limit enforcement without building
    /// extremely large keys or records.
    pub fn with_small_limits() -> Self {
        Limits {
            max_key_bytes: 64,
            max_segments: 3,
            max_value_bytes: 512,
        }
    }

    /// Validate a serialized record body against `max_value_bytes`
    pub fn validate_value_size(&self, bytes: &[u8]) -> Result<(), LimitError> {
        if bytes.len() > self.max_value_bytes {
            return Err(LimitError::ValueTooLarge {
                actual: bytes.len(),
                max: self.max_value_bytes,
            });
        }
        Ok(())
    }
}

/// Limit violation errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LimitError {
    /// Serialized record exceeds maximum size
    #[error("Value too large: {actual} bytes exceeds maximum {max}")]
    ValueTooLarge {
        /// Actual size in bytes
        actual: usize,
        /// Maximum allowed size
        max: usize,
    },
}

impl LimitError {
    /// Get the reason code for the boundary error
    pub fn reason_code(&self) -> &'static str {
        match self {
            LimitError::ValueTooLarge { .. } => "value_too_large",
        }
    }
}
