//! Composite key codec
//!
//! A composite key encodes a type prefix and an ordered list of string
//! segments into one opaque byte string:
//!
//! ```text
//! 0x00 <prefix> 0x00 <segment 0> 0x00 <segment 1> 0x00 ...
//! ```
//!
//! ## Contract
//!
//! - The NUL byte (`0x00`) is the reserved delimiter. A prefix or segment
//!   containing it is rejected with [`KeyError::InvalidPrefix`] /
//!   [`KeyError::InvalidSegment`]; nothing is escaped.
//! - The prefix must not be empty. Segments may be empty.
//! - `decode(encode(p, s)) == (p, s)` for every accepted input.
//! - A partial key (the prefix plus the first `k` segments) is a byte prefix
//!   of every full key sharing those segments, and of no other key with the
//!   same type prefix. Because every segment is NUL-terminated, `alice` never
//!   matches keys under `alicia`.
//! - Keys order lexicographically on their encoded bytes.

use std::fmt;

use thiserror::Error;

use crate::limits::Limits;

/// Reserved segment delimiter
pub const DELIMITER: u8 = 0x00;

const DELIMITER_CHAR: char = '\u{0}';

/// Encoded composite key
///
/// Ordering and equality are those of the underlying bytes, which is the
/// native key order of the ledger substrate.
///
/// # Examples
///
/// ```
/// use rentledger_core::key::CompositeKey;
///
/// let key = CompositeKey::encode("contract", &["alice", "c-1"]).unwrap();
/// let (prefix, segments) = key.decode().unwrap();
/// assert_eq!(prefix, "contract");
/// assert_eq!(segments, vec!["alice".to_string(), "c-1".to_string()]);
///
/// let owner = CompositeKey::partial("contract", &["alice"]).unwrap();
/// assert!(key.starts_with(&owner));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompositeKey(Vec<u8>);

impl CompositeKey {
    /// Encode a full key using default limits
    pub fn encode<S: AsRef<str>>(prefix: &str, segments: &[S]) -> Result<Self, KeyError> {
        Self::encode_with_limits(prefix, segments, &Limits::default())
    }

    /// Encode a key, enforcing the given limits
    pub fn encode_with_limits<S: AsRef<str>>(
        prefix: &str,
        segments: &[S],
        limits: &Limits,
    ) -> Result<Self, KeyError> {
        if prefix.is_empty() {
            return Err(KeyError::EmptyPrefix);
        }
        if prefix.contains(DELIMITER_CHAR) {
            return Err(KeyError::InvalidPrefix);
        }
        if segments.len() > limits.max_segments {
            return Err(KeyError::TooManySegments {
                actual: segments.len(),
                max: limits.max_segments,
            });
        }

        let body_len: usize = segments.iter().map(|s| s.as_ref().len() + 1).sum();
        let mut bytes = Vec::with_capacity(prefix.len() + 2 + body_len);
        bytes.push(DELIMITER);
        bytes.extend_from_slice(prefix.as_bytes());
        bytes.push(DELIMITER);
        for (index, segment) in segments.iter().enumerate() {
            let segment = segment.as_ref();
            if segment.contains(DELIMITER_CHAR) {
                return Err(KeyError::InvalidSegment { index });
            }
            bytes.extend_from_slice(segment.as_bytes());
            bytes.push(DELIMITER);
        }

        if bytes.len() > limits.max_key_bytes {
            return Err(KeyError::TooLong {
                actual: bytes.len(),
                max: limits.max_key_bytes,
            });
        }
        Ok(Self(bytes))
    }

    /// Build a partial key used as a scan bound
    ///
    /// Identical to [`CompositeKey::encode`] with only the leading segments;
    /// the separate name documents intent at call sites.
    pub fn partial<S: AsRef<str>>(prefix: &str, leading: &[S]) -> Result<Self, KeyError> {
        Self::encode(prefix, leading)
    }

    /// Partial key with explicit limits
    pub fn partial_with_limits<S: AsRef<str>>(
        prefix: &str,
        leading: &[S],
        limits: &Limits,
    ) -> Result<Self, KeyError> {
        Self::encode_with_limits(prefix, leading, limits)
    }

    /// Wrap raw bytes handed back by the substrate
    ///
    /// No validation happens here; [`CompositeKey::decode`] reports
    /// malformed input.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Decode into `(prefix, segments)`
    pub fn decode(&self) -> Result<(String, Vec<String>), KeyError> {
        let bytes = &self.0;
        if bytes.len() < 2 || bytes[0] != DELIMITER || bytes[bytes.len() - 1] != DELIMITER {
            return Err(KeyError::Malformed {
                reason: "missing delimiter framing".to_string(),
            });
        }
        let inner = std::str::from_utf8(&bytes[1..bytes.len() - 1]).map_err(|_| {
            KeyError::Malformed {
                reason: "key is not valid UTF-8".to_string(),
            }
        })?;

        let mut parts = inner.split(DELIMITER_CHAR);
        let prefix = match parts.next() {
            Some(p) if !p.is_empty() => p.to_string(),
            _ => return Err(KeyError::EmptyPrefix),
        };
        let segments = parts.map(str::to_string).collect();
        Ok((prefix, segments))
    }

    /// Check if this key extends the given partial key
    pub fn starts_with(&self, prefix: &CompositeKey) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// Encoded bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume into encoded bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Encoded length in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the key holds no bytes (never produced by `encode`)
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.decode() {
            Ok((prefix, segments)) => write!(f, "{}:{}", prefix, segments.join("/")),
            Err(_) => write!(f, "{:?}", String::from_utf8_lossy(&self.0)),
        }
    }
}

/// Key codec errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyError {
    /// Type prefix is empty
    #[error("Key prefix cannot be empty")]
    EmptyPrefix,

    /// Type prefix contains the reserved delimiter
    #[error("Key prefix cannot contain NUL bytes")]
    InvalidPrefix,

    /// A segment contains the reserved delimiter
    #[error("Key segment {index} cannot contain NUL bytes")]
    InvalidSegment {
        /// Position of the offending segment
        index: usize,
    },

    /// More segments than allowed
    #[error("Too many key segments: {actual} exceeds maximum {max}")]
    TooManySegments {
        /// Actual segment count
        actual: usize,
        /// Maximum allowed
        max: usize,
    },

    /// Encoded key exceeds maximum length
    #[error("Key too long: {actual} bytes exceeds maximum {max}")]
    TooLong {
        /// Actual encoded length
        actual: usize,
        /// Maximum allowed length
        max: usize,
    },

    /// Bytes are not a composite key
    #[error("Malformed composite key: {reason}")]
    Malformed {
        /// What was wrong
        reason: String,
    },
}

impl KeyError {
    /// Get the reason code for the boundary error
    pub fn reason_code(&self) -> &'static str {
        match self {
            KeyError::EmptyPrefix => "empty_prefix",
            KeyError::InvalidPrefix => "invalid_prefix",
            KeyError::InvalidSegment { .. } => "invalid_segment",
            KeyError::TooManySegments { .. } => "too_many_segments",
            KeyError::TooLong { .. } => "key_too_long",
            KeyError::Malformed { .. } => "malformed_key",
        }
    }
}
