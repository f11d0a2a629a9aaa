//! Ledger configuration via `rentledger.toml`
//!
//! On first start a default `rentledger.toml` is written next to the host's
//! data. To change settings, edit the file and restart.

use std::path::Path;

use serde::{Deserialize, Serialize};

use rentledger_core::{CompositeKey, Limits, PREFIX_CLAIM, PREFIX_CONTRACT, PREFIX_USER};

use crate::{Error, Result};

/// Config file name placed in the host's data directory.
pub const CONFIG_FILE_NAME: &str = "rentledger.toml";

/// Segments in the longest key the store writes: (owner, contract uuid).
const MIN_SEGMENTS: usize = 2;

/// Ledger configuration loaded from `rentledger.toml`.
///
/// # Example
///
/// ```toml
/// log_payloads = false
///
/// [limits]
/// max_key_bytes = 1024
/// max_segments = 16
/// max_value_bytes = 1048576
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Log decoded request payloads at debug level. Payloads carry passwords.
    #[serde(default)]
    pub log_payloads: bool,
    /// Key and record size limits.
    #[serde(default)]
    pub limits: Limits,
}

impl LedgerConfig {
    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Rentledger configuration
#
# Log decoded request payloads at debug level (default: false).
# Payloads include passwords; enable only while debugging.
log_payloads = false

# Size limits enforced on keys and stored records.
[limits]
max_key_bytes = 1024
max_segments = 16
max_value_bytes = 1048576
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: LedgerConfig = toml::from_str(&content).map_err(|e| {
            Error::config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                Error::config(format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| {
            Error::config(format!(
                "Failed to write config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Reject limits no key or record could satisfy.
    ///
    /// Every record key carries up to two segments, and an empty-segment key
    /// of each record type has to fit in `max_key_bytes`.
    pub fn validate(&self) -> Result<()> {
        let limits = &self.limits;
        if limits.max_key_bytes == 0 || limits.max_segments == 0 || limits.max_value_bytes == 0 {
            return Err(Error::config(format!(
                "Invalid limits in {}: every limit must be greater than zero",
                CONFIG_FILE_NAME
            )));
        }
        if limits.max_segments < MIN_SEGMENTS {
            return Err(Error::config(format!(
                "Invalid limits in {}: max_segments must be at least {}, got {}",
                CONFIG_FILE_NAME, MIN_SEGMENTS, limits.max_segments
            )));
        }
        let blank = [""; MIN_SEGMENTS];
        for (prefix, segments) in [(PREFIX_USER, 1), (PREFIX_CONTRACT, 2), (PREFIX_CLAIM, 2)] {
            CompositeKey::encode_with_limits(prefix, &blank[..segments], limits).map_err(|e| {
                Error::config(format!(
                    "Invalid limits in {}: no '{}' key fits: {}",
                    CONFIG_FILE_NAME, prefix, e
                ))
            })?;
        }
        Ok(())
    }
}
