//! # Rentledger Executor
//!
//! The public API for Rentledger, a record store for rental contracts and
//! their owners on a shared key-value ledger.
//!
//! This is the only crate hosts need to import. It provides:
//! - [`Executor`] - runs named invocations against a ledger substrate
//! - [`Command`]/[`Output`] - decoded requests and typed responses
//! - [`LedgerConfig`] - settings read from `rentledger.toml`
//!
//! ## Quick Start
//!
//! ```text
//! use std::sync::Arc;
//! use rentledger_executor::Executor;
//! use rentledger_storage::MemoryLedger;
//!
//! let executor = Executor::new(Arc::new(MemoryLedger::new()));
//!
//! executor.invoke("contract_create", &[contract_json])?;
//! let listing = executor.invoke("shop_contract_ls", &[r#"{"username":"alice"}"#.into()])?;
//! let body = listing.to_payload()?;
//! ```
//!
//! ## Entry Points
//!
//! | Function | Request | Response |
//! |----------|---------|----------|
//! | `contract_create` | contract + owner fields | `{}` or `{username, password}` |
//! | `user_create` | `{username, password, first_name, last_name}` | `{}` or `{username, password}` |
//! | `shop_contract_ls` | `{username}` (optional) | `[{uuid, ...contract, claims}]` |
//! | `user_authenticate` | `{username, password}` | `{authenticated}` |
//! | `user_get_info` | `{username}` | `{username, first_name, last_name}` |

#![warn(missing_docs)]

mod command;
mod config;
mod convert;
mod error;
mod executor;
mod output;
mod types;

// Handler modules
mod handlers;

// Test modules
#[cfg(test)]
mod tests;

// =============================================================================
// Public API - Everything hosts need is re-exported here
// =============================================================================

pub use command::Command;
pub use config::{LedgerConfig, CONFIG_FILE_NAME};
pub use error::Error;
pub use executor::Executor;
pub use output::Output;
pub use types::*;

// Record and view types that appear in requests and responses
pub use rentledger_core::{Claim, ClaimStatus, Contract, Item, Limits, User};
pub use rentledger_primitives::{ClaimView, ContractView};
pub use rentledger_storage::MemoryLedger;

/// Result type for executor operations
pub type Result<T> = std::result::Result<T, Error>;
