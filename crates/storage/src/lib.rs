//! Storage layer for Rentledger
//!
//! This crate implements the ledger substrate used by the record store:
//! - MemoryLedger: BTreeMap-based ordered storage with RwLock
//! - MemoryScan: snapshot scan with open/close accounting
//! - LedgerTxn: buffered write set giving all-or-nothing requests over any `Ledger`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod memory;
pub mod transaction;

pub use memory::{MemoryLedger, MemoryScan};
pub use transaction::LedgerTxn;
