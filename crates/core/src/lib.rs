//! Core types and traits for Rentledger
//!
//! This crate defines the foundational types used throughout the system:
//! - CompositeKey: prefix + ordered segments, encoded for ordered scans
//! - Limits: key and record size bounds
//! - User, Contract, Item, Claim: ledger records
//! - Ledger / StateQueryIterator: the substrate surface we consume
//! - LedgerError: error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod key;
pub mod limits;
pub mod traits;
pub mod types;

pub use error::{LedgerError, Result};
pub use key::{CompositeKey, KeyError, DELIMITER};
pub use limits::{LimitError, Limits};
pub use traits::{KeyValue, Ledger, ReadSet, StateQueryIterator};
pub use types::{
    zero_time, Claim, ClaimStatus, Contract, Item, Timestamp, User, PREFIX_CLAIM,
    PREFIX_CONTRACT, PREFIX_USER,
};
