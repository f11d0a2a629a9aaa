//! Rentledger - rental contracts and their owners on a shared ledger
//!
//! Records live under composite keys in an ordered key-value substrate:
//! users by username, contracts by (owner, uuid), claims by (contract,
//! claim uuid). Hosts invoke named functions with JSON arguments and get
//! JSON bodies back.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use rentledger::{Executor, MemoryLedger};
//!
//! let executor = Executor::new(Arc::new(MemoryLedger::new()));
//! executor.invoke("user_create", &[r#"{"username":"alice","password":"pw"}"#.into()])?;
//! let info = executor.invoke("user_get_info", &[r#"{"username":"alice"}"#.into()])?;
//! println!("{}", String::from_utf8_lossy(&info.to_payload()?));
//! ```
//!
//! # Architecture
//!
//! All operations go through the [`Executor`], which runs each invocation
//! over its own write set. Key encoding, record storage and listing live in
//! the internal crates; only the executor API is re-exported here.

// Re-export the public API from rentledger-executor
pub use rentledger_executor::*;
