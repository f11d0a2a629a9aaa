//! Ledger API Comprehensive Test Suite
//!
//! End-to-end coverage of the public executor API: named invocations with
//! JSON arguments in, JSON bodies out, against an in-memory substrate.
//!
//! ## Modules
//!
//! - `users`: get-or-create identity, authentication, profile lookup
//! - `contracts`: creation response shapes, owner resolution, overwrite
//! - `listing`: owner scoping, key order, claims, scan release
//! - `failures`: substrate failures and all-or-nothing invocations
//! - `concurrency`: shared executor across threads
//! - `config`: `rentledger.toml` lifecycle
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test ledger_api_comprehensive
//! cargo test --test ledger_api_comprehensive listing::
//! cargo test --test ledger_api_comprehensive -- --nocapture
//! ```

mod common;

mod config;
mod contracts;
mod listing;
mod users;
