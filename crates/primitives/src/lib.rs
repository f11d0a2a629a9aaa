//! Primitives layer for Rentledger
//!
//! Provides stateless facades over an injected ledger substrate:
//! - **RecordStore**: typed get/put/exists and key building
//! - **EntityResolver**: user get-or-create, contract creation, user lookups
//! - **ContractLister**: owner-scoped contract listing with embedded claims
//!
//! ## Design Principle: Injected Substrate
//!
//! Nothing here holds global state. Every facade borrows a `RecordStore`,
//! which owns the `Ledger` handle it was given. Wrapping the ledger in a
//! transaction makes a whole request all-or-nothing:
//!
//! ```rust,ignore
//! ledger.transaction(|txn| {
//!     let store = RecordStore::new(txn);
//!     EntityResolver::new(&store).create_contract(&input)
//! })?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod lister;
pub mod record_store;
pub mod resolver;

pub use lister::{ClaimView, ContractLister, ContractListing, ContractView};
pub use record_store::RecordStore;
pub use resolver::{ContractCreation, EntityResolver, NewContract, UserCreation, UserResolution};
