//! Command handlers organized by record type.
//!
//! | Module | Commands | Primitive |
//! |--------|----------|-----------|
//! | `user` | 3 | EntityResolver |
//! | `contract` | 2 | EntityResolver, ContractLister |
//!
//! Handlers receive a [`RecordStore`](rentledger_primitives::RecordStore)
//! bound to the invocation's write set and never see the substrate itself.

pub mod contract;
pub mod user;
