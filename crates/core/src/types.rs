//! Record types stored on the ledger
//!
//! - User: identity keyed by username
//! - Contract: rental contract keyed by (owner username, contract uuid)
//! - Item: the rented item, embedded in a contract
//! - Claim: child record of a contract, keyed by (contract uuid, claim uuid)
//!
//! The serde field names are the wire and storage contract. A contract's own
//! uuid is never part of its stored body; it lives only in the key.
//!
//! Dates keep the UTC offset they were submitted with. A missing date
//! decodes as [`zero_time`], `0001-01-01T00:00:00Z`.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// Date and time with the caller's UTC offset
pub type Timestamp = DateTime<FixedOffset>;

/// The zero date, `0001-01-01T00:00:00Z`
pub fn zero_time() -> Timestamp {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
        .unwrap_or_default()
}

/// Key prefix for user records
pub const PREFIX_USER: &str = "user";
/// Key prefix for contract records
pub const PREFIX_CONTRACT: &str = "contract";
/// Key prefix for claim records
pub const PREFIX_CLAIM: &str = "claim";

/// Ledger user identity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique username (primary identity)
    #[serde(default)]
    pub username: String,
    /// Password as supplied at creation
    #[serde(default)]
    pub password: String,
    /// Given name
    #[serde(default)]
    pub first_name: String,
    /// Family name
    #[serde(default)]
    pub last_name: String,
}

impl User {
    /// True when both username and password are non-empty
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

/// Rented item, stored opaquely inside a contract
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    /// Shop-local item id
    pub id: i32,
    /// Brand name
    pub brand: String,
    /// Model name
    pub model: String,
    /// Retail price
    pub price: f64,
    /// Free-form description
    pub description: String,
    /// Manufacturer serial number
    pub serial_no: String,
}

/// Rental contract
///
/// `claim_index` lists claim uuids in filing order. It is empty on creation
/// and only grows through claim filing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    /// Owner username
    pub username: String,
    /// Contract type reference
    #[serde(default)]
    pub contract_type_uuid: String,
    /// Rented item
    #[serde(default)]
    pub item: Item,
    /// Coverage start
    #[serde(default = "zero_time")]
    pub start_date: Timestamp,
    /// Coverage end
    #[serde(default = "zero_time")]
    pub end_date: Timestamp,
    /// Negotiated rate
    #[serde(default)]
    pub special_rate: f64,
    /// Voided flag, always false on creation
    #[serde(default)]
    pub void: bool,
    /// Claim uuids filed against this contract
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub claim_index: Vec<String>,
}

/// Processing state of a claim
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    /// Filed, not yet reviewed
    #[default]
    Pending,
    /// Rejected by the insurer
    Rejected,
    /// Item will be repaired
    Repair,
    /// Owner reimbursed
    Reimbursement,
    /// Theft confirmed by police
    TheftConfirmed,
}

/// Claim filed against a contract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    /// Parent contract uuid
    pub contract_uuid: String,
    /// Filing date
    #[serde(default = "zero_time")]
    pub date: Timestamp,
    /// Damage or loss description
    #[serde(default)]
    pub description: String,
    /// Theft rather than damage
    #[serde(default)]
    pub is_theft: bool,
    /// Processing state
    #[serde(default)]
    pub status: ClaimStatus,
    /// Amount to reimburse
    #[serde(default)]
    pub reimbursable: f64,
    /// Item repaired
    #[serde(default)]
    pub repaired: bool,
    /// Police report or document reference
    #[serde(default)]
    pub file_reference: String,
}
