//! RecordStore: typed records over a ledger substrate
//!
//! ## Design
//!
//! RecordStore is a stateless facade over an injected [`Ledger`]. It owns the
//! byte-level representation of every record: keys are built only through
//! [`CompositeKey`], bodies are JSON.
//!
//! ## API
//!
//! - **Raw API**: `get`, `put`, `exists`, `scan` on encoded keys
//! - **Key builders**: `user_key`, `contract_key`, `contract_owner_prefix`, `claim_key`
//! - **Typed API**: `load`/`save` plus per-record helpers
//!
//! Every call is a single-key operation inside the substrate's transaction.
//! Failures are returned as-is; nothing is retried.

use serde::de::DeserializeOwned;
use serde::Serialize;

use rentledger_core::{
    Claim, CompositeKey, Contract, Ledger, Limits, Result, StateQueryIterator, User,
    PREFIX_CLAIM, PREFIX_CONTRACT, PREFIX_USER,
};

/// Typed record store over a ledger substrate
///
/// # Example
///
/// ```ignore
/// use rentledger_primitives::RecordStore;
/// use rentledger_storage::MemoryLedger;
///
/// let ledger = MemoryLedger::new();
/// let store = RecordStore::new(&ledger);
/// store.save_user(&user)?;
/// let loaded = store.load_user("alice")?;
/// ```
#[derive(Debug, Clone)]
pub struct RecordStore<L> {
    ledger: L,
    limits: Limits,
}

impl<L: Ledger> RecordStore<L> {
    /// Create a store with default limits
    pub fn new(ledger: L) -> Self {
        Self::with_limits(ledger, Limits::default())
    }

    /// Create a store enforcing the given limits
    pub fn with_limits(ledger: L, limits: Limits) -> Self {
        Self { ledger, limits }
    }

    /// Get the underlying substrate
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Active limits
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    // ========== Raw API ==========

    /// Read raw bytes; absence is `Ok(None)`
    pub fn get(&self, key: &CompositeKey) -> Result<Option<Vec<u8>>> {
        self.ledger.get_state(key)
    }

    /// Write raw bytes, enforcing `max_value_bytes`
    pub fn put(&self, key: CompositeKey, bytes: Vec<u8>) -> Result<()> {
        self.limits.validate_value_size(&bytes)?;
        self.ledger.put_state(key, bytes)
    }

    /// True if a value is stored at `key`
    pub fn exists(&self, key: &CompositeKey) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Open a prefix scan
    pub fn scan(&self, prefix: &CompositeKey) -> Result<Box<dyn StateQueryIterator + '_>> {
        self.ledger.scan_prefix(prefix)
    }

    // ========== Key Builders ==========

    /// Key of a user record
    pub fn user_key(&self, username: &str) -> Result<CompositeKey> {
        Ok(CompositeKey::encode_with_limits(
            PREFIX_USER,
            &[username],
            &self.limits,
        )?)
    }

    /// Key of a contract record
    pub fn contract_key(&self, username: &str, uuid: &str) -> Result<CompositeKey> {
        Ok(CompositeKey::encode_with_limits(
            PREFIX_CONTRACT,
            &[username, uuid],
            &self.limits,
        )?)
    }

    /// Scan bound for contracts owned by `username`
    ///
    /// An empty username yields the zero-segment bound covering every owner.
    pub fn contract_owner_prefix(&self, username: &str) -> Result<CompositeKey> {
        let owner = [username];
        let leading: &[&str] = if username.is_empty() { &[] } else { &owner };
        Ok(CompositeKey::partial_with_limits(
            PREFIX_CONTRACT,
            leading,
            &self.limits,
        )?)
    }

    /// Key of a claim record
    pub fn claim_key(&self, contract_uuid: &str, claim_uuid: &str) -> Result<CompositeKey> {
        Ok(CompositeKey::encode_with_limits(
            PREFIX_CLAIM,
            &[contract_uuid, claim_uuid],
            &self.limits,
        )?)
    }

    // ========== Typed API ==========

    /// Load and decode a record
    pub fn load<T: DeserializeOwned>(&self, key: &CompositeKey) -> Result<Option<T>> {
        match self.get(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Encode and store a record, overwriting any previous value
    pub fn save<T: Serialize>(&self, key: CompositeKey, record: &T) -> Result<()> {
        let bytes = serde_json::to_vec(record)?;
        self.put(key, bytes)
    }

    /// Load a user by username
    pub fn load_user(&self, username: &str) -> Result<Option<User>> {
        self.load(&self.user_key(username)?)
    }

    /// Store a user under its username
    pub fn save_user(&self, user: &User) -> Result<()> {
        self.save(self.user_key(&user.username)?, user)
    }

    /// Load a contract by owner and uuid
    pub fn load_contract(&self, username: &str, uuid: &str) -> Result<Option<Contract>> {
        self.load(&self.contract_key(username, uuid)?)
    }

    /// Store a contract under (owner, uuid)
    pub fn save_contract(&self, uuid: &str, contract: &Contract) -> Result<()> {
        self.save(self.contract_key(&contract.username, uuid)?, contract)
    }

    /// Load a claim by parent contract and claim uuid
    pub fn load_claim(&self, contract_uuid: &str, claim_uuid: &str) -> Result<Option<Claim>> {
        self.load(&self.claim_key(contract_uuid, claim_uuid)?)
    }

    /// Store a claim under (contract uuid, claim uuid)
    pub fn save_claim(&self, claim_uuid: &str, claim: &Claim) -> Result<()> {
        self.save(self.claim_key(&claim.contract_uuid, claim_uuid)?, claim)
    }
}
