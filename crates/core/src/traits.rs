//! Ledger substrate abstraction
//!
//! The hosting ledger engine is an external collaborator. This module
//! defines the narrow surface the record store consumes: point reads,
//! point writes, and prefix scans over composite keys. Key composition and
//! splitting are handled by [`CompositeKey`](crate::key::CompositeKey).
//!
//! All calls happen inside one transaction owned by the substrate; nothing
//! here retries or locks. Substrates that keep per-key versions can reject a
//! batch whose reads went stale, see [`Ledger::put_batch_checked`].

use std::collections::BTreeMap;

use crate::error::Result;
use crate::key::CompositeKey;

/// One entry returned by a prefix scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    /// Full composite key
    pub key: CompositeKey,
    /// Stored record bytes
    pub value: Vec<u8>,
}

/// Keys a transaction read from its base, with the version each was read at
///
/// Absent keys are recorded at version 0.
pub type ReadSet = BTreeMap<CompositeKey, u64>;

/// Iterator over a prefix scan
///
/// Yields entries in the substrate's native key order. The iterator holds a
/// substrate resource and must be closed exactly once; `close` consumes the
/// box so it cannot be reused afterwards.
pub trait StateQueryIterator: Iterator<Item = Result<KeyValue>> {
    /// Release the scan resource
    fn close(self: Box<Self>) -> Result<()>;
}

/// Key-value substrate consumed by the record store
///
/// # Contract
///
/// - `get_state` returns `Ok(None)` for an absent key; absence is not an error.
/// - `put_state` overwrites unconditionally.
/// - `scan_prefix` returns every entry whose key extends `prefix`, ordered
///   lexicographically on the encoded key bytes.
pub trait Ledger {
    /// Read the value stored at `key`
    fn get_state(&self, key: &CompositeKey) -> Result<Option<Vec<u8>>>;

    /// Write `value` at `key`
    fn put_state(&self, key: CompositeKey, value: Vec<u8>) -> Result<()>;

    /// Open a scan over all keys extending `prefix`
    fn scan_prefix<'a>(
        &'a self,
        prefix: &CompositeKey,
    ) -> Result<Box<dyn StateQueryIterator + 'a>>;

    /// Write a batch of entries in order
    ///
    /// The default writes one key at a time and stops at the first failure.
    /// Substrates that can apply a batch atomically should override it.
    fn put_batch(&self, entries: Vec<KeyValue>) -> Result<()> {
        for entry in entries {
            self.put_state(entry.key, entry.value)?;
        }
        Ok(())
    }

    /// Read the value at `key` together with the version it was written at
    ///
    /// The default reports version 0 for every key.
    fn get_versioned(&self, key: &CompositeKey) -> Result<(Option<Vec<u8>>, u64)> {
        Ok((self.get_state(key)?, 0))
    }

    /// Write a batch only if every key in `reads` is still at its recorded version
    ///
    /// Fails with [`LedgerError::Conflict`](crate::LedgerError::Conflict) and
    /// writes nothing when a read went stale. The default ignores `reads`,
    /// which suits hosting ledgers that validate read sets on their own.
    fn put_batch_checked(&self, _reads: &ReadSet, entries: Vec<KeyValue>) -> Result<()> {
        self.put_batch(entries)
    }
}

impl<L: Ledger + ?Sized> Ledger for &L {
    fn get_state(&self, key: &CompositeKey) -> Result<Option<Vec<u8>>> {
        (**self).get_state(key)
    }

    fn put_state(&self, key: CompositeKey, value: Vec<u8>) -> Result<()> {
        (**self).put_state(key, value)
    }

    fn scan_prefix<'a>(
        &'a self,
        prefix: &CompositeKey,
    ) -> Result<Box<dyn StateQueryIterator + 'a>> {
        (**self).scan_prefix(prefix)
    }

    fn put_batch(&self, entries: Vec<KeyValue>) -> Result<()> {
        (**self).put_batch(entries)
    }

    fn get_versioned(&self, key: &CompositeKey) -> Result<(Option<Vec<u8>>, u64)> {
        (**self).get_versioned(key)
    }

    fn put_batch_checked(&self, reads: &ReadSet, entries: Vec<KeyValue>) -> Result<()> {
        (**self).put_batch_checked(reads, entries)
    }
}
