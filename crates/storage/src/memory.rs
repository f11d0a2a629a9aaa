//! MemoryLedger: in-memory ledger substrate
//!
//! This module implements the `Ledger` trait using:
//! - `BTreeMap<CompositeKey, Entry>` for byte-ordered key storage
//! - `parking_lot::RwLock` for thread-safe access
//! - `AtomicU64` counting committed batches
//! - `AtomicUsize` counting scans that have not been closed yet
//!
//! # Design Notes
//!
//! - **No version history**: each key stores only its latest value, tagged
//!   with the batch version that wrote it
//! - **First committer wins**: a checked batch is validated against its read
//!   set under the write lock; a stale read rejects the whole batch
//! - **Snapshot scans**: `scan_prefix` copies the matching range under the
//!   read lock, so a scan never observes writes made after it was opened

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};

use rentledger_core::{
    CompositeKey, KeyValue, Ledger, LedgerError, ReadSet, Result, StateQueryIterator,
};

use crate::transaction::LedgerTxn;

/// In-memory ledger substrate
///
/// Thread-safe through `parking_lot::RwLock`. Cloning is not supported;
/// share it behind `Arc` the way callers share any substrate handle.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    /// Ordered map from encoded key to record bytes
    data: RwLock<BTreeMap<CompositeKey, Entry>>,
    /// Number of committed write batches
    version: AtomicU64,
    /// Scans opened and not yet closed
    open_scans: Arc<AtomicUsize>,
}

/// Stored value and the batch version that wrote it
#[derive(Debug, Clone)]
struct Entry {
    value: Vec<u8>,
    version: u64,
}

impl MemoryLedger {
    /// Create a new empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// True if nothing is stored
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    /// Number of committed batches
    pub fn current_version(&self) -> u64 {
        self.version.load(Ordering::SeqCst)
    }

    /// Scans that are still alive
    ///
    /// A scan leaves the count when it is closed or dropped.
    pub fn open_scans(&self) -> usize {
        self.open_scans.load(Ordering::SeqCst)
    }

    /// Run `f` against a write set and commit it only if `f` succeeds
    ///
    /// Reads inside `f` see the committed state plus the transaction's own
    /// pending writes. On error nothing is applied. If a key read inside `f`
    /// was changed by another commit in the meantime, the transaction fails
    /// with [`LedgerError::Conflict`] and nothing is applied.
    ///
    /// ```
    /// use rentledger_core::{CompositeKey, Ledger};
    /// use rentledger_storage::MemoryLedger;
    ///
    /// let ledger = MemoryLedger::new();
    /// let key = CompositeKey::encode("user", &["alice"]).unwrap();
    /// ledger
    ///     .transaction(|txn| txn.put_state(key.clone(), b"{}".to_vec()))
    ///     .unwrap();
    /// assert!(ledger.get_state(&key).unwrap().is_some());
    /// ```
    pub fn transaction<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&LedgerTxn<'_, Self>) -> Result<T>,
    {
        let txn = LedgerTxn::new(self);
        let out = f(&txn)?;
        txn.commit()?;
        Ok(out)
    }

    /// Apply a batch of writes under a single write lock
    ///
    /// Every key in `reads` must still carry the version it was read at,
    /// otherwise nothing is written. No reader can observe a partially
    /// applied batch. An empty batch is accepted without validation.
    pub fn apply_batch(
        &self,
        reads: &ReadSet,
        writes: BTreeMap<CompositeKey, Vec<u8>>,
    ) -> Result<()> {
        if writes.is_empty() {
            return Ok(());
        }
        let count = writes.len();
        let mut data = self.data.write();

        for (key, &read_version) in reads {
            let current = data.get(key).map_or(0, |entry| entry.version);
            if current != read_version {
                warn!(
                    target: "rentledger::storage",
                    %key,
                    read_version,
                    current,
                    "Rejected write batch with stale read"
                );
                return Err(LedgerError::conflict(format!(
                    "{} was read at version {} but is now at version {}",
                    key, read_version, current
                )));
            }
        }

        let version = self.version.fetch_add(1, Ordering::SeqCst) + 1;
        data.extend(
            writes
                .into_iter()
                .map(|(key, value)| (key, Entry { value, version })),
        );
        debug!(target: "rentledger::storage", version, writes = count, "Committed write batch");
        Ok(())
    }

    /// Copy every committed entry extending `prefix`, in key order
    pub(crate) fn range_snapshot(&self, prefix: &CompositeKey) -> BTreeMap<CompositeKey, Vec<u8>> {
        let data = self.data.read();
        data.range(prefix.clone()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, entry)| (k.clone(), entry.value.clone()))
            .collect()
    }

    pub(crate) fn open_scan(&self, entries: BTreeMap<CompositeKey, Vec<u8>>) -> MemoryScan {
        MemoryScan::new(entries, Arc::clone(&self.open_scans))
    }
}

impl Ledger for MemoryLedger {
    fn get_state(&self, key: &CompositeKey) -> Result<Option<Vec<u8>>> {
        Ok(self.data.read().get(key).map(|entry| entry.value.clone()))
    }

    fn put_state(&self, key: CompositeKey, value: Vec<u8>) -> Result<()> {
        let mut batch = BTreeMap::new();
        batch.insert(key, value);
        self.apply_batch(&ReadSet::new(), batch)
    }

    fn scan_prefix<'a>(
        &'a self,
        prefix: &CompositeKey,
    ) -> Result<Box<dyn StateQueryIterator + 'a>> {
        let entries = self.range_snapshot(prefix);
        Ok(Box::new(self.open_scan(entries)))
    }

    fn put_batch(&self, entries: Vec<KeyValue>) -> Result<()> {
        self.put_batch_checked(&ReadSet::new(), entries)
    }

    fn get_versioned(&self, key: &CompositeKey) -> Result<(Option<Vec<u8>>, u64)> {
        let data = self.data.read();
        Ok(match data.get(key) {
            Some(entry) => (Some(entry.value.clone()), entry.version),
            None => (None, 0),
        })
    }

    fn put_batch_checked(&self, reads: &ReadSet, entries: Vec<KeyValue>) -> Result<()> {
        self.apply_batch(
            reads,
            entries.into_iter().map(|kv| (kv.key, kv.value)).collect(),
        )
    }
}

/// Scan over a copied key range
///
/// Registers itself in the owning ledger's open-scan counter until closed.
#[derive(Debug)]
pub struct MemoryScan {
    entries: std::collections::btree_map::IntoIter<CompositeKey, Vec<u8>>,
    open_scans: Arc<AtomicUsize>,
    closed: bool,
}

impl MemoryScan {
    fn new(entries: BTreeMap<CompositeKey, Vec<u8>>, open_scans: Arc<AtomicUsize>) -> Self {
        open_scans.fetch_add(1, Ordering::SeqCst);
        Self {
            entries: entries.into_iter(),
            open_scans,
            closed: false,
        }
    }
}

impl Iterator for MemoryScan {
    type Item = Result<KeyValue>;

    fn next(&mut self) -> Option<Self::Item> {
        self.entries
            .next()
            .map(|(key, value)| Ok(KeyValue { key, value }))
    }
}

impl StateQueryIterator for MemoryScan {
    fn close(mut self: Box<Self>) -> Result<()> {
        self.closed = true;
        self.open_scans.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }
}

impl Drop for MemoryScan {
    fn drop(&mut self) {
        if !self.closed {
            warn!(target: "rentledger::storage", "Scan dropped without close");
            self.open_scans.fetch_sub(1, Ordering::SeqCst);
        }
    }
}
