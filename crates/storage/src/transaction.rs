//! Per-invocation write set
//!
//! A `LedgerTxn` buffers writes over a base `Ledger` so that one request is
//! all-or-nothing: callers commit the buffered writes only when the request
//! succeeded, and simply drop the transaction otherwise.
//!
//! Reads through the transaction see the base state plus pending writes.
//! Scans merge pending writes into the base range, keeping key order.
//!
//! Point reads served by the base are recorded with the version they were
//! read at. Commit hands that read set to [`Ledger::put_batch_checked`], so
//! a substrate with per-key versions rejects the batch when another commit
//! changed one of those keys first. Scans are not recorded.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use rentledger_core::{CompositeKey, KeyValue, Ledger, ReadSet, Result, StateQueryIterator};

/// Buffered write set over a base ledger
pub struct LedgerTxn<'a, L: Ledger + ?Sized> {
    base: &'a L,
    reads: Mutex<ReadSet>,
    writes: Mutex<BTreeMap<CompositeKey, Vec<u8>>>,
    open_scans: Arc<AtomicUsize>,
}

impl<'a, L: Ledger + ?Sized> LedgerTxn<'a, L> {
    /// Start an empty write set over `base`
    pub fn new(base: &'a L) -> Self {
        Self {
            base,
            reads: Mutex::new(ReadSet::new()),
            writes: Mutex::new(BTreeMap::new()),
            open_scans: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of buffered writes
    pub fn pending_writes(&self) -> usize {
        self.writes.lock().len()
    }

    /// Keys read from the base so far, with their versions
    pub fn read_set(&self) -> ReadSet {
        self.reads.lock().clone()
    }

    /// Scans opened through this transaction and not yet closed
    pub fn open_scans(&self) -> usize {
        self.open_scans.load(Ordering::SeqCst)
    }

    /// Apply buffered writes to the base ledger in key order
    ///
    /// Goes through [`Ledger::put_batch_checked`] with the recorded read set,
    /// so atomicity and conflict detection are whatever the base substrate
    /// provides for a batch. A transaction without writes commits trivially.
    pub fn commit(self) -> Result<usize> {
        let base = self.base;
        let reads = self.reads.into_inner();
        let writes = self.writes.into_inner();
        let count = writes.len();
        if count > 0 {
            base.put_batch_checked(
                &reads,
                writes
                    .into_iter()
                    .map(|(key, value)| KeyValue { key, value })
                    .collect(),
            )?;
        }
        debug!(
            target: "rentledger::storage",
            reads = reads.len(),
            writes = count,
            "Committed transaction"
        );
        Ok(count)
    }
}

impl<L: Ledger + ?Sized> Ledger for LedgerTxn<'_, L> {
    fn get_state(&self, key: &CompositeKey) -> Result<Option<Vec<u8>>> {
        if let Some(pending) = self.writes.lock().get(key) {
            return Ok(Some(pending.clone()));
        }
        let (value, version) = self.base.get_versioned(key)?;
        self.reads.lock().entry(key.clone()).or_insert(version);
        Ok(value)
    }

    fn put_state(&self, key: CompositeKey, value: Vec<u8>) -> Result<()> {
        self.writes.lock().insert(key, value);
        Ok(())
    }

    fn scan_prefix<'s>(
        &'s self,
        prefix: &CompositeKey,
    ) -> Result<Box<dyn StateQueryIterator + 's>> {
        let mut merged = BTreeMap::new();

        let mut base_scan = self.base.scan_prefix(prefix)?;
        let drained: Result<()> = base_scan.by_ref().try_for_each(|entry| {
            let KeyValue { key, value } = entry?;
            merged.insert(key, value);
            Ok(())
        });
        // Release the base scan on every path before reporting
        let closed = base_scan.close();
        drained?;
        closed?;

        {
            let writes = self.writes.lock();
            merged.extend(
                writes
                    .range(prefix.clone()..)
                    .take_while(|(k, _)| k.starts_with(prefix))
                    .map(|(k, v)| (k.clone(), v.clone())),
            );
        }

        Ok(Box::new(MergedScan::new(merged, Arc::clone(&self.open_scans))))
    }
}

/// Scan over a merged, owned key range
struct MergedScan {
    entries: std::collections::btree_map::IntoIter<CompositeKey, Vec<u8>>,
    open_scans: Arc<AtomicUsize>,
}

impl MergedScan {
    fn new(entries: BTreeMap<CompositeKey, Vec<u8>>, open_scans: Arc<AtomicUsize>) -> Self {
        open_scans.fetch_add(1, Ordering::SeqCst);
        Self {
            entries: entries.into_iter(),
            open_scans,
        }
    }
}

impl Iterator for MergedScan {
    type Item = Result<KeyValue>;

    fn next(&mut self) -> Option<Self::Item> {
        self.entries
            .next()
            .map(|(key, value)| Ok(KeyValue { key, value }))
    }
}

impl StateQueryIterator for MergedScan {
    fn close(self: Box<Self>) -> Result<()> {
        self.open_scans.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }
}
