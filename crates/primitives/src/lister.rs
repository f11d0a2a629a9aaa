//! ContractLister: owner-scoped contract listing
//!
//! Lists contracts through a partial-key scan over the contract key space,
//! bounded by the owner username (or unbounded for an empty owner).
//!
//! Each stored entry is rebuilt in two steps: decode the stored contract
//! body, then compose a [`ContractView`] from that body, the uuid recovered
//! from the key, and the resolved claims. The uuid is never stored in the
//! body.
//!
//! The scan is owned by the [`ContractListing`] iterator and closed exactly
//! once: when the scan is exhausted, on the first error, or on drop.

use std::iter::FusedIterator;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use rentledger_core::{
    Claim, Contract, KeyValue, Ledger, LedgerError, Result, StateQueryIterator,
};

use crate::record_store::RecordStore;

/// Claim with its uuid, as embedded in a listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimView {
    /// Claim uuid (second key segment)
    pub uuid: String,
    /// Stored claim body
    #[serde(flatten)]
    pub claim: Claim,
}

/// Contract as returned by a listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractView {
    /// Contract uuid recovered from the key
    pub uuid: String,
    /// Stored contract body
    #[serde(flatten)]
    pub contract: Contract,
    /// Resolved claims, omitted when empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub claims: Vec<ClaimView>,
}

/// Contract listing over a record store
pub struct ContractLister<'a, L> {
    store: &'a RecordStore<L>,
}

impl<'a, L: Ledger> ContractLister<'a, L> {
    /// Create a lister over `store`
    pub fn new(store: &'a RecordStore<L>) -> Self {
        Self { store }
    }

    /// List contracts owned by `owner`, or by everyone if `owner` is empty
    ///
    /// Results come back in store key order. Nothing is read until the
    /// returned iterator is advanced.
    pub fn list_contracts(&self, owner: &str) -> Result<ContractListing<'a, L>> {
        let prefix = self.store.contract_owner_prefix(owner)?;
        let scan = self.store.scan(&prefix)?;
        debug!(target: "rentledger::lister", owner, "Opened contract scan");
        Ok(ContractListing {
            store: self.store,
            scan: Some(scan),
            yielded: 0,
        })
    }
}

/// Lazy sequence of [`ContractView`]s
///
/// Fused: after the scan is exhausted or an error is yielded, `next`
/// returns `None`.
pub struct ContractListing<'a, L> {
    store: &'a RecordStore<L>,
    scan: Option<Box<dyn StateQueryIterator + 'a>>,
    yielded: usize,
}

impl<'a, L: Ledger> ContractListing<'a, L> {
    /// True while the underlying scan is still held
    pub fn is_open(&self) -> bool {
        self.scan.is_some()
    }

    /// Drain the listing, stopping at the first error
    pub fn collect_all(self) -> Result<Vec<ContractView>> {
        self.collect()
    }

    fn release(&mut self) -> Result<()> {
        match self.scan.take() {
            Some(scan) => scan.close(),
            None => Ok(()),
        }
    }

    fn build_view(&self, entry: KeyValue) -> Result<ContractView> {
        let contract: Contract = serde_json::from_slice(&entry.value)?;
        let (prefix, segments) = entry.key.decode()?;
        let uuid = match <[String; 2]>::try_from(segments) {
            Ok([_, uuid]) => uuid,
            Err(segments) => {
                warn!(
                    target: "rentledger::lister",
                    key = %entry.key,
                    segments = segments.len(),
                    "Unexpected contract key shape"
                );
                prefix
            }
        };

        let mut claims = Vec::with_capacity(contract.claim_index.len());
        for claim_uuid in &contract.claim_index {
            match self.store.load_claim(&uuid, claim_uuid)? {
                Some(claim) => claims.push(ClaimView {
                    uuid: claim_uuid.clone(),
                    claim,
                }),
                None => warn!(
                    target: "rentledger::lister",
                    contract = %uuid,
                    claim = %claim_uuid,
                    "Claim index refers to a missing claim"
                ),
            }
        }

        Ok(ContractView {
            uuid,
            contract,
            claims,
        })
    }
}

impl<'a, L: Ledger> Iterator for ContractListing<'a, L> {
    type Item = Result<ContractView>;

    fn next(&mut self) -> Option<Self::Item> {
        let step = self.scan.as_mut()?.next();
        match step {
            None => match self.release() {
                Ok(()) => {
                    debug!(target: "rentledger::lister", count = self.yielded, "Contract scan complete");
                    None
                }
                Err(e) => Some(Err(as_scan_error(e))),
            },
            Some(Err(e)) => {
                // Close first; the scan failure is what the caller sees
                if let Err(close_err) = self.release() {
                    warn!(target: "rentledger::lister", error = %close_err, "Failed to close scan");
                }
                Some(Err(as_scan_error(e)))
            }
            Some(Ok(entry)) => match self.build_view(entry) {
                Ok(view) => {
                    self.yielded += 1;
                    Some(Ok(view))
                }
                Err(e) => {
                    if let Err(close_err) = self.release() {
                        warn!(target: "rentledger::lister", error = %close_err, "Failed to close scan");
                    }
                    Some(Err(e))
                }
            },
        }
    }
}

fn as_scan_error(e: LedgerError) -> LedgerError {
    match e {
        LedgerError::Scan(_) => e,
        other => LedgerError::scan(other),
    }
}

impl<'a, L: Ledger> FusedIterator for ContractListing<'a, L> {}

impl<'a, L> Drop for ContractListing<'a, L> {
    fn drop(&mut self) {
        if let Some(scan) = self.scan.take() {
            if let Err(e) = scan.close() {
                warn!(target: "rentledger::lister", error = %e, "Failed to close scan on drop");
            }
        }
    }
}
