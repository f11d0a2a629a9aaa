//! Shared helpers for the ledger API suite.

#![allow(dead_code)]

use std::cell::Cell;
use std::sync::{Arc, Once};

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};

use rentledger::{Executor, MemoryLedger, Output};
use rentledger_core::{CompositeKey, KeyValue, Ledger, LedgerError, Result, StateQueryIterator};

static INIT_TRACING: Once = Once::new();

/// Route tracing output through the test harness.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

pub fn executor() -> Executor {
    init_tracing();
    Executor::new(Arc::new(MemoryLedger::new()))
}

pub fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

pub fn user_args(username: &str, password: &str) -> Vec<String> {
    vec![json!({
        "username": username,
        "password": password,
        "first_name": "Jane",
        "last_name": "Doe",
    })
    .to_string()]
}

pub fn contract_body(uuid: &str, username: &str, password: &str) -> Value {
    json!({
        "uuid": uuid,
        "contract_type_uuid": "bike-standard",
        "username": username,
        "password": password,
        "first_name": "Jane",
        "last_name": "Doe",
        "item": {
            "id": 12,
            "brand": "Brompton",
            "model": "C Line",
            "price": 1450.0,
            "description": "folding bike",
            "serial_no": format!("BR-{}", uuid),
        },
        "start_date": date(2024, 4, 1),
        "end_date": date(2025, 4, 1),
        "special_rate": 0.15,
    })
}

pub fn contract_args(uuid: &str, username: &str, password: &str) -> Vec<String> {
    vec![contract_body(uuid, username, password).to_string()]
}

pub fn list_args(username: &str) -> Vec<String> {
    vec![json!({ "username": username }).to_string()]
}

/// Decode an output's wire body.
pub fn body(output: &Output) -> Value {
    serde_json::from_slice(&output.to_payload().unwrap()).unwrap()
}

/// UUIDs of a listing body, in order.
pub fn listed_uuids(output: &Output) -> Vec<String> {
    body(output)
        .as_array()
        .expect("listing is an array")
        .iter()
        .map(|entry| entry["uuid"].as_str().unwrap().to_string())
        .collect()
}

// ============================================================================
// Fault injection
// ============================================================================

/// Substrate wrapper that injects failures and counts scan closes.
#[derive(Default)]
pub struct FaultyLedger {
    pub inner: MemoryLedger,
    pub fail_gets: Cell<bool>,
    pub fail_puts: Cell<bool>,
    /// Scans yield this many entries, then fail
    pub fail_scan_after: Cell<Option<usize>>,
    pub closes: Cell<usize>,
}

pub fn faulty_executor() -> Executor<FaultyLedger> {
    init_tracing();
    Executor::new(Arc::new(FaultyLedger::default()))
}

struct FaultyScan<'a> {
    inner: Box<dyn StateQueryIterator + 'a>,
    remaining: Option<usize>,
    closes: &'a Cell<usize>,
}

impl Iterator for FaultyScan<'_> {
    type Item = Result<KeyValue>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.remaining {
            Some(0) => Some(Err(LedgerError::scan("peer disconnected"))),
            Some(ref mut n) => {
                *n -= 1;
                self.inner.next()
            }
            None => self.inner.next(),
        }
    }
}

impl StateQueryIterator for FaultyScan<'_> {
    fn close(self: Box<Self>) -> Result<()> {
        self.closes.set(self.closes.get() + 1);
        self.inner.close()
    }
}

impl Ledger for FaultyLedger {
    fn get_state(&self, key: &CompositeKey) -> Result<Option<Vec<u8>>> {
        if self.fail_gets.get() {
            return Err(LedgerError::store_failure("endorser unavailable"));
        }
        self.inner.get_state(key)
    }

    fn put_state(&self, key: CompositeKey, value: Vec<u8>) -> Result<()> {
        if self.fail_puts.get() {
            return Err(LedgerError::store_failure("write rejected"));
        }
        self.inner.put_state(key, value)
    }

    fn scan_prefix<'a>(&'a self, prefix: &CompositeKey) -> Result<Box<dyn StateQueryIterator + 'a>> {
        Ok(Box::new(FaultyScan {
            inner: self.inner.scan_prefix(prefix)?,
            remaining: self.fail_scan_after.get(),
            closes: &self.closes,
        }))
    }
}
