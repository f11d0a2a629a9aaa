//! Test modules for the executor crate.


use std::sync::Arc;

use crate::{Executor, MemoryLedger};

/// Create a test executor over a fresh in-memory ledger.
pub(crate) fn create_test_executor() -> Executor {
    Executor::new(Arc::new(MemoryLedger::new()))
}

pub(crate) fn user_json(username: &str, password: &str) -> String {
    format!(
        r#"{{"username":"{}","password":"{}","first_name":"First","last_name":"Last"}}"#,
        username, password
    )
}

pub(crate) fn contract_json(uuid: &str, username: &str, password: &str) -> String {
    format!(
        r#"{{
            "uuid": "{}",
            "contract_type_uuid": "ct-phone",
            "username": "{}",
            "password": "{}",
            "first_name": "First",
            "last_name": "Last",
            "item": {{"id": 7, "brand": "Nokia", "model": "3310", "price": 49.9,
                      "description": "phone", "serial_no": "N-1"}},
            "start_date": "2024-01-01T00:00:00Z",
            "end_date": "2025-01-01T00:00:00Z",
            "special_rate": 0.5
        }}"#,
        uuid, username, password
    )
}

pub(crate) fn one(arg: String) -> Vec<String> {
    vec![arg]
}
