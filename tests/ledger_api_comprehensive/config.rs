//! `rentledger.toml` lifecycle and its effect on execution.

use std::sync::Arc;

use rentledger::{Command, Executor, LedgerConfig, Limits, MemoryLedger, CONFIG_FILE_NAME};
use tempfile::TempDir;

use crate::common::*;

#[test]
fn default_file_is_written_once_and_loads() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);

    LedgerConfig::write_default_if_missing(&path).unwrap();
    let original = std::fs::read_to_string(&path).unwrap();
    LedgerConfig::write_default_if_missing(&path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), original);

    let config = LedgerConfig::from_file(&path).unwrap();
    assert_eq!(config, LedgerConfig::default());
}

#[test]
fn configured_limits_apply_to_invocations() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    LedgerConfig {
        log_payloads: false,
        limits: Limits {
            max_key_bytes: 24,
            ..Limits::default()
        },
    }
    .write_to_file(&path)
    .unwrap();

    init_tracing();
    let config = LedgerConfig::from_file(&path).unwrap();
    let executor = Executor::with_config(Arc::new(MemoryLedger::new()), config);

    executor.invoke(Command::USER_CREATE, &user_args("kim", "pw")).unwrap();
    let err = executor
        .invoke(
            Command::USER_CREATE,
            &user_args("a-username-well-past-the-key-limit", "pw"),
        )
        .unwrap_err();
    assert_eq!(err.code(), "key_encoding_error");
    assert_eq!(executor.ledger().len(), 1);
}

#[test]
fn payload_logging_does_not_change_results() {
    init_tracing();
    let quiet = Executor::new(Arc::new(MemoryLedger::new()));
    let verbose = Executor::with_config(
        Arc::new(MemoryLedger::new()),
        LedgerConfig {
            log_payloads: true,
            ..LedgerConfig::default()
        },
    );
    let args = contract_args("c1", "lou", "pw");
    assert_eq!(
        quiet.invoke(Command::CONTRACT_CREATE, &args).unwrap(),
        verbose.invoke(Command::CONTRACT_CREATE, &args).unwrap()
    );
}
