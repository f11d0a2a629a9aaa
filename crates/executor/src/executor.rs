//! The Executor - single entry point to the ledger record store.
//!
//! The Executor routes commands to handlers and converts results to
//! outputs. Every invocation runs over its own write set: writes are
//! committed to the substrate only if the handler succeeded, and only if
//! none of the keys it read were changed by another commit meanwhile.

use std::sync::Arc;

use tracing::{debug, info, warn};

use rentledger_core::Ledger;
use rentledger_primitives::RecordStore;
use rentledger_storage::{LedgerTxn, MemoryLedger};

use crate::config::LedgerConfig;
use crate::convert::convert_result;
use crate::{Command, Output, Result};

/// The command executor.
///
/// The Executor is **stateless**: it holds a handle to the substrate and its
/// configuration but keeps nothing between invocations. All state lives in
/// the ledger.
///
/// # Thread Safety
///
/// Executor is `Send + Sync` whenever the substrate is.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use rentledger_executor::Executor;
/// use rentledger_storage::MemoryLedger;
///
/// let executor = Executor::new(Arc::new(MemoryLedger::new()));
/// let output = executor.invoke(
///     "user_create",
///     &[r#"{"username":"alice","password":"pw"}"#.to_string()],
/// )?;
/// let body = output.to_payload()?;
/// ```
pub struct Executor<L = MemoryLedger> {
    ledger: Arc<L>,
    config: LedgerConfig,
}

impl<L: Ledger> Executor<L> {
    /// Create an executor with the default configuration.
    pub fn new(ledger: Arc<L>) -> Self {
        Self::with_config(ledger, LedgerConfig::default())
    }

    /// Create an executor with an explicit configuration.
    pub fn with_config(ledger: Arc<L>, config: LedgerConfig) -> Self {
        Self { ledger, config }
    }

    /// The substrate this executor writes to.
    pub fn ledger(&self) -> &Arc<L> {
        &self.ledger
    }

    /// Active configuration.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Decode and execute a named invocation.
    pub fn invoke(&self, function: &str, args: &[String]) -> Result<Output> {
        let cmd = Command::from_invocation(function, args).map_err(|e| {
            warn!(target: "rentledger::executor", function, error = %e, "Rejected invocation");
            e
        })?;
        self.execute(cmd)
    }

    /// Execute a single command.
    ///
    /// The first error aborts the command and its buffered writes are
    /// dropped. On success the writes are committed in key order; a commit
    /// that loses a race on a key it read fails with `StoreFailure`.
    pub fn execute(&self, cmd: Command) -> Result<Output> {
        let name = cmd.name();
        if self.config.log_payloads {
            debug!(target: "rentledger::executor", command = ?cmd, "Executing");
        } else {
            debug!(target: "rentledger::executor", function = name, "Executing");
        }

        let txn = LedgerTxn::new(self.ledger.as_ref());
        let result = {
            let store = RecordStore::with_limits(&txn, self.config.limits.clone());
            Self::dispatch(&store, cmd)
        };

        match result {
            Ok(output) => match convert_result(txn.commit()) {
                Ok(writes) => {
                    info!(target: "rentledger::executor", function = name, writes, "Command complete");
                    Ok(output)
                }
                Err(e) => {
                    warn!(
                        target: "rentledger::executor",
                        function = name,
                        code = e.code(),
                        error = %e,
                        "Commit rejected"
                    );
                    Err(e)
                }
            },
            Err(e) => {
                warn!(
                    target: "rentledger::executor",
                    function = name,
                    code = e.code(),
                    error = %e,
                    discarded = txn.pending_writes(),
                    "Command failed"
                );
                Err(e)
            }
        }
    }

    /// Execute several commands in order, each in its own write set.
    pub fn execute_many(&self, cmds: Vec<Command>) -> Vec<Result<Output>> {
        cmds.into_iter().map(|cmd| self.execute(cmd)).collect()
    }

    fn dispatch<S: Ledger>(store: &RecordStore<S>, cmd: Command) -> Result<Output> {
        match cmd {
            Command::CreateContract(req) => crate::handlers::contract::create_contract(store, req),
            Command::CreateUser(req) => crate::handlers::user::create_user(store, req),
            Command::ListShopContracts(req) => {
                crate::handlers::contract::list_shop_contracts(store, req)
            }
            Command::AuthenticateUser(req) => crate::handlers::user::authenticate_user(store, req),
            Command::GetUserInfo(req) => crate::handlers::user::get_user_info(store, req),
        }
    }
}
