//! Contract command handlers.

use tracing::debug;

use rentledger_core::Ledger;
use rentledger_primitives::{ContractLister, EntityResolver, RecordStore};

use crate::convert::convert_result;
use crate::types::{CreateContractRequest, ListContractsRequest};
use crate::{Output, Result};

/// Handle CreateContract command.
///
/// Returns the owner's credentials only when this call created the owner.
pub fn create_contract<L: Ledger>(
    store: &RecordStore<L>,
    req: CreateContractRequest,
) -> Result<Output> {
    let created = convert_result(EntityResolver::new(store).create_contract(&req.to_new_contract()))?;
    Ok(match created.created_user {
        Some(user) => Output::Credentials {
            username: user.username,
            password: user.password,
        },
        None => Output::Empty,
    })
}

/// Handle ListShopContracts command.
///
/// Drains the listing into one response; the scan is closed before this
/// returns on every path.
pub fn list_shop_contracts<L: Ledger>(
    store: &RecordStore<L>,
    req: ListContractsRequest,
) -> Result<Output> {
    let listing = convert_result(ContractLister::new(store).list_contracts(&req.username))?;
    let views = convert_result(listing.collect_all())?;
    debug!(target: "rentledger::executor", owner = %req.username, count = views.len(), "Listed contracts");
    Ok(Output::Contracts(views))
}
