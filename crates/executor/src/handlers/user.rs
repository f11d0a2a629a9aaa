//! User command handlers.

use rentledger_core::Ledger;
use rentledger_primitives::{EntityResolver, RecordStore, UserCreation};

use crate::convert::convert_result;
use crate::types::{AuthenticateRequest, CreateUserRequest, UserInfoRequest};
use crate::{Output, Result};

/// Handle CreateUser command.
///
/// A fresh user yields `Output::Empty`; an existing one yields its stored
/// credentials.
pub fn create_user<L: Ledger>(store: &RecordStore<L>, req: CreateUserRequest) -> Result<Output> {
    let created = convert_result(EntityResolver::new(store).create_user(&req))?;
    Ok(match created {
        UserCreation::Created => Output::Empty,
        UserCreation::AlreadyExists(existing) => Output::Credentials {
            username: existing.username,
            password: existing.password,
        },
    })
}

/// Handle AuthenticateUser command.
pub fn authenticate_user<L: Ledger>(
    store: &RecordStore<L>,
    req: AuthenticateRequest,
) -> Result<Output> {
    let ok = convert_result(
        EntityResolver::new(store).authenticate_user(&req.username, &req.password),
    )?;
    Ok(Output::Authenticated(ok))
}

/// Handle GetUserInfo command.
pub fn get_user_info<L: Ledger>(store: &RecordStore<L>, req: UserInfoRequest) -> Result<Output> {
    let user = convert_result(EntityResolver::new(store).user_info(&req.username))?;
    Ok(Output::UserInfo(user.into()))
}
