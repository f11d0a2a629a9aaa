//! Command enum defining all ledger operations.
//!
//! Commands are the instruction set of the executor. Each entry point the
//! hosting substrate can invoke by name maps to exactly one variant here.
//!
//! Commands are:
//! - **Self-contained**: the decoded request payload is the variant's data
//! - **Serializable**: can be converted to/from JSON
//! - **Pure data**: no closures or executable code

use serde::{Deserialize, Serialize};

use crate::types::*;
use crate::{Error, Result};

/// A decoded invocation.
///
/// # Entry points
///
/// | Function | Variant | Positional args |
/// |----------|---------|-----------------|
/// | `contract_create` | `CreateContract` | 1 |
/// | `user_create` | `CreateUser` | 1 |
/// | `shop_contract_ls` | `ListShopContracts` | 0 or 1 |
/// | `user_authenticate` | `AuthenticateUser` | 1 |
/// | `user_get_info` | `GetUserInfo` | 1 |
///
/// # Example
///
/// ```ignore
/// use rentledger_executor::Command;
///
/// let cmd = Command::from_invocation("shop_contract_ls", &[r#"{"username":"alice"}"#.into()])?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum Command {
    /// Create a contract, creating its owner if credentials are given.
    /// Returns: `Output::Empty` or `Output::Credentials`
    CreateContract(CreateContractRequest),

    /// Get-or-create a user.
    /// Returns: `Output::Empty` or `Output::Credentials`
    CreateUser(CreateUserRequest),

    /// List contracts by owner, or all contracts.
    /// Returns: `Output::Contracts`
    ListShopContracts(ListContractsRequest),

    /// Check a username/password pair.
    /// Returns: `Output::Authenticated`
    AuthenticateUser(AuthenticateRequest),

    /// Fetch a user's public profile.
    /// Returns: `Output::UserInfo`
    GetUserInfo(UserInfoRequest),
}

impl Command {
    /// Function name of `CreateContract`
    pub const CONTRACT_CREATE: &'static str = "contract_create";
    /// Function name of `CreateUser`
    pub const USER_CREATE: &'static str = "user_create";
    /// Function name of `ListShopContracts`
    pub const SHOP_CONTRACT_LS: &'static str = "shop_contract_ls";
    /// Function name of `AuthenticateUser`
    pub const USER_AUTHENTICATE: &'static str = "user_authenticate";
    /// Function name of `GetUserInfo`
    pub const USER_GET_INFO: &'static str = "user_get_info";

    /// Every function name this executor answers to
    pub const FUNCTIONS: [&'static str; 5] = [
        Self::CONTRACT_CREATE,
        Self::USER_CREATE,
        Self::SHOP_CONTRACT_LS,
        Self::USER_AUTHENTICATE,
        Self::USER_GET_INFO,
    ];

    /// Decode a named invocation with positional JSON arguments.
    ///
    /// The function name is checked first, then the argument count, then
    /// the payload.
    pub fn from_invocation(function: &str, args: &[String]) -> Result<Self> {
        match function {
            Self::CONTRACT_CREATE => Ok(Command::CreateContract(decode(single_arg(args)?)?)),
            Self::USER_CREATE => Ok(Command::CreateUser(decode(single_arg(args)?)?)),
            Self::SHOP_CONTRACT_LS => match args {
                [] => Ok(Command::ListShopContracts(ListContractsRequest::default())),
                [arg] => Ok(Command::ListShopContracts(decode(arg)?)),
                _ => Err(Error::InvalidArgumentCount {
                    expected: 1,
                    actual: args.len(),
                }),
            },
            Self::USER_AUTHENTICATE => Ok(Command::AuthenticateUser(decode(single_arg(args)?)?)),
            Self::USER_GET_INFO => Ok(Command::GetUserInfo(decode(single_arg(args)?)?)),
            other => Err(Error::UnknownFunction {
                name: other.to_string(),
            }),
        }
    }

    /// Function name this command was invoked as
    pub fn name(&self) -> &'static str {
        match self {
            Command::CreateContract(_) => Self::CONTRACT_CREATE,
            Command::CreateUser(_) => Self::USER_CREATE,
            Command::ListShopContracts(_) => Self::SHOP_CONTRACT_LS,
            Command::AuthenticateUser(_) => Self::USER_AUTHENTICATE,
            Command::GetUserInfo(_) => Self::USER_GET_INFO,
        }
    }
}

fn single_arg(args: &[String]) -> Result<&str> {
    match args {
        [arg] => Ok(arg.as_str()),
        _ => Err(Error::InvalidArgumentCount {
            expected: 1,
            actual: args.len(),
        }),
    }
}

fn decode<T: serde::de::DeserializeOwned>(arg: &str) -> Result<T> {
    serde_json::from_str(arg).map_err(Error::decode)
}
