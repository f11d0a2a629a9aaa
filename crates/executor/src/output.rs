//! Output enum for command execution results.
//!
//! Each command produces one of a small set of response shapes. Which shape
//! a create command returns depends on ledger state, so both shapes are
//! named variants rather than ad-hoc objects.

use serde::{Deserialize, Serialize};

use rentledger_primitives::ContractView;

use crate::types::UserInfo;
use crate::{Error, Result};

/// Successful command execution results.
///
/// | Command | Output |
/// |---------|--------|
/// | `CreateContract` | `Credentials` if the owner was created, else `Empty` |
/// | `CreateUser` | `Empty` if created, else `Credentials` of the stored user |
/// | `ListShopContracts` | `Contracts` |
/// | `AuthenticateUser` | `Authenticated` |
/// | `GetUserInfo` | `UserInfo` |
///
/// Use [`Output::to_payload`] for the wire bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Output {
    /// Empty acknowledgment, encoded as `{}`
    Empty,

    /// Username and password of a user
    Credentials {
        /// Stored username
        username: String,
        /// Stored password
        password: String,
    },

    /// Contract listing in store key order
    Contracts(Vec<ContractView>),

    /// Authentication verdict
    Authenticated(bool),

    /// Public user profile
    UserInfo(UserInfo),
}

#[derive(Serialize)]
struct EmptyBody {}

#[derive(Serialize)]
struct CredentialsBody<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct AuthenticatedBody {
    authenticated: bool,
}

impl Output {
    /// Encode the response body as JSON bytes.
    pub fn to_payload(&self) -> Result<Vec<u8>> {
        let bytes = match self {
            Output::Empty => serde_json::to_vec(&EmptyBody {}),
            Output::Credentials { username, password } => {
                serde_json::to_vec(&CredentialsBody { username, password })
            }
            Output::Contracts(views) => serde_json::to_vec(views),
            Output::Authenticated(authenticated) => serde_json::to_vec(&AuthenticatedBody {
                authenticated: *authenticated,
            }),
            Output::UserInfo(info) => serde_json::to_vec(info),
        };
        bytes.map_err(|e| Error::Serialization {
            reason: e.to_string(),
        })
    }

    /// True for the empty acknowledgment
    pub fn is_empty(&self) -> bool {
        matches!(self, Output::Empty)
    }
}
