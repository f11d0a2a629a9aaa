//! Request and response payload types.
//!
//! Field names are the wire contract. Missing string fields decode as empty
//! strings. Dates are RFC 3339 timestamps; a missing date decodes as the
//! zero date and the submitted offset is kept.

use serde::{Deserialize, Serialize};

use rentledger_core::{zero_time, Item, Timestamp, User};
use rentledger_primitives::NewContract;

// =============================================================================
// Requests
// =============================================================================

/// Payload of `contract_create`
///
/// The owner fields travel flat next to the contract fields. An empty
/// password means the owner must already exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateContractRequest {
    #[serde(default)]
    pub uuid: String,
    #[serde(default)]
    pub contract_type_uuid: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub item: Item,
    #[serde(default = "zero_time")]
    pub start_date: Timestamp,
    #[serde(default = "zero_time")]
    pub end_date: Timestamp,
    #[serde(default)]
    pub special_rate: f64,
}

impl CreateContractRequest {
    /// Owner identity carried by this request
    pub fn owner(&self) -> User {
        User {
            username: self.username.clone(),
            password: self.password.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
        }
    }

    /// Resolver input for this request
    pub fn to_new_contract(&self) -> NewContract {
        NewContract {
            uuid: self.uuid.clone(),
            contract_type_uuid: self.contract_type_uuid.clone(),
            owner: self.owner(),
            item: self.item.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            special_rate: self.special_rate,
        }
    }
}

/// Payload of `user_create`
pub type CreateUserRequest = User;

/// Payload of `shop_contract_ls`; an empty username lists every owner
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListContractsRequest {
    #[serde(default)]
    pub username: String,
}

/// Payload of `user_authenticate`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticateRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Payload of `user_get_info`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfoRequest {
    #[serde(default)]
    pub username: String,
}

// =============================================================================
// Responses
// =============================================================================

/// Public profile of a user; the password is never included
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        UserInfo {
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}
