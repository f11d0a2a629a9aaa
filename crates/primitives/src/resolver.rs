//! EntityResolver: user get-or-create and contract creation
//!
//! ## User identity
//!
//! Users are created once. Every later creation attempt with the same
//! username returns the stored record untouched; input passwords and names
//! are ignored on that path, so an identity can never be overwritten.
//!
//! ## Contracts
//!
//! Contract creation requires the owner to exist, either already or created
//! in the same request. Unlike users, contracts are written unconditionally:
//! creating the same (owner, uuid) twice replaces the first body.
//!
//! The concurrent get-or-create race is left to the substrate's own
//! transaction isolation; no locking happens here.

use tracing::{debug, info};

use rentledger_core::{Contract, Item, Ledger, LedgerError, Result, Timestamp, User};

use crate::record_store::RecordStore;

/// Outcome of [`EntityResolver::resolve_or_create_user`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserResolution {
    /// No user existed; the input was stored
    Created(User),
    /// A user existed and was returned unchanged
    Existing(User),
    /// Credentials were not supplied; the user was only checked for
    /// existence and the input stands in as the identity
    Verified(User),
}

impl UserResolution {
    /// The resolved identity
    pub fn user(&self) -> &User {
        match self {
            UserResolution::Created(u)
            | UserResolution::Existing(u)
            | UserResolution::Verified(u) => u,
        }
    }

    /// True if this call stored a new user
    pub fn was_created(&self) -> bool {
        matches!(self, UserResolution::Created(_))
    }
}

/// Outcome of [`EntityResolver::create_user`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCreation {
    /// The user was stored
    Created,
    /// A user with this username already existed
    AlreadyExists(User),
}

/// Fields of a contract to create
#[derive(Debug, Clone, PartialEq)]
pub struct NewContract {
    /// Contract uuid (second key segment)
    pub uuid: String,
    /// Contract type reference
    pub contract_type_uuid: String,
    /// Owner identity; empty password means "must already exist"
    pub owner: User,
    /// Rented item
    pub item: Item,
    /// Coverage start
    pub start_date: Timestamp,
    /// Coverage end
    pub end_date: Timestamp,
    /// Negotiated rate
    pub special_rate: f64,
}

/// Outcome of [`EntityResolver::create_contract`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCreation {
    /// Set when the owner was created by this call
    pub created_user: Option<User>,
}

/// Create-or-fetch logic for users and contracts
pub struct EntityResolver<'a, L> {
    store: &'a RecordStore<L>,
}

impl<'a, L: Ledger> EntityResolver<'a, L> {
    /// Create a resolver over `store`
    pub fn new(store: &'a RecordStore<L>) -> Self {
        Self { store }
    }

    /// Resolve the identity named by `input`, creating it when credentials are given
    ///
    /// - username and password both non-empty: get-or-create
    /// - otherwise: the user must exist, or `UserNotFound`
    pub fn resolve_or_create_user(&self, input: &User) -> Result<UserResolution> {
        let key = self.store.user_key(&input.username)?;

        if !input.has_credentials() {
            if !self.store.exists(&key)? {
                return Err(LedgerError::user_not_found(&input.username));
            }
            return Ok(UserResolution::Verified(input.clone()));
        }

        match self.store.load::<User>(&key)? {
            Some(existing) => {
                debug!(target: "rentledger::resolver", username = %existing.username, "User already exists");
                Ok(UserResolution::Existing(existing))
            }
            None => {
                let user = input.clone();
                self.store.save(key, &user)?;
                info!(target: "rentledger::resolver", username = %user.username, "Created user");
                Ok(UserResolution::Created(user))
            }
        }
    }

    /// Get-or-create a user regardless of which fields are filled
    pub fn create_user(&self, input: &User) -> Result<UserCreation> {
        let key = self.store.user_key(&input.username)?;
        match self.store.load::<User>(&key)? {
            Some(existing) => {
                debug!(target: "rentledger::resolver", username = %existing.username, "User already exists");
                Ok(UserCreation::AlreadyExists(existing))
            }
            None => {
                self.store.save(key, input)?;
                info!(target: "rentledger::resolver", username = %input.username, "Created user");
                Ok(UserCreation::Created)
            }
        }
    }

    /// Create a contract, resolving its owner first
    ///
    /// Overwrites any contract already stored under (owner, uuid).
    pub fn create_contract(&self, input: &NewContract) -> Result<ContractCreation> {
        let resolution = self.resolve_or_create_user(&input.owner)?;

        let contract = Contract {
            username: input.owner.username.clone(),
            contract_type_uuid: input.contract_type_uuid.clone(),
            item: input.item.clone(),
            start_date: input.start_date,
            end_date: input.end_date,
            special_rate: input.special_rate,
            void: false,
            claim_index: Vec::new(),
        };
        self.store.save_contract(&input.uuid, &contract)?;
        info!(
            target: "rentledger::resolver",
            username = %contract.username,
            uuid = %input.uuid,
            "Created contract"
        );

        let created_user = match resolution {
            UserResolution::Created(user) => Some(user),
            UserResolution::Existing(_) | UserResolution::Verified(_) => None,
        };
        Ok(ContractCreation { created_user })
    }

    /// Check a username/password pair against the stored user
    ///
    /// Unknown users and wrong passwords both yield `false`.
    pub fn authenticate_user(&self, username: &str, password: &str) -> Result<bool> {
        Ok(match self.store.load_user(username)? {
            Some(user) => user.password == password,
            None => false,
        })
    }

    /// Fetch a stored user or fail with `UserNotFound`
    pub fn user_info(&self, username: &str) -> Result<User> {
        self.store
            .load_user(username)?
            .ok_or_else(|| LedgerError::user_not_found(username))
    }
}
