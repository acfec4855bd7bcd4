//! Mock identity session
//!
//! Login and signup only shape an identity record and persist it; no password
//! is stored or verified anywhere. Logging out removes the identity record and
//! leaves progress alone.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::{KeyValueStore, SharedStore, keys, load_json, save_json_best_effort};

/// Display name given to identities created through login
pub const DEFAULT_LOGIN_NAME: &str = "Cyber_Explorer";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessLevel {
    /// Signed in to an existing account
    Authenticated,
    /// Freshly registered
    NewUser,
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authenticated => f.write_str("AUTHENTICATED"),
            Self::NewUser => f.write_str("NEW_USER"),
        }
    }
}

/// Identity record stored under [`keys::IDENTITY`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub join_date: DateTime<Utc>,
    pub access_level: AccessLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("PASSWORD MISMATCH - Security protocols failed!")]
    PasswordMismatch,
}

/// Signup form input
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm: String,
}

fn require(value: &str, field: &'static str) -> Result<(), AuthError> {
    if value.trim().is_empty() {
        Err(AuthError::MissingField(field))
    } else {
        Ok(())
    }
}

/// Current identity, if any, bound to its storage key
pub struct Session {
    identity: Option<Identity>,
    store: SharedStore,
}

impl Session {
    /// Load the persisted identity. Absent or malformed means signed out.
    pub fn restore(store: SharedStore) -> Self {
        let identity: Option<Identity> = load_json(store.as_ref(), keys::IDENTITY);
        if let Some(identity) = &identity {
            tracing::debug!("Restored session for {}", identity.email);
        }
        Self { identity, store }
    }

    pub fn current(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    pub fn login(&mut self, email: &str, password: &str) -> Result<&Identity, AuthError> {
        require(email, "email")?;
        require(password, "password")?;

        let identity = Identity {
            name: DEFAULT_LOGIN_NAME.to_string(),
            email: email.trim().to_string(),
            avatar: None,
            join_date: Utc::now(),
            access_level: AccessLevel::Authenticated,
        };
        tracing::info!("ACCESS GRANTED for {}", identity.email);
        Ok(self.establish(identity))
    }

    pub fn signup(&mut self, form: &SignupForm) -> Result<&Identity, AuthError> {
        if form.password != form.confirm {
            return Err(AuthError::PasswordMismatch);
        }
        require(&form.name, "name")?;
        require(&form.email, "email")?;
        require(&form.password, "password")?;

        let identity = Identity {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            avatar: None,
            join_date: Utc::now(),
            access_level: AccessLevel::NewUser,
        };
        tracing::info!("ACCOUNT CREATED for {}", identity.email);
        Ok(self.establish(identity))
    }

    /// Clear the identity. Returns the identity that was signed in.
    pub fn logout(&mut self) -> Option<Identity> {
        let previous = self.identity.take();
        if let Err(e) = self.store.remove(keys::IDENTITY) {
            tracing::warn!("Failed to remove identity record: {}", e);
        }
        if previous.is_some() {
            tracing::info!("SYSTEM LOGOUT - Connection terminated");
        }
        previous
    }

    fn establish(&mut self, identity: Identity) -> &Identity {
        save_json_best_effort(self.store.as_ref(), keys::IDENTITY, &identity);
        self.identity.insert(identity)
    }
}
