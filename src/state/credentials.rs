//! Persisted bearer token and user profile.
//!
//! SYSTEM CONTEXT
//! ==============
//! Two independent key-value entries survive page reloads: `token` (raw
//! string) and `user` (versioned JSON). Only the session context writes
//! them; the HTTP client only reads the token.
//!
//! SCHEMA
//! ======
//! `{"version":1,"email":..,"role":"admin"|"customer","name"?,"phone"?}`.
//! Records written before versioning (same fields, no `version`) are
//! migrated in place. Anything else is treated as corrupt and both entries
//! are removed.

#[cfg(test)]
#[path = "credentials_test.rs"]
mod credentials_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::net::types::{Role, User};

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";
pub const USER_SCHEMA_VERSION: u32 = 1;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("failed to write {key}: {reason}")]
    Write { key: String, reason: String },
    #[error("failed to encode user record: {0}")]
    Encode(String),
}

/// Durable string key-value storage (browser `localStorage` in production).
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str);
}

/// In-process storage for tests and non-browser builds.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).remove(key);
    }
}

/// `window.localStorage`, looked up per call so the handle stays `Send + Sync`.
#[cfg(feature = "csr")]
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

#[cfg(feature = "csr")]
impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

#[cfg(feature = "csr")]
impl KeyValueStorage for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = Self::storage().ok_or(StorageError::Unavailable)?;
        storage.set_item(key, value).map_err(|e| StorageError::Write {
            key: key.to_owned(),
            reason: format!("{e:?}"),
        })
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// On-disk shape of the `user` entry.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct PersistedUser {
    version: Option<u32>,
    email: String,
    role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
}

impl PersistedUser {
    fn current(user: &User) -> Self {
        Self {
            version: Some(USER_SCHEMA_VERSION),
            email: user.email.clone(),
            role: user.role,
            name: user.name.clone(),
            phone: user.phone.clone(),
        }
    }

    fn into_user(self) -> User {
        User { email: self.email, role: self.role, name: self.name, phone: self.phone }
    }
}

/// A token and the user it belongs to, always loaded and saved together.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
    pub user: User,
}

#[derive(Clone)]
pub struct CredentialStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl CredentialStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Write both entries, replacing whatever was there.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if either entry cannot be written; in that case
    /// both entries are removed so no half-written record survives.
    pub fn save(&self, token: &str, user: &User) -> Result<(), StorageError> {
        let raw = serde_json::to_string(&PersistedUser::current(user)).map_err(|e| StorageError::Encode(e.to_string()))?;
        let written = self
            .storage
            .set(TOKEN_KEY, token)
            .and_then(|()| self.storage.set(USER_KEY, &raw));
        if written.is_err() {
            self.clear();
        }
        written
    }

    /// Read both entries. Missing, partial, or malformed records yield `None`
    /// and are removed.
    pub fn load(&self) -> Option<Credentials> {
        let token = self.storage.get(TOKEN_KEY);
        let raw_user = self.storage.get(USER_KEY);
        let (Some(token), Some(raw_user)) = (token, raw_user) else {
            self.clear();
            return None;
        };
        if token.trim().is_empty() {
            log::warn!("persisted token is empty; clearing credentials");
            self.clear();
            return None;
        }

        let persisted = match serde_json::from_str::<PersistedUser>(&raw_user) {
            Ok(persisted) => persisted,
            Err(e) => {
                log::warn!("persisted user record is corrupt ({e}); clearing credentials");
                self.clear();
                return None;
            }
        };

        match persisted.version {
            Some(USER_SCHEMA_VERSION) => Some(Credentials { token, user: persisted.into_user() }),
            None => {
                let user = persisted.into_user();
                log::info!("migrating unversioned user record to v{USER_SCHEMA_VERSION}");
                if let Err(e) = self.save(&token, &user) {
                    log::warn!("could not rewrite migrated user record: {e}");
                    return None;
                }
                Some(Credentials { token, user })
            }
            Some(other) => {
                log::warn!("unsupported user record version {other}; clearing credentials");
                self.clear();
                None
            }
        }
    }

    /// Remove both entries. Idempotent.
    pub fn clear(&self) {
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(USER_KEY);
    }

    /// Current token, read-only. Used by the request interceptor.
    pub fn token(&self) -> Option<String> {
        self.storage.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("has_token", &self.token().is_some())
            .finish()
    }
}
