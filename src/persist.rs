//! Session Persistence
//!
//! Mirrors the signed-in user to local storage so a reload keeps the session.
//! Large inline profile pictures go under their own key and the main record
//! holds a `__REF__<key>__` sentinel instead, keeping each write small.

#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::sync::Mutex;

use log::{debug, error, warn};
use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::models::User;

pub const SESSION_KEY: &str = "auth-storage";
const REF_PREFIX: &str = "__REF__";
const REF_SUFFIX: &str = "__";

/// Minimal string key-value store (local storage in the browser)
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// `window.localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or(StorageError::Unavailable)
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StorageError::Other(format!("{e:?}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        // setItem throws QuotaExceededError when full
        Self::storage()?
            .set_item(key, value)
            .map_err(|_| StorageError::QuotaExceeded { key: key.to_string() })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Other(format!("{e:?}")))
    }
}

/// In-memory store with an optional per-value size cap
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
    max_value_len: Option<usize>,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject any single write longer than `max_value_len`
    pub fn with_quota(max_value_len: usize) -> Self {
        Self {
            entries: Mutex::default(),
            max_value_len: Some(max_value_len),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.entries
            .lock()
            .map_err(|_| StorageError::Other("storage lock poisoned".to_string()))
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.max_value_len.is_some_and(|max| value.len() > max) {
            return Err(StorageError::QuotaExceeded { key: key.to_string() });
        }
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// On-disk layout of the main record
#[derive(Debug, Serialize, Deserialize)]
struct Persisted {
    state: PersistedState,
    #[serde(default)]
    version: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedState {
    #[serde(rename = "authUser")]
    auth_user: Option<User>,
}

pub fn picture_key(email: &str) -> String {
    format!("profile_pic_{email}")
}

fn sentinel(key: &str) -> String {
    format!("{REF_PREFIX}{key}{REF_SUFFIX}")
}

/// Key named by a sentinel, if `value` is one
fn sentinel_key(value: &str) -> Option<&str> {
    value
        .strip_prefix(REF_PREFIX)?
        .strip_suffix(REF_SUFFIX)
        .filter(|key| !key.is_empty())
}

/// Session persistence bound to a store and the inline-image threshold
pub struct SessionPersistence<'a> {
    store: &'a dyn KeyValueStore,
    threshold: usize,
}

impl<'a> SessionPersistence<'a> {
    pub fn new(store: &'a dyn KeyValueStore, threshold: usize) -> Self {
        Self { store, threshold }
    }

    /// Write the current user (or its absence) to storage
    pub fn save(&self, user: Option<&User>) -> Result<(), StorageError> {
        let stored = user.map(|u| self.detach_picture(u.clone()));
        let record = Persisted {
            state: PersistedState { auth_user: stored },
            version: 0,
        };
        let json = serde_json::to_string(&record)
            .map_err(|e| StorageError::Other(e.to_string()))?;
        self.store.set(SESSION_KEY, &json)
    }

    /// Moves an oversized picture to its own key. If that write fails the
    /// picture is dropped from the record instead of risking the main write.
    fn detach_picture(&self, mut user: User) -> User {
        let Some(pic) = user.profile_pic.as_deref() else {
            return user;
        };
        if pic.len() < self.threshold {
            return user;
        }

        let key = picture_key(&user.email);
        debug!("Storing large profile pic separately under {key}");
        user.profile_pic = match self.store.set(&key, pic) {
            Ok(()) => Some(sentinel(&key)),
            Err(e) => {
                error!("Error storing profile pic: {e}");
                None
            }
        };
        user
    }

    /// Read the persisted user, resolving a sentinel picture
    pub fn load(&self) -> Option<User> {
        let raw = match self.store.get(SESSION_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("Could not read persisted session: {e}");
                return None;
            }
        };
        let record: Persisted = match serde_json::from_str(&raw) {
            Ok(record) => record,
            Err(e) => {
                error!("Discarding corrupt persisted session: {e}");
                return None;
            }
        };

        let mut user = record.state.auth_user?;
        let key = user.profile_pic.as_deref().and_then(sentinel_key).map(str::to_string);
        if let Some(key) = key {
            debug!("Rehydrating profile pic from key: {key}");
            user.profile_pic = match self.store.get(&key) {
                Ok(Some(pic)) => Some(pic),
                Ok(None) => {
                    error!("Failed to find profile pic in storage");
                    None
                }
                Err(e) => {
                    error!("Error rehydrating profile pic: {e}");
                    None
                }
            };
        }
        Some(user)
    }

    /// Forget the session, including any side-stored picture
    pub fn clear(&self, previous: Option<&User>) -> Result<(), StorageError> {
        if let Some(user) = previous {
            self.store.remove(&picture_key(&user.email))?;
        }
        self.save(None)
    }
}
