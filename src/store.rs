//! Persistent key/value storage used for progression (coins, skills).

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::util::cwarn;

pub const KEY_COINS: &str = "sa_coins";
pub const KEY_PURCHASED: &str = "sa_purchased_skills";
pub const KEY_ASSIGNMENTS: &str = "sa_skill_assignments";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("failed to write {key}: {reason}")]
    Write { key: String, reason: String },
    #[error("failed to encode {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove_item(&mut self, key: &str) -> Result<(), StoreError>;
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StoreError> {
        self.items.remove(key);
        Ok(())
    }
}

/// `window.localStorage`.
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Debug)]
pub struct LocalStorage {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    pub fn open() -> Result<Self, StoreError> {
        let win = web_sys::window().ok_or(StoreError::Unavailable)?;
        match win.local_storage() {
            Ok(Some(storage)) => Ok(Self { storage }),
            _ => Err(StoreError::Unavailable),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StoreError::Write {
                key: key.to_string(),
                reason: format!("{e:?}"),
            })
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StoreError> {
        self.storage
            .remove_item(key)
            .map_err(|e| StoreError::Write {
                key: key.to_string(),
                reason: format!("{e:?}"),
            })
    }
}

/// Reads a `u64`; missing or unparsable values read as 0.
pub fn load_u64(store: &impl KeyValueStore, key: &str) -> u64 {
    let Some(raw) = store.get_item(key) else {
        return 0;
    };
    match raw.trim().parse::<u64>() {
        Ok(v) => v,
        Err(_) => {
            cwarn(&format!("[store] ignoring corrupt value for {key}: {raw:?}"));
            0
        }
    }
}

/// Reads a JSON value; missing or corrupt values read as `T::default()`.
pub fn load_json<T: DeserializeOwned + Default>(store: &impl KeyValueStore, key: &str) -> T {
    let Some(raw) = store.get_item(key) else {
        return T::default();
    };
    match serde_json::from_str(&raw) {
        Ok(v) => v,
        Err(e) => {
            cwarn(&format!("[store] ignoring corrupt value for {key}: {e}"));
            T::default()
        }
    }
}

pub fn save_json<T: Serialize + ?Sized>(
    store: &mut impl KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(value).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set_item(key, &raw)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::{KeyValueStore, MemoryStore, StoreError};

    /// Memory store that refuses writes to one key.
    #[derive(Clone, Debug, Default)]
    pub struct FailingStore {
        pub inner: MemoryStore,
        pub fail_key: Option<&'static str>,
    }

    impl KeyValueStore for FailingStore {
        fn get_item(&self, key: &str) -> Option<String> {
            self.inner.get_item(key)
        }

        fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            if self.fail_key == Some(key) {
                return Err(StoreError::Write {
                    key: key.to_string(),
                    reason: "quota exceeded".to_string(),
                });
            }
            self.inner.set_item(key, value)
        }

        fn remove_item(&mut self, key: &str) -> Result<(), StoreError> {
            self.inner.remove_item(key)
        }
    }
}
