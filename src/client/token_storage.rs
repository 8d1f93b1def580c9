//! Persistent storage for the auth token.
//!
//! This module provides a small adapter over a string key/value store:
//! 1. **[`KeyValueStore`]**: the raw store. `localStorage` in the browser,
//!    an in-memory map everywhere else (native builds and tests).
//! 2. **[`LocalStorage`]**: JSON-encodes values on the way in and decodes them
//!    on the way out. Writing a value that serializes to `null` removes the key.
//! 3. **[`TokenStorage`]**: the one key the application persists.
//!
//! ## Security Considerations
//!
//! - `localStorage` is readable by any script on the page (XSS exposure)
//! - Tokens are kept only so a reload does not log the user out
//! - Always use HTTPS in production to prevent token interception

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Storage key for the auth token
pub const TOKEN_STORAGE_KEY: &str = "jobly-token";

/// A synchronous string key/value store with `localStorage` semantics.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);
}

/// In-memory store. Clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.items.borrow().contains_key(key)
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove_item(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

/// Browser `window.localStorage`.
///
/// Every call looks the storage up again; when it is unavailable (private
/// mode, sandboxed iframe) reads return `None` and writes are dropped.
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(target_arch = "wasm32")]
impl BrowserStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set_item(&self, key: &str, value: &str) {
        match Self::storage() {
            Some(storage) => {
                if storage.set_item(key, value).is_err() {
                    tracing::warn!("localStorage rejected write for {}", key);
                }
            }
            None => tracing::warn!("localStorage unavailable, {} not persisted", key),
        }
    }

    fn remove_item(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// The store used by the running application.
#[cfg(target_arch = "wasm32")]
pub type PlatformStorage = BrowserStorage;

/// The store used by the running application.
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformStorage = MemoryStorage;

/// JSON-encoding adapter over a [`KeyValueStore`].
#[derive(Clone, Debug, Default)]
pub struct LocalStorage<S> {
    store: S,
}

impl<S: KeyValueStore> LocalStorage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reads and decodes the value stored under `key`.
    ///
    /// Returns `None` if the key is absent or does not hold valid JSON for `T`.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let json = self.store.get_item(key)?;
        match serde_json::from_str(&json) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!("Ignoring unreadable value stored under {}: {}", key, err);
                None
            }
        }
    }

    /// Encodes and stores `value` under `key`.
    ///
    /// A value that serializes to `null` (`None`, `()`, `Value::Null`)
    /// removes the key instead.
    pub fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        match serde_json::to_value(value) {
            Ok(Value::Null) => {
                tracing::trace!("Removing {} from storage", key);
                self.store.remove_item(key);
            }
            Ok(json) => {
                tracing::trace!("Persisting {} to storage", key);
                self.store.set_item(key, &json.to_string());
            }
            Err(err) => tracing::error!("Failed to encode value for {}: {}", key, err),
        }
    }
}

/// Persistence for the auth token under [`TOKEN_STORAGE_KEY`].
#[derive(Clone, Debug, Default)]
pub struct TokenStorage<S> {
    storage: LocalStorage<S>,
}

impl<S: KeyValueStore> TokenStorage<S> {
    pub fn new(store: S) -> Self {
        Self {
            storage: LocalStorage::new(store),
        }
    }

    /// Returns the persisted token, if any.
    pub fn load(&self) -> Option<String> {
        let token = self.storage.read::<String>(TOKEN_STORAGE_KEY);
        if token.is_some() {
            tracing::trace!("Restored auth token from storage");
        } else {
            tracing::trace!("No auth token in storage");
        }
        token
    }

    /// Persists the token, or removes it when `None`.
    pub fn store(&self, token: Option<&str>) {
        self.storage.write(TOKEN_STORAGE_KEY, &token);
    }

    /// Removes the persisted token.
    pub fn clear(&self) {
        self.store(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn round_trip(value: Value) -> Option<Value> {
        let storage = LocalStorage::new(MemoryStorage::new());
        storage.write("key", &value);
        storage.read::<Value>("key")
    }

    #[test]
    fn test_round_trip_string() {
        assert_eq!(round_trip(json!("a.b.c")), Some(json!("a.b.c")));
    }

    #[test]
    fn test_round_trip_string_with_quotes() {
        let value = json!(r#"he said "hi""#);
        assert_eq!(round_trip(value.clone()), Some(value));
    }

    #[test]
    fn test_round_trip_numbers() {
        assert_eq!(round_trip(json!(42)), Some(json!(42)));
        assert_eq!(round_trip(json!(-7)), Some(json!(-7)));
        assert_eq!(round_trip(json!(1.5)), Some(json!(1.5)));
    }

    #[test]
    fn test_round_trip_booleans() {
        assert_eq!(round_trip(json!(true)), Some(json!(true)));
        assert_eq!(round_trip(json!(false)), Some(json!(false)));
    }

    #[test]
    fn test_typed_round_trip() {
        let storage = LocalStorage::new(MemoryStorage::new());
        storage.write("count", &3_u32);
        storage.write("flag", &true);
        storage.write("name", "jobly");

        assert_eq!(storage.read::<u32>("count"), Some(3));
        assert_eq!(storage.read::<bool>("flag"), Some(true));
        assert_eq!(storage.read::<String>("name").as_deref(), Some("jobly"));
    }

    #[test]
    fn test_null_removes_key() {
        let memory = MemoryStorage::new();
        let storage = LocalStorage::new(memory.clone());

        storage.write("key", &json!("value"));
        assert!(memory.contains_key("key"));

        storage.write("key", &Value::Null);
        assert!(!memory.contains_key("key"));
        assert_eq!(storage.read::<Value>("key"), None);
    }

    #[test]
    fn test_none_removes_key() {
        let memory = MemoryStorage::new();
        let storage = LocalStorage::new(memory.clone());

        storage.write("key", &Some(5));
        assert_eq!(storage.read::<i32>("key"), Some(5));

        storage.write("key", &None::<i32>);
        assert!(!memory.contains_key("key"));
    }

    #[test]
    fn test_values_are_json_encoded() {
        let memory = MemoryStorage::new();
        let storage = LocalStorage::new(memory.clone());

        storage.write("key", "token");
        assert_eq!(memory.get_item("key").as_deref(), Some("\"token\""));
    }

    #[test]
    fn test_unreadable_value_reads_as_absent() {
        let memory = MemoryStorage::new();
        memory.set_item("key", "not json {");

        let storage = LocalStorage::new(memory);
        assert_eq!(storage.read::<Value>("key"), None);
        assert_eq!(storage.read::<String>("key"), None);
    }

    #[test]
    fn test_read_missing_key() {
        let storage = LocalStorage::new(MemoryStorage::new());
        assert_eq!(storage.read::<String>("missing"), None);
    }

    #[test]
    fn test_token_storage_store_and_load() {
        let memory = MemoryStorage::new();
        let tokens = TokenStorage::new(memory.clone());

        assert_eq!(tokens.load(), None);

        tokens.store(Some("header.payload.sig"));
        assert_eq!(tokens.load().as_deref(), Some("header.payload.sig"));
        assert_eq!(
            memory.get_item(TOKEN_STORAGE_KEY).as_deref(),
            Some("\"header.payload.sig\"")
        );

        tokens.clear();
        assert_eq!(tokens.load(), None);
        assert!(!memory.contains_key(TOKEN_STORAGE_KEY));
    }

    #[test]
    fn test_memory_storage_clones_share_state() {
        let first = MemoryStorage::new();
        let second = first.clone();

        first.set_item("shared", "1");
        assert_eq!(second.get_item("shared").as_deref(), Some("1"));

        second.remove_item("shared");
        assert!(!first.contains_key("shared"));
    }
}
