//! Key-value persistence adapter.
//!
//! Each buffer persists as a JSON-encoded string under a fixed key. Storage
//! is an injected collaborator: the session never talks to a backend
//! directly, it goes through [`load_state`]/[`save_state`], which fall back
//! to the caller's default on a miss or decode failure and swallow write
//! failures. Persistence never surfaces as a user-facing error.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::{StoreError, StoreResult};

/// String-keyed store abstraction
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value for a key. `None` means the key was never written.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Write the raw value for a key.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
}

/// In-memory store for tests and non-persistent sessions
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            quota: None,
        }
    }

    /// Store that rejects writes once total stored bytes would exceed `quota`.
    /// Models a saturated backend for exercising write-failure recovery.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            quota: Some(quota),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let entries = self.entries.lock().unwrap();
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = self.entries.lock().unwrap();

        if let Some(quota) = self.quota {
            let others: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            if others + key.len() + value.len() > quota {
                return Err(StoreError::QuotaExceeded);
            }
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store for non-interactive execution contexts: reads always miss and
/// writes are dropped, so callers land on their defaults.
pub struct NullStore;

impl KeyValueStore for NullStore {
    fn get(&self, _key: &str) -> StoreResult<Option<String>> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> StoreResult<()> {
        Ok(())
    }
}

/// File-backed store: one JSON object per file, keys as members.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_entries(&self) -> StoreResult<serde_json::Map<String, Value>> {
        if !self.path.exists() {
            return Ok(serde_json::Map::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        let entries: serde_json::Map<String, Value> = serde_json::from_str(&content)?;
        Ok(entries)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let entries = self.read_entries()?;
        Ok(entries
            .get(key)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string()))
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        // A corrupt state file is unrecoverable anyway; start over rather
        // than refusing every write for the rest of the session.
        let mut entries = self.read_entries().unwrap_or_default();
        entries.insert(key.to_string(), Value::String(value.to_string()));

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&entries)?)?;
        Ok(())
    }
}

/// Load a persisted value, falling back to `default` when the key is
/// missing, the backend fails, or the stored value fails to decode.
pub fn load_state<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str, default: T) -> T {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return default,
        Err(e) => {
            tracing::warn!("Failed to read key {:?} from store: {}", key, e);
            return default;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Failed to decode stored value for {:?}: {}", key, e);
            default
        }
    }
}

/// Persist a value. Failures are logged and dropped.
pub fn save_state<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) {
    let encoded = match serde_json::to_string(value) {
        Ok(encoded) => encoded,
        Err(e) => {
            tracing::warn!("Failed to encode value for key {:?}: {}", key, e);
            return;
        }
    };

    if let Err(e) = store.set(key, &encoded) {
        tracing::warn!("Failed to persist key {:?}: {}", key, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let store = MemoryStore::new();
        save_state(&store, "greeting", &"hello".to_string());

        let loaded: String = load_state(&store, "greeting", "default".to_string());
        assert_eq!(loaded, "hello");
    }

    #[test]
    fn test_missing_key_returns_default() {
        let store = MemoryStore::new();
        let loaded: String = load_state(&store, "never_written", "seed".to_string());
        assert_eq!(loaded, "seed");
    }

    #[test]
    fn test_corrupt_value_returns_default() {
        let store = MemoryStore::new();
        store.set("broken", "{not json").unwrap();

        let loaded: String = load_state(&store, "broken", "seed".to_string());
        assert_eq!(loaded, "seed");
    }

    #[test]
    fn test_quota_exceeded_write_is_swallowed() {
        let store = MemoryStore::with_quota(16);
        save_state(&store, "big", &"x".repeat(64));

        // Write was dropped, not stored, and nothing panicked.
        assert_eq!(store.get("big").unwrap(), None);
    }

    #[test]
    fn test_quota_allows_small_writes() {
        let store = MemoryStore::with_quota(1024);
        store.set("a", "small").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("small"));
    }

    #[test]
    fn test_null_store_always_misses() {
        let store = NullStore;
        store.set("key", "value").unwrap();
        assert_eq!(store.get("key").unwrap(), None);

        let loaded: String = load_state(&store, "key", "seed".to_string());
        assert_eq!(loaded, "seed");
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("state.json"));

        save_state(&store, "html", &"<h1>hi</h1>".to_string());
        let loaded: String = load_state(&store, "html", String::new());
        assert_eq!(loaded, "<h1>hi</h1>");
    }

    #[test]
    fn test_file_store_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nope.json"));
        assert_eq!(store.get("anything").unwrap(), None);
    }

    #[test]
    fn test_file_store_survives_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "garbage").unwrap();

        let store = JsonFileStore::new(path);
        let loaded: String = load_state(&store, "key", "seed".to_string());
        assert_eq!(loaded, "seed");

        // Writes recover by replacing the corrupt file.
        store.set("key", "\"fresh\"").unwrap();
        let loaded: String = load_state(&store, "key", "seed".to_string());
        assert_eq!(loaded, "fresh");
    }
}
