//! Slot storage backend trait and implementations.
//!
//! A slot is one independently persisted named value. `FileSlotStore` keeps
//! one JSON file per key under the data directory; `MemorySlotStore` backs
//! tests and ephemeral runs.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

/// Storage backend for preference slots.
///
/// `save` is best-effort by contract: implementations report failure so the
/// caller can log it, but callers never propagate it. A failed save leaves
/// the in-memory state authoritative for the rest of the session.
pub trait SlotStore: Send + Sync {
    /// Read the serialized value for `key`, if any.
    fn load(&self, key: &str) -> Option<String>;

    /// Persist the serialized value for `key`.
    fn save(&self, key: &str, value: &str) -> std::io::Result<()>;
}

/// One JSON file per slot under a data directory.
pub struct FileSlotStore {
    dir: PathBuf,
}

impl FileSlotStore {
    /// Create a store rooted at `dir`, creating the directory if needed.
    ///
    /// Directory creation failure is deliberately not fatal; saves will fail
    /// (and be logged) but the application keeps running from memory.
    pub fn new(dir: &Path) -> Self {
        if let Err(e) = std::fs::create_dir_all(dir) {
            tracing::warn!("Failed to create data directory {}: {}", dir.display(), e);
        }
        Self { dir: dir.to_path_buf() }
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl SlotStore for FileSlotStore {
    fn load(&self, key: &str) -> Option<String> {
        match std::fs::read_to_string(self.slot_path(key)) {
            Ok(contents) => Some(contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!("Failed to read slot {}: {}", key, e);
                None
            }
        }
    }

    fn save(&self, key: &str, value: &str) -> std::io::Result<()> {
        std::fs::write(self.slot_path(key), value)
    }
}

/// In-memory slot store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemorySlotStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SlotStore for MemorySlotStore {
    fn load(&self, key: &str) -> Option<String> {
        self.slots.lock().get(key).cloned()
    }

    fn save(&self, key: &str, value: &str) -> std::io::Result<()> {
        self.slots.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSlotStore::new(dir.path());

        assert_eq!(store.load("unit"), None);
        store.save("unit", "\"celsius\"").unwrap();
        assert_eq!(store.load("unit").as_deref(), Some("\"celsius\""));
    }

    #[test]
    fn test_file_store_keys_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSlotStore::new(dir.path());

        store.save("unit", "\"celsius\"").unwrap();
        store.save("theme", "\"dark\"").unwrap();
        store.save("unit", "\"fahrenheit\"").unwrap();

        assert_eq!(store.load("theme").as_deref(), Some("\"dark\""));
        assert_eq!(store.load("unit").as_deref(), Some("\"fahrenheit\""));
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = FileSlotStore::new(dir.path());
            store.save("favorites", "[]").unwrap();
        }
        let reopened = FileSlotStore::new(dir.path());
        assert_eq!(reopened.load("favorites").as_deref(), Some("[]"));
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemorySlotStore::new();
        assert_eq!(store.load("theme"), None);
        store.save("theme", "\"light\"").unwrap();
        assert_eq!(store.load("theme").as_deref(), Some("\"light\""));
    }
}
