//! Best-score persistence
//!
//! The best score is a single decimal string under one key in a local
//! key-value store (LocalStorage in the browser, a JSON file natively).
//! Missing or garbled values read as 0; store failures are logged and
//! otherwise ignored.

use std::collections::BTreeMap;

use crate::error::Result;

/// Key holding the best score
pub const STORAGE_KEY: &str = "urchinGameHighScore";

/// Minimal string key-value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    /// Wipe every key
    fn clear(&mut self) -> Result<()>;
}

/// In-memory store for tests and headless runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one key
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        Ok(())
    }
}

/// Lenient integer parse: leading digits count, anything else reads as 0
///
/// `" 12abc"` gives 12, `"-4"` and `"abc"` give 0.
pub fn parse_high_score(raw: &str) -> u32 {
    let trimmed = raw.trim_start();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse().unwrap_or(0)
}

/// The best score, backed by a store
pub struct HighScores {
    store: Box<dyn KeyValueStore>,
}

impl HighScores {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Read the stored best, 0 if absent or unreadable
    pub fn load(&self) -> u32 {
        match self.store.get(STORAGE_KEY) {
            Ok(Some(raw)) => {
                let score = parse_high_score(&raw);
                log::info!("Loaded high score {}", score);
                score
            }
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                0
            }
            Err(e) => {
                log::warn!("Could not read high score: {}", e);
                0
            }
        }
    }

    /// Persist `score`
    pub fn save(&mut self, score: u32) {
        match self.store.set(STORAGE_KEY, &score.to_string()) {
            Ok(()) => log::info!("High score saved ({})", score),
            Err(e) => log::warn!("Could not save high score: {}", e),
        }
    }

    /// Wipe all local data, high score included
    pub fn clear(&mut self) {
        match self.store.clear() {
            Ok(()) => log::info!("Local data cleared"),
            Err(e) => log::warn!("Could not clear local data: {}", e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::FileStore;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::collections::BTreeMap;
    use std::fs;
    use std::io::ErrorKind;
    use std::path::PathBuf;

    use super::KeyValueStore;
    use crate::error::Result;

    /// JSON object on disk, one string per key
    #[derive(Debug, Clone)]
    pub struct FileStore {
        path: PathBuf,
    }

    impl FileStore {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        fn read_all(&self) -> Result<BTreeMap<String, String>> {
            match fs::read_to_string(&self.path) {
                Ok(json) => Ok(serde_json::from_str(&json)?),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
                Err(e) => Err(e.into()),
            }
        }

        fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<()> {
            if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(&self.path, serde_json::to_string_pretty(entries)?)?;
            Ok(())
        }
    }

    impl KeyValueStore for FileStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            Ok(self.read_all()?.remove(key))
        }

        fn set(&mut self, key: &str, value: &str) -> Result<()> {
            let mut entries = self.read_all().unwrap_or_else(|e| {
                log::warn!("Replacing unreadable store {}: {}", self.path.display(), e);
                BTreeMap::new()
            });
            entries.insert(key.to_string(), value.to_string());
            self.write_all(&entries)
        }

        fn clear(&mut self) -> Result<()> {
            match fs::remove_file(&self.path) {
                Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
                _ => Ok(()),
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::LocalStorageStore;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::KeyValueStore;
    use crate::error::{Error, Result};

    /// Browser LocalStorage
    #[derive(Debug, Clone, Default)]
    pub struct LocalStorageStore;

    impl LocalStorageStore {
        fn storage() -> Result<web_sys::Storage> {
            web_sys::window()
                .and_then(|w| w.local_storage().ok())
                .flatten()
                .ok_or_else(|| Error::Storage("LocalStorage unavailable".to_string()))
        }
    }

    impl KeyValueStore for LocalStorageStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            Self::storage()?
                .get_item(key)
                .map_err(|e| Error::Storage(format!("{:?}", e)))
        }

        fn set(&mut self, key: &str, value: &str) -> Result<()> {
            Self::storage()?
                .set_item(key, value)
                .map_err(|e| Error::Storage(format!("{:?}", e)))
        }

        fn clear(&mut self) -> Result<()> {
            Self::storage()?
                .clear()
                .map_err(|e| Error::Storage(format!("{:?}", e)))
        }
    }
}
