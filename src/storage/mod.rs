//! Storage layer for MoneyTree
//!
//! Provides the persisted ledger snapshot, JSON file storage with atomic
//! writes, and the repository that services mutate through.

pub mod file_io;
pub mod items;
pub mod state;
pub mod store;

pub use file_io::{read_json, write_json_atomic};
pub use items::ItemRepository;
pub use state::LedgerState;
pub use store::{JsonFileStore, MemoryStore, StateStore};

use crate::config::paths::MoneyTreePaths;
use crate::error::MoneyTreeError;

/// Main storage coordinator that provides access to the repository
pub struct Storage {
    pub items: ItemRepository,
}

impl Storage {
    /// Create a file-backed Storage instance
    pub fn new(paths: MoneyTreePaths) -> Result<Self, MoneyTreeError> {
        paths.ensure_directories()?;

        Ok(Self {
            items: ItemRepository::new(Box::new(JsonFileStore::new(paths.ledger_file()))),
        })
    }

    /// Create a Storage instance over any state store
    pub fn with_store(store: Box<dyn StateStore>) -> Self {
        Self {
            items: ItemRepository::new(store),
        }
    }

    /// Create a Storage instance that never touches disk
    pub fn in_memory() -> Self {
        Self::with_store(Box::new(MemoryStore::new()))
    }

    /// Load all data from the store
    pub fn load_all(&mut self) -> Result<(), MoneyTreeError> {
        self.items.load()
    }

    /// Check if initial setup has been completed
    pub fn is_initialized(&self) -> Result<bool, MoneyTreeError> {
        Ok(self.items.snapshot()?.setup_complete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MoneyTreePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized().unwrap());
    }

    #[test]
    fn test_in_memory_storage() {
        let mut storage = Storage::in_memory();
        storage.load_all().unwrap();
        assert_eq!(storage.items.item_count().unwrap(), 0);
    }
}
