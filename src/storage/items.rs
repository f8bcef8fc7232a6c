//! Item repository
//!
//! Holds the in-memory ledger snapshot in front of a `StateStore`. Callers
//! build the next snapshot from a copy and hand it to `commit`; memory only
//! changes once the store has accepted the write.

use std::sync::RwLock;

use tracing::warn;

use crate::error::MoneyTreeError;

use super::state::LedgerState;
use super::store::StateStore;

/// Repository for the ledger snapshot
pub struct ItemRepository {
    store: Box<dyn StateStore>,
    state: RwLock<LedgerState>,
}

impl ItemRepository {
    /// Create a new repository over a store. Call `load` before use.
    pub fn new(store: Box<dyn StateStore>) -> Self {
        Self {
            store,
            state: RwLock::new(LedgerState::default()),
        }
    }

    /// Load the snapshot from the store
    pub fn load(&self) -> Result<(), MoneyTreeError> {
        let mut loaded = self.store.load()?;

        if loaded.repair_next_id() {
            warn!(next_id = %loaded.next_id, "stored nextId was behind existing ids; raised it");
        }

        let mut state = self
            .state
            .write()
            .map_err(|e| MoneyTreeError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *state = loaded;
        Ok(())
    }

    /// Copy of the current snapshot
    pub fn snapshot(&self) -> Result<LedgerState, MoneyTreeError> {
        let state = self
            .state
            .read()
            .map_err(|e| MoneyTreeError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(state.clone())
    }

    /// Persist `next` and make it the current snapshot.
    ///
    /// On a failed write the current snapshot is left as it was.
    pub fn commit(&self, next: LedgerState) -> Result<(), MoneyTreeError> {
        let mut state = self
            .state
            .write()
            .map_err(|e| MoneyTreeError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        self.store.save(&next)?;
        *state = next;
        Ok(())
    }

    /// Number of items in the current snapshot
    pub fn item_count(&self) -> Result<usize, MoneyTreeError> {
        let state = self
            .state
            .read()
            .map_err(|e| MoneyTreeError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(state.items.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ItemId, Money, MoneyItem, MoneyType};
    use crate::storage::store::{JsonFileStore, MemoryStore};
    use tempfile::TempDir;

    #[test]
    fn test_empty_load() {
        let repo = ItemRepository::new(Box::new(MemoryStore::new()));
        repo.load().unwrap();
        assert_eq!(repo.item_count().unwrap(), 0);
        assert_eq!(repo.snapshot().unwrap(), LedgerState::default());
    }

    #[test]
    fn test_commit_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.json");

        let repo = ItemRepository::new(Box::new(JsonFileStore::new(path.clone())));
        repo.load().unwrap();

        let mut next = repo.snapshot().unwrap();
        let id = next.allocate_id();
        next.items
            .push(MoneyItem::new(id, "食費", Money::new(3000), MoneyType::Wallet));
        repo.commit(next).unwrap();
        assert_eq!(repo.item_count().unwrap(), 1);

        let reopened = ItemRepository::new(Box::new(JsonFileStore::new(path)));
        reopened.load().unwrap();
        let state = reopened.snapshot().unwrap();
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].label, "食費");
        assert_eq!(state.next_id, ItemId::new(2));
    }

    #[test]
    fn test_load_repairs_stale_counter() {
        let mut stale = LedgerState::default();
        stale.items.push(MoneyItem::new(
            ItemId::new(5),
            "貯金",
            Money::new(100),
            MoneyType::Savings,
        ));

        let repo = ItemRepository::new(Box::new(MemoryStore::with_state(stale)));
        repo.load().unwrap();
        assert_eq!(repo.snapshot().unwrap().next_id, ItemId::new(6));
    }
}
