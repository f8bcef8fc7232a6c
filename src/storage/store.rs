//! Persistence backends for the ledger snapshot
//!
//! A `StateStore` reads the snapshot once at startup and rewrites it
//! wholesale after every mutation.

use std::path::PathBuf;
use std::sync::Mutex;

use tracing::debug;

use crate::error::MoneyTreeError;

use super::file_io::{read_json, write_json_atomic};
use super::state::LedgerState;

/// Durable home of the ledger snapshot
pub trait StateStore: Send + Sync {
    /// Read the snapshot, falling back to defaults for anything absent
    fn load(&self) -> Result<LedgerState, MoneyTreeError>;

    /// Replace the stored snapshot. Returns only once the data is durable.
    fn save(&self, state: &LedgerState) -> Result<(), MoneyTreeError>;
}

/// Snapshot stored as a single JSON document on disk
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl StateStore for JsonFileStore {
    fn load(&self) -> Result<LedgerState, MoneyTreeError> {
        debug!(path = %self.path.display(), "loading ledger");
        read_json(&self.path)
    }

    fn save(&self, state: &LedgerState) -> Result<(), MoneyTreeError> {
        debug!(path = %self.path.display(), items = state.items.len(), "saving ledger");
        write_json_atomic(&self.path, state)
    }
}

/// Snapshot held in memory, for tests and throwaway sessions
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<Option<LedgerState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing snapshot
    pub fn with_state(state: LedgerState) -> Self {
        Self {
            state: Mutex::new(Some(state)),
        }
    }

    /// The last saved snapshot, if any
    pub fn saved(&self) -> Option<LedgerState> {
        self.state.lock().ok().and_then(|s| s.clone())
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Result<LedgerState, MoneyTreeError> {
        let state = self
            .state
            .lock()
            .map_err(|e| MoneyTreeError::Storage(format!("Failed to acquire lock: {}", e)))?;
        Ok(state.clone().unwrap_or_default())
    }

    fn save(&self, state: &LedgerState) -> Result<(), MoneyTreeError> {
        let mut slot = self
            .state
            .lock()
            .map_err(|e| MoneyTreeError::Storage(format!("Failed to acquire lock: {}", e)))?;
        *slot = Some(state.clone());
        Ok(())
    }
}
