//! Persisted ledger snapshot
//!
//! The whole store is saved and loaded as one document whose top-level keys
//! are `isSetupComplete`, `moneyData`, `nextId` and `trueWalletTotal`. A
//! missing key falls back to its default.

use serde::{Deserialize, Serialize};

use crate::models::{ItemId, Money, MoneyItem};

/// The unit of persistence: every item plus the scalar counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerState {
    /// Whether initial setup has run. Defaults to `false`.
    #[serde(default, rename = "isSetupComplete")]
    pub setup_complete: bool,

    /// Items in insertion order. Defaults to empty.
    #[serde(default, rename = "moneyData")]
    pub items: Vec<MoneyItem>,

    /// Next id to hand out. Defaults to 1.
    #[serde(default)]
    pub next_id: ItemId,

    /// Cash on hand, tracked independently of labeled wallet items. Defaults to 0.
    #[serde(default)]
    pub true_wallet_total: Money,
}

impl Default for LedgerState {
    fn default() -> Self {
        Self {
            setup_complete: false,
            items: Vec::new(),
            next_id: ItemId::FIRST,
            true_wallet_total: Money::zero(),
        }
    }
}

impl LedgerState {
    /// Hand out the next id and advance the counter
    pub fn allocate_id(&mut self) -> ItemId {
        let id = self.next_id;
        self.next_id = id.next();
        id
    }

    /// Find an item by id
    pub fn get(&self, id: ItemId) -> Option<&MoneyItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Find an item by id for mutation
    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut MoneyItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    /// Raise `next_id` above every stored id.
    ///
    /// Returns true if the counter had to be moved.
    pub fn repair_next_id(&mut self) -> bool {
        let floor = self
            .items
            .iter()
            .map(|item| item.id.next())
            .max()
            .unwrap_or(ItemId::FIRST);

        if self.next_id < floor {
            self.next_id = floor;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MoneyType;

    #[test]
    fn test_defaults() {
        let state = LedgerState::default();
        assert!(!state.setup_complete);
        assert!(state.items.is_empty());
        assert_eq!(state.next_id, ItemId::new(1));
        assert_eq!(state.true_wallet_total, Money::zero());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let state: LedgerState = serde_json::from_str("{}").unwrap();
        assert_eq!(state, LedgerState::default());
    }

    #[test]
    fn test_on_disk_keys() {
        let mut state = LedgerState::default();
        state.setup_complete = true;
        state.true_wallet_total = Money::new(10000);

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["isSetupComplete"], true);
        assert!(json["moneyData"].is_array());
        assert_eq!(json["nextId"], 1);
        assert_eq!(json["trueWalletTotal"], 10000);
    }

    #[test]
    fn test_allocate_id_is_monotonic() {
        let mut state = LedgerState::default();
        let a = state.allocate_id();
        let b = state.allocate_id();
        assert!(b > a);
        assert_eq!(state.next_id, ItemId::new(3));
    }

    #[test]
    fn test_repair_next_id() {
        let mut state = LedgerState::default();
        state.items.push(MoneyItem::new(
            ItemId::new(7),
            "食費",
            Money::new(100),
            MoneyType::Wallet,
        ));

        assert!(state.repair_next_id());
        assert_eq!(state.next_id, ItemId::new(8));
        assert!(!state.repair_next_id());
    }
}
