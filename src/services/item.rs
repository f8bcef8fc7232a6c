//! Money item service
//!
//! Provides every mutation of the money-item store (setup, add, edit,
//! delete with descendants, split, total adjustment) and the derived read
//! views. Each mutation validates first, builds the next snapshot from a
//! copy, and commits it through the repository; a rejected call or a failed
//! write changes nothing.

use std::collections::HashSet;

use tracing::{info, warn};

use crate::aggregate::{ItemTree, Totals};
use crate::error::{MoneyTreeError, MoneyTreeResult};
use crate::models::item::{validate_label, validate_non_negative, validate_positive};
use crate::models::{
    ItemId, ItemValidationError, Money, MoneyItem, MoneyType, SplitPart, Tab, ADJUSTMENT_LABEL,
    SEED_SAVINGS_LABEL,
};
use crate::storage::{LedgerState, Storage};

/// Service for money item management
pub struct ItemService<'a> {
    storage: &'a Storage,
}

fn invalid(err: ItemValidationError) -> MoneyTreeError {
    MoneyTreeError::Validation(err.to_string())
}

/// Reject a next snapshot whose totals could overflow
fn ensure_in_range(state: &LedgerState) -> MoneyTreeResult<()> {
    match Totals::magnitude(state) {
        Some(_) => Ok(()),
        None => Err(MoneyTreeError::Validation(
            "Amount is too large; totals would overflow".into(),
        )),
    }
}

impl<'a> ItemService<'a> {
    /// Create a new item service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    // === Mutations ===

    /// One-time setup of wallet cash and an optional seed savings item.
    ///
    /// Returns `false` without changing anything if setup already ran.
    pub fn initialize(&self, wallet: Money, savings: Money) -> MoneyTreeResult<bool> {
        validate_non_negative(wallet).map_err(invalid)?;
        validate_non_negative(savings).map_err(invalid)?;

        let mut state = self.storage.items.snapshot()?;
        if state.setup_complete {
            warn!("initial setup requested again; ignoring");
            return Ok(false);
        }

        state.true_wallet_total = wallet;
        state.items.clear();
        if savings.is_positive() {
            let id = state.allocate_id();
            state.items.push(MoneyItem::new(
                id,
                SEED_SAVINGS_LABEL,
                savings,
                MoneyType::Savings,
            ));
        }
        state.setup_complete = true;

        ensure_in_range(&state)?;
        self.storage.items.commit(state)?;
        info!(wallet = wallet.amount(), savings = savings.amount(), "initial setup complete");
        Ok(true)
    }

    /// Append a new root item
    pub fn add(&self, label: &str, amount: Money, money_type: MoneyType) -> MoneyTreeResult<MoneyItem> {
        let label = label.trim();
        validate_label(label).map_err(invalid)?;
        validate_positive(amount).map_err(invalid)?;

        let mut state = self.storage.items.snapshot()?;
        let item = MoneyItem::new(state.allocate_id(), label, amount, money_type);
        state.items.push(item.clone());

        ensure_in_range(&state)?;
        self.storage.items.commit(state)?;
        info!(id = %item.id, label = %item.label, amount = item.amount.amount(), "added item");
        Ok(item)
    }

    /// Remove an item and all of its descendants.
    ///
    /// Returns how many items were removed; an unknown id removes nothing.
    /// Confirmation is the caller's job.
    pub fn delete(&self, id: ItemId) -> MoneyTreeResult<usize> {
        let mut state = self.storage.items.snapshot()?;

        let doomed: HashSet<ItemId> = ItemTree::new(&state.items)
            .descendants(id)
            .into_iter()
            .collect();

        let before = state.items.len();
        state.items.retain(|item| !doomed.contains(&item.id));
        let removed = before - state.items.len();

        if removed == 0 {
            warn!(id = %id, "delete of unknown item; nothing removed");
            return Ok(0);
        }

        self.storage.items.commit(state)?;
        info!(id = %id, removed, "deleted item with descendants");
        Ok(removed)
    }

    /// Replace an item's label, amount and type.
    ///
    /// A composite item's amount is derived from its leaves and may not be
    /// changed here; a leaf's amount must stay positive. Items are never
    /// moved to another parent.
    pub fn update(&self, item: MoneyItem) -> MoneyTreeResult<MoneyItem> {
        let mut state = self.storage.items.snapshot()?;
        let composite = ItemTree::new(&state.items).has_children(item.id);

        let existing = state
            .get_mut(item.id)
            .ok_or_else(|| MoneyTreeError::item_not_found(item.id))?;

        let label = item.label.trim();
        validate_label(label).map_err(invalid)?;

        if item.parent_id != existing.parent_id {
            return Err(MoneyTreeError::Validation(
                "Items cannot be moved to a different parent".into(),
            ));
        }

        if composite {
            if item.amount != existing.amount {
                return Err(MoneyTreeError::Validation(format!(
                    "Item {} has sub-items; its amount is the sum of them and cannot be edited",
                    item.id
                )));
            }
        } else {
            validate_positive(item.amount).map_err(invalid)?;
        }

        existing.label = label.to_string();
        existing.amount = item.amount;
        existing.money_type = item.money_type;
        let updated = existing.clone();

        ensure_in_range(&state)?;
        self.storage.items.commit(state)?;
        info!(id = %updated.id, label = %updated.label, "updated item");
        Ok(updated)
    }

    /// Overwrite a leaf item's amount (inline edit).
    ///
    /// Zero is allowed. Setting the current amount again is a no-op.
    pub fn adjust_amount(&self, id: ItemId, amount: Money) -> MoneyTreeResult<MoneyItem> {
        validate_non_negative(amount).map_err(invalid)?;

        let mut state = self.storage.items.snapshot()?;
        if ItemTree::new(&state.items).has_children(id) {
            return Err(MoneyTreeError::Validation(format!(
                "Item {} has sub-items; adjust one of them instead",
                id
            )));
        }

        let existing = state
            .get_mut(id)
            .ok_or_else(|| MoneyTreeError::item_not_found(id))?;

        if existing.amount == amount {
            return Ok(existing.clone());
        }

        existing.amount = amount;
        let updated = existing.clone();

        ensure_in_range(&state)?;
        self.storage.items.commit(state)?;
        info!(id = %id, amount = amount.amount(), "adjusted item amount");
        Ok(updated)
    }

    /// Split a leaf item into sub-items whose amounts add up to it.
    ///
    /// The parent's own amount becomes zero and each part becomes a child
    /// with a fresh id and the parent's type. Returns the new children.
    pub fn split(&self, parent_id: ItemId, parts: &[SplitPart]) -> MoneyTreeResult<Vec<MoneyItem>> {
        let mut state = self.storage.items.snapshot()?;

        let parent = state
            .get(parent_id)
            .cloned()
            .ok_or_else(|| MoneyTreeError::item_not_found(parent_id))?;

        if ItemTree::new(&state.items).has_children(parent_id) {
            return Err(MoneyTreeError::Validation(format!(
                "Item {} is already split",
                parent_id
            )));
        }
        if !parent.amount.is_positive() {
            return Err(MoneyTreeError::Validation(format!(
                "Item {} has no amount to split",
                parent_id
            )));
        }
        if parts.is_empty() {
            return Err(MoneyTreeError::Validation(
                "A split needs at least one sub-item".into(),
            ));
        }
        for part in parts {
            part.validate().map_err(invalid)?;
        }

        let allocated = Money::checked_sum(parts.iter().map(|p| p.amount)).ok_or_else(|| {
            MoneyTreeError::Validation(format!(
                "Sub-items must add up to {}; their amounts are too large",
                parent.amount
            ))
        })?;
        let remaining = parent.amount - allocated;
        if !remaining.is_zero() {
            return Err(MoneyTreeError::Validation(format!(
                "Sub-items must add up to {} (remaining: {})",
                parent.amount, remaining
            )));
        }

        if let Some(p) = state.get_mut(parent_id) {
            p.amount = Money::zero();
        }

        let mut children = Vec::with_capacity(parts.len());
        for part in parts {
            let child = MoneyItem::child_of(&parent, state.allocate_id(), part.label.trim(), part.amount);
            children.push(child);
        }
        state.items.extend(children.iter().cloned());

        ensure_in_range(&state)?;
        self.storage.items.commit(state)?;
        info!(id = %parent_id, parts = children.len(), "split item");
        Ok(children)
    }

    /// Set the total for a money type.
    ///
    /// Wallet overwrites the cash-on-hand scalar. Savings records the
    /// difference as a new root item labeled as an adjustment, which is
    /// returned; no item is added when the total is already correct.
    pub fn adjust_total(&self, money_type: MoneyType, new_total: Money) -> MoneyTreeResult<Option<MoneyItem>> {
        validate_non_negative(new_total).map_err(invalid)?;

        let mut state = self.storage.items.snapshot()?;

        match money_type {
            MoneyType::Wallet => {
                if state.true_wallet_total == new_total {
                    return Ok(None);
                }
                state.true_wallet_total = new_total;
                ensure_in_range(&state)?;
                self.storage.items.commit(state)?;
                info!(total = new_total.amount(), "set wallet total");
                Ok(None)
            }
            MoneyType::Savings => {
                let current = Totals::compute(&state).savings;
                let difference = new_total.checked_sub(current).ok_or_else(|| {
                    MoneyTreeError::Validation(
                        "Amount is too large; totals would overflow".into(),
                    )
                })?;
                if difference.is_zero() {
                    return Ok(None);
                }

                let item = MoneyItem::new(
                    state.allocate_id(),
                    ADJUSTMENT_LABEL,
                    difference,
                    MoneyType::Savings,
                );
                state.items.push(item.clone());

                ensure_in_range(&state)?;
                self.storage.items.commit(state)?;
                info!(id = %item.id, difference = difference.amount(), "recorded savings adjustment");
                Ok(Some(item))
            }
        }
    }

    // === Read views ===

    /// Current snapshot
    pub fn snapshot(&self) -> MoneyTreeResult<LedgerState> {
        self.storage.items.snapshot()
    }

    /// Get an item by ID
    pub fn get(&self, id: ItemId) -> MoneyTreeResult<Option<MoneyItem>> {
        Ok(self.storage.items.snapshot()?.get(id).cloned())
    }

    /// Get an item by ID or fail with a not-found error
    pub fn require(&self, id: ItemId) -> MoneyTreeResult<MoneyItem> {
        self.get(id)?.ok_or_else(|| MoneyTreeError::item_not_found(id))
    }

    /// All items in insertion order
    pub fn list(&self) -> MoneyTreeResult<Vec<MoneyItem>> {
        Ok(self.storage.items.snapshot()?.items)
    }

    /// Items visible under a tab, ancestors included, in insertion order
    pub fn filtered_by_tab(&self, tab: Tab) -> MoneyTreeResult<Vec<MoneyItem>> {
        let state = self.storage.items.snapshot()?;
        let tree = ItemTree::new(&state.items);
        Ok(tree.filter_by_tab(tab).into_iter().cloned().collect())
    }

    /// Whether an item has sub-items
    pub fn has_children(&self, id: ItemId) -> MoneyTreeResult<bool> {
        let state = self.storage.items.snapshot()?;
        Ok(ItemTree::new(&state.items).has_children(id))
    }

    /// Direct sub-items of an item
    pub fn children(&self, id: ItemId) -> MoneyTreeResult<Vec<MoneyItem>> {
        let state = self.storage.items.snapshot()?;
        let tree = ItemTree::new(&state.items);
        Ok(tree.children(id).iter().map(|c| (*c).clone()).collect())
    }

    /// Sum of leaf amounts under an item
    pub fn subtree_total(&self, id: ItemId) -> MoneyTreeResult<Money> {
        let state = self.storage.items.snapshot()?;
        Ok(ItemTree::new(&state.items).subtree_total(id))
    }

    /// Headline totals
    pub fn totals(&self) -> MoneyTreeResult<Totals> {
        Ok(Totals::compute(&self.storage.items.snapshot()?))
    }

    /// Wallet cash plus savings
    pub fn grand_total(&self) -> MoneyTreeResult<Money> {
        Ok(self.totals()?.grand())
    }

    /// Cash on hand
    pub fn wallet_true_total(&self) -> MoneyTreeResult<Money> {
        Ok(self.totals()?.wallet_true)
    }

    /// Sum of labeled wallet leaves
    pub fn wallet_labeled_total(&self) -> MoneyTreeResult<Money> {
        Ok(self.totals()?.wallet_labeled)
    }

    /// Sum of savings leaves
    pub fn savings_total(&self) -> MoneyTreeResult<Money> {
        Ok(self.totals()?.savings)
    }
}
