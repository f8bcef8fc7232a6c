//! Headline totals
//!
//! Wallet cash is tracked as a scalar that is independent of the wallet
//! items the user has labeled; savings have no such scalar, so their leaf
//! sum is the total.

use crate::models::{Money, MoneyType};
use crate::storage::LedgerState;

use super::tree::ItemTree;

/// Totals derived from one snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    /// Cash on hand, as last set by the user
    pub wallet_true: Money,
    /// Sum of wallet leaf items
    pub wallet_labeled: Money,
    /// Sum of savings leaf items
    pub savings: Money,
}

impl Totals {
    /// Compute totals from a snapshot
    pub fn compute(state: &LedgerState) -> Self {
        let tree = ItemTree::new(&state.items);
        Self {
            wallet_true: state.true_wallet_total,
            wallet_labeled: tree.leaf_total(MoneyType::Wallet),
            savings: tree.leaf_total(MoneyType::Savings),
        }
    }

    /// Wallet cash plus savings
    pub fn grand(&self) -> Money {
        self.wallet_true + self.savings
    }

    /// Wallet cash not yet assigned to a labeled item
    pub fn wallet_unlabeled(&self) -> Money {
        self.wallet_true - self.wallet_labeled
    }

    /// Upper bound on any total or subtree sum over `state`.
    ///
    /// This is the wallet scalar plus every item amount, all taken as
    /// absolute values. `None` means some total could overflow an amount.
    pub fn magnitude(state: &LedgerState) -> Option<Money> {
        let bound = state
            .items
            .iter()
            .map(|item| u128::from(item.amount.amount().unsigned_abs()))
            .sum::<u128>()
            + u128::from(state.true_wallet_total.amount().unsigned_abs());

        i64::try_from(bound).ok().map(Money::new)
    }

    /// The adjustable total for a type
    pub fn for_type(&self, money_type: MoneyType) -> Money {
        match money_type {
            MoneyType::Wallet => self.wallet_true,
            MoneyType::Savings => self.savings,
        }
    }
}
