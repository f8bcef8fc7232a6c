//! Core data models for MoneyTree
//!
//! This module contains the data structures of the money-item domain:
//! item ids, amounts, money types and the items themselves.

pub mod ids;
pub mod item;
pub mod money;

pub use ids::ItemId;
pub use item::{
    ItemValidationError, MoneyItem, MoneyType, SplitPart, Tab, ADJUSTMENT_LABEL,
    SEED_SAVINGS_LABEL,
};
pub use money::Money;
