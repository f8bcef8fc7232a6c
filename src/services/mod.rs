//! Service layer for MoneyTree
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, computed fields, and cross-item operations.

pub mod item;

pub use item::ItemService;
