//! MoneyTree - wallet and savings tracker
//!
//! This library provides the core of the MoneyTree application: money items
//! (wallet cash or savings) arranged in a parent/child forest, the rules that
//! roll leaf amounts up into totals, and a JSON-backed store that persists
//! every mutation.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (ids, money, items)
//! - `storage`: Persisted snapshot and JSON file storage
//! - `aggregate`: Pure tree traversal and totals over a snapshot
//! - `services`: Item store mutations and read views
//! - `advisor`: Optional spending-advice client
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust
//! use moneytree::models::{Money, MoneyType};
//! use moneytree::services::ItemService;
//! use moneytree::storage::Storage;
//!
//! let mut storage = Storage::in_memory();
//! storage.load_all()?;
//!
//! let service = ItemService::new(&storage);
//! service.initialize(Money::new(10000), Money::new(5000))?;
//! service.add("食費", Money::new(3000), MoneyType::Wallet)?;
//!
//! assert_eq!(service.grand_total()?, Money::new(15000));
//! # Ok::<(), moneytree::MoneyTreeError>(())
//! ```

pub mod advisor;
pub mod aggregate;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::MoneyTreeError;
