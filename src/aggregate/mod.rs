//! Aggregation over the money-item forest
//!
//! Everything here is a pure function of one `LedgerState` snapshot and is
//! recomputed on every read.

pub mod totals;
pub mod tree;

pub use totals::Totals;
pub use tree::ItemTree;
