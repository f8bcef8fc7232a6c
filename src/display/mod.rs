//! Display formatting for terminal output

pub mod item;
pub mod totals;

pub use item::{format_item_details, format_item_tree};
pub use totals::format_totals;
