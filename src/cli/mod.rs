//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod advise;
pub mod item;
pub mod total;

pub use advise::handle_advise_command;
pub use item::{handle_item_command, ItemCommands};
pub use total::{handle_adjust_command, handle_init_command, handle_totals_command};
