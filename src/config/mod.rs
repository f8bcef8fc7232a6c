//! Configuration module for MoneyTree
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::MoneyTreePaths;
pub use settings::{AdvisorSettings, Settings};
