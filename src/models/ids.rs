//! Strongly-typed identifier for money items
//!
//! Item ids are positive integers handed out by a monotonically increasing
//! counter. Wrapping them prevents mixing an id up with an amount.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a money item
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u64);

impl ItemId {
    /// The first id handed out by a fresh store
    pub const FIRST: ItemId = ItemId(1);

    /// Create an id from a raw value
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw value
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// The id that follows this one
    pub const fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<u64> for ItemId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl FromStr for ItemId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept the "#12" form used in listings
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        Ok(Self(s.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_is_strictly_greater() {
        let id = ItemId::FIRST;
        assert!(id.next() > id);
        assert_eq!(id.next().value(), 2);
    }

    #[test]
    fn test_parse() {
        assert_eq!("7".parse::<ItemId>().unwrap(), ItemId::new(7));
        assert_eq!("#7".parse::<ItemId>().unwrap(), ItemId::new(7));
        assert!("seven".parse::<ItemId>().is_err());
    }

    #[test]
    fn test_serializes_as_plain_number() {
        let json = serde_json::to_string(&ItemId::new(3)).unwrap();
        assert_eq!(json, "3");
    }
}
