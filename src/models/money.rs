//! Money type for representing currency amounts
//!
//! Amounts are whole currency units (yen) stored as i64. They are signed
//! because savings adjustments can record a negative delta. Operators
//! saturate at the i64 bounds; callers that must reject overflow use the
//! `checked_*` methods.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

/// Default currency symbol used by `Display`
pub const DEFAULT_CURRENCY_SYMBOL: &str = "¥";

/// A monetary amount in whole currency units
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from whole units
    ///
    /// # Examples
    /// ```
    /// use moneytree::models::Money;
    /// let amount = Money::new(5000);
    /// assert_eq!(amount.amount(), 5000);
    /// ```
    pub const fn new(amount: i64) -> Self {
        Self(amount)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in whole units
    pub const fn amount(&self) -> i64 {
        self.0
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Add, returning `None` on overflow
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Subtract, returning `None` on overflow
    pub const fn checked_sub(self, other: Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Sum an iterator of amounts, returning `None` on overflow
    pub fn checked_sum<I: IntoIterator<Item = Money>>(iter: I) -> Option<Self> {
        iter.into_iter()
            .try_fold(Money::zero(), |acc, m| acc.checked_add(m))
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "5000", "-5000", "¥5000", "5,000", "¥5,000"
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();

        let (negative, s) = if let Some(stripped) = s.strip_prefix('-') {
            (true, stripped)
        } else {
            (false, s)
        };

        let s = s
            .strip_prefix(DEFAULT_CURRENCY_SYMBOL)
            .or_else(|| s.strip_prefix('$'))
            .unwrap_or(s);

        let digits: String = s.chars().filter(|c| *c != ',').collect();
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }

        let value: i64 = digits
            .parse()
            .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?;

        Ok(Self(if negative { -value } else { value }))
    }

    /// Format with a currency symbol and thousands separators
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let grouped = group_thousands(self.0.unsigned_abs());
        if self.is_negative() {
            format!("-{}{}", symbol, grouped)
        } else {
            format!("{}{}", symbol, grouped)
        }
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.format_with_symbol(DEFAULT_CURRENCY_SYMBOL))
    }
}

impl FromStr for Money {
    type Err = MoneyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<i64> for Money {
    fn from(amount: i64) -> Self {
        Self(amount)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::new(15000)), "¥15,000");
        assert_eq!(format!("{}", Money::new(0)), "¥0");
        assert_eq!(format!("{}", Money::new(999)), "¥999");
        assert_eq!(format!("{}", Money::new(-3000)), "-¥3,000");
        assert_eq!(format!("{}", Money::new(1234567)), "¥1,234,567");
    }

    #[test]
    fn test_display_respects_width() {
        assert_eq!(format!("{:>8}", Money::new(5000)), "  ¥5,000");
    }

    #[test]
    fn test_format_with_symbol() {
        assert_eq!(Money::new(2500).format_with_symbol("$"), "$2,500");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::new(1000);
        let b = Money::new(500);

        assert_eq!((a + b).amount(), 1500);
        assert_eq!((a - b).amount(), 500);
        assert_eq!((-a).amount(), -1000);
    }

    #[test]
    fn test_checked_arithmetic() {
        let max = Money::new(i64::MAX);
        assert_eq!(max.checked_add(Money::new(1)), None);
        assert_eq!(Money::new(i64::MIN).checked_sub(Money::new(1)), None);
        assert_eq!(
            Money::new(100).checked_sub(Money::new(300)),
            Some(Money::new(-200))
        );

        assert_eq!(
            Money::checked_sum([Money::new(1), Money::new(2)]),
            Some(Money::new(3))
        );
        assert_eq!(Money::checked_sum([max, max, Money::new(3)]), None);
    }

    #[test]
    fn test_operators_saturate() {
        let max = Money::new(i64::MAX);
        assert_eq!(max + Money::new(1), max);
        assert_eq!(Money::new(i64::MIN) - Money::new(1), Money::new(i64::MIN));

        let total: Money = [max, max, Money::new(3)].into_iter().sum();
        assert_eq!(total, max);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("5000").unwrap().amount(), 5000);
        assert_eq!(Money::parse("¥5,000").unwrap().amount(), 5000);
        assert_eq!(Money::parse("-300").unwrap().amount(), -300);
        assert_eq!(Money::parse(" 12 ").unwrap().amount(), 12);
        assert!(Money::parse("").is_err());
        assert!(Money::parse("12.5").is_err());
        assert!(Money::parse("abc").is_err());
    }

    #[test]
    fn test_sum() {
        let amounts = vec![Money::new(100), Money::new(200), Money::new(300)];
        let total: Money = amounts.iter().sum();
        assert_eq!(total.amount(), 600);
    }

    #[test]
    fn test_serialization() {
        let m = Money::new(1050);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "1050");

        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);
    }
}
