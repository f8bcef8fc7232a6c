//! Money item model
//!
//! A money item is a labeled amount of either wallet cash or savings. Items
//! form a forest: a child points at its parent through `parent_id`, and a
//! parent never stores its children.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::ItemId;
use super::money::Money;

/// Label given to the savings item created during initial setup
pub const SEED_SAVINGS_LABEL: &str = "貯金";

/// Label given to the delta item recorded by a savings total adjustment
pub const ADJUSTMENT_LABEL: &str = "金額調整";

/// Where the money lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoneyType {
    /// Cash on hand
    Wallet,
    /// Money put aside
    Savings,
}

impl MoneyType {
    /// Short machine name, as stored on disk
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wallet => "wallet",
            Self::Savings => "savings",
        }
    }
}

impl fmt::Display for MoneyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wallet => write!(f, "Wallet"),
            Self::Savings => write!(f, "Savings"),
        }
    }
}

impl FromStr for MoneyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "wallet" | "cash" | "財布" => Ok(Self::Wallet),
            "savings" | "saving" | "貯金" => Ok(Self::Savings),
            other => Err(format!(
                "unknown money type '{}' (expected 'wallet' or 'savings')",
                other
            )),
        }
    }
}

/// Which items a listing shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    /// Every item
    #[default]
    All,
    /// Items of one type, plus their ancestors
    Only(MoneyType),
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "All"),
            Self::Only(t) => write!(f, "{}", t),
        }
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "すべて" => Ok(Self::All),
            other => other.parse().map(Self::Only),
        }
    }
}

impl From<MoneyType> for Tab {
    fn from(t: MoneyType) -> Self {
        Self::Only(t)
    }
}

/// A labeled amount of money
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyItem {
    /// Unique identifier, never reused
    pub id: ItemId,

    /// Display label
    pub label: String,

    /// Stored amount. Vestigial once the item has children.
    pub amount: Money,

    /// Wallet or savings
    #[serde(rename = "type")]
    pub money_type: MoneyType,

    /// Parent item, if this item came from a split
    #[serde(default)]
    pub parent_id: Option<ItemId>,
}

impl MoneyItem {
    /// Create a new root item
    pub fn new(id: ItemId, label: impl Into<String>, amount: Money, money_type: MoneyType) -> Self {
        Self {
            id,
            label: label.into(),
            amount,
            money_type,
            parent_id: None,
        }
    }

    /// Create a child of `parent`, inheriting its type
    pub fn child_of(parent: &MoneyItem, id: ItemId, label: impl Into<String>, amount: Money) -> Self {
        Self {
            id,
            label: label.into(),
            amount,
            money_type: parent.money_type,
            parent_id: Some(parent.id),
        }
    }

    /// Check whether this item sits at the top of the forest
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

impl fmt::Display for MoneyItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// One part of a split request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPart {
    pub label: String,
    pub amount: Money,
}

impl SplitPart {
    pub fn new(label: impl Into<String>, amount: Money) -> Self {
        Self {
            label: label.into(),
            amount,
        }
    }

    /// Validate the part: non-empty label, positive amount
    pub fn validate(&self) -> Result<(), ItemValidationError> {
        validate_label(&self.label)?;
        validate_positive(self.amount)
    }
}

impl FromStr for SplitPart {
    type Err = String;

    /// Parse `label=amount`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (label, amount) = s
            .rsplit_once('=')
            .ok_or_else(|| format!("expected 'label=amount', got '{}'", s))?;
        let amount = Money::parse(amount).map_err(|e| e.to_string())?;
        Ok(Self::new(label.trim(), amount))
    }
}

/// Check that a label has visible content
pub fn validate_label(label: &str) -> Result<(), ItemValidationError> {
    if label.trim().is_empty() {
        return Err(ItemValidationError::EmptyLabel);
    }
    Ok(())
}

/// Check that an amount is strictly positive
pub fn validate_positive(amount: Money) -> Result<(), ItemValidationError> {
    if !amount.is_positive() {
        return Err(ItemValidationError::NonPositiveAmount(amount));
    }
    Ok(())
}

/// Check that an amount is zero or more
pub fn validate_non_negative(amount: Money) -> Result<(), ItemValidationError> {
    if amount.is_negative() {
        return Err(ItemValidationError::NegativeAmount(amount));
    }
    Ok(())
}

/// Validation errors for money items
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemValidationError {
    EmptyLabel,
    NonPositiveAmount(Money),
    NegativeAmount(Money),
}

impl fmt::Display for ItemValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLabel => write!(f, "Label cannot be empty"),
            Self::NonPositiveAmount(m) => {
                write!(f, "Amount must be a positive whole number (got {})", m.amount())
            }
            Self::NegativeAmount(m) => {
                write!(f, "Amount cannot be negative (got {})", m.amount())
            }
        }
    }
}

impl std::error::Error for ItemValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_item_is_root() {
        let item = MoneyItem::new(ItemId::new(1), "食費", Money::new(3000), MoneyType::Wallet);
        assert!(item.is_root());
        assert_eq!(item.label, "食費");
    }

    #[test]
    fn test_child_inherits_type() {
        let parent = MoneyItem::new(ItemId::new(1), "貯金", Money::new(5000), MoneyType::Savings);
        let child = MoneyItem::child_of(&parent, ItemId::new(2), "旅行", Money::new(2000));
        assert_eq!(child.money_type, MoneyType::Savings);
        assert_eq!(child.parent_id, Some(parent.id));
    }

    #[test]
    fn test_validation() {
        assert!(validate_label("食費").is_ok());
        assert_eq!(validate_label("   "), Err(ItemValidationError::EmptyLabel));
        assert!(matches!(
            validate_positive(Money::zero()),
            Err(ItemValidationError::NonPositiveAmount(_))
        ));
        assert!(validate_non_negative(Money::zero()).is_ok());
        assert!(matches!(
            validate_non_negative(Money::new(-1)),
            Err(ItemValidationError::NegativeAmount(_))
        ));
    }

    #[test]
    fn test_serialized_field_names() {
        let item = MoneyItem::new(ItemId::new(4), "外食", Money::new(3000), MoneyType::Wallet);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], 4);
        assert_eq!(json["type"], "wallet");
        assert_eq!(json["amount"], 3000);
        assert!(json["parentId"].is_null());
    }

    #[test]
    fn test_missing_parent_id_deserializes_as_root() {
        let item: MoneyItem =
            serde_json::from_str(r#"{"id":1,"label":"貯金","amount":5000,"type":"savings"}"#)
                .unwrap();
        assert!(item.is_root());
        assert_eq!(item.money_type, MoneyType::Savings);
    }

    #[test]
    fn test_parse_types_and_tabs() {
        assert_eq!("wallet".parse::<MoneyType>().unwrap(), MoneyType::Wallet);
        assert_eq!("貯金".parse::<MoneyType>().unwrap(), MoneyType::Savings);
        assert!("bank".parse::<MoneyType>().is_err());

        assert_eq!("all".parse::<Tab>().unwrap(), Tab::All);
        assert_eq!(
            "Savings".parse::<Tab>().unwrap(),
            Tab::Only(MoneyType::Savings)
        );
    }

    #[test]
    fn test_parse_split_part() {
        let part: SplitPart = "外食=3,000".parse().unwrap();
        assert_eq!(part.label, "外食");
        assert_eq!(part.amount, Money::new(3000));

        assert!("外食".parse::<SplitPart>().is_err());
        assert!("外食=abc".parse::<SplitPart>().is_err());
    }
}
