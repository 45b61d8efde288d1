//! Category models
//!
//! Categories are matched against transaction labels through keywords and
//! aggregated per period for the spending breakdown.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::money::Money;

/// A spending category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Monthly amount above which the category is flagged
    #[serde(default)]
    pub warning_threshold: Option<Money>,
}

impl Category {
    /// Create a category with keywords
    pub fn new<I, S>(name: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            color: None,
            keywords: keywords.into_iter().map(Into::into).collect(),
            warning_threshold: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_warning_threshold(mut self, threshold: Money) -> Self {
        self.warning_threshold = Some(threshold);
        self
    }
}

/// Aggregated spending for a category over a period
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComputedCategory {
    /// Category name, `None` for uncategorized spending
    pub name: Option<String>,
    pub color: Option<String>,
    pub keywords: Vec<String>,
    /// Threshold scaled to the period length
    pub warning_threshold: Option<Money>,
    pub amount: Money,
    pub pct: u32,
}

impl ComputedCategory {
    /// Build from a declared category, scaling its threshold
    pub fn from_category(
        category: &Category,
        amount: Money,
        pct: u32,
        warning_threshold_multiplier: Decimal,
    ) -> Self {
        Self {
            name: Some(category.name.clone()),
            color: category.color.clone(),
            keywords: category.keywords.clone(),
            warning_threshold: category
                .warning_threshold
                .map(|t| t.scale(warning_threshold_multiplier)),
            amount,
            pct,
        }
    }

    /// Build for a category name that is not declared (or uncategorized)
    pub fn undeclared(name: Option<String>, amount: Money, pct: u32) -> Self {
        Self {
            name,
            color: None,
            keywords: Vec::new(),
            warning_threshold: None,
            amount,
            pct,
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Uncategorized")
    }

    /// Spending went over the (scaled) threshold
    pub fn has_warning(&self) -> bool {
        self.warning_threshold
            .is_some_and(|threshold| self.amount > threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_defaults() {
        let cat: Category = serde_json::from_str(r#"{"name": "Food"}"#).unwrap();
        assert!(cat.keywords.is_empty());
        assert!(cat.color.is_none());
        assert!(cat.warning_threshold.is_none());
    }

    #[test]
    fn test_threshold_scaling_and_warning() {
        let cat = Category::new("Food", ["carrefour"])
            .with_warning_threshold(Money::from_units(300));

        let monthly = ComputedCategory::from_category(
            &cat,
            Money::from_units(400),
            100,
            Decimal::ONE,
        );
        assert!(monthly.has_warning());

        let yearly = ComputedCategory::from_category(
            &cat,
            Money::from_units(400),
            100,
            Decimal::from(12),
        );
        assert_eq!(yearly.warning_threshold, Some(Money::from_units(3600)));
        assert!(!yearly.has_warning());
    }

    #[test]
    fn test_uncategorized_display_name() {
        let c = ComputedCategory::undeclared(None, Money::from_units(5), 10);
        assert_eq!(c.display_name(), "Uncategorized");
        assert!(!c.has_warning());
    }
}
