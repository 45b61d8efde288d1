//! Transaction model
//!
//! The canonical record every bank or file adapter produces. Transactions are
//! values: user edits (categories, goal) go through [`Transaction::update`]
//! and friends, which return a new record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::money::Money;

/// A financial transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Identifier assigned by the bank or the importing adapter
    pub id: String,

    /// Bank label (normalized whitespace)
    pub label: String,

    /// Transaction date
    pub date: NaiveDate,

    /// Amount (positive for income, zero or negative for expenses)
    pub amount: Money,

    /// Account identifier
    pub account: String,

    /// Category names
    #[serde(default)]
    pub categories: BTreeSet<String>,

    /// Savings goal this transaction draws from
    #[serde(default)]
    pub goal: Option<String>,
}

/// User edits applied through [`Transaction::update`]
///
/// `None` leaves a field unchanged; `goal: Some(None)` clears the goal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionUpdate {
    pub categories: Option<BTreeSet<String>>,
    pub goal: Option<Option<String>>,
}

impl Transaction {
    /// Create a new transaction without categories or goal
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        date: NaiveDate,
        amount: Money,
        account: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            date,
            amount,
            account: account.into(),
            categories: BTreeSet::new(),
            goal: None,
        }
    }

    /// Check if this is income (strictly positive amount)
    pub fn is_income(&self) -> bool {
        self.amount.is_positive()
    }

    /// Check if this is an expense (zero or negative amount)
    pub fn is_expense(&self) -> bool {
        !self.is_income()
    }

    /// Check if the transaction falls within `[start, end)`
    pub fn is_within(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
        start.map_or(true, |s| self.date >= s) && end.map_or(true, |e| self.date < e)
    }

    /// Return a copy with the given categories
    pub fn with_categories<I, S>(&self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            categories: categories.into_iter().map(Into::into).collect(),
            ..self.clone()
        }
    }

    /// Return a copy drawing from the given goal (or none)
    pub fn with_goal(&self, goal: Option<String>) -> Self {
        Self {
            goal,
            ..self.clone()
        }
    }

    /// Return a copy with the edits applied
    pub fn update(&self, update: TransactionUpdate) -> Self {
        let mut txn = self.clone();
        if let Some(categories) = update.categories {
            txn.categories = categories;
        }
        if let Some(goal) = update.goal {
            txn.goal = goal;
        }
        txn
    }
}

impl PartialEq for Transaction {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Transaction {}

impl Hash for Transaction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} = {}",
            self.date.format("%Y-%m-%d"),
            self.label,
            self.amount
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Transaction {
        Transaction::new(
            "tx-1",
            "CARREFOUR MARKET",
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            Money::from_cents(-5000),
            "checking",
        )
    }

    #[test]
    fn test_income_expense() {
        let txn = sample();
        assert!(txn.is_expense());
        assert!(!txn.is_income());

        let zero = Transaction {
            amount: Money::zero(),
            ..sample()
        };
        assert!(zero.is_expense());
    }

    #[test]
    fn test_is_within_half_open() {
        let txn = sample();
        let jan15 = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let jan16 = NaiveDate::from_ymd_opt(2025, 1, 16).unwrap();

        assert!(txn.is_within(Some(jan15), Some(jan16)));
        assert!(!txn.is_within(None, Some(jan15)));
        assert!(txn.is_within(None, None));
    }

    #[test]
    fn test_updates_produce_new_values() {
        let txn = sample();
        let tagged = txn
            .with_categories(["Groceries"])
            .with_goal(Some("car".to_string()));

        assert!(txn.categories.is_empty());
        assert!(txn.goal.is_none());
        assert!(tagged.categories.contains("Groceries"));
        assert_eq!(tagged.goal.as_deref(), Some("car"));
        // Identity is the id, not the contents
        assert_eq!(txn, tagged);
    }

    #[test]
    fn test_update_partial() {
        let txn = sample().with_goal(Some("car".into()));

        let same_goal = txn.update(TransactionUpdate {
            categories: Some(BTreeSet::from(["Food".to_string()])),
            goal: None,
        });
        assert_eq!(same_goal.goal.as_deref(), Some("car"));
        assert!(same_goal.categories.contains("Food"));

        let cleared = txn.update(TransactionUpdate {
            categories: None,
            goal: Some(None),
        });
        assert!(cleared.goal.is_none());
    }

    #[test]
    fn test_serialization_defaults() {
        let json = r#"{"id":"a","label":"X","date":"2025-02-01","amount":-12.5,"account":"c"}"#;
        let txn: Transaction = serde_json::from_str(json).unwrap();
        assert!(txn.categories.is_empty());
        assert!(txn.goal.is_none());
        assert_eq!(txn.amount, Money::from_cents(-1250));

        assert!(serde_json::from_str::<Transaction>(
            r#"{"id":"a","label":"X","date":"2025-02-30","amount":1,"account":"c"}"#
        )
        .is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            format!("{}", sample()),
            "2025-01-15 - CARREFOUR MARKET = -50.00"
        );
    }
}
