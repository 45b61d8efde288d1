//! Canonical transaction construction for bank adapters

use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::{Category, Money, Transaction};
use crate::services::category::CategoryMatcher;

/// Builds transactions the same way for every adapter
///
/// Labels are normalized (line breaks and runs of whitespace collapse to a
/// single space), a random id is assigned when the bank provides none, and
/// categories are pre-assigned from keywords compiled once per factory.
#[derive(Debug, Clone, Default)]
pub struct TransactionFactory {
    matcher: CategoryMatcher,
}

impl TransactionFactory {
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            matcher: CategoryMatcher::new(&categories),
        }
    }

    pub fn make_transaction(
        &self,
        id: Option<&str>,
        label: &str,
        date: NaiveDate,
        amount: Money,
        account: &str,
    ) -> Transaction {
        let id = match id.map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => Uuid::new_v4().to_string(),
        };
        let label = normalize_label(label);
        let categories = self.matcher.matches(&label);

        Transaction::new(id, label, date, amount, account).with_categories(categories)
    }
}

/// Collapse whitespace runs into single spaces
pub fn normalize_label(label: &str) -> String {
    label.split_whitespace().collect::<Vec<_>>().join(" ")
}
