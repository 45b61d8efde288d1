//! Account model
//!
//! Bank accounts as reported by an adapter: an identifier, a display title
//! and the current balance.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// A bank account snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub title: String,
    pub amount: Money,
}

impl Account {
    /// Create a new account snapshot
    pub fn new(id: impl Into<String>, title: impl Into<String>, amount: Money) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            amount,
        }
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.title, self.id, self.amount)
    }
}

/// Total balance across accounts
pub fn total_balance(accounts: &[Account]) -> Money {
    accounts.iter().map(|a| a.amount).sum()
}
