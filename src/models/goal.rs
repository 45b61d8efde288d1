//! Savings goal models
//!
//! A goal with a target amount is funded over a year (`amount / 12` per
//! month). A goal without a target is a catch-all: it never receives a
//! share of the savings but still tracks what is drawn from it.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::money::Money;
use super::period::ActiveWindow;

/// A configured savings goal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetGoal {
    pub label: String,
    #[serde(default)]
    pub amount: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_date: Option<NaiveDate>,
}

impl BudgetGoal {
    /// A goal with a target amount
    pub fn new(label: impl Into<String>, amount: Money) -> Self {
        Self {
            label: label.into(),
            amount: Some(amount),
            from_date: None,
            to_date: None,
        }
    }

    /// A goal without target
    pub fn catch_all(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            amount: None,
            from_date: None,
            to_date: None,
        }
    }

    /// Limit the goal to a date window
    pub fn with_window(mut self, from_date: Option<NaiveDate>, to_date: Option<NaiveDate>) -> Self {
        self.from_date = from_date;
        self.to_date = to_date;
        self
    }

    pub fn has_target(&self) -> bool {
        self.amount.is_some()
    }

    /// Target amount, zero for catch-all goals
    pub fn target(&self) -> Money {
        self.amount.unwrap_or_default()
    }

    /// Monthly savings needed to reach the target within a year
    pub fn savings_per_month(&self) -> Money {
        self.amount
            .map(|amount| amount.divide(Decimal::from(12)))
            .unwrap_or_default()
    }
}

impl ActiveWindow for BudgetGoal {
    fn from_date(&self) -> Option<NaiveDate> {
        self.from_date
    }

    fn to_date(&self) -> Option<NaiveDate> {
        self.to_date
    }
}

/// Allocation result for one goal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComputedBudgetGoal {
    pub label: String,
    /// Target amount (zero for catch-all goals)
    pub target: Money,
    /// Savings allocated to the goal
    pub saved: Money,
    /// Amount drawn by goal-tagged transactions
    pub used: Money,
}

impl ComputedBudgetGoal {
    /// Portion of the target covered by savings and draws
    pub fn completed_amount(&self) -> Money {
        (self.saved + self.used).min(self.target)
    }

    /// Amount still missing to reach the target
    pub fn remaining(&self) -> Money {
        (self.target - self.completed_amount()).non_negative()
    }

    pub fn is_completed(&self) -> bool {
        !self.target.is_zero() && self.remaining().is_zero()
    }

    pub fn completed_pct(&self) -> u32 {
        self.completed_amount().percent_of(self.target)
    }

    pub fn saved_pct(&self) -> u32 {
        self.saved.min(self.target).percent_of(self.target)
    }

    pub fn used_pct(&self) -> u32 {
        self.used.min(self.target).percent_of(self.target)
    }
}
