//! Planned (recurring) expense model
//!
//! Rent, subscriptions, insurance... Expenses known in advance whose monthly
//! share is budgeted whether or not the bank transaction was detected yet.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::money::Money;
use super::pattern::LabelPattern;
use super::period::ActiveWindow;

/// How often a planned expense is paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Recurrence {
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl Recurrence {
    /// Number of months covered by one payment
    pub fn months(&self) -> Decimal {
        match self {
            Self::Weekly => Decimal::new(25, 2),
            Self::Monthly => Decimal::ONE,
            Self::Yearly => Decimal::from(12),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
            Self::Yearly => "YEARLY",
        }
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Recurrence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "WEEKLY" => Ok(Self::Weekly),
            "MONTHLY" => Ok(Self::Monthly),
            "YEARLY" => Ok(Self::Yearly),
            other => Err(format!(
                "unknown recurrence '{}', expected WEEKLY, MONTHLY or YEARLY",
                other
            )),
        }
    }
}

impl TryFrom<String> for Recurrence {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Recurrence> for String {
    fn from(recurrence: Recurrence) -> Self {
        recurrence.as_str().to_string()
    }
}

/// A planned expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedExpense {
    pub label: String,
    pub amount: Money,
    #[serde(default)]
    pub recurrence: Recurrence,
    #[serde(default, rename = "match", skip_serializing_if = "Option::is_none")]
    pub match_pattern: Option<LabelPattern>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_date: Option<NaiveDate>,
}

impl PlannedExpense {
    /// Create a planned expense without label pattern or window
    pub fn new(label: impl Into<String>, amount: Money, recurrence: Recurrence) -> Self {
        Self {
            label: label.into(),
            amount,
            recurrence,
            match_pattern: None,
            from_date: None,
            to_date: None,
        }
    }

    /// Set the pattern used to detect the expense's transactions
    pub fn with_match(mut self, pattern: LabelPattern) -> Self {
        self.match_pattern = Some(pattern);
        self
    }

    /// Limit the expense to a date window
    pub fn with_window(mut self, from_date: Option<NaiveDate>, to_date: Option<NaiveDate>) -> Self {
        self.from_date = from_date;
        self.to_date = to_date;
        self
    }

    /// Monthly share of the expense (not rounded)
    pub fn amount_per_month(&self) -> Money {
        self.amount.divide(self.recurrence.months())
    }
}

impl ActiveWindow for PlannedExpense {
    fn from_date(&self) -> Option<NaiveDate> {
        self.from_date
    }

    fn to_date(&self) -> Option<NaiveDate> {
        self.to_date
    }
}
