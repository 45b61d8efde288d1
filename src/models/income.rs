//! Income source model
//!
//! Declares expected recurring income (salary, allowances...) used to
//! compute the expected side of a monthly budget.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::money::Money;
use super::pattern::LabelPattern;
use super::period::ActiveWindow;

/// Expected monthly income
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeSource {
    pub label: String,
    pub amount: Money,
    #[serde(default, rename = "match", skip_serializing_if = "Option::is_none")]
    pub match_pattern: Option<LabelPattern>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_date: Option<NaiveDate>,
}

impl IncomeSource {
    /// Create an income source active for every month
    pub fn new(label: impl Into<String>, amount: Money) -> Self {
        Self {
            label: label.into(),
            amount,
            match_pattern: None,
            from_date: None,
            to_date: None,
        }
    }

    /// Limit the source to a date window
    pub fn with_window(mut self, from_date: Option<NaiveDate>, to_date: Option<NaiveDate>) -> Self {
        self.from_date = from_date;
        self.to_date = to_date;
        self
    }
}

impl ActiveWindow for IncomeSource {
    fn from_date(&self) -> Option<NaiveDate> {
        self.from_date
    }

    fn to_date(&self) -> Option<NaiveDate> {
        self.to_date
    }
}
