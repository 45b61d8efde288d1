//! Label patterns
//!
//! Regular expressions matched against transaction labels. Matching is
//! anchored at the start of the label: a pattern `RENT` matches
//! `RENT MARCH 2025` but not `PAID RENT`.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::BudgetError;

/// A compiled label pattern, serialized as its source string
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LabelPattern {
    source: String,
    regex: Regex,
}

impl LabelPattern {
    /// Compile a pattern
    pub fn new(source: impl Into<String>) -> Result<Self, BudgetError> {
        let source = source.into();
        let regex = Regex::new(&source).map_err(|e| BudgetError::InvalidPattern {
            pattern: source.clone(),
            reason: e.to_string(),
        })?;
        Ok(Self { source, regex })
    }

    /// The pattern as written in the configuration
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Check whether the label matches from its first character
    pub fn matches(&self, label: &str) -> bool {
        // The leftmost match starts at 0 whenever any match starts at 0
        self.regex.find(label).is_some_and(|m| m.start() == 0)
    }

    /// Capture groups of a match starting at the first character
    pub fn captures<'t>(&self, label: &'t str) -> Option<Captures<'t>> {
        self.regex
            .captures(label)
            .filter(|caps| caps.get(0).is_some_and(|m| m.start() == 0))
    }
}

impl PartialEq for LabelPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for LabelPattern {}

impl TryFrom<String> for LabelPattern {
    type Error = BudgetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LabelPattern> for String {
    fn from(pattern: LabelPattern) -> Self {
        pattern.source
    }
}

impl fmt::Display for LabelPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
