//! Category matching and aggregation
//!
//! Keywords assign categories to transaction labels at import time; the
//! per-period breakdown sums expenses by category.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use regex::{Regex, RegexBuilder};
use rust_decimal::Decimal;

use crate::models::{Category, ComputedCategory, Money, Transaction};

use super::filters::filter_transactions_period;

/// Keyword rules compiled once for a list of categories
///
/// A keyword matches as a whole word, case-insensitively. Categories without
/// usable keywords never match.
#[derive(Debug, Clone, Default)]
pub struct CategoryMatcher {
    rules: Vec<(String, Regex)>,
}

impl CategoryMatcher {
    pub fn new(categories: &[Category]) -> Self {
        let rules = categories
            .iter()
            .filter_map(|category| {
                let keywords: Vec<String> = category
                    .keywords
                    .iter()
                    .map(|k| k.trim())
                    .filter(|k| !k.is_empty())
                    .map(regex::escape)
                    .collect();
                if keywords.is_empty() {
                    return None;
                }
                RegexBuilder::new(&format!(r"\b(?:{})\b", keywords.join("|")))
                    .case_insensitive(true)
                    .build()
                    .ok()
                    .map(|re| (category.name.clone(), re))
            })
            .collect();
        Self { rules }
    }

    /// Number of categories with a compiled rule
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Names of the matching categories, each once, in declaration order
    pub fn matches(&self, label: &str) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for (name, re) in &self.rules {
            if !names.contains(name) && re.is_match(label) {
                names.push(name.clone());
            }
        }
        names
    }
}

/// Names of the categories whose keywords occur in `label`
///
/// Compiles the keywords on every call; reuse a [`CategoryMatcher`] when
/// matching many labels.
pub fn match_categories(categories: &[Category], label: &str) -> Vec<String> {
    CategoryMatcher::new(categories).matches(label)
}

/// Spending breakdown by category over `[start, end)`
///
/// Only expenses count. A transaction with several categories is added in
/// full to each of them, and the total used for percentages includes every
/// such contribution. Results list uncategorized spending first, then the
/// used categories by name, then declared categories without spending.
pub fn compute_categories(
    transactions: &[Transaction],
    categories: &[Category],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    warning_threshold_multiplier: Decimal,
) -> Vec<ComputedCategory> {
    let mut uncategorized = Money::zero();
    let mut amounts: BTreeMap<&str, Money> = BTreeMap::new();
    let mut total = Money::zero();

    let transactions = filter_transactions_period(transactions, start, end);
    for tx in transactions.iter().filter(|tx| tx.amount.is_negative()) {
        let amount = tx.amount.abs();
        if tx.categories.is_empty() {
            uncategorized += amount;
            total += amount;
            continue;
        }
        for name in &tx.categories {
            *amounts.entry(name.as_str()).or_default() += amount;
            total += amount;
        }
    }

    let declared: BTreeMap<&str, &Category> =
        categories.iter().map(|c| (c.name.as_str(), c)).collect();
    let mut computed = Vec::with_capacity(amounts.len() + categories.len() + 1);

    if uncategorized.is_positive() {
        computed.push(ComputedCategory::undeclared(
            None,
            uncategorized.rounded(),
            uncategorized.percent_of(total),
        ));
    }

    for (name, amount) in &amounts {
        let pct = amount.percent_of(total);
        computed.push(match declared.get(name) {
            Some(category) => ComputedCategory::from_category(
                category,
                amount.rounded(),
                pct,
                warning_threshold_multiplier,
            ),
            None => ComputedCategory::undeclared(Some(name.to_string()), amount.rounded(), pct),
        });
    }

    let mut listed: HashSet<&str> = amounts.keys().copied().collect();
    for category in categories {
        if listed.insert(category.name.as_str()) {
            computed.push(ComputedCategory::from_category(
                category,
                Money::zero(),
                0,
                warning_threshold_multiplier,
            ));
        }
    }

    computed
}
