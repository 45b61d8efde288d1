//! Transaction filters
//!
//! Pure helpers used by the budgetizer and the storage layer to slice
//! transaction lists by date, sign and label.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use crate::models::{LabelPattern, Month, Transaction};

/// Split into income (`amount > 0`) and expenses (`amount <= 0`), keeping order
pub fn split_income_expenses(transactions: &[Transaction]) -> (Vec<Transaction>, Vec<Transaction>) {
    transactions.iter().cloned().partition(Transaction::is_income)
}

/// Keep transactions dated within `[start, end)`
pub fn filter_transactions_period(
    transactions: &[Transaction],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<Transaction> {
    if start.is_none() && end.is_none() {
        return transactions.to_vec();
    }
    transactions
        .iter()
        .filter(|tx| tx.is_within(start, end))
        .cloned()
        .collect()
}

/// Separate transactions whose label matches any of the patterns
///
/// Returns `(matching, remainder)`.
pub fn extract_transactions_by_label<'p, I>(
    transactions: &[Transaction],
    patterns: I,
) -> (Vec<Transaction>, Vec<Transaction>)
where
    I: IntoIterator<Item = &'p LabelPattern>,
{
    let patterns: Vec<&LabelPattern> = patterns.into_iter().collect();
    let matching: Vec<Transaction> = transactions
        .iter()
        .filter(|tx| patterns.iter().any(|p| p.matches(&tx.label)))
        .cloned()
        .collect();
    let remainder = filter_out_transactions(transactions, &matching);
    (matching, remainder)
}

/// Remove transfers between the user's own accounts
///
/// An outgoing transfer and an incoming one are paired through the `id`
/// capture group of their patterns; each pair is removed. Transfers without
/// a counterpart stay in the list.
///
/// Returns `(inter_account, remainder)`.
pub fn extract_inter_account_transactions(
    transactions: &[Transaction],
    labels_out: &LabelPattern,
    labels_in: &LabelPattern,
) -> (Vec<Transaction>, Vec<Transaction>) {
    let mut tx_out: HashMap<String, &Transaction> = HashMap::new();
    let mut tx_in: HashMap<String, &Transaction> = HashMap::new();

    for tx in transactions {
        if let Some(caps) = labels_out.captures(&tx.label) {
            if let Some(id) = caps.name("id") {
                tx_out.insert(id.as_str().to_string(), tx);
            }
            continue;
        }
        if let Some(id) = labels_in
            .captures(&tx.label)
            .and_then(|caps| caps.name("id").map(|m| m.as_str().to_string()))
        {
            tx_in.insert(id, tx);
        }
    }

    let mut paired: HashSet<&str> = HashSet::new();
    for (id, out) in &tx_out {
        if let Some(incoming) = tx_in.get(id) {
            paired.insert(out.id.as_str());
            paired.insert(incoming.id.as_str());
        }
    }

    let (inter_account, remainder): (Vec<Transaction>, Vec<Transaction>) = transactions
        .iter()
        .cloned()
        .partition(|tx| paired.contains(tx.id.as_str()));
    (inter_account, remainder)
}

/// Drop every transaction present (by id) in `remove`
pub fn filter_out_transactions(
    transactions: &[Transaction],
    remove: &[Transaction],
) -> Vec<Transaction> {
    let ids: HashSet<&str> = remove.iter().map(|tx| tx.id.as_str()).collect();
    transactions
        .iter()
        .filter(|tx| !ids.contains(tx.id.as_str()))
        .cloned()
        .collect()
}

/// First days of the months covering `[start, end)`
pub fn period_to_months(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let Some(last_day) = end.pred_opt() else {
        return Vec::new();
    };
    let last = Month::of(last_day);

    let mut months = Vec::new();
    let mut month = Month::of(start);
    while month <= last {
        months.push(month.start_date());
        month = month.next();
    }
    months
}
