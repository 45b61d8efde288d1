//! Transaction display formatting

use super::format::truncate;
use crate::models::Transaction;

/// Format a single transaction as a list row
pub fn format_transaction_row(txn: &Transaction, symbol: &str) -> String {
    let mut tags: Vec<String> = txn.categories.iter().cloned().collect();
    if let Some(goal) = &txn.goal {
        tags.push(format!("goal:{}", goal));
    }
    let tags = if tags.is_empty() {
        String::new()
    } else {
        format!("  [{}]", tags.join(", "))
    };

    format!(
        "{} {:40} {:>12}{}",
        txn.date.format("%Y-%m-%d"),
        truncate(&txn.label, 40),
        txn.amount.format_with_symbol(symbol),
        tags
    )
}

/// Format transactions under a titled section
pub fn format_transaction_section(title: &str, transactions: &[Transaction], symbol: &str) -> String {
    let mut output = format!("{}\n", title);
    if transactions.is_empty() {
        output.push_str("  (none)\n");
        return output;
    }
    for txn in transactions {
        output.push_str("  ");
        output.push_str(&format_transaction_row(txn, symbol));
        output.push('\n');
    }
    output
}

/// Format a list of transactions with their ids (for tagging)
pub fn format_transaction_list(transactions: &[Transaction], symbol: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let id_width = transactions
        .iter()
        .map(|t| t.id.chars().count())
        .max()
        .unwrap_or(2)
        .max(2);

    let mut output = String::new();
    for txn in transactions {
        output.push_str(&format!(
            "{:<id_width$}  {}\n",
            txn.id,
            format_transaction_row(txn, symbol),
            id_width = id_width
        ));
    }
    output
}
