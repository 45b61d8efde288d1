//! Account display formatting

use crate::models::{total_balance, Account};

/// Format a list of accounts with balances as a table
pub fn format_account_list(accounts: &[Account], symbol: &str) -> String {
    if accounts.is_empty() {
        return "No accounts found.\n".to_string();
    }

    let name_width = accounts
        .iter()
        .map(|a| a.title.chars().count())
        .max()
        .unwrap_or(4)
        .max(5);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:>12}\n",
        "Account",
        "Balance",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:->12}\n",
        "",
        "",
        name_width = name_width,
    ));

    for account in accounts {
        output.push_str(&format!(
            "{:<name_width$}  {:>12}\n",
            account.title,
            account.amount.format_with_symbol(symbol),
            name_width = name_width,
        ));
    }

    output.push_str(&format!(
        "{:<name_width$}  {:>12}\n",
        "Total",
        total_balance(accounts).format_with_symbol(symbol),
        name_width = name_width,
    ));
    output
}
