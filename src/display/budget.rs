//! Budget display formatting
//!
//! The monthly view lists the transactions of each bucket followed by a
//! summary. The running month shows expected figures next to the actuals.
//! The yearly view is a table with one row per month and a hybrid total.

use super::format::{format_signed, separator};
use super::transaction::format_transaction_section;
use crate::models::{Budget, BudgetField, BudgetList, Money};

/// Format the detailed view of one month
pub fn format_monthly_budget(
    budget: &Budget,
    is_current: bool,
    accounts_total: Option<Money>,
    symbol: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Budget for {}\n", budget.period()));
    output.push_str(&format!("{}\n\n", "=".repeat(60)));

    output.push_str(&format_transaction_section("Income", &budget.income_transactions, symbol));
    output.push('\n');
    output.push_str(&format_transaction_section(
        "Planned expenses",
        &budget.planned_expenses_transactions,
        symbol,
    ));
    output.push('\n');
    output.push_str(&format_transaction_section("Expenses", &budget.expenses_transactions, symbol));
    output.push('\n');

    output.push_str(&format_budget_summary(budget, is_current, accounts_total, symbol));
    output
}

/// Format the summary block of one month
pub fn format_budget_summary(
    budget: &Budget,
    is_current: bool,
    accounts_total: Option<Money>,
    symbol: &str,
) -> String {
    let fmt = |m: Money| m.format_with_symbol(symbol);
    let mut output = String::new();

    output.push_str(&format!("{}\n", separator(60)));

    if is_current {
        let missing = budget.expected_income - budget.income;
        let income = if missing.is_zero() {
            fmt(budget.income)
        } else {
            format!(
                "{} ({} expected)",
                fmt(budget.income),
                format_signed(missing, symbol)
            )
        };
        output.push_str(&format!("{:<22}{}\n", "Income:", income));
        output.push_str(&format!(
            "{:<22}{} (paid {})\n",
            "Planned expenses:",
            fmt(budget.expected_planned_expenses),
            fmt(budget.planned_expenses)
        ));
        output.push_str(&format!("{:<22}{}\n", "Expenses:", fmt(budget.expenses)));
        output.push_str(&format!(
            "{:<22}{} (expected {})\n",
            "Real balance:",
            fmt(budget.real_balance),
            fmt(budget.expected_real_balance)
        ));
        output.push_str(&format!(
            "{:<22}{}\n",
            "Budget balance:",
            fmt(budget.expected_balance)
        ));
        output.push_str(&format!(
            "{:<22}{} / {}\n",
            "Savings:",
            fmt(budget.expected_savings),
            fmt(budget.savings_goal)
        ));
        output.push_str(&format!(
            "{:<22}{}\n",
            "Safe to spend:",
            fmt(budget.expected_remaining)
        ));
    } else {
        output.push_str(&format!("{:<22}{}\n", "Income:", fmt(budget.income)));
        output.push_str(&format!(
            "{:<22}{}\n",
            "Planned expenses:",
            fmt(budget.planned_expenses)
        ));
        output.push_str(&format!("{:<22}{}\n", "Expenses:", fmt(budget.expenses)));
        output.push_str(&format!("{:<22}{}\n", "Real balance:", fmt(budget.real_balance)));
        output.push_str(&format!("{:<22}{}\n", "Budget balance:", fmt(budget.balance)));
        output.push_str(&format!(
            "{:<22}{} / {}\n",
            "Savings:",
            fmt(budget.savings),
            fmt(budget.savings_goal)
        ));
    }

    if let Some(total) = accounts_total {
        output.push_str(&format!("{:<22}{}\n", "Available:", fmt(total)));
    }

    output
}

/// Format the yearly table
pub fn format_yearly_budgets(budgets: &BudgetList, symbol: &str) -> String {
    if budgets.is_empty() {
        return "No budgets found.\n".to_string();
    }

    let columns = [
        ("Income", BudgetField::Income),
        ("Planned", BudgetField::PlannedExpenses),
        ("Expenses", BudgetField::Expenses),
        ("Savings", BudgetField::Savings),
        ("Goal", BudgetField::SavingsGoal),
        ("Balance", BudgetField::Balance),
    ];
    let width = 8 + columns.len() * 14;

    let mut output = String::new();
    output.push_str(&format!("{:<8}", "Month"));
    for (title, _) in &columns {
        output.push_str(&format!("{:>14}", title));
    }
    output.push('\n');
    output.push_str(&format!("{}\n", separator(width)));

    let current = budgets.current_month();
    for budget in budgets {
        let marker = if budget.period() == current { "*" } else { "" };
        output.push_str(&format!("{:<8}", format!("{}{}", budget.period(), marker)));
        for (_, field) in &columns {
            output.push_str(&format!(
                "{:>14}",
                budgets.month_value(budget, *field).format_with_symbol(symbol)
            ));
        }
        output.push('\n');
    }

    output.push_str(&format!("{}\n", separator(width)));
    output.push_str(&format!("{:<8}", "Total"));
    for (_, field) in &columns {
        output.push_str(&format!(
            "{:>14}",
            budgets.total(*field).format_with_symbol(symbol)
        ));
    }
    output.push('\n');

    if budgets.get(current).is_some() {
        output.push_str("\n* running month, expected figures\n");
    }

    output
}
