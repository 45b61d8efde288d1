//! Transaction CLI commands
//!
//! Listing stored transactions and editing the fields owned by the user:
//! categories and the savings goal a draw is assigned to.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use clap::Subcommand;
use tracing::info;

use super::budget::resolve_month;
use crate::config::Settings;
use crate::display::{format_transaction_list, format_transaction_row};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Month, TransactionUpdate};
use crate::services::CategoryMatcher;
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// List the transactions of a month
    List {
        /// Month to list (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Set the categories or goal of a transaction
    Tag {
        /// Transaction ID
        id: String,
        /// Transaction date (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,
        /// Category to assign (repeatable); replaces the current categories
        #[arg(short, long = "category")]
        categories: Vec<String>,
        /// Remove every category
        #[arg(long, conflicts_with = "categories")]
        clear_categories: bool,
        /// Savings goal this transaction draws from
        #[arg(short, long)]
        goal: Option<String>,
        /// Detach the transaction from its goal
        #[arg(long, conflicts_with = "goal")]
        clear_goal: bool,
    },
    /// Re-apply category keywords to stored transactions
    Recategorize {
        /// Also replace categories that are already set
        #[arg(long)]
        force: bool,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &dyn Storage,
    settings: &Settings,
    today: NaiveDate,
    cmd: TransactionCommands,
) -> BudgetResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        TransactionCommands::List { month } => {
            let month = resolve_month(month.as_deref(), Month::of(today))?;
            let transactions = storage.load_monthly_transactions(month.start_date())?;
            print!("{}", format_transaction_list(&transactions, symbol));
        }

        TransactionCommands::Tag {
            id,
            date,
            categories,
            clear_categories,
            goal,
            clear_goal,
        } => {
            let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                .map_err(|_| BudgetError::invalid_date(&date))?;
            let update = build_update(categories, clear_categories, goal, clear_goal)?;

            let updated = storage.update_transaction(date, &id, update)?;
            println!("Updated transaction {}", updated.id);
            println!("  {}", format_transaction_row(&updated, symbol));
        }

        TransactionCommands::Recategorize { force } => {
            let matcher = CategoryMatcher::new(&settings.categories);
            let mut changed = 0usize;
            let months = storage.update_all_transactions(&mut |tx| {
                if !force && !tx.categories.is_empty() {
                    return Some(tx);
                }
                let matched: BTreeSet<String> = matcher.matches(&tx.label).into_iter().collect();
                if matched == tx.categories {
                    return Some(tx);
                }
                changed += 1;
                Some(tx.with_categories(matched))
            })?;

            info!(months, changed, "recategorized transactions");
            println!("Recategorized {} transactions across {} months", changed, months);
        }
    }

    Ok(())
}

fn build_update(
    categories: Vec<String>,
    clear_categories: bool,
    goal: Option<String>,
    clear_goal: bool,
) -> BudgetResult<TransactionUpdate> {
    let categories = if clear_categories {
        Some(BTreeSet::new())
    } else if categories.is_empty() {
        None
    } else {
        Some(categories.into_iter().collect())
    };
    let goal = if clear_goal { Some(None) } else { goal.map(Some) };

    if categories.is_none() && goal.is_none() {
        return Err(BudgetError::Validation(
            "Nothing to update: pass --category, --goal or a --clear flag".into(),
        ));
    }

    Ok(TransactionUpdate { categories, goal })
}
