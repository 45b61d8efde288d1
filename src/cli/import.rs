//! Import CLI command
//!
//! Pulls accounts and transactions from a bank adapter into storage, then
//! compares the safe-to-spend amount of the current month with its value
//! before the import.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;

use crate::adapters::{create_adapter, default_registry, AdapterOptions};
use crate::config::Settings;
use crate::error::{BudgetError, BudgetResult};
use crate::services::{notification_message, BudgetService};
use crate::storage::Storage;

/// Arguments of `import`
#[derive(Args)]
pub struct ImportArgs {
    /// File exported from the bank
    pub file: PathBuf,
    /// Bank adapter to read the file with, defaults to the configured one
    #[arg(short, long)]
    pub adapter: Option<String>,
    /// Only import transactions on or after this date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,
    /// Only import transactions before this date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,
}

/// Handle the import command
pub fn handle_import_command(
    storage: &dyn Storage,
    settings: &Settings,
    today: NaiveDate,
    args: ImportArgs,
) -> BudgetResult<()> {
    let start = parse_optional_date(args.from.as_deref())?;
    let end = parse_optional_date(args.to.as_deref())?;

    let name = args.adapter.as_deref().unwrap_or(&settings.bank_adapter);
    let options = AdapterOptions {
        file: Some(args.file),
        categories: settings.categories.clone(),
    };
    let adapter = create_adapter(&default_registry(), name, &options)?;

    let service = BudgetService::new(storage, settings);
    let previous = service.monthly_budget(today)?;
    let summary = service.import_from_adapter(adapter.as_ref(), start, end)?;
    let current = service.monthly_budget(today)?;

    println!(
        "Imported {} transactions from {} accounts",
        summary.transactions, summary.accounts
    );
    if !summary.months.is_empty() {
        let months: Vec<String> = summary.months.iter().map(|m| m.to_string()).collect();
        println!("  Months updated: {}", months.join(", "));
    }

    if let Some(message) = notification_message(&previous, &current, settings) {
        println!();
        println!("{}", message);
    }

    Ok(())
}

fn parse_optional_date(value: Option<&str>) -> BudgetResult<Option<NaiveDate>> {
    value
        .map(|v| {
            NaiveDate::parse_from_str(v, "%Y-%m-%d").map_err(|_| BudgetError::invalid_date(v))
        })
        .transpose()
}
