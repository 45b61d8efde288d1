//! Budget CLI commands
//!
//! Monthly and yearly views, savings goals and the category breakdown.

use chrono::NaiveDate;
use clap::Subcommand;
use rust_decimal::Decimal;

use crate::config::Settings;
use crate::display::{format_categories, format_goals, format_monthly_budget, format_yearly_budgets};
use crate::error::BudgetResult;
use crate::models::{total_balance, Month};
use crate::services::BudgetService;
use crate::storage::Storage;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Show the budget of a month
    Show {
        /// Month to show (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Show the budgets of a year, month by month
    Year {
        /// Year to show, defaults to the current year
        #[arg(short, long)]
        year: Option<i32>,
        /// Include the months after the current one
        #[arg(long)]
        future: bool,
    },
    /// Show how savings were allocated to goals
    Goals {
        /// Year to allocate, defaults to the current year
        #[arg(short, long)]
        year: Option<i32>,
    },
    /// Show spending per category
    Categories {
        /// Month to analyze (YYYY-MM), defaults to the current month
        #[arg(short, long, conflicts_with = "year")]
        month: Option<String>,
        /// Analyze a whole year; warning thresholds are scaled to 12 months
        #[arg(short, long)]
        year: Option<i32>,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &dyn Storage,
    settings: &Settings,
    today: NaiveDate,
    cmd: BudgetCommands,
) -> BudgetResult<()> {
    let service = BudgetService::new(storage, settings);
    let current_month = Month::of(today);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        BudgetCommands::Show { month } => {
            let month = resolve_month(month.as_deref(), current_month)?;
            let budget = service.monthly_budget(month.start_date())?;
            let is_current = month == current_month;

            let accounts = storage.load_accounts()?;
            let accounts_total = (is_current && !accounts.is_empty()).then(|| total_balance(&accounts));

            print!(
                "{}",
                format_monthly_budget(&budget, is_current, accounts_total, symbol)
            );
        }

        BudgetCommands::Year { year, future } => {
            let first = resolve_year(year, current_month)?;
            let budgets = service.yearly_budgets(first.start_date(), current_month, future)?;
            println!("Budgets for {}", first.year());
            println!();
            print!("{}", format_yearly_budgets(&budgets, symbol));
        }

        BudgetCommands::Goals { year } => {
            let first = resolve_year(year, current_month)?;
            let (goals, savings_after) = service.budget_goals(first.start_date(), current_month)?;
            println!("Savings goals for {}", first.year());
            println!();
            print!("{}", format_goals(&goals, savings_after, symbol));
        }

        BudgetCommands::Categories { month, year } => {
            let (title, start, end, multiplier) = match year {
                Some(_) => {
                    let first = resolve_year(year, current_month)?;
                    let next = Month::new(first.year() + 1, 1)?;
                    (
                        first.year().to_string(),
                        first.start_date(),
                        next.start_date(),
                        Decimal::from(12),
                    )
                }
                None => {
                    let month = resolve_month(month.as_deref(), current_month)?;
                    (month.to_string(), month.start_date(), month.end_date(), Decimal::ONE)
                }
            };

            let categories = service.categories(start, end, multiplier)?;
            println!("Spending per category for {}", title);
            println!();
            print!("{}", format_categories(&categories, symbol));
        }
    }

    Ok(())
}

/// Parse an optional "YYYY-MM" argument
pub fn resolve_month(value: Option<&str>, current_month: Month) -> BudgetResult<Month> {
    match value {
        Some(value) => Ok(Month::parse(value)?),
        None => Ok(current_month),
    }
}

/// First month of an optional year argument
pub fn resolve_year(year: Option<i32>, current_month: Month) -> BudgetResult<Month> {
    match year {
        Some(year) => Ok(Month::new(year, 1)?),
        None => Ok(current_month.first_of_year()),
    }
}
