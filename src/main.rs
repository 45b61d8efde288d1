use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use budget_tracker::cli::{
    handle_account_command, handle_budget_command, handle_import_command,
    handle_transaction_command, AccountCommands, BudgetCommands, ImportArgs, TransactionCommands,
};
use budget_tracker::config::{BudgetPaths, Settings};
use budget_tracker::storage::{self, Storage};

#[derive(Parser)]
#[command(
    name = "budget",
    version,
    about = "Monthly budgets and savings goals from your bank transactions",
    long_about = "Aggregates bank transactions into monthly budgets, compares them \
                  with expected income and planned expenses, and allocates what \
                  is saved to savings goals."
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Budget(BudgetCommands),

    /// Import transactions from a bank export
    Import(ImportArgs),

    /// Transaction commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Account commands
    #[command(subcommand)]
    Account(AccountCommands),

    /// Write a default configuration file
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    let paths = BudgetPaths::new()?;
    let settings = Settings::load_or_default(&paths)?;
    let today = Local::now().date_naive();
    debug!(base_dir = %paths.base_dir().display(), %today, "starting");

    match cli.command {
        Some(Commands::Budget(cmd)) => {
            let storage = open_storage(&paths, &settings)?;
            handle_budget_command(storage.as_ref(), &settings, today, cmd)?;
        }
        Some(Commands::Import(args)) => {
            let storage = open_storage(&paths, &settings)?;
            handle_import_command(storage.as_ref(), &settings, today, args)?;
        }
        Some(Commands::Transaction(cmd)) => {
            let storage = open_storage(&paths, &settings)?;
            handle_transaction_command(storage.as_ref(), &settings, today, cmd)?;
        }
        Some(Commands::Account(cmd)) => {
            let storage = open_storage(&paths, &settings)?;
            handle_account_command(storage.as_ref(), &settings, cmd)?;
        }
        Some(Commands::Init) => {
            paths.ensure_directories()?;
            if paths.is_initialized() {
                println!(
                    "Configuration already exists: {}",
                    paths.settings_file().display()
                );
            } else {
                settings.save(&paths)?;
                println!("Wrote default configuration: {}", paths.settings_file().display());
            }
        }
        Some(Commands::Config) => {
            println!("Budget Tracker Configuration");
            println!("============================");
            println!("Base directory:    {}", paths.base_dir().display());
            println!("Settings file:     {}", paths.settings_file().display());
            println!(
                "Storage directory: {}",
                paths.storage_dir(settings.storage_dir.as_deref()).display()
            );
            println!();
            println!("Settings:");
            println!("  Storage:          {}", settings.storage);
            println!("  Bank adapter:     {}", settings.bank_adapter);
            println!("  Income sources:   {}", settings.income_sources.len());
            println!("  Planned expenses: {}", settings.planned_expenses.len());
            println!("  Savings goals:    {}", settings.budget_goals.len());
            println!("  Categories:       {}", settings.categories.len());
            println!("  Income delay:     {} days", settings.income_delay);
        }
        None => {
            println!("Budget Tracker - monthly budgets from your bank transactions");
            println!();
            println!("Run 'budget --help' for usage information.");
        }
    }

    Ok(())
}

fn open_storage(paths: &BudgetPaths, settings: &Settings) -> Result<Box<dyn Storage>> {
    let dir = paths.storage_dir(settings.storage_dir.as_deref());
    let storage = storage::open_storage(&storage::default_registry(), &settings.storage, dir)?;
    Ok(storage)
}
