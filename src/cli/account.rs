//! Account CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_account_list;
use crate::error::BudgetResult;
use crate::storage::Storage;

/// Account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// List imported accounts with their balances
    List,
}

/// Handle an account command
pub fn handle_account_command(
    storage: &dyn Storage,
    settings: &Settings,
    cmd: AccountCommands,
) -> BudgetResult<()> {
    match cmd {
        AccountCommands::List => {
            let accounts = storage.load_accounts()?;
            print!(
                "{}",
                format_account_list(&accounts, &settings.currency_symbol)
            );
        }
    }

    Ok(())
}
