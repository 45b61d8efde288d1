//! Bank adapters
//!
//! Adapters turn a bank's data (here, exported files) into canonical
//! accounts and transactions. They are selected by name through
//! [`AdapterRegistry`].

pub mod csv;
pub mod factory;

use std::path::PathBuf;

use chrono::NaiveDate;

pub use self::csv::CsvAdapter;
pub use factory::{normalize_label, TransactionFactory};

use crate::error::{BudgetError, BudgetResult};
use crate::models::{Account, Category, Transaction};
use crate::registry::Registry;

/// Source of accounts and transactions
pub trait BankAdapter {
    /// Registry name of the adapter
    fn name(&self) -> &'static str;

    fn fetch_accounts(&self) -> BudgetResult<Vec<Account>>;

    /// Transactions of one account dated within `[start, end)`
    fn fetch_transactions(
        &self,
        account: &Account,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> BudgetResult<Vec<Transaction>>;

    /// Transactions of every account, most recent first
    fn fetch_transactions_from_all_accounts(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> BudgetResult<Vec<Transaction>> {
        let mut transactions = Vec::new();
        for account in self.fetch_accounts()? {
            transactions.extend(self.fetch_transactions(&account, start, end)?);
        }
        transactions.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(transactions)
    }
}

/// What an adapter is built from
#[derive(Debug, Clone, Default)]
pub struct AdapterOptions {
    /// File to read, for file-based adapters
    pub file: Option<PathBuf>,
    /// Categories pre-assigned from label keywords
    pub categories: Vec<Category>,
}

/// Constructor of a bank adapter
pub type AdapterConstructor = fn(&AdapterOptions) -> BudgetResult<Box<dyn BankAdapter>>;

/// Registry of bank adapters
pub type AdapterRegistry = Registry<AdapterConstructor>;

/// The built-in adapters: `csv`
pub fn default_registry() -> AdapterRegistry {
    let mut registry = AdapterRegistry::new("bank");
    registry.register("csv", open_csv);
    registry
}

fn open_csv(options: &AdapterOptions) -> BudgetResult<Box<dyn BankAdapter>> {
    let file = options
        .file
        .clone()
        .ok_or_else(|| BudgetError::Import("The csv adapter needs a file to read".into()))?;
    let factory = TransactionFactory::new(options.categories.clone());
    Ok(Box::new(CsvAdapter::open(file, factory)?))
}

/// Create an adapter by name
pub fn create_adapter(
    registry: &AdapterRegistry,
    name: &str,
    options: &AdapterOptions,
) -> BudgetResult<Box<dyn BankAdapter>> {
    let constructor = registry.get(name)?;
    constructor(options)
}
