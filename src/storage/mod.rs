//! Storage layer for budget-tracker
//!
//! Transactions are stored one file per month (`YYYY-MM.<ext>`) next to an
//! `accounts.<ext>` file. The backend is chosen by name through
//! [`StorageRegistry`].

pub mod csv;
pub mod file_io;
pub mod json;

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::debug;

pub use self::csv::CsvStorage;
pub use self::json::JsonStorage;
pub use file_io::{read_json, write_atomic, write_json_atomic};

use crate::error::{BudgetError, BudgetResult};
use crate::models::{Account, Month, Transaction, TransactionUpdate};
use crate::registry::Registry;
use crate::services::filters::{filter_transactions_period, period_to_months};

/// Persistence of accounts and monthly transactions
pub trait Storage {
    /// Registry name of the backend
    fn name(&self) -> &'static str;

    fn load_accounts(&self) -> BudgetResult<Vec<Account>>;

    fn save_accounts(&self, accounts: &[Account]) -> BudgetResult<()>;

    /// Transactions of the month containing `date`; empty if none are stored
    fn load_monthly_transactions(&self, date: NaiveDate) -> BudgetResult<Vec<Transaction>>;

    fn save_monthly_transactions(
        &self,
        date: NaiveDate,
        transactions: &[Transaction],
    ) -> BudgetResult<()>;

    /// First days of the months that have stored transactions, sorted
    fn iter_months(&self) -> BudgetResult<Vec<NaiveDate>>;

    /// Transactions dated within `[start, end)`
    fn load_period_transactions(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> BudgetResult<Vec<Transaction>> {
        let mut transactions = Vec::new();
        for date in period_to_months(start, end) {
            transactions.extend(self.load_monthly_transactions(date)?);
        }
        Ok(filter_transactions_period(
            &transactions,
            Some(start),
            Some(end),
        ))
    }

    /// Transactions of the calendar year containing `date`
    fn load_yearly_transactions(&self, date: NaiveDate) -> BudgetResult<Vec<Transaction>> {
        let first = Month::of(date).first_of_year();
        let next_year = Month::new(first.year() + 1, 1)?;
        self.load_period_transactions(first.start_date(), next_year.start_date())
    }

    /// Rewrite a month, mapping each transaction; `None` drops it
    fn update_monthly_transactions(
        &self,
        date: NaiveDate,
        f: &mut dyn FnMut(Transaction) -> Option<Transaction>,
    ) -> BudgetResult<Vec<Transaction>> {
        let transactions: Vec<Transaction> = self
            .load_monthly_transactions(date)?
            .into_iter()
            .filter_map(|tx| f(tx))
            .collect();
        self.save_monthly_transactions(date, &transactions)?;
        Ok(transactions)
    }

    /// Rewrite every stored month; returns the number of months written
    fn update_all_transactions(
        &self,
        f: &mut dyn FnMut(Transaction) -> Option<Transaction>,
    ) -> BudgetResult<usize> {
        let months = self.iter_months()?;
        for date in &months {
            self.update_monthly_transactions(*date, f)?;
        }
        Ok(months.len())
    }

    /// Apply user edits to one stored transaction
    ///
    /// The month is only written when the transaction exists and changed.
    fn update_transaction(
        &self,
        date: NaiveDate,
        id: &str,
        update: TransactionUpdate,
    ) -> BudgetResult<Transaction> {
        let mut transactions = self.load_monthly_transactions(date)?;
        let tx = transactions
            .iter_mut()
            .find(|tx| tx.id == id)
            .ok_or_else(|| BudgetError::transaction_not_found(id))?;

        let updated = tx.update(update);
        if updated.categories == tx.categories && updated.goal == tx.goal {
            return Ok(updated);
        }
        *tx = updated.clone();
        self.save_monthly_transactions(date, &transactions)?;
        Ok(updated)
    }
}

/// Constructor of a storage backend rooted at a directory
pub type StorageConstructor = fn(PathBuf) -> BudgetResult<Box<dyn Storage>>;

/// Registry of storage backends
pub type StorageRegistry = Registry<StorageConstructor>;

/// The built-in backends: `json` and `csv`
pub fn default_registry() -> StorageRegistry {
    let mut registry = StorageRegistry::new("storage");
    registry
        .register("json", |dir| Ok(Box::new(JsonStorage::new(dir)?)))
        .register("csv", |dir| Ok(Box::new(CsvStorage::new(dir)?)));
    registry
}

/// Open a backend by name
pub fn open_storage(
    registry: &StorageRegistry,
    name: &str,
    dir: PathBuf,
) -> BudgetResult<Box<dyn Storage>> {
    let constructor = registry.get(name)?;
    debug!(storage = name, dir = %dir.display(), "opening storage");
    constructor(dir)
}

/// `<dir>/YYYY-MM.<ext>` for the month containing `date`
pub(crate) fn monthly_file(dir: &Path, date: NaiveDate, extension: &str) -> PathBuf {
    dir.join(format!("{}.{}", Month::of(date), extension))
}

/// Months of the `YYYY-MM.<ext>` files found in `dir`
pub(crate) fn scan_months(dir: &Path, extension: &str) -> BudgetResult<Vec<NaiveDate>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut months = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(extension) {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if stem.len() == 7 {
            if let Ok(month) = Month::parse(stem) {
                months.push(month.start_date());
            }
        }
    }
    months.sort();
    Ok(months)
}
