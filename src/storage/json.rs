//! JSON file storage
//!
//! Each month is a JSON array of transactions; accounts are a JSON array in
//! `accounts.json`.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::debug;

use super::file_io::{read_json, write_json_atomic};
use super::{monthly_file, scan_months, Storage};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Account, Transaction};

const EXTENSION: &str = "json";

/// Storage backed by JSON files in a directory
#[derive(Debug, Clone)]
pub struct JsonStorage {
    dir: PathBuf,
}

impl JsonStorage {
    /// Open (and create if needed) the storage directory
    pub fn new(dir: PathBuf) -> BudgetResult<Self> {
        std::fs::create_dir_all(&dir).map_err(|e| {
            BudgetError::Storage(format!("Failed to create {}: {}", dir.display(), e))
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn accounts_file(&self) -> PathBuf {
        self.dir.join("accounts.json")
    }
}

impl Storage for JsonStorage {
    fn name(&self) -> &'static str {
        "json"
    }

    fn load_accounts(&self) -> BudgetResult<Vec<Account>> {
        read_json(self.accounts_file())
    }

    fn save_accounts(&self, accounts: &[Account]) -> BudgetResult<()> {
        write_json_atomic(self.accounts_file(), &accounts)
    }

    fn load_monthly_transactions(&self, date: NaiveDate) -> BudgetResult<Vec<Transaction>> {
        let path = monthly_file(&self.dir, date, EXTENSION);
        let transactions: Vec<Transaction> = read_json(&path)?;
        debug!(file = %path.display(), count = transactions.len(), "loaded transactions");
        Ok(transactions)
    }

    fn save_monthly_transactions(
        &self,
        date: NaiveDate,
        transactions: &[Transaction],
    ) -> BudgetResult<()> {
        let path = monthly_file(&self.dir, date, EXTENSION);
        debug!(file = %path.display(), count = transactions.len(), "saving transactions");
        write_json_atomic(path, &transactions)
    }

    fn iter_months(&self) -> BudgetResult<Vec<NaiveDate>> {
        scan_months(&self.dir, EXTENSION)
    }
}
