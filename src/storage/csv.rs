//! CSV file storage
//!
//! Header-less files. Transactions are written as
//! `id,label,date,amount,account,categories,goal` with categories joined by
//! commas inside one field; accounts as `id,title,amount`.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use ::csv::{ReaderBuilder, StringRecord, WriterBuilder};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use super::file_io::write_atomic;
use super::{monthly_file, scan_months, Storage};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Account, Money, Transaction};

const EXTENSION: &str = "csv";

/// Storage backed by CSV files in a directory
#[derive(Debug, Clone)]
pub struct CsvStorage {
    dir: PathBuf,
}

impl CsvStorage {
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
        self.dir.join("accounts.csv")
    }
}

fn read_records(path: &Path) -> BudgetResult<Vec<StringRecord>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;
    let records = reader.records().collect::<Result<Vec<_>, _>>()?;
    Ok(records)
}

fn write_records<I>(path: &Path, rows: I) -> BudgetResult<()>
where
    I: IntoIterator<Item = Vec<String>>,
{
    write_atomic(path, |file| {
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        for row in rows {
            writer.write_record(&row)?;
        }
        writer.flush()?;
        Ok(())
    })
}

fn field<'r>(record: &'r StringRecord, index: usize, name: &str) -> BudgetResult<&'r str> {
    record
        .get(index)
        .ok_or_else(|| BudgetError::Csv(format!("missing {} column in {:?}", name, record)))
}

fn parse_amount(value: &str) -> BudgetResult<Money> {
    Decimal::from_str(value.trim())
        .map(Money::from_decimal)
        .map_err(|e| BudgetError::Csv(format!("invalid amount '{}': {}", value, e)))
}

fn record_to_transaction(record: &StringRecord) -> BudgetResult<Transaction> {
    let date = field(record, 2, "date")?;
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| BudgetError::invalid_date(date))?;

    let categories = record
        .get(5)
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty());
    let goal = record
        .get(6)
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(String::from);

    Ok(Transaction::new(
        field(record, 0, "id")?,
        field(record, 1, "label")?,
        date,
        parse_amount(field(record, 3, "amount")?)?,
        field(record, 4, "account")?,
    )
    .with_categories(categories)
    .with_goal(goal))
}

fn transaction_to_record(tx: &Transaction) -> Vec<String> {
    vec![
        tx.id.clone(),
        tx.label.clone(),
        tx.date.format("%Y-%m-%d").to_string(),
        tx.amount.amount().to_string(),
        tx.account.clone(),
        tx.categories
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        tx.goal.clone().unwrap_or_default(),
    ]
}

impl Storage for CsvStorage {
    fn name(&self) -> &'static str {
        "csv"
    }

    fn load_accounts(&self) -> BudgetResult<Vec<Account>> {
        read_records(&self.accounts_file())?
            .iter()
            .map(|record| {
                Ok(Account::new(
                    field(record, 0, "id")?,
                    field(record, 1, "title")?,
                    parse_amount(field(record, 2, "amount")?)?,
                ))
            })
            .collect()
    }

    fn save_accounts(&self, accounts: &[Account]) -> BudgetResult<()> {
        write_records(
            &self.accounts_file(),
            accounts.iter().map(|account| {
                vec![
                    account.id.clone(),
                    account.title.clone(),
                    account.amount.amount().to_string(),
                ]
            }),
        )
    }

    fn load_monthly_transactions(&self, date: NaiveDate) -> BudgetResult<Vec<Transaction>> {
        let path = monthly_file(&self.dir, date, EXTENSION);
        let transactions = read_records(&path)?
            .iter()
            .map(record_to_transaction)
            .collect::<BudgetResult<Vec<_>>>()?;
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
        write_records(&path, transactions.iter().map(transaction_to_record))
    }

    fn iter_months(&self) -> BudgetResult<Vec<NaiveDate>> {
        scan_months(&self.dir, EXTENSION)
    }
}
