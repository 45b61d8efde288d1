//! CSV bank export adapter
//!
//! Reads header-less rows `id,label,date,amount,account`. Each distinct
//! account column value is an account whose balance is the sum of its rows.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use ::csv::{ReaderBuilder, StringRecord};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::{BankAdapter, TransactionFactory};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Account, Money, Transaction};

/// A valid row of the export
#[derive(Debug, Clone)]
struct CsvRow {
    id: String,
    label: String,
    date: NaiveDate,
    amount: Money,
    account: String,
}

/// Adapter reading a CSV export file
#[derive(Debug, Clone)]
pub struct CsvAdapter {
    path: PathBuf,
    rows: Vec<CsvRow>,
    factory: TransactionFactory,
}

impl CsvAdapter {
    /// Read and validate the whole file
    ///
    /// Rows that cannot be parsed are skipped with a warning; a leading
    /// header row (first column `id`) is ignored.
    pub fn open(path: impl Into<PathBuf>, factory: TransactionFactory) -> BudgetResult<Self> {
        let path = path.into();
        if !path.exists() {
            return Err(BudgetError::Import(format!(
                "File not found: {}",
                path.display()
            )));
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&path)?;

        let mut rows = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    warn!(row = idx + 1, error = %e, "skipping unreadable CSV row");
                    continue;
                }
            };
            if idx == 0 && record.get(0).is_some_and(|c| c.trim().eq_ignore_ascii_case("id")) {
                continue;
            }
            match parse_row(&record) {
                Ok(row) => rows.push(row),
                Err(reason) => warn!(row = idx + 1, %reason, "skipping invalid CSV row"),
            }
        }

        debug!(file = %path.display(), rows = rows.len(), "parsed CSV export");
        Ok(Self {
            path,
            rows,
            factory,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn parse_row(record: &StringRecord) -> Result<CsvRow, String> {
    let column = |index: usize, name: &str| {
        record
            .get(index)
            .map(str::trim)
            .ok_or_else(|| format!("missing {} column", name))
    };

    let date_str = column(2, "date")?;
    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{}'", date_str))?;
    let amount_str = column(3, "amount")?;
    let amount = Decimal::from_str(amount_str)
        .map(Money::from_decimal)
        .map_err(|_| format!("invalid amount '{}'", amount_str))?;
    let account = column(4, "account")?;
    if account.is_empty() {
        return Err("empty account".to_string());
    }

    Ok(CsvRow {
        id: column(0, "id")?.to_string(),
        label: record.get(1).unwrap_or_default().to_string(),
        date,
        amount,
        account: account.to_string(),
    })
}

impl BankAdapter for CsvAdapter {
    fn name(&self) -> &'static str {
        "csv"
    }

    fn fetch_accounts(&self) -> BudgetResult<Vec<Account>> {
        let mut balances: BTreeMap<&str, Money> = BTreeMap::new();
        for row in &self.rows {
            *balances.entry(row.account.as_str()).or_default() += row.amount;
        }
        Ok(balances
            .into_iter()
            .map(|(id, amount)| Account::new(id, id, amount))
            .collect())
    }

    fn fetch_transactions(
        &self,
        account: &Account,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> BudgetResult<Vec<Transaction>> {
        Ok(self
            .rows
            .iter()
            .filter(|row| row.account == account.id)
            .filter(|row| start.map_or(true, |s| row.date >= s) && end.map_or(true, |e| row.date < e))
            .map(|row| {
                self.factory.make_transaction(
                    Some(&row.id),
                    &row.label,
                    row.date,
                    row.amount,
                    &row.account,
                )
            })
            .collect())
    }
}
