//! Budget service
//!
//! The monthly budgetizer turns a month of transactions into a [`Budget`]
//! against the configured plan; [`BudgetService`] loads transactions from
//! storage and runs the engine with the settings.

use std::collections::{BTreeMap, HashMap};

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::adapters::BankAdapter;
use crate::config::settings::Settings;
use crate::error::BudgetResult;
use crate::models::{
    Account, ActiveWindow, Budget, BudgetGoal, BudgetList, ComputedBudgetGoal, ComputedCategory,
    IncomeSource, Money, Month, PlannedExpense, Transaction, TransactionUpdate,
};
use crate::storage::Storage;

use super::category::compute_categories;
use super::filters::{
    extract_inter_account_transactions, extract_transactions_by_label, filter_transactions_period,
    period_to_months, split_income_expenses,
};
use super::goals::compute_budget_goals;

/// What the user expects to earn, spend and save
#[derive(Debug, Clone, Default)]
pub struct BudgetPlan {
    pub income_sources: Vec<IncomeSource>,
    pub planned_expenses: Vec<PlannedExpense>,
    pub budget_goals: Vec<BudgetGoal>,
    /// Days income is shifted by (paychecks arriving after month end)
    pub income_delay: u32,
}

/// Compute the budget of the month containing `date`
pub fn budgetize_month(transactions: &[Transaction], date: NaiveDate, plan: &BudgetPlan) -> Budget {
    let month = Month::of(date);
    let start = month.start_date();
    let end = month.end_date();

    let (transactions, income_transactions, expenses_transactions) = if plan.income_delay > 0 {
        let delay = Duration::days(i64::from(plan.income_delay));
        let shifted = filter_transactions_period(transactions, Some(start + delay), Some(end + delay));
        let (income, _) = split_income_expenses(&shifted);
        let current = filter_transactions_period(transactions, Some(start), Some(end));
        let (_, expenses) = split_income_expenses(&current);

        let mut all: Vec<Transaction> = income.iter().chain(expenses.iter()).cloned().collect();
        all.sort_by(|a, b| b.date.cmp(&a.date));
        (all, income, expenses)
    } else {
        let current = filter_transactions_period(transactions, Some(start), Some(end));
        let (income, expenses) = split_income_expenses(&current);
        (current, income, expenses)
    };

    let expected_income: Money = plan
        .income_sources
        .iter()
        .filter(|src| src.is_active(start, end))
        .map(|src| src.amount)
        .sum();

    let active_expenses: Vec<&PlannedExpense> = plan
        .planned_expenses
        .iter()
        .filter(|exp| exp.is_active(start, end))
        .collect();
    let expected_planned_expenses: Money =
        active_expenses.iter().map(|exp| exp.amount_per_month()).sum();
    let (planned_expenses_transactions, expenses_transactions) = extract_transactions_by_label(
        &expenses_transactions,
        active_expenses.iter().filter_map(|exp| exp.match_pattern.as_ref()),
    );

    let savings_goal: Money = plan
        .budget_goals
        .iter()
        .filter(|goal| goal.is_active(start, end))
        .map(BudgetGoal::savings_per_month)
        .sum();

    let real_balance: Money = transactions.iter().map(|tx| tx.amount).sum();
    let income: Money = income_transactions.iter().map(|tx| tx.amount).sum();
    let expenses = expenses_transactions
        .iter()
        .map(|tx| tx.amount)
        .sum::<Money>()
        .abs();
    let planned_expenses = planned_expenses_transactions
        .iter()
        .map(|tx| tx.amount)
        .sum::<Money>()
        .abs();
    let savings = income - expected_planned_expenses - expenses;
    let balance = savings - savings_goal;

    let best_income = income.max(expected_income);
    let expected_real_balance = best_income - planned_expenses - expenses;
    let expected_savings = best_income - expected_planned_expenses - expenses;
    let expected_balance = expected_savings - savings_goal;
    let expected_remaining = expected_balance.non_negative();

    debug!(
        %month,
        transactions = transactions.len(),
        planned = planned_expenses_transactions.len(),
        "budgetized month"
    );

    Budget {
        month: start,
        transactions,
        income_transactions,
        planned_expenses_transactions,
        expenses_transactions,
        income: income.rounded(),
        planned_expenses: planned_expenses.rounded(),
        expenses: expenses.rounded(),
        real_balance: real_balance.rounded(),
        savings: savings.rounded(),
        savings_goal: savings_goal.rounded(),
        balance: balance.rounded(),
        expected_income: expected_income.rounded(),
        expected_planned_expenses: expected_planned_expenses.rounded(),
        expected_real_balance: expected_real_balance.rounded(),
        expected_savings: expected_savings.rounded(),
        expected_balance: expected_balance.rounded(),
        expected_remaining: expected_remaining.rounded(),
    }
}

/// Compute the budgets of every month covering `[start, end)`
pub fn budgetize(
    transactions: &[Transaction],
    start: NaiveDate,
    end: NaiveDate,
    plan: &BudgetPlan,
    current_month: Month,
) -> BudgetList {
    let budgets = period_to_months(start, end)
        .into_iter()
        .map(|date| budgetize_month(transactions, date, plan))
        .collect();
    BudgetList::new(budgets, current_month)
}

/// Result of an import
#[derive(Debug, Clone, Default)]
pub struct ImportSummary {
    pub accounts: usize,
    pub transactions: usize,
    /// Months whose file was written
    pub months: Vec<Month>,
}

/// Service for budget computations backed by storage
pub struct BudgetService<'a> {
    storage: &'a dyn Storage,
    settings: &'a Settings,
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(storage: &'a dyn Storage, settings: &'a Settings) -> Self {
        Self { storage, settings }
    }

    /// Budgetize with the configured plan, dropping paired inter-account transfers
    pub fn budgetize_from_settings(
        &self,
        transactions: &[Transaction],
        start: NaiveDate,
        end: NaiveDate,
        current_month: Month,
    ) -> BudgetList {
        let remaining;
        let transactions = match (
            &self.settings.inter_account_labels_out,
            &self.settings.inter_account_labels_in,
        ) {
            (Some(labels_out), Some(labels_in)) => {
                let (inter_account, rest) =
                    extract_inter_account_transactions(transactions, labels_out, labels_in);
                debug!(count = inter_account.len(), "ignoring inter-account transfers");
                remaining = rest;
                remaining.as_slice()
            }
            _ => transactions,
        };

        budgetize(transactions, start, end, &self.settings.plan(), current_month)
    }

    /// Budget of the month containing `date`
    pub fn monthly_budget(&self, date: NaiveDate) -> BudgetResult<Budget> {
        let month = Month::of(date);
        let mut transactions = self.storage.load_monthly_transactions(month.start_date())?;
        if self.settings.income_delay > 0 {
            transactions.extend(self.storage.load_monthly_transactions(month.end_date())?);
        }

        let list = self.budgetize_from_settings(
            &transactions,
            month.start_date(),
            month.end_date(),
            month,
        );
        Ok(list
            .into_budgets()
            .into_iter()
            .next()
            .unwrap_or_else(|| budgetize_month(&[], month.start_date(), &self.settings.plan())))
    }

    /// Budgets of the year containing `date`
    ///
    /// Unless `include_future_months` is set, a year that is not in the future
    /// stops after `current_month`.
    pub fn yearly_budgets(
        &self,
        date: NaiveDate,
        current_month: Month,
        include_future_months: bool,
    ) -> BudgetResult<BudgetList> {
        let first = Month::of(date).first_of_year();
        let start = first.start_date();
        let mut end = Month::new(first.year() + 1, 1)?.start_date();
        if !include_future_months && first.year() <= current_month.year() {
            end = end.min(current_month.end_date());
        }

        let mut transactions = self.storage.load_period_transactions(start, end)?;
        if self.settings.income_delay > 0 {
            transactions.extend(self.storage.load_monthly_transactions(end)?);
        }

        Ok(self.budgetize_from_settings(&transactions, start, end, current_month))
    }

    /// Goal allocation over the year containing `date`
    pub fn budget_goals(
        &self,
        date: NaiveDate,
        current_month: Month,
    ) -> BudgetResult<(Vec<ComputedBudgetGoal>, Money)> {
        let budgets = self.yearly_budgets(date, current_month, false)?;
        Ok(compute_budget_goals(&budgets, &self.settings.budget_goals))
    }

    /// Category breakdown over `[start, end)`
    pub fn categories(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        warning_threshold_multiplier: Decimal,
    ) -> BudgetResult<Vec<ComputedCategory>> {
        let transactions = self.storage.load_period_transactions(start, end)?;
        Ok(compute_categories(
            &transactions,
            &self.settings.categories,
            Some(start),
            Some(end),
            warning_threshold_multiplier,
        ))
    }

    /// Fetch accounts and transactions from a bank adapter into storage
    ///
    /// Categories and goal already assigned to a stored transaction survive
    /// a re-import of the same transaction id. Stored transactions that the
    /// adapter does not return are kept.
    pub fn import_from_adapter(
        &self,
        adapter: &dyn BankAdapter,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> BudgetResult<ImportSummary> {
        let fetched_accounts = adapter.fetch_accounts()?;
        let fetched = adapter.fetch_transactions_from_all_accounts(start, end)?;

        let mut by_month: BTreeMap<Month, Vec<Transaction>> = BTreeMap::new();
        for tx in &fetched {
            by_month.entry(Month::of(tx.date)).or_default().push(tx.clone());
        }

        let mut summary = ImportSummary {
            accounts: fetched_accounts.len(),
            transactions: fetched.len(),
            months: Vec::with_capacity(by_month.len()),
        };

        for (month, incoming) in by_month {
            let existing = self.storage.load_monthly_transactions(month.start_date())?;
            let merged = merge_transactions(existing, incoming);
            self.storage
                .save_monthly_transactions(month.start_date(), &merged)?;
            summary.months.push(month);
        }

        let accounts = merge_accounts(self.storage.load_accounts()?, fetched_accounts);
        self.storage.save_accounts(&accounts)?;

        info!(
            accounts = summary.accounts,
            transactions = summary.transactions,
            months = summary.months.len(),
            "import complete"
        );
        Ok(summary)
    }
}

fn merge_transactions(existing: Vec<Transaction>, incoming: Vec<Transaction>) -> Vec<Transaction> {
    let mut stored: HashMap<String, Transaction> = existing
        .into_iter()
        .map(|tx| (tx.id.clone(), tx))
        .collect();

    let mut merged: Vec<Transaction> = incoming
        .into_iter()
        .map(|tx| match stored.remove(&tx.id) {
            Some(previous) => tx.update(TransactionUpdate {
                categories: (!previous.categories.is_empty()).then_some(previous.categories),
                goal: previous.goal.map(Some),
            }),
            None => tx,
        })
        .collect();
    merged.extend(stored.into_values());
    merged.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
    merged
}

fn merge_accounts(existing: Vec<Account>, fetched: Vec<Account>) -> Vec<Account> {
    let mut accounts: BTreeMap<String, Account> = existing
        .into_iter()
        .map(|account| (account.id.clone(), account))
        .collect();
    for account in fetched {
        accounts.insert(account.id.clone(), account);
    }
    accounts.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LabelPattern, Recurrence};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn money(amount: Decimal) -> Money {
        Money::from_decimal(amount)
    }

    fn tx(id: &str, label: &str, day: NaiveDate, amount: Decimal) -> Transaction {
        Transaction::new(id, label, day, money(amount), "checking")
    }

    fn plan() -> BudgetPlan {
        BudgetPlan {
            income_sources: vec![IncomeSource::new("salary", money(dec!(2000)))],
            planned_expenses: vec![
                PlannedExpense::new("rent", money(dec!(800)), Recurrence::Monthly)
                    .with_match(LabelPattern::new("RENT").unwrap()),
                PlannedExpense::new("insurance", money(dec!(600)), Recurrence::Yearly),
            ],
            budget_goals: vec![BudgetGoal::new("car", money(dec!(1200)))],
            income_delay: 0,
        }
    }

    fn march() -> Vec<Transaction> {
        vec![
            tx("1", "SALARY ACME", date(2025, 3, 1), dec!(1900)),
            tx("2", "RENT MARCH", date(2025, 3, 3), dec!(-800)),
            tx("3", "CB GROCERIES", date(2025, 3, 10), dec!(-150.25)),
            tx("4", "CB BAKERY", date(2025, 3, 12), dec!(-4.75)),
            tx("5", "RENT APRIL", date(2025, 4, 2), dec!(-800)),
        ]
    }

    #[test]
    fn test_budgetize_month_rent_example() {
        let budget = budgetize_month(&march(), date(2025, 3, 18), &plan());

        assert_eq!(budget.month, date(2025, 3, 1));
        assert_eq!(budget.transactions.len(), 4);
        assert_eq!(budget.planned_expenses_transactions.len(), 1);
        assert_eq!(budget.planned_expenses_transactions[0].id, "2");
        assert_eq!(budget.expenses_transactions.len(), 2);

        assert_eq!(budget.income, money(dec!(1900)));
        assert_eq!(budget.planned_expenses, money(dec!(800)));
        assert_eq!(budget.expenses, money(dec!(155)));
        assert_eq!(budget.real_balance, money(dec!(945)));

        // 800 rent + 50 insurance per month
        assert_eq!(budget.expected_planned_expenses, money(dec!(850)));
        assert_eq!(budget.savings, money(dec!(895)));
        assert_eq!(budget.savings_goal, money(dec!(100)));
        assert_eq!(budget.balance, money(dec!(795)));

        assert_eq!(budget.expected_income, money(dec!(2000)));
        assert_eq!(budget.expected_real_balance, money(dec!(1045)));
        assert_eq!(budget.expected_savings, money(dec!(995)));
        assert_eq!(budget.expected_balance, money(dec!(895)));
        assert_eq!(budget.expected_remaining, money(dec!(895)));
    }

    #[test]
    fn test_partition_invariant() {
        let budget = budgetize_month(&march(), date(2025, 3, 1), &plan());
        let mut parts: Vec<&str> = budget
            .income_transactions
            .iter()
            .chain(&budget.planned_expenses_transactions)
            .chain(&budget.expenses_transactions)
            .map(|t| t.id.as_str())
            .collect();
        parts.sort_unstable();
        let mut all: Vec<&str> = budget.transactions.iter().map(|t| t.id.as_str()).collect();
        all.sort_unstable();
        assert_eq!(parts, all);
    }

    #[test]
    fn test_budgetize_month_is_idempotent() {
        let first = budgetize_month(&march(), date(2025, 3, 1), &plan());
        let second = budgetize_month(&march(), date(2025, 3, 31), &plan());
        assert_eq!(first, second);
    }

    #[test]
    fn test_remaining_clipped_at_zero() {
        let txs = vec![tx("1", "CB TV", date(2025, 3, 5), dec!(-3000))];
        let budget = budgetize_month(&txs, date(2025, 3, 1), &plan());
        assert!(budget.expected_balance.is_negative());
        assert_eq!(budget.expected_remaining, Money::zero());
    }

    #[test]
    fn test_inactive_items_are_ignored() {
        let mut plan = plan();
        plan.income_sources = vec![IncomeSource::new("old job", money(dec!(1500)))
            .with_window(None, Some(date(2025, 3, 1)))];
        plan.budget_goals = vec![BudgetGoal::new("car", money(dec!(1200)))
            .with_window(Some(date(2025, 4, 1)), None)];

        let budget = budgetize_month(&[], date(2025, 3, 1), &plan);
        assert_eq!(budget.expected_income, Money::zero());
        assert_eq!(budget.savings_goal, Money::zero());
    }

    #[test]
    fn test_income_delay_shifts_income_window() {
        let txs = vec![
            tx("1", "SALARY FEB", date(2025, 3, 2), dec!(2000)),
            tx("2", "SALARY MAR", date(2025, 4, 1), dec!(2100)),
            tx("3", "CB GROCERIES", date(2025, 3, 10), dec!(-100)),
            tx("4", "CB GROCERIES", date(2025, 4, 2), dec!(-50)),
        ];
        let plan = BudgetPlan {
            income_delay: 5,
            ..BudgetPlan::default()
        };

        let budget = budgetize_month(&txs, date(2025, 3, 1), &plan);
        assert_eq!(budget.income, money(dec!(2100)));
        assert_eq!(budget.expenses, money(dec!(100)));
        let ids: Vec<&str> = budget.transactions.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3"]);
    }

    #[test]
    fn test_budgetize_period() {
        let list = budgetize(
            &march(),
            date(2025, 1, 1),
            date(2025, 5, 1),
            &plan(),
            Month::new(2025, 3).unwrap(),
        );
        assert_eq!(list.len(), 4);
        assert_eq!(list.budgets()[0].month, date(2025, 1, 1));
        assert_eq!(list.get(Month::new(2025, 4).unwrap()).unwrap().transactions.len(), 1);
    }

    #[test]
    fn test_merge_keeps_user_edits() {
        let stored = vec![tx("1", "CB SHOP", date(2025, 3, 2), dec!(-10))
            .with_categories(["Groceries"])
            .with_goal(Some("car".into()))];
        let incoming = vec![
            tx("1", "CB SHOP", date(2025, 3, 2), dec!(-10)).with_categories(["Auto"]),
            tx("2", "CB SHOP", date(2025, 3, 3), dec!(-5)).with_categories(["Auto"]),
        ];

        let merged = merge_transactions(stored, incoming);
        assert_eq!(merged.len(), 2);
        let first = merged.iter().find(|t| t.id == "1").unwrap();
        assert!(first.categories.contains("Groceries"));
        assert_eq!(first.goal.as_deref(), Some("car"));
        let second = merged.iter().find(|t| t.id == "2").unwrap();
        assert!(second.categories.contains("Auto"));
    }
}
