//! Budget models
//!
//! A [`Budget`] is the computed picture of one calendar month; a
//! [`BudgetList`] chains the months of a period and sums them.

use chrono::NaiveDate;
use serde::Serialize;

use super::money::Money;
use super::period::Month;
use super::transaction::Transaction;

/// The budget of one calendar month
///
/// Amounts are rounded to cents. Expenses are reported as positive amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Budget {
    /// First day of the month
    pub month: NaiveDate,

    /// Every transaction considered for the month
    pub transactions: Vec<Transaction>,
    pub income_transactions: Vec<Transaction>,
    pub planned_expenses_transactions: Vec<Transaction>,
    /// Expenses not matched by a planned expense
    pub expenses_transactions: Vec<Transaction>,

    pub income: Money,
    pub planned_expenses: Money,
    pub expenses: Money,
    pub real_balance: Money,
    /// `income - expected_planned_expenses - expenses`
    pub savings: Money,
    pub savings_goal: Money,
    /// `savings - savings_goal`
    pub balance: Money,

    pub expected_income: Money,
    pub expected_planned_expenses: Money,
    pub expected_real_balance: Money,
    pub expected_savings: Money,
    pub expected_balance: Money,
    /// What can still be spent this month: `max(expected_balance, 0)`
    pub expected_remaining: Money,
}

impl Budget {
    pub fn period(&self) -> Month {
        Month::of(self.month)
    }
}

/// Numeric budget fields that can be summed over a [`BudgetList`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetField {
    Income,
    PlannedExpenses,
    Expenses,
    RealBalance,
    Savings,
    SavingsGoal,
    Balance,
    Remaining,
}

impl BudgetField {
    /// The observed value
    pub fn real(&self, budget: &Budget) -> Money {
        match self {
            Self::Income => budget.income,
            Self::PlannedExpenses => budget.planned_expenses,
            Self::Expenses => budget.expenses,
            Self::RealBalance => budget.real_balance,
            Self::Savings => budget.savings,
            Self::SavingsGoal => budget.savings_goal,
            Self::Balance => budget.balance,
            Self::Remaining => budget.balance.non_negative(),
        }
    }

    /// The expected counterpart, if the field has one
    pub fn expected(&self, budget: &Budget) -> Option<Money> {
        match self {
            Self::Income => Some(budget.expected_income),
            Self::PlannedExpenses => Some(budget.expected_planned_expenses),
            Self::RealBalance => Some(budget.expected_real_balance),
            Self::Savings => Some(budget.expected_savings),
            Self::Balance => Some(budget.expected_balance),
            Self::Remaining => Some(budget.expected_remaining),
            Self::Expenses | Self::SavingsGoal => None,
        }
    }
}

/// Consecutive monthly budgets, computed as of `current_month`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetList {
    budgets: Vec<Budget>,
    current_month: Month,
}

impl BudgetList {
    /// Wrap budgets; they are kept in chronological order
    pub fn new(mut budgets: Vec<Budget>, current_month: Month) -> Self {
        budgets.sort_by_key(|b| b.month);
        Self {
            budgets,
            current_month,
        }
    }

    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    pub fn into_budgets(self) -> Vec<Budget> {
        self.budgets
    }

    pub fn current_month(&self) -> Month {
        self.current_month
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Budget> {
        self.budgets.iter()
    }

    pub fn len(&self) -> usize {
        self.budgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.budgets.is_empty()
    }

    /// Budget of a given month
    pub fn get(&self, month: Month) -> Option<&Budget> {
        self.budgets.iter().find(|b| b.period() == month)
    }

    /// Value a month contributes to a hybrid total
    ///
    /// Past months count what happened; the running month counts what is
    /// expected since it is not over yet; later months count nothing.
    pub fn month_value(&self, budget: &Budget, field: BudgetField) -> Money {
        let month = budget.period();
        if month > self.current_month {
            Money::zero()
        } else if month == self.current_month {
            field.expected(budget).unwrap_or_else(|| field.real(budget))
        } else {
            field.real(budget)
        }
    }

    /// Hybrid real/expected sum of a field
    pub fn total(&self, field: BudgetField) -> Money {
        self.budgets
            .iter()
            .map(|b| self.month_value(b, field))
            .sum()
    }

    /// Sum of the expected counterpart of a field for every month
    pub fn expected_total(&self, field: BudgetField) -> Money {
        self.budgets
            .iter()
            .map(|b| field.expected(b).unwrap_or_else(|| field.real(b)))
            .sum()
    }

    pub fn income(&self) -> Money {
        self.total(BudgetField::Income)
    }

    pub fn planned_expenses(&self) -> Money {
        self.total(BudgetField::PlannedExpenses)
    }

    pub fn expenses(&self) -> Money {
        self.total(BudgetField::Expenses)
    }

    pub fn real_balance(&self) -> Money {
        self.total(BudgetField::RealBalance)
    }

    pub fn savings(&self) -> Money {
        self.total(BudgetField::Savings)
    }

    pub fn savings_goal(&self) -> Money {
        self.total(BudgetField::SavingsGoal)
    }

    pub fn balance(&self) -> Money {
        self.total(BudgetField::Balance)
    }

    pub fn expected_income(&self) -> Money {
        self.expected_total(BudgetField::Income)
    }

    pub fn expected_planned_expenses(&self) -> Money {
        self.expected_total(BudgetField::PlannedExpenses)
    }

    pub fn expected_savings(&self) -> Money {
        self.expected_total(BudgetField::Savings)
    }

    pub fn expected_balance(&self) -> Money {
        self.expected_total(BudgetField::Balance)
    }
}

impl<'a> IntoIterator for &'a BudgetList {
    type Item = &'a Budget;
    type IntoIter = std::slice::Iter<'a, Budget>;

    fn into_iter(self) -> Self::IntoIter {
        self.budgets.iter()
    }
}
