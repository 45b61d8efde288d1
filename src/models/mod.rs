//! Core data models for budget-tracker
//!
//! This module contains the data structures of the budgeting domain:
//! transactions, accounts, the budget plan (income sources, planned
//! expenses, goals, categories) and the computed budgets.

pub mod account;
pub mod budget;
pub mod category;
pub mod goal;
pub mod income;
pub mod money;
pub mod pattern;
pub mod period;
pub mod planned_expense;
pub mod transaction;

pub use account::{total_balance, Account};
pub use budget::{Budget, BudgetField, BudgetList};
pub use category::{Category, ComputedCategory};
pub use goal::{BudgetGoal, ComputedBudgetGoal};
pub use income::IncomeSource;
pub use money::Money;
pub use pattern::LabelPattern;
pub use period::{ActiveWindow, Month};
pub use planned_expense::{PlannedExpense, Recurrence};
pub use transaction::{Transaction, TransactionUpdate};
