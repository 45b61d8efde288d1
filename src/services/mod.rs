//! Service layer for budget-tracker
//!
//! The pure engine (filters, categories, budgetizer, goal allocation) plus
//! the storage-backed [`BudgetService`] and import notifications.

pub mod budget;
pub mod category;
pub mod filters;
pub mod goals;
pub mod notify;

pub use budget::{budgetize, budgetize_month, BudgetPlan, BudgetService, ImportSummary};
pub use category::{compute_categories, match_categories, CategoryMatcher};
pub use filters::{
    extract_inter_account_transactions, extract_transactions_by_label, filter_transactions_period,
    period_to_months, split_income_expenses,
};
pub use goals::compute_budget_goals;
pub use notify::notification_message;
