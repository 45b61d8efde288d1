//! Display formatting for terminal output
//!
//! Every formatter returns a `String`; the CLI handlers decide where to
//! print it.

pub mod account;
pub mod budget;
pub mod category;
pub mod format;
pub mod goals;
pub mod transaction;

pub use account::format_account_list;
pub use budget::{format_budget_summary, format_monthly_budget, format_yearly_budgets};
pub use category::format_categories;
pub use goals::format_goals;
pub use transaction::{format_transaction_list, format_transaction_row};
