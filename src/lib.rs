//! Budget Tracker - monthly budgets and savings goals from bank transactions
//!
//! Transactions fetched from a bank adapter are stored per month. For each
//! month the budgetizer compares real income and expenses with the expected
//! income sources and planned expenses, and the goal engine allocates what
//! was saved over the year to savings goals.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, budgets, goals, categories, etc.)
//! - `registry`: Named constructors for storage backends and bank adapters
//! - `storage`: Monthly transaction storage (JSON and CSV)
//! - `adapters`: Bank adapters feeding transactions into storage
//! - `services`: Budget computation and goal allocation
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use budget_tracker::models::Month;
//! use budget_tracker::services::{budgetize, BudgetPlan};
//!
//! let budgets = budgetize(&transactions, start, end, &BudgetPlan::default(), Month::current());
//! println!("{}", budgets.savings());
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod registry;
pub mod services;
pub mod storage;

pub use error::{BudgetError, BudgetResult};
