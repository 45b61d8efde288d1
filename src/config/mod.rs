//! Configuration module for budget-tracker
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - The settings file holding the budget plan

pub mod paths;
pub mod settings;

pub use paths::BudgetPaths;
pub use settings::Settings;
