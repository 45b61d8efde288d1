//! User settings for budget-tracker
//!
//! The settings file holds the budget plan (income sources, planned
//! expenses, goals, categories) along with the storage and bank adapter
//! selection and the notification thresholds. Both JSON and YAML are read.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::paths::BudgetPaths;
use crate::error::BudgetError;
use crate::models::{BudgetGoal, Category, IncomeSource, LabelPattern, Money, PlannedExpense};
use crate::services::budget::BudgetPlan;

/// User settings for budget-tracker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Storage backend name (see the storage registry)
    #[serde(default = "default_storage")]
    pub storage: String,

    /// Directory of the monthly files, relative to the base directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_dir: Option<PathBuf>,

    /// Bank adapter name (see the adapter registry)
    #[serde(default = "default_bank_adapter")]
    pub bank_adapter: String,

    #[serde(default)]
    pub income_sources: Vec<IncomeSource>,

    #[serde(default, alias = "recurring_expenses")]
    pub planned_expenses: Vec<PlannedExpense>,

    #[serde(default, alias = "savings_goals")]
    pub budget_goals: Vec<BudgetGoal>,

    #[serde(default)]
    pub categories: Vec<Category>,

    /// Days after the end of a month during which its income still arrives
    #[serde(default)]
    pub income_delay: u32,

    /// Label of an outgoing transfer to another owned account, with an `id` group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inter_account_labels_out: Option<LabelPattern>,

    /// Label of an incoming transfer from another owned account, with an `id` group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inter_account_labels_in: Option<LabelPattern>,

    /// Warn when the safe-to-spend amount falls to this level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notify_remaining: Option<Money>,

    /// Report when the safe-to-spend amount drops by more than this
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notify_delta: Option<Money>,

    /// Default currency symbol
    #[serde(default = "default_currency")]
    pub currency_symbol: String,
}

fn default_storage() -> String {
    "json".to_string()
}

fn default_bank_adapter() -> String {
    "csv".to_string()
}

fn default_currency() -> String {
    "$".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage: default_storage(),
            storage_dir: None,
            bank_adapter: default_bank_adapter(),
            income_sources: Vec::new(),
            planned_expenses: Vec::new(),
            budget_goals: Vec::new(),
            categories: Vec::new(),
            income_delay: 0,
            inter_account_labels_out: None,
            inter_account_labels_in: None,
            notify_remaining: None,
            notify_delta: None,
            currency_symbol: default_currency(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or use defaults if no settings file exists
    pub fn load_or_default(paths: &BudgetPaths) -> Result<Self, BudgetError> {
        let settings_path = paths.settings_file();
        if settings_path.exists() {
            Self::load_file(&settings_path)
        } else {
            Ok(Settings::default())
        }
    }

    /// Load settings from a JSON or YAML file (chosen by extension)
    pub fn load_file(path: &Path) -> Result<Self, BudgetError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| BudgetError::Io(format!("Failed to read settings file: {}", e)))?;

        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

        if is_yaml {
            Self::from_yaml(&contents)
        } else {
            Self::from_json(&contents)
        }
    }

    pub fn from_json(contents: &str) -> Result<Self, BudgetError> {
        serde_json::from_str(contents)
            .map_err(|e| BudgetError::Config(format!("Failed to parse settings file: {}", e)))
    }

    pub fn from_yaml(contents: &str) -> Result<Self, BudgetError> {
        serde_yaml::from_str(contents)
            .map_err(|e| BudgetError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk as JSON
    pub fn save(&self, paths: &BudgetPaths) -> Result<(), BudgetError> {
        paths.ensure_directories()?;

        let settings_path = paths.base_dir().join("config.json");
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| BudgetError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(&settings_path, contents)
            .map_err(|e| BudgetError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// The budget plan handed to the budgetizer
    pub fn plan(&self) -> BudgetPlan {
        BudgetPlan {
            income_sources: self.income_sources.clone(),
            planned_expenses: self.planned_expenses.clone(),
            budget_goals: self.budget_goals.clone(),
            income_delay: self.income_delay,
        }
    }

    /// Format an amount with the configured currency symbol
    pub fn format_money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }
}
