//! Savings goal display formatting

use super::format::{format_bar, separator, truncate};
use crate::models::{ComputedBudgetGoal, Money};

/// Format the goal progress table followed by the unallocated savings
pub fn format_goals(goals: &[ComputedBudgetGoal], savings_after: Money, symbol: &str) -> String {
    if goals.is_empty() {
        return "No savings goals found.\n".to_string();
    }

    let name_width = goals
        .iter()
        .map(|g| g.label.chars().count())
        .max()
        .unwrap_or(4)
        .clamp(4, 24);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:>12}  {:>12}  {:>12}  {:>5}  {}\n",
        "Goal",
        "Target",
        "Saved",
        "Used",
        "%",
        "Progress",
        name_width = name_width
    ));
    output.push_str(&format!("{}\n", separator(name_width + 64)));

    for goal in goals {
        let (target, pct, bar) = if goal.target.is_zero() {
            ("-".to_string(), "-".to_string(), String::new())
        } else {
            let mut bar = format_bar(goal.completed_pct(), 20);
            if goal.is_completed() {
                bar.push_str(" done");
            }
            (
                goal.target.format_with_symbol(symbol),
                format!("{}%", goal.completed_pct()),
                bar,
            )
        };
        output.push_str(&format!(
            "{:<name_width$}  {:>12}  {:>12}  {:>12}  {:>5}  {}\n",
            truncate(&goal.label, name_width),
            target,
            goal.saved.format_with_symbol(symbol),
            goal.used.format_with_symbol(symbol),
            pct,
            bar,
            name_width = name_width
        ));
    }

    output.push_str(&format!("{}\n", separator(name_width + 64)));
    output.push_str(&format!(
        "Savings after goals: {}\n",
        savings_after.format_with_symbol(symbol)
    ));
    output
}
