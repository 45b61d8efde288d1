//! Category breakdown display formatting

use super::format::{format_bar, separator, truncate};
use crate::models::ComputedCategory;

/// Format spending per category, flagging categories over their threshold
pub fn format_categories(categories: &[ComputedCategory], symbol: &str) -> String {
    if categories.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let name_width = categories
        .iter()
        .map(|c| c.display_name().chars().count())
        .max()
        .unwrap_or(8)
        .clamp(8, 30);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:>12}  {:>4}\n",
        "Category",
        "Spent",
        "%",
        name_width = name_width
    ));
    output.push_str(&format!("{}\n", separator(name_width + 42)));

    for category in categories {
        let mut line = format!(
            "{:<name_width$}  {:>12}  {:>3}%  {}",
            truncate(category.display_name(), name_width),
            category.amount.format_with_symbol(symbol),
            category.pct,
            format_bar(category.pct, 20),
            name_width = name_width
        );
        if category.has_warning() {
            if let Some(threshold) = category.warning_threshold {
                line.push_str(&format!(" /!\\ over {}", threshold.format_with_symbol(symbol)));
            }
        }
        output.push_str(line.trim_end());
        output.push('\n');
    }

    output
}
