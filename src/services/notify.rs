//! Import notifications
//!
//! After new transactions come in, the safe-to-spend amount of the month is
//! compared with its value before the import.

use crate::config::Settings;
use crate::models::Budget;

/// Message to show after an import, if any
///
/// Crossing the `notify_remaining` threshold takes precedence over a drop
/// larger than `notify_delta`.
pub fn notification_message(previous: &Budget, current: &Budget, settings: &Settings) -> Option<String> {
    let before = previous.expected_remaining;
    let after = current.expected_remaining;

    if let Some(threshold) = settings.notify_remaining {
        if before > threshold && after <= threshold {
            return Some(format!(
                "BUDGET: /!\\ LOW SAFE TO SPEND: {}",
                settings.format_money(after)
            ));
        }
    }

    if let Some(delta) = settings.notify_delta {
        if before - after > delta {
            return Some(format!(
                "BUDGET: Remaining funds: {}",
                settings.format_money(after)
            ));
        }
    }

    None
}
