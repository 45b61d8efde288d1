//! Formatting helpers shared by the terminal views

use crate::models::Money;

/// A bar of `width` cells filled to `pct` percent
pub fn format_bar(pct: u32, width: usize) -> String {
    let filled = (pct.min(100) as usize * width + 50) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Amount with an explicit sign and the currency symbol
pub fn format_signed(amount: Money, symbol: &str) -> String {
    if amount.is_negative() {
        amount.format_with_symbol(symbol)
    } else {
        format!("+{}", amount.format_with_symbol(symbol))
    }
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "-".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bar() {
        let bar = format_bar(50, 10);
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), 5);
        assert_eq!(bar.chars().count(), 10);
        assert_eq!(format_bar(250, 4), "████");
        assert_eq!(format_bar(0, 3), "░░░");
    }

    #[test]
    fn test_format_signed() {
        assert_eq!(format_signed(Money::from_cents(1050), "$"), "+$10.50");
        assert_eq!(format_signed(Money::from_cents(-1050), "$"), "-$10.50");
        assert_eq!(format_signed(Money::zero(), "€"), "+€0.00");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello World", 5), "He...");
        assert_eq!(truncate("Hi", 5), "Hi");
        assert_eq!(truncate("Café au lait", 7), "Café...");
    }
}
