//! Display formatting for balances

use crate::validation::parse_decimal;
use financeflow_utils::format_number;
use rust_decimal::RoundingStrategy;

/// Fraction digits kept when displaying a balance
pub const BALANCE_FRACTION_DIGITS: u32 = 3;

/// Format a backend balance string for display.
///
/// Thousands are grouped with commas, at most three fraction digits are
/// shown and trailing zeros are dropped, so `"5000.50"` becomes `"5,000.5"`.
/// Text that is not a number is returned trimmed but otherwise untouched.
pub fn format_balance(raw: &str) -> String {
    let Some(value) = parse_decimal(raw) else {
        return raw.trim().to_string();
    };

    let rounded = value
        .round_dp_with_strategy(BALANCE_FRACTION_DIGITS, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
        .to_string();

    match rounded.split_once('.') {
        Some((whole, fraction)) => format!("{}.{}", format_number(whole), fraction),
        None => format_number(rounded),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_balance_groups_and_trims() {
        assert_eq!(format_balance("5000.50"), "5,000.5");
        assert_eq!(format_balance("1000"), "1,000");
        assert_eq!(format_balance("1234567.00"), "1,234,567");
        assert_eq!(format_balance("12.5"), "12.5");
        assert_eq!(format_balance("0"), "0");
    }

    #[test]
    fn test_format_balance_rounds_to_three_digits() {
        assert_eq!(format_balance("1.23456"), "1.235");
        assert_eq!(format_balance("0.0005"), "0.001");
        assert_eq!(format_balance("2.9999"), "3");
    }

    #[test]
    fn test_format_balance_negative_and_invalid() {
        assert_eq!(format_balance("-2500.75"), "-2,500.75");
        assert_eq!(format_balance(" n/a "), "n/a");
    }
}
