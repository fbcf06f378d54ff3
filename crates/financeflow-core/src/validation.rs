//! Validation rules for the three forms
//!
//! Every rule set is a pure function from field values to a complete
//! [`FieldErrors`] set. Rules never short-circuit across fields, so a form
//! submitted with several problems reports all of them at once.

use crate::types::Field;
use rust_decimal::Decimal;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Shortest accepted account id for new accounts
pub const ACCOUNT_ID_MIN_DIGITS: usize = 3;
/// Longest accepted account id for new accounts
pub const ACCOUNT_ID_MAX_DIGITS: usize = 12;

pub const MSG_ACCOUNT_ID_REQUIRED: &str = "Account ID is required";
pub const MSG_ACCOUNT_ID_TOO_SHORT: &str = "Account ID should be greater then or equal to 3 digit";
pub const MSG_ACCOUNT_ID_TOO_LONG: &str = "Account ID should be less then or equal to 12 digit";
pub const MSG_ACCOUNT_ID_TOO_LARGE: &str = "Account ID is too large";
pub const MSG_INITIAL_BALANCE_REQUIRED: &str = "Initial Balance is required";
pub const MSG_INITIAL_BALANCE_NOT_NUMBER: &str = "Initial Balance must be a number";
pub const MSG_INITIAL_BALANCE_NEGATIVE: &str = "Initial Balance cannot be negative";
pub const MSG_SOURCE_REQUIRED: &str = "Source AccountId is required.";
pub const MSG_DESTINATION_REQUIRED: &str = "Destination AccountId is required.";
pub const MSG_SAME_ACCOUNTS: &str = "Source and destination accounts must be different";
pub const MSG_AMOUNT_REQUIRED: &str = "Amount is required";
pub const MSG_AMOUNT_NOT_NUMBER: &str = "Amount must be a number";
pub const MSG_AMOUNT_NOT_POSITIVE: &str = "Amount must be greater than 0";
pub const MSG_LOOKUP_REQUIRED: &str = "Please enter Account ID";

/// Per-field validation messages of one form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the message for a field, replacing any earlier one
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Clear one field's message; other fields are untouched
    pub fn clear(&mut self, field: Field) -> bool {
        self.0.remove(&field).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

/// Parse a user-entered number
pub fn parse_decimal(value: &str) -> Option<Decimal> {
    Decimal::from_str(value.trim()).ok()
}

/// Sign of a user-entered number, `None` when it is not a number.
///
/// Numbers beyond the `Decimal` range are still classified, through a
/// floating-point parse restricted to finite values.
pub fn numeric_sign(value: &str) -> Option<Ordering> {
    match parse_decimal(value) {
        Some(number) => Some(number.cmp(&Decimal::ZERO)),
        None => value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|number| number.is_finite())
            .and_then(|number| number.partial_cmp(&0.0)),
    }
}

/// Rules for the create-account form
pub fn validate_new_account(account_id: &str, initial_balance: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if account_id.is_empty() {
        errors.insert(Field::AccountId, MSG_ACCOUNT_ID_REQUIRED);
    } else if account_id.len() < ACCOUNT_ID_MIN_DIGITS {
        errors.insert(Field::AccountId, MSG_ACCOUNT_ID_TOO_SHORT);
    } else if account_id.len() > ACCOUNT_ID_MAX_DIGITS {
        errors.insert(Field::AccountId, MSG_ACCOUNT_ID_TOO_LONG);
    }

    if initial_balance.trim().is_empty() {
        errors.insert(Field::InitialBalance, MSG_INITIAL_BALANCE_REQUIRED);
    } else {
        match numeric_sign(initial_balance) {
            None => errors.insert(Field::InitialBalance, MSG_INITIAL_BALANCE_NOT_NUMBER),
            Some(Ordering::Less) => errors.insert(Field::InitialBalance, MSG_INITIAL_BALANCE_NEGATIVE),
            Some(_) => {}
        }
    }

    errors
}

/// Rules for the transfer form
pub fn validate_transfer(source: &str, destination: &str, amount: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if source.is_empty() {
        errors.insert(Field::SourceAccountId, MSG_SOURCE_REQUIRED);
    } else if source.parse::<u64>().is_err() {
        errors.insert(Field::SourceAccountId, MSG_ACCOUNT_ID_TOO_LARGE);
    }

    if destination.is_empty() {
        errors.insert(Field::DestinationAccountId, MSG_DESTINATION_REQUIRED);
    } else if source == destination {
        errors.insert(Field::DestinationAccountId, MSG_SAME_ACCOUNTS);
    } else if destination.parse::<u64>().is_err() {
        errors.insert(Field::DestinationAccountId, MSG_ACCOUNT_ID_TOO_LARGE);
    }

    if amount.trim().is_empty() {
        errors.insert(Field::Amount, MSG_AMOUNT_REQUIRED);
    } else {
        match numeric_sign(amount) {
            None => errors.insert(Field::Amount, MSG_AMOUNT_NOT_NUMBER),
            Some(Ordering::Greater) => {}
            Some(_) => errors.insert(Field::Amount, MSG_AMOUNT_NOT_POSITIVE),
        }
    }

    errors
}

/// Rules for the account lookup form
pub fn validate_lookup(account_id: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if account_id.is_empty() {
        errors.insert(Field::AccountId, MSG_LOOKUP_REQUIRED);
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_id_length_bounds() {
        assert_eq!(validate_new_account("12", "10").get(Field::AccountId), Some(MSG_ACCOUNT_ID_TOO_SHORT));
        assert_eq!(validate_new_account("1234567890123", "10").get(Field::AccountId), Some(MSG_ACCOUNT_ID_TOO_LONG));
        assert!(validate_new_account("123", "10").is_empty());
        assert!(validate_new_account("123456789012", "10").is_empty());
    }

    #[test]
    fn test_initial_balance_rules() {
        assert_eq!(validate_new_account("123", "").get(Field::InitialBalance), Some(MSG_INITIAL_BALANCE_REQUIRED));
        assert_eq!(validate_new_account("123", "-0.01").get(Field::InitialBalance), Some(MSG_INITIAL_BALANCE_NEGATIVE));
        assert_eq!(validate_new_account("123", "ten").get(Field::InitialBalance), Some(MSG_INITIAL_BALANCE_NOT_NUMBER));
        assert!(validate_new_account("123", "0").is_empty());
        assert!(validate_new_account("123", "-0").is_empty());
        assert!(validate_new_account("123", "1000.25").is_empty());
    }

    #[test]
    fn test_new_account_reports_both_fields() {
        let errors = validate_new_account("", "");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get(Field::AccountId), Some(MSG_ACCOUNT_ID_REQUIRED));
        assert_eq!(errors.get(Field::InitialBalance), Some(MSG_INITIAL_BALANCE_REQUIRED));
    }

    #[test]
    fn test_transfer_all_empty_reports_three_errors() {
        let errors = validate_transfer("", "", "");
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get(Field::SourceAccountId), Some(MSG_SOURCE_REQUIRED));
        assert_eq!(errors.get(Field::DestinationAccountId), Some(MSG_DESTINATION_REQUIRED));
        assert_eq!(errors.get(Field::Amount), Some(MSG_AMOUNT_REQUIRED));
    }

    #[test]
    fn test_transfer_same_accounts_flags_destination_only() {
        let errors = validate_transfer("123", "123", "50");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::DestinationAccountId), Some(MSG_SAME_ACCOUNTS));
        assert_eq!(errors.get(Field::SourceAccountId), None);
    }

    #[test]
    fn test_transfer_amount_rules() {
        assert_eq!(validate_transfer("1", "2", "0").get(Field::Amount), Some(MSG_AMOUNT_NOT_POSITIVE));
        assert_eq!(validate_transfer("1", "2", "-5").get(Field::Amount), Some(MSG_AMOUNT_NOT_POSITIVE));
        assert_eq!(validate_transfer("1", "2", "abc").get(Field::Amount), Some(MSG_AMOUNT_NOT_NUMBER));
        assert!(validate_transfer("1", "2", "0.01").is_empty());
        assert!(validate_transfer("1", "2", "250000").is_empty());
    }

    #[test]
    fn test_numbers_beyond_decimal_range() {
        let huge = "100000000000000000000000000000";
        assert!(validate_transfer("1", "2", huge).is_empty());
        assert_eq!(
            validate_transfer("1", "2", &format!("-{}", huge)).get(Field::Amount),
            Some(MSG_AMOUNT_NOT_POSITIVE)
        );
        assert!(validate_new_account("123", huge).is_empty());
        assert_eq!(
            validate_new_account("123", &format!("-{}", huge)).get(Field::InitialBalance),
            Some(MSG_INITIAL_BALANCE_NEGATIVE)
        );
        assert_eq!(validate_transfer("1", "2", "inf").get(Field::Amount), Some(MSG_AMOUNT_NOT_NUMBER));
        assert_eq!(validate_transfer("1", "2", "NaN").get(Field::Amount), Some(MSG_AMOUNT_NOT_NUMBER));
    }

    #[test]
    fn test_transfer_rejects_ids_beyond_u64() {
        let huge = "99999999999999999999999";
        assert_eq!(validate_transfer(huge, "2", "1").get(Field::SourceAccountId), Some(MSG_ACCOUNT_ID_TOO_LARGE));
        assert_eq!(validate_transfer("1", huge, "1").get(Field::DestinationAccountId), Some(MSG_ACCOUNT_ID_TOO_LARGE));
    }

    #[test]
    fn test_lookup_requires_id() {
        assert_eq!(validate_lookup("").get(Field::AccountId), Some(MSG_LOOKUP_REQUIRED));
        assert!(validate_lookup("7").is_empty());
    }

    #[test]
    fn test_clear_single_field() {
        let mut errors = validate_transfer("", "", "");
        assert!(errors.clear(Field::Amount));
        assert!(!errors.clear(Field::Amount));
        assert_eq!(errors.len(), 2);
        assert!(errors.get(Field::SourceAccountId).is_some());
    }
}
