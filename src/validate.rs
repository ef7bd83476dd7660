//! Transfer form validation.
//!
//! Pure predicates over the raw amount text, the selected recipient and
//! the current balance. Invalid input is never an error value: it only
//! keeps the submit key inert and, for overdrafts, shows a label.

use crate::types::{User, Yen};

/// Longest amount the form will hold. Twelve digits is far above any
/// mock balance and well inside `u64`.
pub const MAX_AMOUNT_DIGITS: usize = 12;

/// Parse the amount field.
///
/// Accepts surrounding whitespace and ASCII digits only. Signs, decimal
/// points and values that overflow `u64` yield `None`.
pub fn parse_amount(text: &str) -> Option<Yen> {
    let trimmed = text.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse().ok()
}

/// Whether `amount` is transferable from `balance`.
pub fn is_valid_amount(amount: Yen, balance: Yen) -> bool {
    amount > 0 && amount <= balance
}

/// Whether the transfer form may raise its "next" intent.
pub fn can_submit(amount_text: &str, recipient: Option<&User>, balance: Yen) -> bool {
    let valid_amount = parse_amount(amount_text).is_some_and(|a| is_valid_amount(a, balance));
    valid_amount && recipient.is_some()
}

/// Whether the entered amount is a number larger than the balance.
pub fn exceeds_balance(amount_text: &str, balance: Yen) -> bool {
    parse_amount(amount_text).is_some_and(|a| a > balance)
}

// ============================================================================
// TESTS
// ============================================================================
