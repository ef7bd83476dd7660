//! Text formatting for amounts, receipts and the recipient directory.
//!
//! Pure functions: data in, String out. No I/O.

use serde::Serialize;

use crate::error::Result;
use crate::types::{OutputFormat, Transaction, TransactionKind, User, Yen};

/// Format whole yen with thousands separators: `¥10,000`.
pub fn format_yen(amount: Yen) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    out.push('¥');
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Signed display for a history row: `- ¥3,000` or `+ ¥3,000`.
pub fn format_signed(amount: Yen, kind: TransactionKind) -> String {
    let sign = match kind {
        TransactionKind::Debit => '-',
        TransactionKind::Credit => '+',
    };
    format!("{} {}", sign, format_yen(amount))
}

/// Format a confirmed transfer.
pub fn format_receipt(txn: &Transaction, balance_after: Yen, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Human => Ok(receipt_human(txn, balance_after)),
        OutputFormat::Json => to_json(&Receipt {
            transaction: txn,
            balance_after,
        }),
    }
}

/// Format the recipient directory.
pub fn format_recipients(users: &[User], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Human => Ok(recipients_human(users)),
        OutputFormat::Json => to_json(&users),
    }
}

// ============================================================================
// HUMAN FORMAT
// ============================================================================

fn receipt_human(txn: &Transaction, balance_after: Yen) -> String {
    let mut out = String::new();
    out.push_str("=== Transfer Complete ===\n");
    out.push_str(&format!(
        "Sent {} to {} ({})\n",
        format_yen(txn.amount),
        txn.recipient.name,
        txn.recipient.id
    ));
    out.push_str(&format!("Date:          {}\n", txn.date.to_rfc3339()));
    out.push_str(&format!("Reference:     {}\n", txn.id));
    out.push_str(&format!("Balance after: {}\n", format_yen(balance_after)));
    out
}

fn recipients_human(users: &[User]) -> String {
    let mut out = String::new();
    out.push_str("=== Recipients ===\n");
    for user in users {
        out.push_str(&format!("  [{}] {}  {}\n", user.id, user.initials, user.name));
    }
    out
}

// ============================================================================
// JSON FORMAT
// ============================================================================

#[derive(Serialize)]
struct Receipt<'a> {
    transaction: &'a Transaction,
    balance_after: Yen,
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::mock_users;
    use chrono::{TimeZone, Utc};

    fn receipt_txn() -> Transaction {
        let date = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        Transaction::debit(3000, User::new("2", "Bob Johnson", "BJ"), date, 0)
    }

    #[test]
    fn yen_groups_thousands() {
        assert_eq!(format_yen(0), "¥0");
        assert_eq!(format_yen(999), "¥999");
        assert_eq!(format_yen(1000), "¥1,000");
        assert_eq!(format_yen(10_000), "¥10,000");
        assert_eq!(format_yen(57_254_225), "¥57,254,225");
    }

    #[test]
    fn signed_amounts() {
        assert_eq!(format_signed(3000, TransactionKind::Debit), "- ¥3,000");
        assert_eq!(format_signed(5, TransactionKind::Credit), "+ ¥5");
    }

    #[test]
    fn human_receipt_mentions_recipient_and_balance() {
        let out = format_receipt(&receipt_txn(), 7000, OutputFormat::Human).unwrap();
        assert!(out.contains("Sent ¥3,000 to Bob Johnson"));
        assert!(out.contains("Balance after: ¥7,000"));
    }

    #[test]
    fn json_receipt_is_parseable() {
        let out = format_receipt(&receipt_txn(), 7000, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["balance_after"], 7000);
        assert_eq!(value["transaction"]["amount"], 3000);
        assert_eq!(value["transaction"]["type"], "debit");
    }

    #[test]
    fn recipients_human_lists_everyone() {
        let out = format_recipients(&mock_users(), OutputFormat::Human).unwrap();
        assert!(out.contains("[1] AW  Alice Walker"));
        assert!(out.contains("[4] DP  Diana Prince"));
    }

    #[test]
    fn recipients_json_roundtrips_users() {
        let users = mock_users();
        let out = format_recipients(&users, OutputFormat::Json).unwrap();
        let parsed: Vec<User> = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, users);
    }
}
