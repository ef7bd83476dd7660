//! Domain types for mock-pay.
//!
//! Plain data: people you can pay, the transfer being staged, and the
//! transfers already made. No behavior beyond constructors lives here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// PRIMITIVES
// ============================================================================

/// Whole yen. The currency has no minor unit.
pub type Yen = u64;

// ============================================================================
// ENUMS
// ============================================================================

/// Direction of a transfer relative to the account holder.
///
/// Only `Debit` is produced by the send flow. `Credit` exists so the
/// history format can describe incoming money.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Debit,
    Credit,
}

/// Output format for CLI reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable pretty output.
    #[default]
    Human,
    /// Machine-readable JSON.
    Json,
}

// ============================================================================
// STRUCTS
// ============================================================================

/// Someone money can be sent to. Identity is `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    /// Two-letter avatar label.
    pub initials: String,
}

/// Transfer staged on the transfer screen, awaiting confirmation.
///
/// Exactly one exists per wallet. Empty is `{ amount: 0, recipient: None }`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingTransaction {
    pub amount: Yen,
    pub recipient: Option<User>,
}

/// A confirmed transfer. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Derived from the confirmation time plus a session sequence number.
    pub id: String,
    pub amount: Yen,
    pub recipient: User,
    /// Confirmation time, serialized as ISO 8601.
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

// ============================================================================
// CONSTRUCTORS
// ============================================================================

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>, initials: impl Into<String>) -> Self {
        User {
            id: id.into(),
            name: name.into(),
            initials: initials.into(),
        }
    }
}

impl PendingTransaction {
    /// Stage `amount` for `recipient`.
    pub fn new(amount: Yen, recipient: User) -> Self {
        PendingTransaction {
            amount,
            recipient: Some(recipient),
        }
    }

    /// True when nothing is staged.
    pub fn is_empty(&self) -> bool {
        self.amount == 0 && self.recipient.is_none()
    }
}

impl Transaction {
    /// Build an outgoing transfer confirmed at `date`.
    ///
    /// `seq` disambiguates transfers confirmed within the same millisecond.
    pub fn debit(amount: Yen, recipient: User, date: DateTime<Utc>, seq: usize) -> Self {
        Transaction {
            id: transaction_id(date, seq),
            amount,
            recipient,
            date,
            kind: TransactionKind::Debit,
        }
    }
}

/// Format: `<unix millis>-<seq, 4 digits>`.
fn transaction_id(date: DateTime<Utc>, seq: usize) -> String {
    format!("{}-{:04}", date.timestamp_millis(), seq)
}

// ============================================================================
// TESTS
// ============================================================================
