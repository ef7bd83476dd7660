//! In-memory account state: balance, history, pending transfer.
//!
//! The only mutable domain state in the program. Screens read it; the
//! controller (`tui::update::dispatch`) is the only writer.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::types::{PendingTransaction, Transaction, User, Yen};
use crate::validate::is_valid_amount;

/// Session account state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wallet {
    balance: Yen,
    /// Newest first.
    history: Vec<Transaction>,
    pending: PendingTransaction,
}

impl Wallet {
    /// A wallet with `balance`, empty history and nothing staged.
    pub fn new(balance: Yen) -> Self {
        Wallet {
            balance,
            history: Vec::new(),
            pending: PendingTransaction::default(),
        }
    }

    pub fn balance(&self) -> Yen {
        self.balance
    }

    /// Confirmed transfers, most recent first.
    pub fn history(&self) -> &[Transaction] {
        &self.history
    }

    pub fn pending(&self) -> &PendingTransaction {
        &self.pending
    }

    /// Stage a transfer for confirmation.
    ///
    /// Returns false and leaves the wallet untouched when `amount` is zero
    /// or exceeds the balance.
    pub fn stage(&mut self, amount: Yen, recipient: User) -> bool {
        if !is_valid_amount(amount, self.balance) {
            debug!(amount, balance = self.balance, "rejected staging");
            return false;
        }
        self.pending = PendingTransaction::new(amount, recipient);
        true
    }

    /// Confirm the staged transfer at `now`.
    ///
    /// Debits the balance and records the transfer at the head of the
    /// history. With nothing valid staged this is a no-op returning `None`.
    /// The pending transfer is kept so the completion screen can show it.
    pub fn confirm(&mut self, now: DateTime<Utc>) -> Option<&Transaction> {
        let amount = self.pending.amount;
        let Some(recipient) = self.pending.recipient.clone() else {
            debug!("confirm with no recipient staged");
            return None;
        };
        if !is_valid_amount(amount, self.balance) {
            debug!(amount, balance = self.balance, "confirm guard rejected amount");
            return None;
        }

        self.balance -= amount;
        let txn = Transaction::debit(amount, recipient, now, self.history.len());
        info!(
            id = %txn.id,
            amount,
            recipient = %txn.recipient.id,
            balance = self.balance,
            "transfer confirmed"
        );
        self.history.insert(0, txn);
        self.history.first()
    }

    /// Drop whatever is staged.
    pub fn clear_pending(&mut self) {
        self.pending = PendingTransaction::default();
    }
}

// ============================================================================
// TESTS
// ============================================================================
