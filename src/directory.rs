//! Built-in recipient directory and opening balance.
//!
//! Encodes the prototype's fixed data as named constants. The interactive
//! flow never reads a datastore; configuration may replace these values.

use crate::types::{User, Yen};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Balance every session opens with unless configured otherwise.
pub const INITIAL_BALANCE: Yen = 10_000;

/// Name shown in the home screen greeting.
pub const DEFAULT_OWNER: &str = "User";

/// The mock recipients as `(id, name, initials)`.
pub const MOCK_USERS: [(&str, &str, &str); 4] = [
    ("1", "Alice Walker", "AW"),
    ("2", "Bob Johnson", "BJ"),
    ("3", "Charlie Davis", "CD"),
    ("4", "Diana Prince", "DP"),
];

// ============================================================================
// LOOKUP
// ============================================================================

/// Owned copies of [`MOCK_USERS`], in directory order.
pub fn mock_users() -> Vec<User> {
    MOCK_USERS
        .iter()
        .map(|&(id, name, initials)| User::new(id, name, initials))
        .collect()
}

/// Find a recipient by id, with its position in picker order.
pub fn find_user<'a>(users: &'a [User], id: &str) -> Option<(usize, &'a User)> {
    users.iter().enumerate().find(|(_, u)| u.id == id)
}

// ============================================================================
// TESTS
// ============================================================================
