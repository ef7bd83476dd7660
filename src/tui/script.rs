//! Headless driving of the screen flow.
//!
//! Builds the key-level action sequence a person would type and replays
//! it through the same `step` the event loop uses. Backs the `send`
//! command and the end-to-end tests.

use chrono::{DateTime, Utc};
use tracing::info;

use super::state::{Action, App, Screen};
use super::update::step;
use crate::config::Config;
use crate::directory::find_user;
use crate::error::{Error, Result};
use crate::types::Transaction;
use crate::validate::{parse_amount, MAX_AMOUNT_DIGITS};

/// Actions that send `amount_text` to the recipient at `recipient_index`,
/// starting from Home and ending on Completion when the input is valid.
pub fn send_script(recipient_index: usize, amount_text: &str) -> Vec<Action> {
    let mut actions = vec![Action::Send, Action::TogglePicker];
    actions.extend(std::iter::repeat_n(Action::MoveDown, recipient_index));
    actions.push(Action::Enter);
    actions.extend(amount_text.chars().map(Action::Digit));
    actions.push(Action::Enter); // review
    actions.push(Action::ConfirmYes);
    actions
}

/// Step `app` through `actions`, all stamped at `now`.
pub fn replay(app: &mut App, actions: &[Action], now: DateTime<Utc>) {
    for action in actions {
        if app.should_quit {
            break;
        }
        step(app, action, now);
    }
}

/// Send `amount_text` to recipient `to` in a fresh session and return the
/// recorded transaction.
///
/// Text the form would refuse or truncate is rejected up front, and the
/// recorded amount must equal the requested one.
pub fn send(config: &Config, to: &str, amount_text: &str, now: DateTime<Utc>) -> Result<Transaction> {
    let (index, _) = find_user(&config.recipients, to)
        .ok_or_else(|| Error::UnknownRecipient(to.to_string()))?;

    let text = amount_text.trim();
    let rejected = || Error::RejectedAmount {
        amount: amount_text.to_string(),
        balance: config.initial_balance,
    };
    if text.len() > MAX_AMOUNT_DIGITS {
        return Err(rejected());
    }
    let requested = parse_amount(text).ok_or_else(rejected)?;

    let mut app = App::new(config);
    replay(&mut app, &send_script(index, text), now);
    if app.screen != Screen::Completion {
        return Err(rejected());
    }

    let txn = app.wallet.history().first().ok_or_else(rejected)?;
    if txn.amount != requested {
        return Err(rejected());
    }
    info!(id = %txn.id, amount = txn.amount, to = %txn.recipient.id, "sent without screens");
    Ok(txn.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).unwrap()
    }

    #[test]
    fn script_shape() {
        let actions = send_script(2, "15");
        assert_eq!(
            actions,
            vec![
                Action::Send,
                Action::TogglePicker,
                Action::MoveDown,
                Action::MoveDown,
                Action::Enter,
                Action::Digit('1'),
                Action::Digit('5'),
                Action::Enter,
                Action::ConfirmYes,
            ]
        );
    }

    #[test]
    fn replay_stops_after_quit() {
        let mut app = App::new(&Config::default());
        replay(&mut app, &[Action::Quit, Action::Send], Utc::now());
        assert!(app.should_quit);
        assert_eq!(app.screen, Screen::Home);
    }

    #[test]
    fn send_records_requested_amount() {
        let txn = send(&Config::default(), "2", "3000", at(1_000)).unwrap();
        assert_eq!(txn.amount, 3000);
        assert_eq!(txn.recipient.name, "Bob Johnson");
        assert_eq!(txn.id, "1000-0000");
    }

    #[test]
    fn send_trims_surrounding_whitespace() {
        let txn = send(&Config::default(), "1", " 250 ", at(1)).unwrap();
        assert_eq!(txn.amount, 250);
    }

    #[test]
    fn send_unknown_recipient_fails() {
        let err = send(&Config::default(), "99", "100", at(1)).unwrap_err();
        assert!(matches!(err, Error::UnknownRecipient(ref id) if id == "99"));
    }

    #[test]
    fn send_overdraft_fails() {
        let err = send(&Config::default(), "2", "15000", at(1)).unwrap_err();
        assert!(matches!(err, Error::RejectedAmount { balance: 10_000, .. }));
    }

    #[test]
    fn send_zero_fails() {
        let err = send(&Config::default(), "2", "0", at(1)).unwrap_err();
        assert!(matches!(err, Error::RejectedAmount { .. }));
    }

    #[test]
    fn send_non_numeric_fails() {
        for text in ["abc", "12.5", "-10", "1e3", ""] {
            let err = send(&Config::default(), "2", text, at(1)).unwrap_err();
            assert!(matches!(err, Error::RejectedAmount { .. }), "{text:?}");
        }
    }

    #[test]
    fn send_longer_than_form_fails() {
        let config = Config::default().with_balance(Some(10_000_000_000_000));
        let err = send(&config, "2", "1000000000000", at(1)).unwrap_err();
        assert!(matches!(err, Error::RejectedAmount { ref amount, .. } if amount == "1000000000000"));
    }

    #[test]
    fn send_longest_form_amount_succeeds() {
        let config = Config::default().with_balance(Some(1_000_000_000_000));
        let txn = send(&config, "3", "999999999999", at(1)).unwrap();
        assert_eq!(txn.amount, 999_999_999_999);
    }
}
