//! State transitions.
//!
//! Two layers:
//! - `update`: pure (Screen, Action) → Transition. Edits screen-local form
//!   state and raises intents. Never touches the wallet.
//! - `dispatch`: the application controller. Applies an intent to the App
//!   per the screen transition table, guarding wallet mutations.
//!
//! Unhandled actions and intents leave everything unchanged (no-op).

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::types::{User, Yen};
use crate::validate::{can_submit, parse_amount, MAX_AMOUNT_DIGITS};
use crate::wallet::Wallet;

use super::state::{Action, App, Intent, Screen, Transition, TransferDraft};

/// Pure input handler.
///
/// Given the current screen, an action, and read-only views of the wallet
/// and recipient directory, produces the next transition.
pub fn update(screen: Screen, action: &Action, wallet: &Wallet, recipients: &[User]) -> Transition {
    match screen {
        Screen::Home => update_home(action),
        Screen::Transfer { draft } => update_transfer(draft, action, wallet.balance(), recipients),
        Screen::Confirmation => update_confirmation(action),
        Screen::Completion => update_completion(action),
        Screen::History { cursor } => update_history(cursor, wallet.history().len(), action),
    }
}

/// Run one action through `update` and, if it raised an intent, `dispatch`.
///
/// This is the whole per-key step of the event loop.
pub fn step(app: &mut App, action: &Action, now: DateTime<Utc>) {
    let screen = std::mem::take(&mut app.screen);
    match update(screen, action, &app.wallet, &app.recipients) {
        Transition::Screen(screen) => app.screen = screen,
        Transition::Raise { screen, intent } => {
            app.screen = screen;
            dispatch(app, intent, now);
        }
        Transition::Quit => app.should_quit = true,
    }
}

// ============================================================================
// CONTROLLER
// ============================================================================

/// Apply `intent` to the app.
///
/// | From         | Intent      | Guard                     | To           |
/// |--------------|-------------|---------------------------|--------------|
/// | Home         | Send        |                           | Transfer     |
/// | Home         | OpenHistory |                           | History      |
/// | Transfer     | Back        |                           | Home         |
/// | Transfer     | Next        | 0 < amount <= balance     | Confirmation |
/// | Confirmation | Back        |                           | Transfer     |
/// | Confirmation | Confirm     | recipient, valid amount   | Completion   |
/// | Completion   | Done        |                           | Home         |
/// | History      | Back        |                           | Home         |
///
/// A failed guard is a silent no-op.
pub fn dispatch(app: &mut App, intent: Intent, now: DateTime<Utc>) {
    let next = match (&app.screen, intent) {
        (Screen::Home, Intent::Send) => Some(Screen::transfer()),
        (Screen::Home, Intent::OpenHistory) => Some(Screen::history()),
        (Screen::Transfer { .. }, Intent::Back) => Some(Screen::Home),
        (Screen::Transfer { .. }, Intent::Next { amount, recipient }) => {
            app.wallet.stage(amount, recipient).then_some(Screen::Confirmation)
        }
        (Screen::Confirmation, Intent::Back) => Some(Screen::transfer()),
        (Screen::Confirmation, Intent::Confirm) => {
            app.wallet.confirm(now).map(|_| Screen::Completion)
        }
        (Screen::Completion, Intent::Done) => {
            app.wallet.clear_pending();
            Some(Screen::Home)
        }
        (Screen::History { .. }, Intent::Back) => Some(Screen::Home),
        (screen, intent) => {
            debug!(?screen, ?intent, "intent ignored on this screen");
            None
        }
    };

    if let Some(screen) = next {
        app.screen = screen;
    }
}

// ============================================================================
// PER-SCREEN HANDLERS
// ============================================================================

/// Home: the two entry points. `1`/`2` mirror `s`/`h`.
fn update_home(action: &Action) -> Transition {
    match action {
        Action::Send | Action::Digit('1') => raise(Screen::Home, Intent::Send),
        Action::History | Action::Digit('2') => raise(Screen::Home, Intent::OpenHistory),
        Action::Quit => Transition::Quit,
        _ => Transition::Screen(Screen::Home),
    }
}

/// Transfer: amount entry, recipient picker, submit, back.
fn update_transfer(
    mut draft: TransferDraft,
    action: &Action,
    balance: Yen,
    recipients: &[User],
) -> Transition {
    if let Some(highlight) = draft.picker {
        return update_picker(draft, highlight, action, recipients.len());
    }

    match action {
        Action::Digit(c) => {
            if c.is_ascii_digit() && draft.amount.len() < MAX_AMOUNT_DIGITS {
                draft.amount.push(*c);
            }
        }
        Action::Backspace => {
            draft.amount.pop();
        }
        Action::TogglePicker => {
            if !recipients.is_empty() {
                draft.picker = Some(draft.recipient.unwrap_or(0));
            }
        }
        Action::Enter => return submit(draft, balance, recipients),
        Action::Back => return raise(Screen::Transfer { draft }, Intent::Back),
        Action::Quit => return Transition::Quit,
        _ => {}
    }
    Transition::Screen(Screen::Transfer { draft })
}

/// Picker open: move the highlight, pick, or close.
fn update_picker(mut draft: TransferDraft, highlight: usize, action: &Action, len: usize) -> Transition {
    match action {
        Action::MoveUp => draft.picker = Some(highlight.saturating_sub(1)),
        Action::MoveDown => {
            let next = if len == 0 { 0 } else { (highlight + 1).min(len - 1) };
            draft.picker = Some(next);
        }
        Action::Enter => {
            if highlight < len {
                draft.recipient = Some(highlight);
            }
            draft.picker = None;
        }
        Action::Back | Action::TogglePicker => draft.picker = None,
        Action::Quit => return Transition::Quit,
        _ => {}
    }
    Transition::Screen(Screen::Transfer { draft })
}

/// Raise `Next` only when the form is submittable; otherwise stay put.
fn submit(draft: TransferDraft, balance: Yen, recipients: &[User]) -> Transition {
    let recipient = draft.selected(recipients);
    if !can_submit(&draft.amount, recipient, balance) {
        return Transition::Screen(Screen::Transfer { draft });
    }
    match (parse_amount(&draft.amount), recipient.cloned()) {
        (Some(amount), Some(recipient)) => {
            raise(Screen::Transfer { draft }, Intent::Next { amount, recipient })
        }
        _ => Transition::Screen(Screen::Transfer { draft }),
    }
}

/// Confirmation: confirm or go back to edit.
fn update_confirmation(action: &Action) -> Transition {
    match action {
        Action::Enter | Action::ConfirmYes => raise(Screen::Confirmation, Intent::Confirm),
        Action::Back | Action::ConfirmNo => raise(Screen::Confirmation, Intent::Back),
        Action::Quit => Transition::Quit,
        _ => Transition::Screen(Screen::Confirmation),
    }
}

/// Completion: Enter returns home.
fn update_completion(action: &Action) -> Transition {
    match action {
        Action::Enter => raise(Screen::Completion, Intent::Done),
        Action::Quit => Transition::Quit,
        _ => Transition::Screen(Screen::Completion),
    }
}

/// History: cursor movement + back.
fn update_history(cursor: usize, len: usize, action: &Action) -> Transition {
    match action {
        Action::MoveUp => Transition::Screen(Screen::History {
            cursor: cursor.saturating_sub(1),
        }),
        Action::MoveDown => {
            let cursor = if len == 0 { 0 } else { (cursor + 1).min(len - 1) };
            Transition::Screen(Screen::History { cursor })
        }
        Action::Back => raise(Screen::History { cursor }, Intent::Back),
        Action::Quit => Transition::Quit,
        _ => Transition::Screen(Screen::History { cursor }),
    }
}

fn raise(screen: Screen, intent: Intent) -> Transition {
    Transition::Raise { screen, intent }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::directory::mock_users;
    use crate::types::TransactionKind;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()
    }

    fn new_app() -> App {
        App::new(&Config::default())
    }

    fn draft(amount: &str, recipient: Option<usize>) -> TransferDraft {
        TransferDraft {
            amount: amount.to_string(),
            recipient,
            picker: None,
        }
    }

    fn run(app: &mut App, actions: &[Action]) {
        for action in actions {
            step(app, action, now());
        }
    }

    fn wallet() -> Wallet {
        Wallet::new(10_000)
    }

    // -- Home --

    #[test]
    fn home_send_raises_send() {
        let result = update(Screen::Home, &Action::Send, &wallet(), &mock_users());
        assert_eq!(
            result,
            Transition::Raise {
                screen: Screen::Home,
                intent: Intent::Send
            }
        );
    }

    #[test]
    fn home_number_keys_mirror_letters() {
        let users = mock_users();
        let one = update(Screen::Home, &Action::Digit('1'), &wallet(), &users);
        let two = update(Screen::Home, &Action::Digit('2'), &wallet(), &users);
        assert!(matches!(one, Transition::Raise { intent: Intent::Send, .. }));
        assert!(matches!(two, Transition::Raise { intent: Intent::OpenHistory, .. }));
    }

    #[test]
    fn home_quit() {
        assert_eq!(
            update(Screen::Home, &Action::Quit, &wallet(), &mock_users()),
            Transition::Quit
        );
    }

    // -- Transfer form --

    #[test]
    fn digits_append_and_backspace_deletes() {
        let users = mock_users();
        let screen = Screen::transfer();
        let Transition::Screen(screen) = update(screen, &Action::Digit('3'), &wallet(), &users) else {
            panic!("expected screen");
        };
        let Transition::Screen(screen) = update(screen, &Action::Digit('0'), &wallet(), &users) else {
            panic!("expected screen");
        };
        assert_eq!(screen, Screen::Transfer { draft: draft("30", None) });

        let result = update(screen, &Action::Backspace, &wallet(), &users);
        assert_eq!(result, Transition::Screen(Screen::Transfer { draft: draft("3", None) }));
    }

    #[test]
    fn amount_length_is_capped() {
        let long = "9".repeat(MAX_AMOUNT_DIGITS);
        let screen = Screen::Transfer { draft: draft(&long, None) };
        let result = update(screen, &Action::Digit('1'), &wallet(), &mock_users());
        assert_eq!(result, Transition::Screen(Screen::Transfer { draft: draft(&long, None) }));
    }

    #[test]
    fn picker_opens_on_current_selection() {
        let screen = Screen::Transfer { draft: draft("", Some(2)) };
        let result = update(screen, &Action::TogglePicker, &wallet(), &mock_users());
        match result {
            Transition::Screen(Screen::Transfer { draft }) => assert_eq!(draft.picker, Some(2)),
            other => panic!("Expected Transfer, got {:?}", other),
        }
    }

    #[test]
    fn picker_moves_clamps_and_selects() {
        let users = mock_users();
        let mut screen = Screen::transfer();
        for action in [
            Action::TogglePicker,
            Action::MoveDown,
            Action::MoveDown,
            Action::MoveDown,
            Action::MoveDown,
            Action::MoveDown,
        ] {
            match update(screen, &action, &wallet(), &users) {
                Transition::Screen(s) => screen = s,
                other => panic!("Expected screen, got {:?}", other),
            }
        }
        match &screen {
            Screen::Transfer { draft } => assert_eq!(draft.picker, Some(3)),
            other => panic!("Expected Transfer, got {:?}", other),
        }

        let result = update(screen, &Action::Enter, &wallet(), &users);
        match result {
            Transition::Screen(Screen::Transfer { draft }) => {
                assert_eq!(draft.recipient, Some(3));
                assert_eq!(draft.picker, None);
            }
            other => panic!("Expected Transfer, got {:?}", other),
        }
    }

    #[test]
    fn esc_closes_picker_without_leaving() {
        let screen = Screen::Transfer {
            draft: TransferDraft {
                amount: "5".into(),
                recipient: None,
                picker: Some(1),
            },
        };
        let result = update(screen, &Action::Back, &wallet(), &mock_users());
        assert_eq!(result, Transition::Screen(Screen::Transfer { draft: draft("5", None) }));
    }

    #[test]
    fn enter_with_valid_form_raises_next() {
        let users = mock_users();
        let screen = Screen::Transfer { draft: draft("3000", Some(1)) };
        let result = update(screen, &Action::Enter, &wallet(), &users);
        match result {
            Transition::Raise {
                intent: Intent::Next { amount, recipient },
                ..
            } => {
                assert_eq!(amount, 3000);
                assert_eq!(recipient, users[1]);
            }
            other => panic!("Expected Next, got {:?}", other),
        }
    }

    #[test]
    fn enter_over_balance_stays_on_transfer() {
        let screen = Screen::Transfer { draft: draft("15000", Some(1)) };
        let result = update(screen, &Action::Enter, &wallet(), &mock_users());
        assert_eq!(
            result,
            Transition::Screen(Screen::Transfer { draft: draft("15000", Some(1)) })
        );
    }

    #[test]
    fn enter_without_recipient_or_amount_stays() {
        let users = mock_users();
        for d in [draft("3000", None), draft("", Some(0)), draft("0", Some(0))] {
            let screen = Screen::Transfer { draft: d.clone() };
            let result = update(screen, &Action::Enter, &wallet(), &users);
            assert_eq!(result, Transition::Screen(Screen::Transfer { draft: d }));
        }
    }

    #[test]
    fn transfer_back_raises_back() {
        let result = update(Screen::transfer(), &Action::Back, &wallet(), &mock_users());
        assert!(matches!(result, Transition::Raise { intent: Intent::Back, .. }));
    }

    // -- Confirmation / Completion / History --

    #[test]
    fn confirmation_keys() {
        let users = mock_users();
        for action in [Action::Enter, Action::ConfirmYes] {
            let result = update(Screen::Confirmation, &action, &wallet(), &users);
            assert!(matches!(result, Transition::Raise { intent: Intent::Confirm, .. }));
        }
        for action in [Action::Back, Action::ConfirmNo] {
            let result = update(Screen::Confirmation, &action, &wallet(), &users);
            assert!(matches!(result, Transition::Raise { intent: Intent::Back, .. }));
        }
    }

    #[test]
    fn completion_enter_raises_done() {
        let result = update(Screen::Completion, &Action::Enter, &wallet(), &mock_users());
        assert!(matches!(result, Transition::Raise { intent: Intent::Done, .. }));
    }

    #[test]
    fn history_cursor_clamps_to_len() {
        let result = update(Screen::history(), &Action::MoveDown, &wallet(), &mock_users());
        assert_eq!(result, Transition::Screen(Screen::History { cursor: 0 }));
    }

    // -- Controller --

    #[test]
    fn dispatch_home_routes() {
        let mut app = new_app();
        dispatch(&mut app, Intent::OpenHistory, now());
        assert_eq!(app.screen, Screen::history());

        let mut app = new_app();
        dispatch(&mut app, Intent::Send, now());
        assert_eq!(app.screen, Screen::transfer());
    }

    #[test]
    fn dispatch_next_stages_pending() {
        let mut app = new_app();
        app.screen = Screen::transfer();
        let bob = app.recipients[1].clone();
        dispatch(&mut app, Intent::Next { amount: 3000, recipient: bob.clone() }, now());
        assert_eq!(app.screen, Screen::Confirmation);
        assert_eq!(app.wallet.pending().amount, 3000);
        assert_eq!(app.wallet.pending().recipient, Some(bob));
    }

    #[test]
    fn dispatch_next_over_balance_is_noop() {
        let mut app = new_app();
        app.screen = Screen::transfer();
        let bob = app.recipients[1].clone();
        dispatch(&mut app, Intent::Next { amount: 15_000, recipient: bob }, now());
        assert_eq!(app.screen, Screen::transfer());
        assert!(app.wallet.pending().is_empty());
    }

    #[test]
    fn dispatch_confirm_without_pending_is_noop() {
        let mut app = new_app();
        app.screen = Screen::Confirmation;
        dispatch(&mut app, Intent::Confirm, now());
        assert_eq!(app.screen, Screen::Confirmation);
        assert_eq!(app.wallet.balance(), 10_000);
        assert!(app.wallet.history().is_empty());
    }

    #[test]
    fn dispatch_ignores_intents_for_other_screens() {
        let mut app = new_app();
        dispatch(&mut app, Intent::Confirm, now());
        assert_eq!(app.screen, Screen::Home);
        dispatch(&mut app, Intent::Back, now());
        assert_eq!(app.screen, Screen::Home);
    }

    #[test]
    fn confirmation_back_starts_empty_form() {
        let mut app = new_app();
        run(
            &mut app,
            &[
                Action::Send,
                Action::TogglePicker,
                Action::MoveDown,
                Action::Enter,
                Action::Digit('5'),
                Action::Digit('0'),
                Action::Enter,
                Action::Back,
            ],
        );
        assert_eq!(app.screen, Screen::transfer());
        assert_eq!(app.wallet.pending().amount, 50);
        assert_eq!(app.wallet.balance(), 10_000);
    }

    #[test]
    fn full_flow_debits_and_returns_home() {
        let mut app = new_app();
        run(
            &mut app,
            &[
                Action::Send,
                Action::TogglePicker,
                Action::MoveDown,
                Action::Enter,
                Action::Digit('3'),
                Action::Digit('0'),
                Action::Digit('0'),
                Action::Digit('0'),
                Action::Enter,
            ],
        );
        assert_eq!(app.screen, Screen::Confirmation);

        run(&mut app, &[Action::ConfirmYes]);
        assert_eq!(app.screen, Screen::Completion);
        assert_eq!(app.wallet.balance(), 7000);
        let head = &app.wallet.history()[0];
        assert_eq!(head.amount, 3000);
        assert_eq!(head.recipient.id, "2");
        assert_eq!(head.kind, TransactionKind::Debit);

        run(&mut app, &[Action::Enter]);
        assert_eq!(app.screen, Screen::Home);
        assert!(app.wallet.pending().is_empty());
    }

    #[test]
    fn quit_sets_flag() {
        let mut app = new_app();
        run(&mut app, &[Action::Quit]);
        assert!(app.should_quit);
    }
}
