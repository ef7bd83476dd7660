//! TUI state algebra: pure types, zero effects.
//!
//! These types define the entire TUI state space. The input handler
//! (`update`), the controller (`dispatch`) and the renderer (`view`) all
//! program against them.
//!
//! Design principle: Screen variants carry only per-screen transient state
//! (form fields, cursors). Account data (balance, history, pending
//! transfer) lives in the Wallet owned by App, and only the controller
//! mutates it.

use crossterm::event::KeyEvent;

use crate::config::Config;
use crate::types::{User, Yen};
use crate::wallet::Wallet;

// ============================================================================
// APP EVENTS
// ============================================================================

/// Everything the event loop can receive from its channel.
#[derive(Debug)]
pub enum AppEvent {
    /// A terminal key event from the crossterm reader thread.
    Key(KeyEvent),
    /// The terminal was resized; redraw.
    Resize,
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Top-level TUI model: the application controller's state.
#[derive(Debug)]
pub struct App {
    /// Current screen, carrying its local form/cursor state.
    pub screen: Screen,

    /// Balance, history and the staged transfer.
    pub wallet: Wallet,

    /// Who can be paid, in picker order.
    pub recipients: Vec<User>,

    /// Account holder name for the greeting.
    pub owner: String,

    /// Set to true when the app should exit on the next tick.
    pub should_quit: bool,
}

// ============================================================================
// SCREENS
// ============================================================================

/// The current TUI screen. Exactly one is active.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Screen {
    /// Balance card and the two entry points.
    #[default]
    Home,

    /// Recipient picker and amount entry.
    Transfer { draft: TransferDraft },

    /// Review of the staged transfer.
    Confirmation,

    /// Success message for the transfer just confirmed.
    Completion,

    /// Confirmed transfers, newest first.
    History {
        /// Focused row index.
        cursor: usize,
    },
}

/// Uncommitted input on the transfer screen.
///
/// Lives inside [`Screen::Transfer`], so leaving the screen discards it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferDraft {
    /// Raw amount text, digits only.
    pub amount: String,
    /// Index into `App::recipients` of the chosen recipient.
    pub recipient: Option<usize>,
    /// Open picker with its highlighted row; `None` when closed.
    pub picker: Option<usize>,
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic user action, decoupled from raw key events.
///
/// The effects layer maps key presses to Actions.
/// The input handler decides what each Action means per Screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Move cursor / picker highlight up.
    MoveUp,
    /// Move cursor / picker highlight down.
    MoveDown,
    /// Activate the focused control.
    Enter,
    /// Navigate back (or close the picker).
    Back,
    /// A decimal digit typed.
    Digit(char),
    /// Delete the last amount character.
    Backspace,
    /// Open or close the recipient picker.
    TogglePicker,
    /// Start a transfer from Home.
    Send,
    /// Open history from Home.
    History,
    /// Confirm on the review screen.
    ConfirmYes,
    /// Decline on the review screen.
    ConfirmNo,
    /// Quit the application.
    Quit,
}

// ============================================================================
// INTENTS & TRANSITIONS
// ============================================================================

/// A request raised by a screen for the controller to act on.
///
/// Screens never touch the wallet. They raise one of these and the
/// controller applies the transition table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Home: start a transfer.
    Send,
    /// Home: view history.
    OpenHistory,
    /// Leave the current screen.
    Back,
    /// Transfer: stage `amount` for `recipient` and review it.
    Next { amount: Yen, recipient: User },
    /// Confirmation: commit the staged transfer.
    Confirm,
    /// Completion: return home.
    Done,
}

/// Result of the pure input handler.
#[derive(Debug, PartialEq)]
pub enum Transition {
    /// Render this screen (may be the same or a different screen).
    Screen(Screen),
    /// Keep `screen` and hand `intent` to the controller.
    Raise { screen: Screen, intent: Intent },
    /// Quit the application.
    Quit,
}

// ============================================================================
// CONSTRUCTORS
// ============================================================================

impl App {
    /// A fresh session on Home.
    pub fn new(config: &Config) -> Self {
        App {
            screen: Screen::Home,
            wallet: Wallet::new(config.initial_balance),
            recipients: config.recipients.clone(),
            owner: config.owner.clone(),
            should_quit: false,
        }
    }
}

impl Screen {
    /// A transfer screen with an empty form.
    pub fn transfer() -> Self {
        Screen::Transfer {
            draft: TransferDraft::default(),
        }
    }

    /// History with the cursor on the newest entry.
    pub fn history() -> Self {
        Screen::History { cursor: 0 }
    }
}

impl TransferDraft {
    /// The chosen recipient, if any.
    pub fn selected<'a>(&self, recipients: &'a [User]) -> Option<&'a User> {
        self.recipient.and_then(|i| recipients.get(i))
    }
}

// ============================================================================
// TESTS
// ============================================================================
