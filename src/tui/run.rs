//! TUI effects boundary: event loop, terminal lifecycle, key mapping.
//!
//! This is the only module with terminal side effects. It wires the pure
//! layers (state, update, view) to the real terminal via crossterm and
//! ratatui. All intelligence lives in the pure layers.
//!
//! Architecture: a key reader thread feeds an mpsc channel; the event loop
//! consumes from it and steps the App one action at a time.

use std::io;
use std::sync::mpsc;
use std::thread;

use chrono::Utc;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{debug, info};

use crate::config::Config;

use super::state::{Action, App, AppEvent};
use super::update::step;
use super::view::render;

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a crossterm key event to a semantic Action.
///
/// Returns None for keys that don't map to any action.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        // Navigation
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::Enter => Some(Action::Enter),
        KeyCode::Esc => Some(Action::Back),

        // Form input
        KeyCode::Char(c @ '0'..='9') => Some(Action::Digit(c)),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Char(' ') => Some(Action::TogglePicker),

        // Home entry points
        KeyCode::Char('s') => Some(Action::Send),
        KeyCode::Char('h') => Some(Action::History),

        // Confirm
        KeyCode::Char('Y') | KeyCode::Char('y') => Some(Action::ConfirmYes),
        KeyCode::Char('N') | KeyCode::Char('n') => Some(Action::ConfirmNo),

        KeyCode::Char('q') => Some(Action::Quit),

        _ => None,
    }
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Set up the terminal for TUI mode.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// BACKGROUND THREADS
// ============================================================================

/// Spawn a thread that reads crossterm events and forwards them to the channel.
fn spawn_key_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        loop {
            let event = match event::read() {
                // Windows reports both press and release; act on press only
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
                Ok(Event::Resize(..)) => AppEvent::Resize,
                Ok(_) => continue,
                Err(_) => break,
            };
            if tx.send(event).is_err() {
                break; // receiver dropped, TUI is shutting down
            }
        }
    });
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Run the TUI event loop until the user quits.
pub fn run(config: &Config) -> io::Result<()> {
    install_panic_hook();
    let mut terminal = setup_terminal()?;
    let mut app = App::new(config);
    info!(balance = app.wallet.balance(), recipients = app.recipients.len(), "session started");

    let (tx, rx) = mpsc::channel::<AppEvent>();
    spawn_key_reader(tx);

    while !app.should_quit {
        terminal.draw(|frame| render(&app, frame))?;

        // Block on next event
        let event = match rx.recv() {
            Ok(e) => e,
            Err(_) => break, // reader thread gone
        };

        match event {
            AppEvent::Key(key) => {
                if let Some(action) = map_key(key) {
                    debug!(?action, screen = ?app.screen, "key");
                    step(&mut app, &action, Utc::now());
                }
            }
            AppEvent::Resize => {} // redrawn at the top of the loop
        }
    }

    info!(
        balance = app.wallet.balance(),
        transfers = app.wallet.history().len(),
        "session ended"
    );
    restore_terminal()?;
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
