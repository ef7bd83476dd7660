//! Pure rendering: map App state to ratatui widget trees.
//!
//! Each screen has a dedicated render function. The main `render()`
//! dispatches based on the current Screen variant. Widget-building
//! functions are pure (state in, widgets out); the only effect is
//! Frame::render_widget() which writes to the terminal buffer.

use chrono::Local;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use crate::format::{format_signed, format_yen};
use crate::types::{PendingTransaction, Transaction, User, Yen};
use crate::validate::{can_submit, exceeds_balance};

use super::state::{App, Screen, TransferDraft};
use super::theme;

/// Shown on completion when the staged transfer has no recipient.
const UNKNOWN_RECIPIENT: &str = "Unknown";

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the current screen to the terminal frame.
pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    // Common layout: title bar at top, content in middle, help at bottom
    let chunks = Layout::vertical([
        Constraint::Length(1), // title
        Constraint::Min(0),    // content
        Constraint::Length(1), // help
    ])
    .split(area);

    frame.render_widget(render_title(&app.screen), chunks[0]);
    frame.render_widget(render_help(&app.screen), chunks[2]);

    let content_area = chunks[1];
    let balance = app.wallet.balance();

    match &app.screen {
        Screen::Home => render_home(&app.owner, balance, frame, content_area),
        Screen::Transfer { draft } => {
            render_transfer(draft, &app.recipients, balance, frame, content_area);
        }
        Screen::Confirmation => {
            render_confirmation(app.wallet.pending(), balance, frame, content_area);
        }
        Screen::Completion => render_completion(app.wallet.pending(), frame, content_area),
        Screen::History { cursor } => {
            render_history(app.wallet.history(), *cursor, frame, content_area);
        }
    }
}

// ============================================================================
// SHARED LAYOUT
// ============================================================================

/// Title bar showing the app name and screen-specific context.
fn render_title(screen: &Screen) -> Paragraph<'static> {
    let title_text = match screen {
        Screen::Home => "Mock Pay",
        Screen::Transfer { .. } => "Send Money",
        Screen::Confirmation => "Review",
        Screen::Completion => "Complete",
        Screen::History { .. } => "History",
    };

    Paragraph::new(Line::from(vec![Span::styled(title_text, theme::STYLE_TITLE)]))
}

/// Help line showing available keybindings for the current screen.
fn render_help(screen: &Screen) -> Paragraph<'static> {
    let help_text = match screen {
        Screen::Home => "[s] send  [h] history  [q] quit",
        Screen::Transfer { draft } if draft.picker.is_some() => {
            "[j/k] move  [Enter] choose  [Esc] close"
        }
        Screen::Transfer { .. } => "[0-9] amount  [Space] recipient  [Enter] review  [Esc] back",
        Screen::Confirmation => "[y/Enter] confirm & send  [n/Esc] back",
        Screen::Completion => "[Enter] done  [q] quit",
        Screen::History { .. } => "[j/k] move  [Esc] back",
    };

    Paragraph::new(Span::styled(help_text, theme::STYLE_HELP))
}

/// Avatar bubble: ` BJ `.
fn avatar(user: &User) -> Span<'static> {
    Span::styled(format!(" {} ", user.initials), theme::STYLE_AVATAR)
}

/// Uppercase field label.
fn label(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(format!("  {}", text), theme::STYLE_DIM))
}

/// Scroll offset keeping `cursor` visible in `height` rows.
fn scroll_offset(cursor: usize, height: usize) -> u16 {
    if cursor >= height {
        u16::try_from(cursor - height + 1).unwrap_or(u16::MAX)
    } else {
        0
    }
}

// ============================================================================
// SCREEN: HOME
// ============================================================================

fn render_home(owner: &str, balance: Yen, frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(" MP ", theme::STYLE_AVATAR),
            Span::styled("  Welcome back, ", theme::STYLE_DIM),
            Span::styled(owner.to_string(), theme::STYLE_TITLE),
        ]),
        Line::from(""),
        Line::from(Span::styled("  Total Balance", theme::STYLE_CARD)),
        Line::from(Span::styled(
            format!("  {}", format_yen(balance)),
            theme::STYLE_CARD.add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("  ● ", theme::STYLE_CARD.fg(Color::LightGreen)),
            Span::styled("Active Account", theme::STYLE_CARD),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  [s] ", theme::STYLE_INTERACTIVE),
            Span::styled("Send Money", theme::STYLE_IMPORTANT),
            Span::raw("      "),
            Span::styled("[h] ", theme::STYLE_INTERACTIVE),
            Span::styled("History", theme::STYLE_ACCENT),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "  ─────────────────────────────────────",
            theme::STYLE_DIM,
        )),
        Line::from(vec![
            Span::styled("  Mock Pay Pro", theme::STYLE_IMPORTANT),
            Span::styled("  Upgrade for higher limits", theme::STYLE_DIM),
        ]),
    ];

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

// ============================================================================
// SCREEN: TRANSFER
// ============================================================================

fn render_transfer(
    draft: &TransferDraft,
    recipients: &[User],
    balance: Yen,
    frame: &mut Frame,
    area: Rect,
) {
    let selected = draft.selected(recipients);

    let mut lines = vec![Line::from(""), label("RECIPIENT")];

    // Picker field
    let field = match selected {
        Some(user) => Line::from(vec![
            Span::raw("  "),
            avatar(user),
            Span::styled(format!(" {}", user.name), theme::STYLE_IMPORTANT),
            Span::styled("  ▾", theme::STYLE_DIM),
        ]),
        None => Line::from(Span::styled("  Select a person  ▾", theme::STYLE_DIM)),
    };
    lines.push(field);

    // Open picker rows
    if let Some(highlight) = draft.picker {
        for (i, user) in recipients.iter().enumerate() {
            let row = Line::from(vec![
                Span::raw(if i == highlight { "    > " } else { "      " }),
                avatar(user),
                Span::raw(format!(" {}", user.name)),
            ]);
            lines.push(if i == highlight {
                row.style(theme::STYLE_CURSOR)
            } else {
                row
            });
        }
    }

    lines.push(Line::from(""));
    lines.push(label("AMOUNT"));

    let amount = if draft.amount.is_empty() {
        Span::styled("0", theme::STYLE_DIM)
    } else {
        Span::styled(draft.amount.clone(), theme::STYLE_AMOUNT)
    };
    lines.push(Line::from(vec![Span::styled("  ¥ ", theme::STYLE_DIM), amount]));

    let mut helper = vec![Span::styled(
        format!("  Available: {}", format_yen(balance)),
        theme::STYLE_DIM,
    )];
    if exceeds_balance(&draft.amount, balance) {
        helper.push(Span::styled("   Insufficient funds", theme::STYLE_DANGER));
    }
    lines.push(Line::from(helper));
    lines.push(Line::from(""));

    // Submit "button"
    let submit_style = if can_submit(&draft.amount, selected, balance) {
        theme::STYLE_INTERACTIVE
    } else {
        theme::STYLE_DISABLED
    };
    lines.push(Line::from(Span::styled("  [Enter] Review Transfer", submit_style)));

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

// ============================================================================
// SCREEN: CONFIRMATION
// ============================================================================

fn render_confirmation(pending: &PendingTransaction, balance: Yen, frame: &mut Frame, area: Rect) {
    let Some(recipient) = &pending.recipient else {
        return;
    };
    let after = balance.saturating_sub(pending.amount);

    let lines = vec![
        Line::from(""),
        Line::from(vec![Span::raw("  "), avatar(recipient)]),
        Line::from(Span::styled("  Sending to", theme::STYLE_DIM)),
        Line::from(Span::styled(format!("  {}", recipient.name), theme::STYLE_IMPORTANT)),
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", format_yen(pending.amount)),
            theme::STYLE_AMOUNT,
        )),
        Line::from(""),
        detail_row("Current Balance", format_yen(balance), theme::STYLE_IMPORTANT),
        detail_row(
            "Amount to Send",
            format!("- {}", format_yen(pending.amount)),
            theme::STYLE_DANGER,
        ),
        Line::from(Span::styled("  ──────────────────────────────", theme::STYLE_DIM)),
        detail_row("Balance After", format_yen(after), theme::STYLE_IMPORTANT),
        Line::from(""),
        Line::from(Span::styled("  ✓ Secure Transaction", theme::STYLE_SAFE)),
    ];

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// `  Label            value` with a fixed label column.
fn detail_row(name: &str, value: String, style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<18}", name), theme::STYLE_DIM),
        Span::styled(value, style),
    ])
}

// ============================================================================
// SCREEN: COMPLETION
// ============================================================================

fn render_completion(pending: &PendingTransaction, frame: &mut Frame, area: Rect) {
    let name = pending
        .recipient
        .as_ref()
        .map(|r| r.name.as_str())
        .unwrap_or(UNKNOWN_RECIPIENT);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("  ✓ Transfer Complete!", theme::STYLE_SAFE)),
        Line::from(""),
        Line::from(vec![
            Span::raw("  You successfully sent "),
            Span::styled(format_yen(pending.amount), theme::STYLE_IMPORTANT),
            Span::raw(format!(" to {}.", name)),
        ]),
        Line::from(""),
        Line::from(Span::styled("  [Enter] Done", theme::STYLE_INTERACTIVE)),
    ];

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

// ============================================================================
// SCREEN: HISTORY
// ============================================================================

fn render_history(history: &[Transaction], cursor: usize, frame: &mut Frame, area: Rect) {
    if history.is_empty() {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled("  No recent transactions", theme::STYLE_DIM)),
        ];
        frame.render_widget(Paragraph::new(lines), area);
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(2), // heading
        Constraint::Min(0),    // rows
    ])
    .split(area);

    let heading = Paragraph::new(vec![Line::from(""), label("RECENT")]);
    frame.render_widget(heading, chunks[0]);

    let lines: Vec<Line> = history
        .iter()
        .enumerate()
        .map(|(i, txn)| {
            let line = history_row(txn);
            if i == cursor {
                line.style(theme::STYLE_CURSOR)
            } else {
                line
            }
        })
        .collect();

    let offset = scroll_offset(cursor, chunks[1].height as usize);
    let list = Paragraph::new(lines).scroll((offset, 0));
    frame.render_widget(list, chunks[1]);
}

fn history_row(txn: &Transaction) -> Line<'static> {
    let date = txn.date.with_timezone(&Local).format("%Y/%m/%d").to_string();
    Line::from(vec![
        Span::raw("  "),
        avatar(&txn.recipient),
        Span::styled(format!(" {:<16}", txn.recipient.name), theme::STYLE_IMPORTANT),
        Span::styled(format!("{}  ", date), theme::STYLE_DIM),
        Span::styled(format_signed(txn.amount, txn.kind), theme::STYLE_IMPORTANT),
    ])
}

// ============================================================================
// TESTS
// ============================================================================
