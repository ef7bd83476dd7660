//! TUI color semantics and style constants.
//!
//! Pure data, consumed by the rendering layer for visual consistency.
//!
//! Color semantics:
//! - Purple: brand (titles, balance card, avatars)
//! - Gold: accent (history entry point)
//! - Green: success (completion, secure badge)
//! - Red: money leaving the account, insufficient funds
//! - Cyan: interactive elements (keybinding hints)
//! - Dim: de-emphasized (labels, dates, disabled actions)

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// PALETTE
// ============================================================================

/// Gentle purple.
pub const PRIMARY: Color = Color::Rgb(0x85, 0x40, 0x9D);

/// Deep purple.
pub const SECONDARY: Color = Color::Rgb(0x4D, 0x2B, 0x8C);

/// Mustard gold.
pub const ACCENT: Color = Color::Rgb(0xEE, 0xA7, 0x27);

// ============================================================================
// SEMANTIC STYLES
// ============================================================================

/// Success: green.
pub const STYLE_SAFE: Style = Style::new().fg(Color::Green);

/// Outgoing money / insufficient funds: red.
pub const STYLE_DANGER: Style = Style::new().fg(Color::Red);

/// Interactive element / keybinding hint: cyan.
pub const STYLE_INTERACTIVE: Style = Style::new().fg(Color::Cyan);

/// De-emphasized metadata: dark gray.
pub const STYLE_DIM: Style = Style::new().fg(Color::DarkGray);

/// Important text: bold.
pub const STYLE_IMPORTANT: Style = Style::new().add_modifier(Modifier::BOLD);

/// Accent highlight: gold.
pub const STYLE_ACCENT: Style = Style::new().fg(ACCENT);

// ============================================================================
// UI ELEMENT STYLES
// ============================================================================

/// Title bar / header.
pub const STYLE_TITLE: Style = Style::new().fg(PRIMARY).add_modifier(Modifier::BOLD);

/// Large amounts (balance, amount to send).
pub const STYLE_AMOUNT: Style = Style::new().fg(SECONDARY).add_modifier(Modifier::BOLD);

/// Balance card body: white on brand purple.
pub const STYLE_CARD: Style = Style::new().fg(Color::White).bg(PRIMARY);

/// Avatar initials bubble.
pub const STYLE_AVATAR: Style = Style::new().fg(Color::White).bg(SECONDARY).add_modifier(Modifier::BOLD);

/// Cursor row in a list.
pub const STYLE_CURSOR: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Submit action that cannot fire yet.
pub const STYLE_DISABLED: Style = Style::new().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT);

/// Footer / help line.
pub const STYLE_HELP: Style = Style::new().fg(Color::DarkGray);

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn semantic_styles_have_expected_colors() {
        assert_eq!(STYLE_SAFE.fg, Some(Color::Green));
        assert_eq!(STYLE_DANGER.fg, Some(Color::Red));
        assert_eq!(STYLE_INTERACTIVE.fg, Some(Color::Cyan));
        assert_eq!(STYLE_DIM.fg, Some(Color::DarkGray));
        assert_eq!(STYLE_ACCENT.fg, Some(ACCENT));
    }

    #[test]
    fn card_uses_brand_background() {
        assert_eq!(STYLE_CARD.bg, Some(PRIMARY));
    }

    #[test]
    fn disabled_is_crossed_out() {
        assert!(STYLE_DISABLED.add_modifier.contains(Modifier::CROSSED_OUT));
    }
}
