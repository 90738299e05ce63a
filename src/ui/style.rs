//! Colors for the panes and bars.
//!
//! Plain ANSI colors so the terminal palette decides the exact shades.

use ratatui::style::{Color, Modifier, Style};

use crate::buffer::HighlightColor;

/// Ordinary byte text.
pub fn standard() -> Style {
    Style::default().fg(Color::Gray).bg(Color::Black)
}

/// Cursor, selection and the comment callout.
pub fn selected() -> Style {
    Style::default().fg(Color::Black).bg(Color::Gray)
}

/// Status bar and option labels.
pub fn status() -> Style {
    Style::default().fg(Color::Black).bg(Color::Gray)
}

/// Function-key numbers in the options bar.
pub fn option_key() -> Style {
    Style::default().fg(Color::Gray).bg(Color::Black)
}

pub fn highlight(color: HighlightColor) -> Style {
    match color {
        HighlightColor::Blue => Style::default().fg(Color::White).bg(Color::Blue),
        HighlightColor::White => Style::default()
            .fg(Color::Black)
            .bg(Color::White)
            .add_modifier(Modifier::BOLD),
    }
}

pub fn prompt() -> Style {
    Style::default().fg(Color::Gray).bg(Color::Black)
}

/// The character under a prompt's caret.
pub fn caret() -> Style {
    Style::default().add_modifier(Modifier::REVERSED)
}
