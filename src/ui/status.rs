use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, PaneKind, ToastLevel, format_address};

use super::style;

/// Width of one options-bar slot: a two-column key number and a label.
const OPTION_SLOT_WIDTH: usize = 8;
const OPTION_COUNT: usize = 10;

/// Six-column labels for F1..F10.
pub fn option_labels(model: &Model) -> [&'static str; OPTION_COUNT] {
    let mut labels = ["      "; OPTION_COUNT];
    if model.prompt.is_none() {
        if model.pane == PaneKind::Hex {
            labels[2] = "Edit  ";
        }
        labels[4] = "Goto  ";
        labels[8] = "Names ";
    }
    labels[9] = "Quit  ";
    labels
}

pub fn render_options_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let mut spans = Vec::with_capacity(OPTION_COUNT * 2 + 1);
    for (index, label) in option_labels(model).into_iter().enumerate() {
        spans.push(Span::styled(format!("{:>2}", index + 1), style::option_key()));
        spans.push(Span::styled(label, style::status()));
    }
    let used = OPTION_COUNT * OPTION_SLOT_WIDTH;
    let rest = usize::from(area.width).saturating_sub(used);
    spans.push(Span::styled(" ".repeat(rest), style::status()));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Text of the status bar: the path on the left, then mode, view and the
/// cursor address right-aligned in a 40-column field.
pub fn status_text(model: &Model) -> String {
    let path = model
        .buffer
        .path()
        .map_or_else(|| "<memory>".to_string(), |p| p.display().to_string());
    let mode = if model.editing {
        "EDIT"
    } else if model.buffer.is_editable() {
        "RW"
    } else {
        "RO"
    };
    let right = format!(
        "{mode} {}  {}",
        model.pane.label(),
        format_address(model.buffer.cursor())
    );
    format!("    {path:<36}{right:>40}")
}

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let bar = Paragraph::new(status_text(model)).style(style::status());
    frame.render_widget(bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => ("[info]", Style::default().bg(Color::DarkGray).fg(Color::White)),
        ToastLevel::Warning => ("[warn]", Style::default().bg(Color::Yellow).fg(Color::Black)),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
