use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, PaneKind};

use super::{overlays, panes, status, style};

/// Split the screen into status bar, body and options bar.
pub fn split_rows(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area)
}

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let chunks = split_rows(area);

    status::render_status_bar(model, frame, chunks[0]);
    render_body(model, frame, chunks[1]);
    if model.active_toast().is_some() {
        status::render_toast_bar(model, frame, chunks[2]);
    } else {
        status::render_options_bar(model, frame, chunks[2]);
    }

    if let Some(prompt) = &model.prompt {
        overlays::render_prompt(prompt, frame, area);
    }
}

fn render_body(model: &Model, frame: &mut Frame, area: Rect) {
    let lines = match model.pane {
        PaneKind::Hex => panes::hex_lines(model),
        PaneKind::Text => panes::text_lines(model),
    };
    frame.render_widget(Paragraph::new(lines).style(style::standard()), area);

    if model.pane == PaneKind::Hex
        && let Some((y, text)) = panes::comment_row(model, area.y, frame.area().height)
        && y >= area.y
        && y < area.y + area.height
    {
        let x = area.x + panes::COMMENT_COLUMN;
        let width = area.width.saturating_sub(panes::COMMENT_COLUMN);
        let callout = Rect::new(x, y, width, 1);
        frame.render_widget(Paragraph::new(text).style(style::selected()), callout);
    }
}
