use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::app::{LineInput, NamesMenu, Prompt};

use super::style;

/// Width of the input prompts, borders included.
const PROMPT_WIDTH: u16 = 72;
/// Width of the names menu, borders included.
const MENU_WIDTH: u16 = 64;

pub fn render_prompt(prompt: &Prompt, frame: &mut Frame, area: Rect) {
    match prompt {
        Prompt::Names(menu) => render_names(menu, frame, area),
        Prompt::Calculator { input, readout } => {
            let mut lines = vec![input_line(input, PROMPT_WIDTH.saturating_sub(2))];
            lines.extend(
                readout
                    .lines()
                    .into_iter()
                    .map(|line| Line::raw(line.to_string())),
            );
            render_box(&prompt.title(), lines, PROMPT_WIDTH, frame, area);
        }
        Prompt::Goto { input } | Prompt::Comment { input, .. } => {
            let lines = vec![input_line(input, PROMPT_WIDTH.saturating_sub(2))];
            render_box(&prompt.title(), lines, PROMPT_WIDTH, frame, area);
        }
    }
}

fn render_box(title: &str, lines: Vec<Line<'static>>, width: u16, frame: &mut Frame, area: Rect) {
    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2);
    let popup = centered_popup_rect(width, height, area);
    let block = Block::default()
        .title(Line::from(format!(" {title} ")).centered())
        .borders(Borders::ALL)
        .style(style::prompt());
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

/// The input text with the caret cell reversed, scrolled so the caret stays
/// inside `width` columns.
fn input_line(input: &LineInput, width: u16) -> Line<'static> {
    let text: Vec<char> = input.text().chars().collect();
    let caret = input.caret();
    let visible = usize::from(width).max(1);
    let skip = (caret + 1).saturating_sub(visible);

    let before: String = text[skip..caret].iter().collect();
    let at = text.get(caret).copied().unwrap_or(' ');
    let after: String = text.iter().skip(caret + 1).collect();
    Line::from(vec![
        Span::raw(before),
        Span::styled(at.to_string(), style::caret()),
        Span::raw(after),
    ])
}

fn render_names(menu: &NamesMenu, frame: &mut Frame, area: Rect) {
    let rows = usize::from(area.height.saturating_sub(6)).max(1);
    let start = (menu.selected() + 1).saturating_sub(rows);
    let lines: Vec<Line<'static>> = menu
        .entries()
        .iter()
        .enumerate()
        .skip(start)
        .take(rows)
        .map(|(index, entry)| {
            if index == menu.selected() {
                Line::styled(entry.label.clone(), style::selected())
            } else {
                Line::raw(entry.label.clone())
            }
        })
        .collect();
    render_box("Names", lines, MENU_WIDTH, frame, area);
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
