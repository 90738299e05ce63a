//! Body rows of the hex and text views.

use ratatui::prelude::*;

use crate::app::{Model, Nibble, format_address};

use super::style;

/// Column of the comment callout, one space into the first hex pair.
pub const COMMENT_COLUMN: u16 = 20;

const fn is_printable(byte: u8) -> bool {
    byte.wrapping_sub(0x20) < 0x5f
}

/// Whether `address` is under the cursor or inside the selection.
fn is_marked(model: &Model, address: usize) -> bool {
    let cursor = model.buffer.cursor();
    address == cursor || model.buffer.selection().contains(cursor, address)
}

fn byte_style(model: &Model, address: usize) -> Style {
    if !model.editing && is_marked(model, address) {
        return style::selected();
    }
    model
        .buffer
        .highlight_at(address)
        .map_or_else(style::standard, |h| style::highlight(h.color))
}

/// Style of the gap after `address`: it joins two neighbours only when both
/// sit in the selection or in the same highlight.
fn gap_style(model: &Model, address: usize) -> Style {
    let next = address + 1;
    let cursor = model.buffer.cursor();
    let selection = model.buffer.selection();
    if !model.editing {
        if selection.contains(cursor, address) && selection.contains(cursor, next) {
            return style::selected();
        }
        if is_marked(model, address) || is_marked(model, next) {
            return style::standard();
        }
    }
    match model.buffer.highlight_at(address) {
        Some(h) if h.contains(next) => style::highlight(h.color),
        _ => style::standard(),
    }
}

/// Rows of the hex view, top of the viewport first.
pub fn hex_lines(model: &Model) -> Vec<Line<'static>> {
    let width = model.nav.row_width();
    let size = model.buffer.size();
    (0..model.nav.visible_rows())
        .map(|row| model.nav.top_address() + row * width)
        .take_while(|&address| address < size)
        .map(|address| hex_row(model, address, width))
        .collect()
}

fn hex_row(model: &Model, start: usize, width: usize) -> Line<'static> {
    let size = model.buffer.size();
    let cursor = model.buffer.cursor();
    let mut spans = vec![Span::styled(
        format!("{}:  ", format_address(start)),
        style::standard(),
    )];

    for column in 0..width {
        let address = start + column;
        let Some(byte) = model.buffer.byte_at(address) else {
            spans.push(Span::styled("   ", style::standard()));
            continue;
        };
        let base = byte_style(model, address);
        if model.editing && address == cursor {
            let (high, low) = match model.nibble {
                Nibble::High => (style::selected(), base),
                Nibble::Low => (base, style::selected()),
            };
            spans.push(Span::styled(format!("{:x}", byte >> 4), high));
            spans.push(Span::styled(format!("{:x}", byte & 0x0f), low));
        } else {
            spans.push(Span::styled(format!("{byte:02x}"), base));
        }
        let separator = if (column + 1) % 4 == 0 && column + 1 != width {
            "-"
        } else {
            " "
        };
        let gap = if column + 1 == width || address + 1 >= size {
            style::standard()
        } else {
            gap_style(model, address)
        };
        spans.push(Span::styled(separator, gap));
    }

    spans.push(Span::styled(" ", style::standard()));

    for column in 0..width {
        let address = start + column;
        let Some(byte) = model.buffer.byte_at(address) else {
            spans.push(Span::styled(" ", style::standard()));
            continue;
        };
        let glyph = if is_printable(byte) {
            char::from(byte)
        } else {
            '.'
        };
        let selected = address == cursor || (!model.editing && is_marked(model, address));
        let style = if selected {
            style::selected()
        } else {
            style::standard()
        };
        spans.push(Span::styled(glyph.to_string(), style));
    }

    Line::from(spans)
}

/// Rows of the text view. Unprintable bytes show as spaces.
pub fn text_lines(model: &Model) -> Vec<Line<'static>> {
    let width = model.nav.row_width();
    let size = model.buffer.size();
    (0..model.nav.visible_rows())
        .map(|row| model.nav.top_address() + row * width)
        .take_while(|&address| address < size)
        .map(|start| {
            let spans: Vec<Span<'static>> = model
                .buffer
                .row(start, width)
                .iter()
                .enumerate()
                .map(|(offset, &byte)| {
                    let glyph = if is_printable(byte) {
                        char::from(byte)
                    } else {
                        ' '
                    };
                    Span::styled(glyph.to_string(), byte_style(model, start + offset))
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

/// Screen row of the comment callout for the cursor, if it has a comment
/// and is on screen. `body_top` is the screen row of the first body row.
pub fn comment_row(model: &Model, body_top: u16, screen_height: u16) -> Option<(u16, String)> {
    let cursor = model.buffer.cursor();
    let text = model.buffer.comment(cursor)?;
    let row = u16::try_from(model.nav.viewport_row(cursor)?).ok()?;
    let y = body_top + row;
    let y = if y + 5 >= screen_height {
        y.checked_sub(3)?
    } else {
        y + 3
    };
    Some((y, format!("; {text}")))
}
