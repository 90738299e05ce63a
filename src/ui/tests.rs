use super::*;
use crate::app::{Message, Model, PaneKind, update};
use crate::buffer::{Buffer, HighlightColor};
use ratatui::Terminal;
use ratatui::backend::TestBackend;

const TEST_DATA: [u8; 8] = [0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef];

fn create_test_terminal() -> Terminal<TestBackend> {
    let backend = TestBackend::new(86, 24);
    Terminal::new(backend).unwrap()
}

fn create_test_model(data: &[u8], pane: PaneKind) -> Model {
    Model::new(Buffer::from_bytes(data), pane, (86, 24))
}

fn draw(model: &Model) -> Terminal<TestBackend> {
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(model, frame)).unwrap();
    terminal
}

fn row_text(terminal: &Terminal<TestBackend>, row: u16) -> String {
    let buffer = terminal.backend().buffer();
    (0..buffer.area.width)
        .map(|col| buffer[(col, row)].symbol())
        .collect()
}

fn screen_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    (0..buffer.area.height)
        .map(|row| row_text(terminal, row))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_split_rows_reserves_bars() {
    let chunks = split_rows(ratatui::layout::Rect::new(0, 0, 86, 24));
    assert_eq!(chunks[0].height, 1);
    assert_eq!(chunks[1].height, 22);
    assert_eq!(chunks[2].y, 23);
}

#[test]
fn test_status_text_layout() {
    let model = create_test_model(&TEST_DATA, PaneKind::Hex);
    let text = status_text(&model);
    assert_eq!(text.len(), 80);
    assert!(text.starts_with("    <memory>"));
    assert!(text.ends_with("RO HEX  .00000000`00000000"));
}

#[test]
fn test_status_text_follows_cursor_and_view() {
    let model = create_test_model(&TEST_DATA, PaneKind::Text);
    let model = update(model, Message::Move(crate::nav::Movement::End));
    assert!(status_text(&model).ends_with("RO TEXT  .00000000`00000007"));
}

#[test]
fn test_option_labels_per_view() {
    let hex = create_test_model(&TEST_DATA, PaneKind::Hex);
    let labels = option_labels(&hex);
    assert_eq!(labels[2], "Edit  ");
    assert_eq!(labels[4], "Goto  ");
    assert_eq!(labels[8], "Names ");
    assert_eq!(labels[9], "Quit  ");
    assert_eq!(labels[0], "      ");

    let text = create_test_model(&TEST_DATA, PaneKind::Text);
    assert_eq!(option_labels(&text)[2], "      ");

    let prompting = update(hex, Message::OpenGoto);
    let labels = option_labels(&prompting);
    assert_eq!(labels[4], "      ");
    assert_eq!(labels[9], "Quit  ");
}

#[test]
fn test_options_bar_renders_key_numbers() {
    let model = create_test_model(&TEST_DATA, PaneKind::Hex);
    let terminal = draw(&model);
    let bar = row_text(&terminal, 23);
    assert!(bar.starts_with(" 1       2       3Edit   4       5Goto  "));
    assert!(bar.contains("10Quit  "));
}

#[test]
fn test_hex_row_format() {
    let model = create_test_model(&TEST_DATA, PaneKind::Hex);
    let terminal = draw(&model);
    let row = row_text(&terminal, 1);
    assert!(row.starts_with(".00000000`00000000:  01 23 45 67-89 ab cd ef"));
    assert_eq!(&row[70..78], ".#Eg....");
    assert_eq!(row.len(), 86);
}

#[test]
fn test_hex_lines_stop_at_end_of_buffer() {
    let data = vec![0x41; 40];
    let model = create_test_model(&data, PaneKind::Hex);
    assert_eq!(hex_lines(&model).len(), 3);
}

#[test]
fn test_hex_row_separators_every_four_bytes() {
    let data: Vec<u8> = (0..16).collect();
    let model = create_test_model(&data, PaneKind::Hex);
    let terminal = draw(&model);
    let row = row_text(&terminal, 1);
    assert!(row.contains("00 01 02 03-04 05 06 07-08 09 0a 0b-0c 0d 0e 0f "));
}

#[test]
fn test_cursor_byte_uses_selected_style() {
    let model = create_test_model(&TEST_DATA, PaneKind::Hex);
    let terminal = draw(&model);
    let buffer = terminal.backend().buffer();
    assert_eq!(buffer[(21, 1)].style(), style::selected());
    assert_eq!(buffer[(24, 1)].style(), style::standard());
    assert_eq!(buffer[(70, 1)].style(), style::selected());
}

#[test]
fn test_highlight_colors_hex_and_text() {
    let model = create_test_model(&TEST_DATA, PaneKind::Hex);
    let model = update(model, Message::Move(crate::nav::Movement::Right));
    let model = update(model, Message::Highlight(HighlightColor::White));
    let model = update(model, Message::Move(crate::nav::Movement::Right));
    let terminal = draw(&model);
    let hex_cell = terminal.backend().buffer()[(24, 1)].style();
    assert_eq!(hex_cell, style::highlight(HighlightColor::White));

    let model = update(model, Message::SwitchPane);
    let terminal = draw(&model);
    let text_cell = terminal.backend().buffer()[(1, 1)].style();
    assert_eq!(text_cell, style::highlight(HighlightColor::White));
}

#[test]
fn test_text_view_blanks_unprintable_bytes() {
    let model = create_test_model(b"Hi\x00there\x7f!", PaneKind::Text);
    let lines = text_lines(&model);
    assert_eq!(lines.len(), 1);
    let terminal = draw(&model);
    assert!(row_text(&terminal, 1).starts_with("Hi there !"));
}

#[test]
fn test_text_view_wraps_at_terminal_width() {
    let data = vec![b'x'; 200];
    let model = create_test_model(&data, PaneKind::Text);
    assert_eq!(text_lines(&model).len(), 3);
}

#[test]
fn test_comment_callout_below_cursor() {
    let mut model = create_test_model(&TEST_DATA, PaneKind::Hex);
    model.buffer.set_comment(0, "entry point");
    let terminal = draw(&model);
    let row = row_text(&terminal, 4);
    assert_eq!(&row[20..33], "; entry point");
}

#[test]
fn test_comment_callout_hidden_in_text_view() {
    let mut model = create_test_model(&TEST_DATA, PaneKind::Text);
    model.buffer.set_comment(0, "entry point");
    let terminal = draw(&model);
    assert!(!screen_text(&terminal).contains("entry point"));
}

#[test]
fn test_comment_callout_above_cursor_near_bottom() {
    let data = vec![0_u8; 16 * 22];
    let model = create_test_model(&data, PaneKind::Hex);
    let mut model = update(model, Message::Move(crate::nav::Movement::End));
    let cursor = model.buffer.cursor();
    model.buffer.set_comment(cursor, "tail");
    let row = model.nav.viewport_row(cursor).unwrap();
    let y = u16::try_from(row).unwrap() + 1;
    let terminal = draw(&model);
    assert!(row_text(&terminal, y - 3)[20..].starts_with("; tail"));
}

#[test]
fn test_calculator_prompt_shows_readout() {
    let model = create_test_model(&TEST_DATA, PaneKind::Hex);
    let model = update(model, Message::OpenCalculator);
    let terminal = draw(&model);
    let screen = screen_text(&terminal);
    assert!(screen.contains(" Calculator "));
    assert!(screen.contains("Sig:0"));
    assert!(screen.contains("Hex:00000000`00000000"));
}

#[test]
fn test_comment_prompt_title_has_address() {
    let model = create_test_model(&TEST_DATA, PaneKind::Hex);
    let model = update(model, Message::OpenComment);
    let terminal = draw(&model);
    assert!(screen_text(&terminal).contains("Comment at offset .00000000`00000000"));
}

#[test]
fn test_names_menu_lists_comments() {
    let mut model = create_test_model(&TEST_DATA, PaneKind::Hex);
    model.buffer.set_comment(5, "five");
    model.buffer.set_comment(2, "two");
    let model = update(model, Message::OpenNames);
    let terminal = draw(&model);
    let screen = screen_text(&terminal);
    let two = screen.find("00000002  two").unwrap();
    let five = screen.find("00000005  five").unwrap();
    assert!(two < five);
}

#[test]
fn test_toast_replaces_options_bar() {
    let model = create_test_model(&TEST_DATA, PaneKind::Hex);
    let model = update(model, Message::PopBookmark);
    let terminal = draw(&model);
    let bar = row_text(&terminal, 23);
    assert!(bar.starts_with("[info] "));
    assert!(!bar.contains("Quit"));
}
