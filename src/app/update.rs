use tracing::debug;

use crate::app::Model;
use crate::buffer::HighlightColor;
use crate::calc::{self, Readout};
use crate::nav::{self, Movement};

use super::model::{Nibble, PaneKind, ToastLevel};
use super::prompt::{LineInput, NamesMenu, Prompt};

/// All possible events and actions in the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Navigation
    /// Move the cursor (nibble-wise for Left/Right while editing)
    Move(Movement),
    /// Advance the selection marks at the cursor
    ToggleSelection,
    /// Switch between the hex and text views
    SwitchPane,

    // Hex editing
    /// Enter hex edit mode, upgrading the buffer to writable if needed
    RequestEdit,
    /// Leave hex edit mode
    ExitEdit,
    /// Overwrite the nibble under the edit cursor
    EditNibble(u8),

    // Metadata
    PushBookmark,
    PopBookmark,
    /// Highlight the selection, or the cursor byte when nothing is selected
    Highlight(HighlightColor),
    /// Remove the highlight starting at the cursor
    RemoveHighlight,

    // Prompts
    OpenCalculator,
    OpenGoto,
    OpenComment,
    OpenNames,
    /// Insert a character into the prompt input
    PromptInput(char),
    PromptBackspace,
    PromptDelete,
    PromptLeft,
    PromptRight,
    PromptHome,
    PromptEnd,
    /// Move the names menu selection up
    MenuUp,
    /// Move the names menu selection down
    MenuDown,
    PromptSubmit,
    PromptCancel,

    // Window
    /// Terminal resized
    Resize(u16, u16),
    /// Quit application
    Quit,
}

/// Pure-ish state transition: everything except reopening the file, which
/// is handled as a side effect after the update.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        Message::Move(movement) => move_cursor(&mut model, movement),
        Message::ToggleSelection => {
            if !model.editing {
                nav::toggle_selection(&mut model.buffer);
            }
        }
        Message::SwitchPane => {
            let next = model.pane.other();
            model.post(next);
        }

        Message::RequestEdit => {
            if model.pane == PaneKind::Hex && model.buffer.is_editable() {
                model.editing = true;
            }
        }
        Message::ExitEdit => {
            model.editing = false;
            model.nibble = Nibble::High;
        }
        Message::EditNibble(value) => edit_nibble(&mut model, value),

        Message::PushBookmark => {
            let cursor = model.buffer.cursor();
            model.buffer.bookmark_push(cursor);
        }
        Message::PopBookmark => match model.buffer.bookmark_pop() {
            Ok(address) => model.jump(address),
            Err(err) => model.show_toast(ToastLevel::Info, err.to_string()),
        },
        Message::Highlight(color) => highlight_selection(&mut model, color),
        Message::RemoveHighlight => {
            let cursor = model.buffer.cursor();
            model.buffer.highlight(cursor, 0, HighlightColor::Blue);
        }

        Message::OpenCalculator => model.prompt = Some(Prompt::calculator()),
        Message::OpenGoto => model.prompt = Some(Prompt::goto()),
        Message::OpenComment => {
            let cursor = model.buffer.cursor();
            model.prompt = Some(Prompt::comment(cursor, model.buffer.comment(cursor)));
        }
        Message::OpenNames => {
            let menu = NamesMenu::new(model.buffer.comments());
            match menu {
                Some(menu) => model.prompt = Some(Prompt::Names(menu)),
                None => model.show_toast(ToastLevel::Error, "No names."),
            }
        }
        Message::PromptInput(c) => edit_input(&mut model, |input| input.insert(c)),
        Message::PromptBackspace => edit_input(&mut model, LineInput::backspace),
        Message::PromptDelete => edit_input(&mut model, LineInput::delete),
        Message::PromptLeft => edit_input(&mut model, LineInput::left),
        Message::PromptRight => edit_input(&mut model, LineInput::right),
        Message::PromptHome => edit_input(&mut model, LineInput::home),
        Message::PromptEnd => edit_input(&mut model, LineInput::end),
        Message::MenuUp => {
            if let Some(Prompt::Names(menu)) = model.prompt.as_mut() {
                menu.up();
            }
        }
        Message::MenuDown => {
            if let Some(Prompt::Names(menu)) = model.prompt.as_mut() {
                menu.down();
            }
        }
        Message::PromptSubmit => submit_prompt(&mut model),
        Message::PromptCancel => model.prompt = None,

        Message::Resize(width, height) => model.resize(width, height),
        Message::Quit => model.should_quit = true,
    }
    model
}

fn move_cursor(model: &mut Model, movement: Movement) {
    if !model.editing {
        model.nav.step(&mut model.buffer, movement);
        return;
    }

    let cursor = model.buffer.cursor();
    match (movement, model.nibble) {
        (Movement::Left, Nibble::Low) => {
            model.nibble = Nibble::High;
            model.nav.nudge_up(&model.buffer);
        }
        (Movement::Left, Nibble::High) => {
            if cursor > 0 {
                model.nav.step(&mut model.buffer, Movement::Left);
                model.nibble = Nibble::Low;
            } else {
                model.nav.nudge_up(&model.buffer);
            }
        }
        (Movement::Right, Nibble::High) => {
            model.nibble = Nibble::Low;
            model.nav.nudge_down(&model.buffer);
        }
        (Movement::Right, Nibble::Low) => {
            if cursor + 1 < model.buffer.size() {
                model.nav.step(&mut model.buffer, Movement::Right);
                model.nibble = Nibble::High;
            } else {
                model.nav.nudge_down(&model.buffer);
            }
        }
        (Movement::Home, _) => {
            model.nav.step(&mut model.buffer, movement);
            model.nibble = Nibble::High;
        }
        (Movement::End, _) => {
            model.nav.step(&mut model.buffer, movement);
            model.nibble = Nibble::Low;
        }
        _ => model.nav.step(&mut model.buffer, movement),
    }
}

fn edit_nibble(model: &mut Model, value: u8) {
    if !model.editing {
        return;
    }
    let cursor = model.buffer.cursor();
    let Some(byte) = model.buffer.byte_at(cursor) else {
        return;
    };
    let value = value & 0x0f;
    let byte = match model.nibble {
        Nibble::High => (value << 4) | (byte & 0x0f),
        Nibble::Low => (byte & 0xf0) | value,
    };
    if let Err(err) = model.buffer.write_byte(cursor, byte) {
        debug!(error = %err, "nibble write rejected");
        model.show_toast(ToastLevel::Error, err.to_string());
        return;
    }
    move_cursor(model, Movement::Right);
}

fn highlight_selection(model: &mut Model, color: HighlightColor) {
    let cursor = model.buffer.cursor();
    let range = model
        .buffer
        .selection()
        .range(cursor)
        .unwrap_or(cursor..=cursor);
    let size = range.end() - range.start() + 1;
    if !model.buffer.is_empty() {
        model.buffer.highlight(*range.start(), size, color);
    }
}

fn edit_input(model: &mut Model, edit: impl FnOnce(&mut LineInput)) {
    if let Some(input) = model.prompt.as_mut().and_then(Prompt::input_mut) {
        edit(input);
    }
}

fn submit_prompt(model: &mut Model) {
    let Some(prompt) = model.prompt.take() else {
        return;
    };
    match prompt {
        Prompt::Calculator { input, .. } => {
            let text = input.text();
            let result = calc::evaluate(&model.buffer, &text);
            if let Err(err) = &result {
                debug!(text, error = %err, "calculator evaluation failed");
            }
            model.prompt = Some(Prompt::Calculator {
                input,
                readout: Readout::new(result.ok()),
            });
        }
        Prompt::Goto { input } => {
            let text = input.text();
            match calc::evaluate(&model.buffer, &text) {
                Ok(value) => match usize::try_from(value) {
                    Ok(address) => model.jump(address),
                    Err(_) => {
                        model.show_toast(ToastLevel::Warning, format!("Negative address {value}"));
                        model.prompt = Some(Prompt::Goto { input });
                    }
                },
                Err(err) => {
                    debug!(text, error = %err, "goto expression failed");
                    model.show_toast(ToastLevel::Error, err.to_string());
                    model.prompt = Some(Prompt::Goto { input });
                }
            }
        }
        Prompt::Comment { address, input } => {
            let text = input.text();
            let text = text.trim_matches(' ');
            if text.is_empty() {
                model.buffer.remove_comment(address);
            } else {
                model.buffer.set_comment(address, text);
            }
        }
        Prompt::Names(menu) => {
            if let Some(address) = menu.selected_address() {
                model.jump(address);
            }
        }
    }
}
