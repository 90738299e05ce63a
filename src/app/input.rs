use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Frame;

use crate::app::{App, Message, Model};
use crate::buffer::HighlightColor;
use crate::nav::Movement;

use super::event_loop::ResizeDebouncer;
use super::prompt::Prompt;

/// How long a lone Escape waits for a follow-up byte before it counts as a
/// cancel.
pub const ESCAPE_LOOKAHEAD: Duration = Duration::from_millis(15);

/// Where terminal events come from.
pub trait EventSource {
    /// Wait up to `timeout` for an event to become readable.
    fn poll(&mut self, timeout: Duration) -> io::Result<bool>;
    /// Read the next event, blocking if necessary.
    fn read(&mut self) -> io::Result<Event>;
}

/// The real terminal, via crossterm.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalEvents;

impl EventSource for TerminalEvents {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        event::poll(timeout)
    }

    fn read(&mut self) -> io::Result<Event> {
        event::read()
    }
}

impl App {
    pub(super) fn handle_event(
        event: Event,
        model: &Model,
        source: &mut impl EventSource,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> io::Result<Option<Message>> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Press => Ok(None),
            Event::Key(key) if key.code == KeyCode::Esc => {
                // A follow-up means this Escape opened a longer sequence:
                // hand the follow-up on instead of cancelling.
                if source.poll(ESCAPE_LOOKAHEAD)? {
                    let next = source.read()?;
                    return Self::handle_event(next, model, source, now_ms, resize_debouncer);
                }
                Ok(Self::handle_key(key, model))
            }
            Event::Key(key) => Ok(Self::handle_key(key, model)),
            Event::Resize(w, h) => {
                tracing::trace!(width = w, height = h, "resize queued");
                resize_debouncer.queue(w, h, now_ms);
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Message::Quit);
        }

        match &model.prompt {
            Some(Prompt::Names(_)) => return Self::handle_menu_key(key),
            Some(_) => return Self::handle_prompt_key(key),
            None => {}
        }

        if model.editing
            && let KeyCode::Char(c) = key.code
            && let Some(value) = hex_digit(c)
        {
            return Some(Message::EditNibble(value));
        }

        match key.code {
            KeyCode::F(10) => Some(Message::Quit),
            KeyCode::Left | KeyCode::Char('h') => Some(Message::Move(Movement::Left)),
            KeyCode::Right | KeyCode::Char('l') => Some(Message::Move(Movement::Right)),
            KeyCode::Up | KeyCode::Char('k') => Some(Message::Move(Movement::Up)),
            KeyCode::Down | KeyCode::Char('j') => Some(Message::Move(Movement::Down)),
            KeyCode::PageUp => Some(Message::Move(Movement::PageUp)),
            KeyCode::PageDown => Some(Message::Move(Movement::PageDown)),
            KeyCode::Home => Some(Message::Move(Movement::Home)),
            KeyCode::End => Some(Message::Move(Movement::End)),
            KeyCode::Char('v') => Some(Message::ToggleSelection),
            KeyCode::Enter => Some(Message::SwitchPane),
            KeyCode::F(3) => Some(Message::RequestEdit),
            KeyCode::Esc if model.editing => Some(Message::ExitEdit),
            KeyCode::Char('+') => Some(Message::PushBookmark),
            KeyCode::Char('-') => Some(Message::PopBookmark),
            KeyCode::Char('m') => Some(Message::Highlight(HighlightColor::Blue)),
            KeyCode::Char('M') => Some(Message::Highlight(HighlightColor::White)),
            KeyCode::Char('u') => Some(Message::RemoveHighlight),
            KeyCode::Char('=') => Some(Message::OpenCalculator),
            KeyCode::Char(';') => Some(Message::OpenComment),
            KeyCode::F(5) => Some(Message::OpenGoto),
            KeyCode::F(9) => Some(Message::OpenNames),
            _ => None,
        }
    }

    fn handle_prompt_key(key: KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::Esc => Some(Message::PromptCancel),
            KeyCode::Enter => Some(Message::PromptSubmit),
            KeyCode::Backspace => Some(Message::PromptBackspace),
            KeyCode::Delete => Some(Message::PromptDelete),
            KeyCode::Left => Some(Message::PromptLeft),
            KeyCode::Right => Some(Message::PromptRight),
            KeyCode::Home => Some(Message::PromptHome),
            KeyCode::End => Some(Message::PromptEnd),
            KeyCode::Char(c) if !c.is_control() => Some(Message::PromptInput(c)),
            _ => None,
        }
    }

    fn handle_menu_key(key: KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::Esc => Some(Message::PromptCancel),
            KeyCode::Enter => Some(Message::PromptSubmit),
            KeyCode::Up | KeyCode::Char('k') => Some(Message::MenuUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Message::MenuDown),
            _ => None,
        }
    }

    pub(super) fn view(model: &Model, frame: &mut Frame) {
        crate::ui::render(model, frame);
    }
}

/// Value of a lowercase hex digit.
fn hex_digit(c: char) -> Option<u8> {
    match c {
        '0'..='9' | 'a'..='f' => c.to_digit(16).and_then(|d| u8::try_from(d).ok()),
        _ => None,
    }
}
