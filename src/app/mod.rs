//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: State transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod prompt;
mod update;

pub use effects::NOT_WRITABLE_MESSAGE;
pub use input::{ESCAPE_LOOKAHEAD, EventSource, TerminalEvents};
pub use model::{
    HEX_ROW_WIDTH, MIN_HEIGHT, MIN_WIDTH, Model, Nibble, PaneKind, ToastLevel, format_address,
};
pub use prompt::{LineInput, NameEntry, NamesMenu, Prompt};
pub use update::{Message, update};

use std::path::PathBuf;

/// Main application struct: owns the startup options and runs the event loop.
pub struct App {
    file_path: PathBuf,
    writable: bool,
    start_view: PaneKind,
}

impl App {
    /// Create a new application for the given file.
    pub const fn new(file_path: PathBuf) -> Self {
        Self {
            file_path,
            writable: false,
            start_view: PaneKind::Hex,
        }
    }

    /// Open the file read-write at startup instead of read-only.
    pub const fn with_writable(mut self, writable: bool) -> Self {
        self.writable = writable;
        self
    }

    /// Choose the view posted at startup.
    pub const fn with_start_view(mut self, view: PaneKind) -> Self {
        self.start_view = view;
        self
    }
}
