use std::time::{Duration, Instant};

use crate::buffer::Buffer;
use crate::config::StartView;
use crate::nav::Navigator;

use super::prompt::Prompt;

/// Bytes per row in the hex view.
pub const HEX_ROW_WIDTH: usize = 16;

/// Smallest terminal the hex view fits in.
pub const MIN_WIDTH: u16 = 86;
pub const MIN_HEIGHT: u16 = 24;

const TOAST_DURATION: Duration = Duration::from_secs(4);

/// Format an address as `.hhhhhhhh` + backtick + `llllllll`.
pub fn format_address(address: usize) -> String {
    let address = address as u64;
    format!(".{:08x}`{:08x}", address >> 32, address & 0xffff_ffff)
}

/// Which view is drawing the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneKind {
    Hex,
    Text,
}

impl PaneKind {
    /// Bytes per row for this view on a terminal `terminal_width` columns wide.
    pub fn row_width(self, terminal_width: u16) -> usize {
        match self {
            Self::Hex => HEX_ROW_WIDTH,
            Self::Text => usize::from(terminal_width).max(1),
        }
    }

    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Hex => Self::Text,
            Self::Text => Self::Hex,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Hex => "HEX",
            Self::Text => "TEXT",
        }
    }
}

impl From<StartView> for PaneKind {
    fn from(view: StartView) -> Self {
        match view {
            StartView::Hex => Self::Hex,
            StartView::Text => Self::Text,
        }
    }
}

/// Half of the byte under the cursor addressed in hex edit mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Nibble {
    #[default]
    High,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
#[derive(Debug)]
pub struct Model {
    /// The open file and its session metadata
    pub buffer: Buffer,
    /// The view currently posted
    pub pane: PaneKind,
    /// Scroll state of the posted view
    pub nav: Navigator,
    /// Whether hex edit mode is active
    pub editing: bool,
    /// Nibble under the edit cursor
    pub nibble: Nibble,
    /// Active modal prompt, if any
    pub prompt: Option<Prompt>,
    toast: Option<Toast>,
    /// Whether the app should quit
    pub should_quit: bool,
    width: u16,
    height: u16,
}

impl Model {
    /// Create a model posting `pane` over `buffer`, centred on its cursor.
    pub fn new(mut buffer: Buffer, pane: PaneKind, size: (u16, u16)) -> Self {
        let (width, height) = size;
        let nav = Navigator::post(&mut buffer, pane.row_width(width), usize::from(height));
        Self {
            buffer,
            pane,
            nav,
            editing: false,
            nibble: Nibble::High,
            prompt: None,
            toast: None,
            should_quit: false,
            width,
            height,
        }
    }

    pub const fn width(&self) -> u16 {
        self.width
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Replace the posted view, recentring the new one on the cursor.
    pub(super) fn post(&mut self, pane: PaneKind) {
        self.pane = pane;
        self.editing = false;
        self.nibble = Nibble::High;
        self.nav = Navigator::post(
            &mut self.buffer,
            pane.row_width(self.width),
            usize::from(self.height),
        );
    }

    /// Recentre the view on `address`.
    pub(super) fn jump(&mut self, address: usize) {
        self.nav.jump(&mut self.buffer, address);
        self.nibble = Nibble::High;
    }

    pub(super) fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.nav.resize(
            &mut self.buffer,
            self.pane.row_width(width),
            usize::from(height),
        );
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + TOAST_DURATION,
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(Buffer::default(), PaneKind::Hex, (MIN_WIDTH, MIN_HEIGHT))
    }
}
