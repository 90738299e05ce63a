//! Terminal UI components.
//!
//! - [`render`]: status bar, body and options bar, plus any open prompt
//! - [`style`]: colors

pub mod style;

mod overlays;
mod panes;
mod render;
mod status;

pub use panes::{hex_lines, text_lines};
pub use render::{render, split_rows};
pub use status::{option_labels, status_text};

#[cfg(test)]
mod tests;
