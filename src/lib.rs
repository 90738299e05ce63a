// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. buffer::BufferError)
    clippy::module_name_repetitions
)]

//! # Hexlens
//!
//! A terminal binary file inspector.
//!
//! Hexlens shows a file in the terminal with:
//! - Hex and text views over the same bytes
//! - In-place nibble editing through a writable memory map
//! - Selection, highlights, comments and a bookmark stack
//! - An expression calculator that can read integers at the cursor
//!
//! ## Architecture
//!
//! Hexlens uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`buffer`]: File bytes and session metadata
//! - [`calc`]: Expression calculator
//! - [`config`]: Saved command-line defaults
//! - [`nav`]: Cursor and scroll policy
//! - [`ui`]: Terminal UI components

pub mod app;
pub mod buffer;
pub mod calc;
pub mod config;
pub mod nav;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model, PaneKind};
    pub use crate::buffer::{Buffer, BufferError};
    pub use crate::calc::{CalcError, evaluate};
    pub use crate::nav::{Movement, Navigator};
}
