use tracing::info;

use crate::app::{App, Message, Model, ToastLevel};

use super::model::PaneKind;

/// Shown when the file cannot be reopened for writing.
pub const NOT_WRITABLE_MESSAGE: &str = "The file could not be opened as writable.";

impl App {
    /// Perform the I/O a message needs after [`update`](super::update) ran.
    pub(super) fn handle_message_side_effects(model: &mut Model, msg: &Message) {
        if let Message::RequestEdit = msg {
            Self::enter_edit_mode(model);
        }
    }

    /// Upgrade a read-only buffer so hex edit mode can start.
    fn enter_edit_mode(model: &mut Model) {
        if model.pane != PaneKind::Hex || model.editing {
            return;
        }
        match model.buffer.try_upgrade_writable() {
            Ok(()) => {
                info!("hex edit mode entered after writable upgrade");
                model.editing = true;
            }
            Err(err) => {
                info!(error = %err, "hex edit mode refused");
                model.show_toast(ToastLevel::Error, NOT_WRITABLE_MESSAGE);
            }
        }
    }
}
