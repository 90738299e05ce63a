use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use ratatui::DefaultTerminal;
use tracing::{debug, info};

use crate::app::{App, Message, Model, update};
use crate::buffer::Buffer;

use super::input::{EventSource, TerminalEvents};

/// Coalesces bursts of resize events into the last one.
pub(super) struct ResizeDebouncer {
    delay_ms: u64,
    pending: Option<(u16, u16, u64)>,
}

impl ResizeDebouncer {
    pub(super) const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub(super) const fn queue(&mut self, width: u16, height: u16, now_ms: u64) {
        self.pending = Some((width, height, now_ms));
    }

    pub(super) fn take_ready(&mut self, now_ms: u64) -> Option<(u16, u16)> {
        let (width, height, queued_at) = self.pending?;
        if now_ms.saturating_sub(queued_at) >= self.delay_ms {
            self.pending = None;
            Some((width, height))
        } else {
            None
        }
    }

    pub(super) const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl App {
    /// Open the file, run the main event loop and close the buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, the terminal cannot be
    /// initialized, the event loop hits an I/O failure, or flushing the
    /// buffer on close fails.
    pub fn run(&mut self) -> Result<()> {
        let buffer = if self.writable {
            Buffer::open(&self.file_path)
        } else {
            Buffer::open_readonly(&self.file_path)
        }
        .with_context(|| format!("cannot open {}", self.file_path.display()))?;

        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal - hexlens requires an interactive terminal")?;
        let size = terminal.size()?;

        let mut model = Model::new(buffer, self.start_view, (size.width, size.height));
        let result = Self::event_loop(&mut terminal, &mut model, &mut TerminalEvents);

        ratatui::restore();

        let buffer = std::mem::take(&mut model.buffer);
        let closed = buffer.close().context("cannot close buffer");
        result.and(closed)
    }

    pub(super) fn event_loop(
        terminal: &mut DefaultTerminal,
        model: &mut Model,
        source: &mut impl EventSource,
    ) -> Result<()> {
        let start = Instant::now();
        let mut resize_debouncer = ResizeDebouncer::new(100);
        let mut needs_render = true;

        loop {
            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            let now_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
            if let Some((width, height)) = resize_debouncer.take_ready(now_ms) {
                debug!(width, height, "resize applied");
                *model = update(std::mem::take(model), Message::Resize(width, height));
                needs_render = true;
            }

            if needs_render {
                terminal.draw(|frame| Self::view(model, frame))?;
                needs_render = false;
            }

            let poll_ms = if resize_debouncer.is_pending() { 10 } else { 250 };
            if source.poll(Duration::from_millis(poll_ms))? {
                let event_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                let event = source.read()?;
                let msg =
                    Self::handle_event(event, model, source, event_ms, &mut resize_debouncer)?;
                if let Some(msg) = msg {
                    Self::dispatch(model, msg);
                    needs_render = true;
                }
            }

            if model.should_quit {
                info!("quit requested");
                break;
            }
        }
        Ok(())
    }

    /// Apply `msg` to the model, then run its side effects.
    pub(super) fn dispatch(model: &mut Model, msg: Message) {
        let side_msg = msg.clone();
        *model = update(std::mem::take(model), msg);
        Self::handle_message_side_effects(model, &side_msg);
    }
}
