//! Cursor movement and viewport scrolling shared by the hex and text views.
//!
//! Two policies live here:
//! - [`recentre`] places a target address in the vertical middle of the
//!   viewport. Jumps (goto, bookmarks, names) and posting a view use it.
//! - [`Navigator::step`] moves the cursor incrementally and nudges the
//!   viewport by at most one row when the cursor enters the two-row margin
//!   at either edge. Page and home/end moves reposition the viewport
//!   directly.
//!
//! Scroll positions are measured in rows of `row_width` bytes. The viewport
//! height includes the status and options bars, so a view of height `h`
//! shows `h - 2` rows and pages by `h - 3`.

mod selection;

pub use selection::Selection;

use crate::buffer::Buffer;

/// Rows taken by the status bar and the options bar.
pub const RESERVED_ROWS: usize = 2;

/// Rows kept between the cursor and a viewport edge before nudging.
const EDGE_MARGIN_ROWS: usize = 2;

/// A single navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Left,
    Right,
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
}

/// Scroll needed to centre `target` and, as a side effect, move the
/// buffer's cursor there (clamped to the buffer).
pub fn recentre(
    buffer: &mut Buffer,
    target: usize,
    row_width: usize,
    viewport_height: usize,
) -> usize {
    let row_width = row_width.max(1);
    let rows = viewport_height.saturating_sub(RESERVED_ROWS);
    let middle = rows / 2;

    let row = target / row_width;
    let scroll = row
        .saturating_sub(middle)
        .min(max_scroll(buffer.size(), row_width, viewport_height));

    buffer.set_cursor(target);
    scroll
}

/// Largest scroll at which the last page of the buffer is still shown.
pub const fn max_scroll(size: usize, row_width: usize, viewport_height: usize) -> usize {
    (size / row_width).saturating_sub(page_rows(viewport_height))
}

const fn page_rows(viewport_height: usize) -> usize {
    viewport_height.saturating_sub(RESERVED_ROWS + 1)
}

/// Viewport state for one view over a buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    scroll: usize,
    row_width: usize,
    height: usize,
}

impl Navigator {
    /// Create a navigator scrolled to the top.
    pub fn new(row_width: usize, height: usize) -> Self {
        Self {
            scroll: 0,
            row_width: row_width.max(1),
            height,
        }
    }

    /// Create a navigator centred on the buffer's current cursor.
    pub fn post(buffer: &mut Buffer, row_width: usize, height: usize) -> Self {
        let mut nav = Self::new(row_width, height);
        let cursor = buffer.cursor();
        nav.jump(buffer, cursor);
        nav
    }

    /// Topmost visible row.
    pub const fn scroll(&self) -> usize {
        self.scroll
    }

    pub const fn row_width(&self) -> usize {
        self.row_width
    }

    /// Full viewport height, including the two bar rows.
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of buffer rows drawn in the body.
    pub const fn visible_rows(&self) -> usize {
        self.height.saturating_sub(RESERVED_ROWS)
    }

    /// Rows moved by a page up/down.
    pub const fn page_rows(&self) -> usize {
        page_rows(self.height)
    }

    /// First address shown in the viewport.
    pub const fn top_address(&self) -> usize {
        self.scroll.saturating_mul(self.row_width)
    }

    /// Row of `address` relative to the top of the viewport, if visible.
    pub const fn viewport_row(&self, address: usize) -> Option<usize> {
        let row = address / self.row_width;
        if row < self.scroll || row - self.scroll >= self.visible_rows() {
            None
        } else {
            Some(row - self.scroll)
        }
    }

    /// Centre the viewport on `target` and move the cursor there.
    pub fn jump(&mut self, buffer: &mut Buffer, target: usize) {
        self.scroll = recentre(buffer, target, self.row_width, self.height);
    }

    /// Change geometry (e.g. after a terminal resize) and recentre on the
    /// cursor.
    pub fn resize(&mut self, buffer: &mut Buffer, row_width: usize, height: usize) {
        self.row_width = row_width.max(1);
        self.height = height;
        let cursor = buffer.cursor();
        self.jump(buffer, cursor);
    }

    /// Apply one movement to the buffer's cursor and adjust the scroll.
    pub fn step(&mut self, buffer: &mut Buffer, movement: Movement) {
        let width = self.row_width;
        let size = buffer.size();
        let cursor = buffer.cursor();

        match movement {
            Movement::Left => {
                buffer.set_cursor(cursor.saturating_sub(1));
                self.nudge_up(buffer);
            }
            Movement::Right => {
                if cursor + 1 < size {
                    buffer.set_cursor(cursor + 1);
                }
                self.nudge_down(buffer);
            }
            Movement::Up => {
                buffer.set_cursor(cursor.saturating_sub(width));
                self.nudge_up(buffer);
            }
            Movement::Down => {
                if cursor.saturating_add(width) < size {
                    buffer.set_cursor(cursor + width);
                } else {
                    buffer.set_cursor(buffer.last_address());
                }
                self.nudge_down(buffer);
            }
            Movement::PageUp => {
                let page = self.page_rows();
                if self.scroll < page {
                    self.scroll = 0;
                    buffer.set_cursor(0);
                } else {
                    self.scroll -= page;
                    buffer.set_cursor(self.top_address());
                }
            }
            Movement::PageDown => {
                let next = self.scroll + self.page_rows();
                if next > max_scroll(size, width, self.height) {
                    self.go_to_end(buffer);
                } else {
                    self.scroll = next;
                    buffer.set_cursor(self.top_address());
                }
            }
            Movement::Home => {
                self.scroll = 0;
                buffer.set_cursor(0);
            }
            Movement::End => self.go_to_end(buffer),
        }
    }

    fn go_to_end(&mut self, buffer: &mut Buffer) {
        self.scroll = max_scroll(buffer.size(), self.row_width, self.height);
        buffer.set_cursor(buffer.last_address());
    }

    /// Scroll up one row if the cursor sits within the top margin.
    pub fn nudge_up(&mut self, buffer: &Buffer) {
        let row_start = self.row_start(buffer.cursor());
        let margin_end = self.top_address() + EDGE_MARGIN_ROWS * self.row_width;
        if row_start < margin_end && self.scroll > 0 {
            self.scroll -= 1;
        }
    }

    /// Scroll down one row if the cursor sits within the bottom margin.
    pub fn nudge_down(&mut self, buffer: &Buffer) {
        let row_start = self.row_start(buffer.cursor());
        let bottom = self.top_address() + self.page_rows() * self.row_width;
        let in_margin = row_start + EDGE_MARGIN_ROWS * self.row_width > bottom;
        if in_margin && self.scroll + self.page_rows() < buffer.size() / self.row_width {
            self.scroll += 1;
        }
    }

    const fn row_start(&self, address: usize) -> usize {
        address - address % self.row_width
    }
}

/// Toggle the buffer's selection through `None -> Anchored -> Closed -> None`,
/// marking at the current cursor.
pub fn toggle_selection(buffer: &mut Buffer) {
    let next = buffer.selection().toggle(buffer.cursor());
    buffer.set_selection(next);
}
