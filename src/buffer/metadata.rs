//! Per-address annotations kept alongside the bytes: highlights and the
//! bookmark stack. Comments are a plain address-keyed map on the buffer.

/// Number of addresses the bookmark stack can hold.
pub const BOOKMARK_CAPACITY: usize = 8;

/// Colours a highlight can be drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightColor {
    Blue,
    White,
}

/// A coloured span of bytes, independent of cursor and selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    pub address: usize,
    pub size: usize,
    pub color: HighlightColor,
}

impl Highlight {
    /// Whether `address` falls inside this span.
    pub const fn contains(&self, address: usize) -> bool {
        address >= self.address && address - self.address < self.size
    }
}

/// Bounded LIFO of addresses.
///
/// Pushing onto a full stack is silently ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkStack {
    entries: Vec<usize>,
}

impl BookmarkStack {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Push `address`; returns `false` when the stack was already full.
    pub fn push(&mut self, address: usize) -> bool {
        if self.entries.len() >= BOOKMARK_CAPACITY {
            return false;
        }
        self.entries.push(address);
        true
    }

    pub fn pop(&mut self) -> Option<usize> {
        self.entries.pop()
    }

    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries from the bottom of the stack to the top.
    pub fn as_slice(&self) -> &[usize] {
        &self.entries
    }
}
