//! The addressable byte view of a file and its session metadata.
//!
//! A [`Buffer`] owns the bytes (a memory map or an in-memory array), the
//! cursor, the selection marks, comments, highlights and the bookmark stack.
//! None of the metadata is ever written back to disk.
//!
//! Byte slices borrowed from a buffer cannot outlive a call to
//! [`Buffer::try_upgrade_writable`], which replaces the storage: re-read by
//! address after an upgrade instead of keeping references.

mod error;
mod metadata;
#[allow(unsafe_code)]
mod storage;

use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

pub use error::BufferError;
pub use metadata::{BOOKMARK_CAPACITY, BookmarkStack, Highlight, HighlightColor};

use crate::nav::Selection;
use storage::Storage;

/// A file (or byte array) presented as an addressable byte sequence.
#[derive(Debug)]
pub struct Buffer {
    storage: Storage,
    path: Option<PathBuf>,
    cursor: usize,
    selection: Selection,
    comments: HashMap<usize, String>,
    highlights: Vec<Highlight>,
    bookmarks: BookmarkStack,
}

macro_rules! typed_reads {
    ($($le:ident, $be:ident => $ty:ty;)*) => {
        $(
            #[doc = concat!("Read a little-endian `", stringify!($ty), "` at `address`.")]
            pub fn $le(&self, address: usize) -> Result<$ty, BufferError> {
                self.read_array(address).map(<$ty>::from_le_bytes)
            }

            #[doc = concat!("Read a big-endian `", stringify!($ty), "` at `address`.")]
            pub fn $be(&self, address: usize) -> Result<$ty, BufferError> {
                self.read_array(address).map(<$ty>::from_be_bytes)
            }
        )*
    };
}

impl Buffer {
    /// Open `path`, mapping it read-write when the file permits and falling
    /// back to a read-only map otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Io`] when the file can be neither opened nor
    /// mapped in either mode.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, BufferError> {
        let path = path.as_ref();
        match Self::map(path, true) {
            Ok(buffer) => Ok(buffer),
            Err(err) => {
                debug!(path = %path.display(), error = %err, "read-write open failed, retrying read-only");
                Self::map(path, false)
            }
        }
    }

    /// Open `path` for reading only.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Io`] when the file cannot be opened, stat'd or
    /// mapped.
    pub fn open_readonly(path: impl AsRef<Path>) -> Result<Self, BufferError> {
        Self::map(path.as_ref(), false)
    }

    fn map(path: &Path, writable: bool) -> Result<Self, BufferError> {
        let file = OpenOptions::new()
            .read(true)
            .write(writable)
            .open(path)
            .map_err(|e| BufferError::io(path, e))?;
        let storage = map_file(&file, path, writable)?;
        info!(
            path = %path.display(),
            size = storage.bytes().len(),
            writable,
            "opened buffer"
        );
        Ok(Self::with_storage(storage, Some(path.to_path_buf())))
    }

    /// Wrap an in-memory byte array. Such buffers have no path and can never
    /// be made writable.
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
        let bytes: Vec<u8> = data.into();
        Self::with_storage(Storage::Memory(bytes.into_boxed_slice()), None)
    }

    fn with_storage(storage: Storage, path: Option<PathBuf>) -> Self {
        Self {
            storage,
            path,
            cursor: 0,
            selection: Selection::None,
            comments: HashMap::new(),
            highlights: Vec::new(),
            bookmarks: BookmarkStack::new(),
        }
    }

    /// Release the underlying view, flushing pending writes of a writable map.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Io`] if the flush fails. The view is released
    /// either way.
    pub fn close(self) -> Result<(), BufferError> {
        let result = self.storage.flush();
        let path = self.path.unwrap_or_default();
        match result {
            Ok(()) => {
                debug!(path = %path.display(), "closed buffer");
                Ok(())
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "flush on close failed");
                Err(BufferError::io(path, err))
            }
        }
    }

    /// Reopen the backing file read-write and swap in the new map.
    ///
    /// On success every previously borrowed byte slice is gone (the borrow
    /// checker enforces this through `&mut self`). On failure the buffer is
    /// left exactly as it was. Already editable buffers succeed trivially.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::NotUpgradable`] for in-memory buffers, when the
    /// file cannot be reopened for writing, or when its size has changed.
    pub fn try_upgrade_writable(&mut self) -> Result<(), BufferError> {
        if self.is_editable() {
            return Ok(());
        }
        let Some(path) = self.path.as_deref() else {
            return Err(BufferError::NotUpgradable {
                reason: "buffer is not backed by a file".to_string(),
            });
        };
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|e| not_upgradable(path, &e.to_string()))?;
        let len = file
            .metadata()
            .map_err(|e| not_upgradable(path, &e.to_string()))?
            .len();
        if usize::try_from(len).ok() != Some(self.size()) {
            return Err(not_upgradable(path, "file size changed since it was opened"));
        }
        let storage =
            Storage::map_writable(&file, len).map_err(|e| not_upgradable(path, &e.to_string()))?;
        info!(path = %path.display(), "buffer upgraded to writable");
        self.storage = storage;
        Ok(())
    }

    /// Number of bytes in the buffer.
    pub fn size(&self) -> usize {
        self.storage.bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Path of the backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Whether [`write_byte`](Self::write_byte) is permitted.
    pub const fn is_editable(&self) -> bool {
        self.storage.is_writable()
    }

    /// Last valid address, or 0 for an empty buffer.
    pub fn last_address(&self) -> usize {
        self.size().saturating_sub(1)
    }

    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor to `address`, clamped to `[0, size - 1]`.
    pub fn set_cursor(&mut self, address: usize) {
        self.cursor = address.min(self.last_address());
    }

    pub const fn selection(&self) -> Selection {
        self.selection
    }

    pub const fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
    }

    /// Byte at `address`, if it is in bounds.
    pub fn byte_at(&self, address: usize) -> Option<u8> {
        self.storage.bytes().get(address).copied()
    }

    /// Borrow up to `len` bytes starting at `address`, truncated at the end
    /// of the buffer. Intended for rendering a row.
    pub fn row(&self, address: usize, len: usize) -> &[u8] {
        let bytes = self.storage.bytes();
        let start = address.min(bytes.len());
        let end = start.saturating_add(len).min(bytes.len());
        &bytes[start..end]
    }

    fn span(&self, address: usize, len: usize) -> Result<&[u8], BufferError> {
        let bytes = self.storage.bytes();
        address
            .checked_add(len)
            .and_then(|end| bytes.get(address..end))
            .ok_or(BufferError::OutOfBounds {
                address,
                len,
                size: bytes.len(),
            })
    }

    fn read_array<const N: usize>(&self, address: usize) -> Result<[u8; N], BufferError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.span(address, N)?);
        Ok(out)
    }

    /// Copy `len` bytes starting at `address`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::OutOfBounds`] without reading anything when
    /// `address + len > size`.
    pub fn read(&self, address: usize, len: usize) -> Result<Vec<u8>, BufferError> {
        self.span(address, len).map(<[u8]>::to_vec)
    }

    /// Read one unsigned byte at `address`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::OutOfBounds`] past the end of the buffer.
    pub fn read_u8(&self, address: usize) -> Result<u8, BufferError> {
        self.read_array(address).map(u8::from_le_bytes)
    }

    /// Read one signed byte at `address`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::OutOfBounds`] past the end of the buffer.
    pub fn read_i8(&self, address: usize) -> Result<i8, BufferError> {
        self.read_array(address).map(i8::from_le_bytes)
    }

    typed_reads! {
        read_u16_le, read_u16_be => u16;
        read_i16_le, read_i16_be => i16;
        read_u32_le, read_u32_be => u32;
        read_i32_le, read_i32_be => i32;
        read_u64_le, read_u64_be => u64;
        read_i64_le, read_i64_be => i64;
    }

    /// Overwrite the byte at `address` in place.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::NotEditable`] for read-only buffers and
    /// [`BufferError::OutOfBounds`] past the end.
    pub fn write_byte(&mut self, address: usize, value: u8) -> Result<(), BufferError> {
        let size = self.size();
        let Some(bytes) = self.storage.bytes_mut() else {
            debug!(address, "write rejected: buffer is read-only");
            return Err(BufferError::NotEditable);
        };
        let slot = bytes.get_mut(address).ok_or(BufferError::OutOfBounds {
            address,
            len: 1,
            size,
        })?;
        *slot = value;
        Ok(())
    }

    /// Set (or replace) the comment at `address`.
    pub fn set_comment(&mut self, address: usize, text: impl Into<String>) {
        self.comments.insert(address, text.into());
    }

    pub fn remove_comment(&mut self, address: usize) {
        self.comments.remove(&address);
    }

    pub fn comment(&self, address: usize) -> Option<&str> {
        self.comments.get(&address).map(String::as_str)
    }

    /// All comments, in no particular order.
    pub fn comments(&self) -> impl Iterator<Item = (usize, &str)> {
        self.comments
            .iter()
            .map(|(address, text)| (*address, text.as_str()))
    }

    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }

    /// Highlight `size` bytes from `address`. A `size` of 0 removes every
    /// highlight starting at `address` instead.
    pub fn highlight(&mut self, address: usize, size: usize, color: HighlightColor) {
        if size == 0 {
            self.highlights.retain(|h| h.address != address);
            return;
        }
        self.highlights.push(Highlight {
            address,
            size,
            color,
        });
    }

    pub fn highlights(&self) -> &[Highlight] {
        &self.highlights
    }

    /// First highlight covering `address`, in insertion order.
    pub fn highlight_at(&self, address: usize) -> Option<&Highlight> {
        self.highlights.iter().find(|h| h.contains(address))
    }

    /// Push `address` onto the bookmark stack; ignored when the stack is full.
    pub fn bookmark_push(&mut self, address: usize) {
        if !self.bookmarks.push(address) {
            debug!(address, "bookmark stack full, push ignored");
        }
    }

    /// Pop the most recent bookmark.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::BookmarkEmpty`] when there is nothing to pop.
    pub fn bookmark_pop(&mut self) -> Result<usize, BufferError> {
        self.bookmarks.pop().ok_or(BufferError::BookmarkEmpty)
    }

    pub const fn bookmarks(&self) -> &BookmarkStack {
        &self.bookmarks
    }
}

impl Default for Buffer {
    /// An empty in-memory buffer.
    fn default() -> Self {
        Self::from_bytes(Vec::new())
    }
}

fn map_file(file: &File, path: &Path, writable: bool) -> Result<Storage, BufferError> {
    let len = file.metadata().map_err(|e| BufferError::io(path, e))?.len();
    let storage = if writable {
        Storage::map_writable(file, len)
    } else {
        Storage::map_readonly(file, len)
    };
    storage.map_err(|e| BufferError::io(path, e))
}

fn not_upgradable(path: &Path, reason: &str) -> BufferError {
    info!(path = %path.display(), reason, "writable upgrade failed");
    BufferError::NotUpgradable {
        reason: reason.to_string(),
    }
}
