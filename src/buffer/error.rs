use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures reported by [`Buffer`](super::Buffer) operations.
#[derive(Debug, Error)]
pub enum BufferError {
    /// Opening, inspecting, mapping or flushing the backing file failed.
    #[error("I/O error on {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The requested span does not fit inside the buffer.
    #[error("{len} byte(s) at {address:#x} is out of bounds (size {size:#x})")]
    OutOfBounds {
        address: usize,
        len: usize,
        size: usize,
    },

    /// A byte write was attempted on a read-only buffer.
    #[error("buffer is not editable")]
    NotEditable,

    /// The buffer could not be remapped read-write; it is left unchanged.
    #[error("buffer cannot be made writable: {reason}")]
    NotUpgradable { reason: String },

    /// `bookmark_pop` on an empty bookmark stack.
    #[error("bookmark stack is empty")]
    BookmarkEmpty,
}

impl BufferError {
    pub(super) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
