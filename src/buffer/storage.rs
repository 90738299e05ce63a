//! Byte storage behind a [`Buffer`](super::Buffer).
//!
//! Every mapping is created from an open [`File`] and owns its view; the file
//! handle itself is not retained. Zero-length files are never mapped.

use std::fs::File;
use std::io;

use memmap2::{Mmap, MmapMut};

pub(super) enum Storage {
    /// Shared read-only map of a file.
    ReadOnly(Mmap),
    /// Shared read-write map; writes land in the file.
    Writable(MmapMut),
    /// Bytes owned by the process, not associated with a file.
    Memory(Box<[u8]>),
    /// A zero-length file.
    Empty { writable: bool },
}

impl Storage {
    pub(super) fn map_readonly(file: &File, len: u64) -> io::Result<Self> {
        if len == 0 {
            return Ok(Self::Empty { writable: false });
        }
        // SAFETY: the map is only read through `bytes()`, and the buffer
        // contract forbids size changes to the file during a session.
        let map = unsafe { Mmap::map(file)? };
        Ok(Self::ReadOnly(map))
    }

    pub(super) fn map_writable(file: &File, len: u64) -> io::Result<Self> {
        if len == 0 {
            return Ok(Self::Empty { writable: true });
        }
        // SAFETY: as above; the mutable view is only reachable through
        // `&mut Buffer`, so no aliasing slices exist while it is written.
        let map = unsafe { MmapMut::map_mut(file)? };
        Ok(Self::Writable(map))
    }

    pub(super) fn bytes(&self) -> &[u8] {
        match self {
            Self::ReadOnly(map) => &map[..],
            Self::Writable(map) => &map[..],
            Self::Memory(bytes) => &bytes[..],
            Self::Empty { .. } => &[],
        }
    }

    pub(super) fn bytes_mut(&mut self) -> Option<&mut [u8]> {
        match self {
            Self::Writable(map) => Some(&mut map[..]),
            Self::Empty { writable: true } => Some(&mut []),
            Self::ReadOnly(_) | Self::Memory(_) | Self::Empty { writable: false } => None,
        }
    }

    pub(super) const fn is_writable(&self) -> bool {
        matches!(self, Self::Writable(_) | Self::Empty { writable: true })
    }

    pub(super) fn flush(&self) -> io::Result<()> {
        match self {
            Self::Writable(map) => map.flush(),
            _ => Ok(()),
        }
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            Self::ReadOnly(_) => "ReadOnly",
            Self::Writable(_) => "Writable",
            Self::Memory(_) => "Memory",
            Self::Empty { .. } => "Empty",
        };
        f.debug_struct("Storage")
            .field("kind", &kind)
            .field("len", &self.bytes().len())
            .finish()
    }
}
