//! Allocation handles.
//!
//! An [`AllocHandle`] encodes the location of one allocation within an
//! arena. It is generation-scoped: the `generation` field allows the arena
//! to reject handles that a `reset()` or checkpoint rewind has invalidated,
//! without any lookup table.

use std::fmt;

/// Location of a single allocation within an [`Arena`](crate::Arena).
///
/// Handles are plain `Copy` values; they carry no borrow of the arena.
/// Resolve one to bytes with [`Arena::slice`](crate::Arena::slice) or
/// [`Arena::slice_mut`](crate::Arena::slice_mut), which check staleness.
/// A handle is only meaningful to the arena that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub struct AllocHandle {
    /// Arena generation when this allocation was made.
    pub(crate) generation: u32,
    /// Byte offset of the allocation within the arena region.
    pub(crate) offset: u32,
    /// Length of the allocation in bytes.
    pub(crate) len: u32,
}

impl AllocHandle {
    /// Reassemble a handle from its raw parts.
    ///
    /// Intended for callers that persist handle coordinates in their own
    /// storage (the ferrite table encodes key handles into arena-resident
    /// slot records this way). A handle forged with coordinates the arena
    /// never issued is rejected at resolve time.
    pub fn from_parts(generation: u32, offset: u32, len: u32) -> Self {
        Self {
            generation,
            offset,
            len,
        }
    }

    /// The arena generation this handle belongs to.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Byte offset of the allocation within the arena region.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Length of the allocation in bytes.
    pub fn len(&self) -> u32 {
        self.len
    }

    /// Whether this is a zero-length allocation.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// One past the last byte of the allocation.
    pub(crate) fn end(&self) -> usize {
        self.offset as usize + self.len as usize
    }

    /// A view of the same allocation narrowed to its first `len` bytes.
    ///
    /// Used when an allocation deliberately over-reserves (e.g. a slurped
    /// file plus its NUL sentinel) but the caller should only see the
    /// meaningful prefix. Lengths beyond the handle's own are clamped.
    pub fn truncated(&self, len: u32) -> Self {
        Self {
            generation: self.generation,
            offset: self.offset,
            len: len.min(self.len),
        }
    }
}

impl fmt::Display for AllocHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AllocHandle(gen={}, off={}, len={})",
            self.generation, self.offset, self.len
        )
    }
}
