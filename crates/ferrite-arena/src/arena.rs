//! The bump allocator.
//!
//! [`Arena`] owns one contiguous byte region allocated up front. Allocation
//! only ever advances an offset cursor; individual allocations are never
//! freed. Reclamation happens wholesale through [`Arena::reset`], a
//! [`Checkpoint`] rewind, or dropping the arena.

use std::ops::{Deref, DerefMut};

use smallvec::SmallVec;

use crate::config::ArenaConfig;
use crate::error::ArenaError;
use crate::handle::AllocHandle;

/// Default alignment for allocations whose caller has no stricter need.
///
/// Eight bytes covers u64/f64 and pointer-sized records.
pub const DEFAULT_ALIGN: usize = 8;

/// A rollback watermark: generation `generation` rewound the cursor down
/// to `offset`. Handles from earlier generations that extend past `offset`
/// are stale.
#[derive(Clone, Copy, Debug)]
struct RollbackMark {
    generation: u32,
    offset: u32,
}

/// A saved cursor position, used to roll back all allocations made after it.
///
/// Checkpoints are raw saved offsets, not a validated stack: they may nest,
/// and rewinding an outer checkpoint while an inner one is still open simply
/// moves the cursor further back. Closing them outer-first is the caller's
/// discipline. The handle staleness check catches the memory-reuse hazard
/// this would otherwise create.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub struct Checkpoint {
    offset: u32,
}

impl Checkpoint {
    /// The saved cursor position in bytes.
    pub fn offset(&self) -> u32 {
        self.offset
    }
}

/// A linear allocator over a single owned byte region.
///
/// All pointers-come-handles issued by the arena refer into that one region
/// and stay resolvable until the next `reset()`, a rewind past their end, or
/// the arena's release — whichever comes first.
pub struct Arena {
    /// Backing storage. Allocated to full capacity at creation, never grown.
    data: Vec<u8>,
    /// Bump cursor: next free byte.
    offset: usize,
    /// Bumped on every reset and rewind; issued handles carry the value
    /// current at their allocation.
    generation: u32,
    /// Where the most recent allocation ends. Tracked as explicit state so
    /// the resize fast path is an equality test on offsets, not pointer
    /// arithmetic.
    last_alloc_end: usize,
    /// Rollback watermarks with strictly increasing offsets, generation
    /// ascending. See `check_handle`.
    marks: SmallVec<[RollbackMark; 4]>,
}

impl Arena {
    /// Create an arena from a validated configuration.
    ///
    /// The full region is reserved immediately; if the system cannot supply
    /// it, this fails with [`ArenaError::OutOfMemory`] rather than aborting.
    pub fn new(config: ArenaConfig) -> Result<Self, ArenaError> {
        config.validate()?;
        let mut data = Vec::new();
        data.try_reserve_exact(config.capacity)
            .map_err(|_| ArenaError::OutOfMemory {
                requested: config.capacity,
                capacity: 0,
            })?;
        data.resize(config.capacity, 0);
        Ok(Self {
            data,
            offset: 0,
            generation: 0,
            last_alloc_end: 0,
            marks: SmallVec::new(),
        })
    }

    /// Create an arena with the given capacity in bytes.
    pub fn with_capacity(capacity: usize) -> Result<Self, ArenaError> {
        Self::new(ArenaConfig::new(capacity))
    }

    /// Bump-allocate `len` bytes aligned to `align`.
    ///
    /// This is the sole allocation primitive; O(1). The returned bytes are
    /// zero-filled. On [`ArenaError::OutOfMemory`] the cursor is untouched —
    /// there is no partial commit.
    ///
    /// # Panics
    ///
    /// Panics if `align` is not a power of two.
    pub fn alloc(&mut self, len: usize, align: usize) -> Result<AllocHandle, ArenaError> {
        assert!(align.is_power_of_two(), "align must be a power of two");
        let aligned = self
            .offset
            .checked_add(align - 1)
            .map(|v| v & !(align - 1))
            .ok_or(self.oom(len))?;
        let end = aligned.checked_add(len).ok_or(self.oom(len))?;
        if end > self.data.len() {
            return Err(self.oom(len));
        }
        self.data[aligned..end].fill(0);
        self.offset = end;
        self.last_alloc_end = end;
        Ok(AllocHandle {
            generation: self.generation,
            offset: aligned as u32,
            len: len as u32,
        })
    }

    /// Grow or shrink a previous allocation to `new_len` bytes.
    ///
    /// Fast path: if the allocation is still the arena's most recent one,
    /// the cursor is extended (or pulled back) in place and the returned
    /// handle has the same offset — zero-copy. Slow path: the allocation has
    /// been buried by later ones, so a fresh block is allocated at `align`
    /// and `min(old, new)` bytes are copied; the old region becomes dead
    /// space until the next reset or rewind.
    ///
    /// On failure the cursor, the handle, and all contents are untouched.
    ///
    /// # Panics
    ///
    /// Panics if `align` is not a power of two (slow path only consults it).
    pub fn resize(
        &mut self,
        handle: AllocHandle,
        new_len: usize,
        align: usize,
    ) -> Result<AllocHandle, ArenaError> {
        self.check_handle(&handle)?;
        if handle.end() == self.last_alloc_end {
            let new_end = (handle.offset as usize)
                .checked_add(new_len)
                .ok_or(self.oom(new_len))?;
            if new_end > self.data.len() {
                return Err(self.oom(new_len));
            }
            if new_end > handle.end() {
                self.data[handle.end()..new_end].fill(0);
            }
            self.offset = new_end;
            self.last_alloc_end = new_end;
            return Ok(AllocHandle {
                generation: self.generation,
                offset: handle.offset,
                len: new_len as u32,
            });
        }
        let fresh = self.alloc(new_len, align)?;
        let copy = (handle.len as usize).min(new_len);
        let src = handle.offset as usize;
        self.data
            .copy_within(src..src + copy, fresh.offset as usize);
        Ok(fresh)
    }

    /// Resolve a handle to its bytes.
    pub fn slice(&self, handle: AllocHandle) -> Result<&[u8], ArenaError> {
        self.check_handle(&handle)?;
        Ok(&self.data[handle.offset as usize..handle.end()])
    }

    /// Resolve a handle to its bytes, mutably.
    pub fn slice_mut(&mut self, handle: AllocHandle) -> Result<&mut [u8], ArenaError> {
        self.check_handle(&handle)?;
        Ok(&mut self.data[handle.offset as usize..handle.end()])
    }

    /// Reclaim the whole region: cursor back to zero.
    ///
    /// Memory is NOT zeroed here (fresh allocations zero their own bytes).
    /// Every outstanding handle goes stale.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.offset = 0;
        self.last_alloc_end = 0;
        self.marks.clear();
        self.marks.push(RollbackMark {
            generation: self.generation,
            offset: 0,
        });
    }

    /// Capture the current cursor as a checkpoint.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            offset: self.offset as u32,
        }
    }

    /// Roll the cursor back to a checkpoint, unconditionally.
    ///
    /// Handles for allocations made after the checkpoint go stale; handles
    /// wholly below it stay valid. Rewinding checkpoints out of order is
    /// permitted (see [`Checkpoint`]) and moves the cursor wherever the
    /// checkpoint says.
    pub fn rewind(&mut self, checkpoint: Checkpoint) {
        self.generation += 1;
        while let Some(mark) = self.marks.last() {
            if mark.offset >= checkpoint.offset {
                self.marks.pop();
            } else {
                break;
            }
        }
        self.marks.push(RollbackMark {
            generation: self.generation,
            offset: checkpoint.offset,
        });
        self.offset = checkpoint.offset as usize;
        self.last_alloc_end = self.offset;
    }

    /// Open a temporary scope that rewinds itself on every exit path.
    ///
    /// The guard derefs to the arena, so allocation carries on as normal
    /// inside the scope; when it drops, the cursor is back where it was.
    pub fn temp(&mut self) -> TempScope<'_> {
        let saved = self.checkpoint();
        TempScope { arena: self, saved }
    }

    /// Release the arena, returning its region to the system.
    ///
    /// Consuming `self` makes a double release a compile error; a guard
    /// (or plain ownership) covers early-return and panic paths.
    pub fn release(self) {}

    /// Bytes currently committed.
    pub fn used(&self) -> usize {
        self.offset
    }

    /// Total capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Bytes still available past the cursor.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    /// The current generation. Bumped on every reset and rewind.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    fn oom(&self, requested: usize) -> ArenaError {
        ArenaError::OutOfMemory {
            requested,
            capacity: self.data.len(),
        }
    }

    /// Staleness check.
    ///
    /// A handle from generation `g` is stale iff some rewind or reset newer
    /// than `g` pulled the cursor below the handle's end. `marks` keeps one
    /// watermark per surviving rollback with offsets strictly increasing, so
    /// the first mark newer than `g` carries the lowest offset any newer
    /// rollback reached — one lookup decides.
    fn check_handle(&self, handle: &AllocHandle) -> Result<(), ArenaError> {
        let stale = ArenaError::StaleHandle {
            handle_generation: handle.generation,
            arena_generation: self.generation,
        };
        if handle.generation > self.generation {
            // Not issued by this arena.
            return Err(stale);
        }
        let idx = self
            .marks
            .partition_point(|m| m.generation <= handle.generation);
        if let Some(mark) = self.marks.get(idx) {
            if handle.end() > mark.offset as usize {
                return Err(stale);
            }
        }
        if handle.end() > self.offset {
            // Live handles never extend past the cursor; anything that does
            // was forged or shrunk out from under.
            return Err(stale);
        }
        Ok(())
    }
}

/// Borrow guard for a temporary allocation scope.
///
/// Created by [`Arena::temp`]. Rewinds the arena to the scope's entry
/// cursor when dropped — on normal fall-through, early return, or unwind.
#[must_use]
pub struct TempScope<'a> {
    arena: &'a mut Arena,
    saved: Checkpoint,
}

impl TempScope<'_> {
    /// Close the scope now instead of at end of block.
    pub fn end(self) {}
}

impl Deref for TempScope<'_> {
    type Target = Arena;

    fn deref(&self) -> &Arena {
        self.arena
    }
}

impl DerefMut for TempScope<'_> {
    fn deref_mut(&mut self) -> &mut Arena {
        self.arena
    }
}

impl Drop for TempScope<'_> {
    fn drop(&mut self) {
        self.arena.rewind(self.saved);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_advances_cursor() {
        // Scenario A: two 4-byte ints, then an oversized request.
        let mut arena = Arena::with_capacity(1024).unwrap();
        let h = arena.alloc(8, 4).unwrap();
        assert_eq!(h.offset(), 0);
        assert_eq!(arena.used(), 8);

        let err = arena.alloc(10_000, 1).unwrap_err();
        assert!(matches!(err, ArenaError::OutOfMemory { requested: 10_000, .. }));
        assert_eq!(arena.used(), 8);
    }

    #[test]
    fn alloc_respects_alignment() {
        let mut arena = Arena::with_capacity(1024).unwrap();
        arena.alloc(1, 1).unwrap();
        let h = arena.alloc(8, 8).unwrap();
        assert_eq!(h.offset() % 8, 0);
        assert_eq!(h.offset(), 8);
    }

    #[test]
    fn alloc_exactly_to_capacity() {
        let mut arena = Arena::with_capacity(16).unwrap();
        assert!(arena.alloc(16, 1).is_ok());
        assert!(arena.alloc(1, 1).is_err());
    }

    #[test]
    fn alloc_zeroes_its_bytes() {
        let mut arena = Arena::with_capacity(64).unwrap();
        let h = arena.alloc(16, 1).unwrap();
        arena.slice_mut(h).unwrap().fill(0xAB);
        arena.reset();
        let h2 = arena.alloc(16, 1).unwrap();
        assert!(arena.slice(h2).unwrap().iter().all(|&b| b == 0));
    }

    #[test]
    fn reset_returns_to_first_address() {
        let mut arena = Arena::with_capacity(256).unwrap();
        let first = arena.alloc(8, 8).unwrap();
        arena.alloc(100, 1).unwrap();
        arena.reset();
        assert_eq!(arena.used(), 0);
        let again = arena.alloc(8, 8).unwrap();
        assert_eq!(again.offset(), first.offset());
    }

    #[test]
    fn reset_invalidates_handles() {
        let mut arena = Arena::with_capacity(64).unwrap();
        let h = arena.alloc(8, 1).unwrap();
        arena.reset();
        assert!(matches!(
            arena.slice(h),
            Err(ArenaError::StaleHandle { .. })
        ));
    }

    #[test]
    fn checkpoint_rewind_restores_offset() {
        // Scenario D: checkpoint at 40, allocate 800 inside, rewind to 40.
        let mut arena = Arena::with_capacity(1024).unwrap();
        arena.alloc(40, 1).unwrap();
        let cp = arena.checkpoint();
        assert_eq!(cp.offset(), 40);
        arena.alloc(800, 1).unwrap();
        arena.rewind(cp);
        assert_eq!(arena.used(), 40);
    }

    #[test]
    fn rewind_keeps_earlier_handles_alive() {
        let mut arena = Arena::with_capacity(256).unwrap();
        let before = arena.alloc(16, 1).unwrap();
        arena.slice_mut(before).unwrap()[0] = 7;
        let cp = arena.checkpoint();
        let inside = arena.alloc(16, 1).unwrap();
        arena.rewind(cp);

        assert_eq!(arena.slice(before).unwrap()[0], 7);
        assert!(matches!(
            arena.slice(inside),
            Err(ArenaError::StaleHandle { .. })
        ));
    }

    #[test]
    fn nested_rewinds_track_staleness() {
        let mut arena = Arena::with_capacity(256).unwrap();
        let a = arena.alloc(8, 1).unwrap();
        let outer = arena.checkpoint();
        let b = arena.alloc(8, 1).unwrap();
        let inner = arena.checkpoint();
        let c = arena.alloc(8, 1).unwrap();

        arena.rewind(inner);
        assert!(arena.slice(b).is_ok());
        assert!(arena.slice(c).is_err());

        arena.rewind(outer);
        assert!(arena.slice(a).is_ok());
        assert!(arena.slice(b).is_err());
    }

    #[test]
    fn out_of_order_rewind_moves_cursor_forward() {
        // Outer-first rewind with the inner checkpoint still "open": the
        // cursor moves wherever the checkpoint says, and the memory the
        // inner scope thought it held is re-grantable. Handles from that
        // scope are stale either way.
        let mut arena = Arena::with_capacity(256).unwrap();
        let outer = arena.checkpoint();
        arena.alloc(32, 1).unwrap();
        let inner = arena.checkpoint();
        let h = arena.alloc(32, 1).unwrap();

        arena.rewind(outer);
        assert_eq!(arena.used(), 0);
        arena.rewind(inner);
        assert_eq!(arena.used(), 32);
        assert!(arena.slice(h).is_err());
    }

    #[test]
    fn temp_scope_rewinds_on_drop() {
        let mut arena = Arena::with_capacity(256).unwrap();
        arena.alloc(40, 1).unwrap();
        {
            let mut temp = arena.temp();
            temp.alloc(100, 1).unwrap();
            assert_eq!(temp.used(), 140);
        }
        assert_eq!(arena.used(), 40);
    }

    #[test]
    fn temp_scope_rewinds_on_early_end() {
        let mut arena = Arena::with_capacity(256).unwrap();
        let mut temp = arena.temp();
        temp.alloc(64, 1).unwrap();
        temp.end();
        assert_eq!(arena.used(), 0);
    }

    #[test]
    fn resize_fast_path_keeps_offset() {
        let mut arena = Arena::with_capacity(1024).unwrap();
        let h = arena.alloc(8, 4).unwrap();
        arena.slice_mut(h).unwrap()[..4].copy_from_slice(&100u32.to_le_bytes());

        let grown = arena.resize(h, 16, 4).unwrap();
        assert_eq!(grown.offset(), h.offset());
        assert_eq!(grown.len(), 16);
        assert_eq!(arena.used(), 16);
        // Previously written bytes survive; the tail is zeroed.
        let bytes = arena.slice(grown).unwrap();
        assert_eq!(&bytes[..4], &100u32.to_le_bytes());
        assert!(bytes[8..].iter().all(|&b| b == 0));
    }

    #[test]
    fn resize_slow_path_copies_prefix() {
        // Scenario C: grow, bury, grow again.
        let mut arena = Arena::with_capacity(1024).unwrap();
        let h = arena.alloc(8, 4).unwrap();
        let h = arena.resize(h, 16, 4).unwrap();
        {
            let bytes = arena.slice_mut(h).unwrap();
            bytes[..4].copy_from_slice(&100u32.to_le_bytes());
            bytes[4..8].copy_from_slice(&200u32.to_le_bytes());
        }
        arena.alloc(8, 8).unwrap(); // bury it

        let moved = arena.resize(h, 32, 4).unwrap();
        assert_ne!(moved.offset(), h.offset());
        let bytes = arena.slice(moved).unwrap();
        assert_eq!(&bytes[..4], &100u32.to_le_bytes());
        assert_eq!(&bytes[4..8], &200u32.to_le_bytes());
    }

    #[test]
    fn resize_shrinks_in_place() {
        let mut arena = Arena::with_capacity(64).unwrap();
        let h = arena.alloc(32, 1).unwrap();
        let shrunk = arena.resize(h, 8, 1).unwrap();
        assert_eq!(shrunk.offset(), h.offset());
        assert_eq!(arena.used(), 8);
    }

    #[test]
    fn resize_oom_leaves_everything_intact() {
        let mut arena = Arena::with_capacity(32).unwrap();
        let h = arena.alloc(16, 1).unwrap();
        arena.slice_mut(h).unwrap()[0] = 42;
        arena.alloc(8, 1).unwrap(); // force the slow path

        let err = arena.resize(h, 24, 1).unwrap_err();
        assert!(matches!(err, ArenaError::OutOfMemory { .. }));
        assert_eq!(arena.used(), 24);
        assert_eq!(arena.slice(h).unwrap()[0], 42);
    }

    #[test]
    fn stale_handle_rejected_by_resize() {
        let mut arena = Arena::with_capacity(64).unwrap();
        let h = arena.alloc(8, 1).unwrap();
        arena.reset();
        assert!(matches!(
            arena.resize(h, 16, 1),
            Err(ArenaError::StaleHandle { .. })
        ));
    }

    #[test]
    fn zero_length_alloc_is_valid() {
        let mut arena = Arena::with_capacity(16).unwrap();
        let h = arena.alloc(0, 1).unwrap();
        assert!(arena.slice(h).unwrap().is_empty());
        assert_eq!(arena.used(), 0);
    }

    #[test]
    #[should_panic(expected = "power of two")]
    fn non_power_of_two_align_panics() {
        let mut arena = Arena::with_capacity(16).unwrap();
        let _ = arena.alloc(1, 3);
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        /// Arbitrary allocation request: size up to 64 bytes, power-of-two
        /// alignment up to 16.
        fn requests() -> impl Strategy<Value = Vec<(usize, usize)>> {
            proptest::collection::vec(
                (0usize..64, 0u32..5).prop_map(|(len, a)| (len, 1usize << a)),
                1..50,
            )
        }

        proptest! {
            #[test]
            fn never_exceeds_capacity(ops in requests()) {
                let capacity = 512;
                let mut arena = Arena::with_capacity(capacity).unwrap();
                for (len, align) in ops {
                    match arena.alloc(len, align) {
                        Ok(h) => {
                            prop_assert!(h.offset() as usize + h.len() as usize <= capacity);
                        }
                        Err(_) => {
                            // OOM exactly when the aligned request would not fit.
                            let aligned = (arena.used() + align - 1) & !(align - 1);
                            prop_assert!(aligned + len > capacity);
                        }
                    }
                    prop_assert!(arena.used() <= capacity);
                }
            }

            #[test]
            fn offsets_are_aligned(ops in requests()) {
                let mut arena = Arena::with_capacity(4096).unwrap();
                for (len, align) in ops {
                    if let Ok(h) = arena.alloc(len, align) {
                        prop_assert_eq!(h.offset() as usize % align, 0);
                    }
                }
            }

            #[test]
            fn rewind_restores_exact_offset(
                prefix in 0usize..100,
                ops in requests(),
            ) {
                let mut arena = Arena::with_capacity(1 << 16).unwrap();
                arena.alloc(prefix, 1).unwrap();
                let cp = arena.checkpoint();
                for (len, align) in ops {
                    let _ = arena.alloc(len, align);
                }
                arena.rewind(cp);
                prop_assert_eq!(arena.used(), cp.offset() as usize);
            }

            #[test]
            fn fast_resize_preserves_contents(
                initial in 1usize..64,
                grown in 64usize..128,
                fill in any::<u8>(),
            ) {
                let mut arena = Arena::with_capacity(256).unwrap();
                let h = arena.alloc(initial, 1).unwrap();
                arena.slice_mut(h).unwrap().fill(fill);
                let g = arena.resize(h, grown, 1).unwrap();
                prop_assert_eq!(g.offset(), h.offset());
                let bytes = arena.slice(g).unwrap();
                prop_assert!(bytes[..initial].iter().all(|&b| b == fill));
                prop_assert!(bytes[initial..].iter().all(|&b| b == 0));
            }
        }
    }
}
