//! Growable array of fixed-size elements, backed by one arena allocation.
//!
//! [`List`] shares the arena's resize discipline: growing a list that is
//! still the arena's most recent allocation is zero-copy, while a buried
//! list pays one copy into a fresh region. Either way the list never
//! allocates outside the arena.

use ferrite_arena::{AllocHandle, Arena, ArenaError};

/// Backing-region alignment. Covers every element size the byte-level API
/// can express.
const ITEM_ALIGN: usize = 8;

/// Contiguous array of `elem_size`-byte elements with doubling growth.
///
/// Elements are raw byte slots; the caller decides their encoding and
/// writes each slot through the slice returned by [`List::push`].
pub struct List {
    /// The element region. Replaced when growth takes the slow resize path.
    items: AllocHandle,
    /// Size of one element in bytes.
    elem_size: u32,
    /// Allocated element capacity; always a power of two.
    capacity: u32,
    /// Committed elements.
    count: u32,
}

impl List {
    /// Create a list of `elem_size`-byte elements with room for at least
    /// `initial_capacity` of them.
    ///
    /// The capacity is rounded up to a power of two so growth stays a
    /// doubling sequence. A zero element size is rejected with
    /// [`ArenaError::InvalidConfig`].
    pub fn new(
        arena: &mut Arena,
        elem_size: u32,
        initial_capacity: u32,
    ) -> Result<Self, ArenaError> {
        if elem_size == 0 {
            return Err(ArenaError::InvalidConfig {
                reason: "list element size must be non-zero".to_string(),
            });
        }
        let capacity = initial_capacity.max(1).next_power_of_two();
        let items = arena.alloc(capacity as usize * elem_size as usize, ITEM_ALIGN)?;
        Ok(Self {
            items,
            elem_size,
            capacity,
            count: 0,
        })
    }

    /// Commit one more element and return its bytes for the caller to fill.
    ///
    /// Grows the backing region (doubling) through [`Arena::resize`] when
    /// full; existing elements are preserved on either resize path. On
    /// [`ArenaError::OutOfMemory`] the list is unchanged.
    pub fn push<'a>(&mut self, arena: &'a mut Arena) -> Result<&'a mut [u8], ArenaError> {
        if self.count == self.capacity {
            let new_cap = self.capacity * 2;
            self.items = arena.resize(
                self.items,
                new_cap as usize * self.elem_size as usize,
                ITEM_ALIGN,
            )?;
            self.capacity = new_cap;
        }
        let start = self.count as usize * self.elem_size as usize;
        self.count += 1;
        let bytes = arena.slice_mut(self.items)?;
        Ok(&mut bytes[start..start + self.elem_size as usize])
    }

    /// The bytes of the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn slot<'a>(&self, arena: &'a Arena, index: u32) -> Result<&'a [u8], ArenaError> {
        assert!(
            index < self.count,
            "index {index} out of range for list of {}",
            self.count
        );
        let start = index as usize * self.elem_size as usize;
        Ok(&arena.slice(self.items)?[start..start + self.elem_size as usize])
    }

    /// The bytes of the element at `index`, mutably.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn slot_mut<'a>(
        &self,
        arena: &'a mut Arena,
        index: u32,
    ) -> Result<&'a mut [u8], ArenaError> {
        assert!(
            index < self.count,
            "index {index} out of range for list of {}",
            self.count
        );
        let start = index as usize * self.elem_size as usize;
        Ok(&mut arena.slice_mut(self.items)?[start..start + self.elem_size as usize])
    }

    /// Number of committed elements.
    pub fn len(&self) -> u32 {
        self.count
    }

    /// Whether the list holds no elements.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Allocated element capacity.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Size of one element in bytes.
    pub fn elem_size(&self) -> u32 {
        self.elem_size
    }
}
