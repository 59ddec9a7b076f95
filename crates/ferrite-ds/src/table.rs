//! Open-addressing hash table allocated entirely out of an arena.
//!
//! The slot array is one arena allocation of fixed-layout records; key
//! bytes are copied into the arena on first insert and referenced by
//! handle. Growing allocates a fresh slot region and abandons the old one
//! in place — the arena reclaims it wholesale on reset or release, exactly
//! like every other dead allocation.

use ferrite_arena::{AllocHandle, Arena, ArenaError};

/// Byte size of one slot record.
///
/// Layout, little-endian: state u32, key generation u32, key offset u32,
/// key length u32, value u64.
const SLOT_BYTES: usize = 24;

/// Slot has never held an entry. Fresh slot regions are zero-filled by the
/// arena, so a new table is all-empty for free.
const SLOT_EMPTY: u32 = 0;

/// Slot holds a live entry. Other values are reserved; a future delete
/// operation would claim one for tombstones, which would also invalidate
/// the stop-at-empty lookup below — see the note on [`Table`].
const SLOT_ALIVE: u32 = 1;

/// Smallest slot count a table will be created with.
const MIN_CAPACITY: u32 = 4;

/// Decoded form of one slot record.
#[derive(Clone, Copy)]
struct Slot {
    state: u32,
    key: AllocHandle,
    value: u64,
}

/// Map from byte-string keys to opaque 64-bit values.
///
/// Collisions are resolved by linear probing; the load factor is kept
/// below 0.75 by doubling the slot region before the insert that would
/// cross it. Keys compare by content, and inserting an existing key
/// overwrites its value.
///
/// The value is an opaque word: callers decide what it encodes (an index,
/// a discriminant, packed coordinates of their own). Values referencing
/// arena or caller memory are never freed through the table.
///
/// There is no delete. Lookup stops at the first empty slot, which is only
/// correct while entries are never removed; adding removal later means
/// adding tombstones first.
pub struct Table {
    /// The slot region. Replaced wholesale on growth.
    slots: AllocHandle,
    /// Total slot count; always a power of two.
    cap: u32,
    /// Occupied slots.
    count: u32,
}

impl Table {
    /// Create a table with at least `capacity` slots from the given arena.
    ///
    /// The capacity is rounded up to a power of two (minimum 4) to keep
    /// probe-sequence math a mask.
    pub fn new(arena: &mut Arena, capacity: u32) -> Result<Self, ArenaError> {
        let cap = capacity.next_power_of_two().max(MIN_CAPACITY);
        let slots = arena.alloc(cap as usize * SLOT_BYTES, 8)?;
        Ok(Self {
            slots,
            cap,
            count: 0,
        })
    }

    /// Map `key` to `value`, overwriting any previous mapping.
    ///
    /// If the insert would push the load factor to 0.75 or beyond, the
    /// table grows first: a double-size slot region is allocated from the
    /// arena and every live entry is re-inserted. Growth is all-or-nothing:
    /// on [`ArenaError::OutOfMemory`] the old table is untouched and fully
    /// usable, and the error propagates.
    pub fn put(
        &mut self,
        arena: &mut Arena,
        key: &[u8],
        value: u64,
    ) -> Result<(), ArenaError> {
        if (self.count as u64 + 1) * 4 >= self.cap as u64 * 3 {
            self.grow(arena)?;
        }
        let mut idx = self.home_slot(key);
        loop {
            let slot = read_slot(arena, self.slots, idx)?;
            if slot.state == SLOT_ALIVE {
                if arena.slice(slot.key)? == key {
                    write_slot(arena, self.slots, idx, Slot { value, ..slot })?;
                    return Ok(());
                }
                idx = (idx + 1) & (self.cap - 1);
                continue;
            }
            // First empty slot on the probe path: claim it. The key copy
            // happens before the slot write, so an OOM here leaves the
            // table unmodified.
            let key_copy = arena.alloc(key.len(), 1)?;
            arena.slice_mut(key_copy)?.copy_from_slice(key);
            write_slot(
                arena,
                self.slots,
                idx,
                Slot {
                    state: SLOT_ALIVE,
                    key: key_copy,
                    value,
                },
            )?;
            self.count += 1;
            return Ok(());
        }
    }

    /// Look up `key`. `Ok(None)` means the key was never inserted.
    ///
    /// The probe sequence matches [`Table::put`]; the first empty slot
    /// terminates the search. Errors only surface if the backing arena has
    /// been reset or rewound out from under the table.
    pub fn get(&self, arena: &Arena, key: &[u8]) -> Result<Option<u64>, ArenaError> {
        if self.count == 0 {
            return Ok(None);
        }
        let mut idx = self.home_slot(key);
        for _ in 0..self.cap {
            let slot = read_slot(arena, self.slots, idx)?;
            if slot.state != SLOT_ALIVE {
                return Ok(None);
            }
            if arena.slice(slot.key)? == key {
                return Ok(Some(slot.value));
            }
            idx = (idx + 1) & (self.cap - 1);
        }
        Ok(None)
    }

    /// Number of live entries.
    pub fn len(&self) -> u32 {
        self.count
    }

    /// Whether the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Total slot count.
    pub fn capacity(&self) -> u32 {
        self.cap
    }

    fn home_slot(&self, key: &[u8]) -> u32 {
        (fnv1a(key) & (self.cap as u64 - 1)) as u32
    }

    /// Double the slot region and re-insert every live entry.
    ///
    /// Re-insertion targets the fresh region only, so a failure anywhere
    /// leaves `self` pointing at the intact old region.
    fn grow(&mut self, arena: &mut Arena) -> Result<(), ArenaError> {
        let new_cap = self.cap * 2;
        let new_slots = arena.alloc(new_cap as usize * SLOT_BYTES, 8)?;
        for i in 0..self.cap {
            let slot = read_slot(arena, self.slots, i)?;
            if slot.state != SLOT_ALIVE {
                continue;
            }
            let mut idx = (fnv1a(arena.slice(slot.key)?) & (new_cap as u64 - 1)) as u32;
            loop {
                if read_slot(arena, new_slots, idx)?.state != SLOT_ALIVE {
                    write_slot(arena, new_slots, idx, slot)?;
                    break;
                }
                idx = (idx + 1) & (new_cap - 1);
            }
        }
        self.slots = new_slots;
        self.cap = new_cap;
        Ok(())
    }
}

/// FNV-1a, 64-bit. Deterministic per process run; distributes short ASCII
/// keys without pathological clustering.
fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    bytes
        .iter()
        .fold(OFFSET_BASIS, |h, &b| (h ^ u64::from(b)).wrapping_mul(PRIME))
}

fn read_slot(arena: &Arena, slots: AllocHandle, idx: u32) -> Result<Slot, ArenaError> {
    let bytes = arena.slice(slots)?;
    let at = idx as usize * SLOT_BYTES;
    let field = |o: usize| {
        u32::from_le_bytes(
            bytes[at + o..at + o + 4]
                .try_into()
                .expect("slot field is 4 bytes"),
        )
    };
    let value = u64::from_le_bytes(
        bytes[at + 16..at + 24]
            .try_into()
            .expect("slot value is 8 bytes"),
    );
    Ok(Slot {
        state: field(0),
        key: AllocHandle::from_parts(field(4), field(8), field(12)),
        value,
    })
}

fn write_slot(
    arena: &mut Arena,
    slots: AllocHandle,
    idx: u32,
    slot: Slot,
) -> Result<(), ArenaError> {
    let bytes = arena.slice_mut(slots)?;
    let at = idx as usize * SLOT_BYTES;
    bytes[at..at + 4].copy_from_slice(&slot.state.to_le_bytes());
    bytes[at + 4..at + 8].copy_from_slice(&slot.key.generation().to_le_bytes());
    bytes[at + 8..at + 12].copy_from_slice(&slot.key.offset().to_le_bytes());
    bytes[at + 12..at + 16].copy_from_slice(&slot.key.len().to_le_bytes());
    bytes[at + 16..at + 24].copy_from_slice(&slot.value.to_le_bytes());
    Ok(())
}
