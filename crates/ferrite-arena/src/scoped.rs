//! Scope-bound arena ownership.
//!
//! [`ScopedArena`] ties an arena's release to a scope: when control leaves
//! the scope holding the guard — normal fall-through, early return, or an
//! unwinding panic — the region goes back to the system exactly once.
//! No explicit release call, and no way to double-release.

use std::ops::{Deref, DerefMut};

use crate::arena::Arena;
use crate::config::ArenaConfig;
use crate::error::ArenaError;

/// Owning guard that creates an arena and guarantees its release.
///
/// If construction fails (the system cannot supply the region), no guard
/// exists and there is nothing to leak. Dereferences to [`Arena`], so all
/// allocation APIs are available directly on the guard.
///
/// ```
/// use ferrite_arena::ScopedArena;
///
/// let mut arena = ScopedArena::with_capacity(1024)?;
/// let handle = arena.alloc(64, 8)?;
/// assert_eq!(arena.slice(handle)?.len(), 64);
/// // Region released here, on every exit path.
/// # Ok::<(), ferrite_arena::ArenaError>(())
/// ```
pub struct ScopedArena {
    arena: Arena,
}

impl ScopedArena {
    /// Create an arena from a configuration, tied to the current scope.
    pub fn new(config: ArenaConfig) -> Result<Self, ArenaError> {
        Ok(Self {
            arena: Arena::new(config)?,
        })
    }

    /// Create an arena with the given capacity, tied to the current scope.
    pub fn with_capacity(capacity: usize) -> Result<Self, ArenaError> {
        Ok(Self {
            arena: Arena::with_capacity(capacity)?,
        })
    }

    /// Escape the scope discipline and take ownership of the arena.
    pub fn into_inner(self) -> Arena {
        self.arena
    }
}

impl Deref for ScopedArena {
    type Target = Arena;

    fn deref(&self) -> &Arena {
        &self.arena
    }
}

impl DerefMut for ScopedArena {
    fn deref_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }
}

/// Run `f` with a freshly created arena that is released when `f` returns,
/// whether it returns normally or unwinds.
pub fn with_arena<R>(
    capacity: usize,
    f: impl FnOnce(&mut Arena) -> R,
) -> Result<R, ArenaError> {
    let mut scoped = ScopedArena::with_capacity(capacity)?;
    Ok(f(&mut scoped))
}
