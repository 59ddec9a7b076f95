//! Arena-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during arena operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The arena (or the system, at creation time) cannot supply the
    /// requested bytes. The arena is left exactly as it was.
    OutOfMemory {
        /// Number of bytes requested.
        requested: usize,
        /// Total capacity of the arena in bytes.
        capacity: usize,
    },
    /// A handle that was invalidated by a `reset()` or a checkpoint rewind,
    /// or that was never issued by this arena.
    StaleHandle {
        /// The generation encoded in the handle.
        handle_generation: u32,
        /// The arena's current generation.
        arena_generation: u32,
    },
    /// A configuration value that cannot be honoured.
    InvalidConfig {
        /// Human-readable description of the problem.
        reason: String,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfMemory {
                requested,
                capacity,
            } => {
                write!(
                    f,
                    "arena out of memory: requested {requested} bytes, capacity {capacity} bytes"
                )
            }
            Self::StaleHandle {
                handle_generation,
                arena_generation,
            } => {
                write!(
                    f,
                    "stale handle: generation {handle_generation}, arena generation {arena_generation}"
                )
            }
            Self::InvalidConfig { reason } => {
                write!(f, "invalid arena config: {reason}")
            }
        }
    }
}

impl Error for ArenaError {}
