//! Arena configuration parameters.

use crate::error::ArenaError;

/// Configuration for an [`Arena`](crate::Arena).
///
/// Validated at arena construction; all values are immutable afterwards.
#[derive(Clone, Debug)]
pub struct ArenaConfig {
    /// Total capacity of the arena region in bytes.
    ///
    /// Allocated once, up front, exactly this size. Must fit in a `u32`
    /// because allocation handles store 32-bit offsets.
    pub capacity: usize,
}

impl ArenaConfig {
    /// Default arena capacity: 64 KiB.
    pub const DEFAULT_CAPACITY: usize = 64 * 1024;

    /// Create a config with the given capacity in bytes.
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Check that the configuration can be honoured.
    pub fn validate(&self) -> Result<(), ArenaError> {
        if self.capacity > u32::MAX as usize {
            return Err(ArenaError::InvalidConfig {
                reason: format!(
                    "capacity {} exceeds the 32-bit offset range",
                    self.capacity
                ),
            });
        }
        Ok(())
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
