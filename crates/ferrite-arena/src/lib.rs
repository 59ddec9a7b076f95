//! Bump-allocated arena with checkpoint scopes and in-place resize.
//!
//! This is the leaf crate of the ferrite toolkit. Everything else in the
//! workspace allocates through the [`Arena`] defined here — the data
//! structures in `ferrite-ds` and the file slurping in `ferrite-io` are
//! pure consumers of its allocation contract.
//!
//! # Architecture
//!
//! ```text
//! Arena (owns one Vec<u8> region)
//! ├── AllocHandle (generation, offset, len) — resolved via slice()/slice_mut()
//! ├── Checkpoint — raw saved offset for temp_begin/temp_end style rollback
//! ├── TempScope — borrow guard that rewinds on every exit path
//! └── ScopedArena — owning guard that releases on every exit path
//! ```
//!
//! # Handle staleness
//!
//! Allocations are returned as offset handles, not references, so any number
//! of them can be live at once. The arena tracks a generation counter plus a
//! small stack of rollback watermarks; resolving a handle that was
//! invalidated by a `reset()` or a rewind past its end fails with
//! [`ArenaError::StaleHandle`] instead of silently aliasing recycled memory.
//!
//! # Resource model
//!
//! Single-owner, single-thread. The arena never frees individual
//! allocations: memory comes back only through `reset()`, a checkpoint
//! rewind, or releasing the arena itself.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod config;
pub mod error;
pub mod handle;
pub mod scoped;

pub use arena::{Arena, Checkpoint, TempScope};
pub use config::ArenaConfig;
pub use error::ArenaError;
pub use handle::AllocHandle;
pub use scoped::{with_arena, ScopedArena};
