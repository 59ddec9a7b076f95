//! Ferrite: an embedded-oriented arena allocator and data-structure toolkit.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Ferrite sub-crates. For most users, adding `ferrite` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use ferrite::prelude::*;
//!
//! // A 64 KiB arena backing a string-keyed table.
//! let mut arena = Arena::with_capacity(64 * 1024).unwrap();
//! let mut table = Table::new(&mut arena, 16).unwrap();
//!
//! table.put(&mut arena, b"answer", 42).unwrap();
//! assert_eq!(table.get(&arena, b"answer").unwrap(), Some(42));
//!
//! // Temporary scratch work is rolled back when the scope ends.
//! let before = arena.used();
//! {
//!     let mut tmp = arena.temp();
//!     tmp.alloc(1024, 8).unwrap();
//! }
//! assert_eq!(arena.used(), before);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`arena`] | `ferrite-arena` | Bump arena, checkpoints, handles, scoped guards |
//! | [`ds`] | `ferrite-ds` | Arena-backed `Table` and `List` |
//! | [`io`] | `ferrite-io` | Console output, formatting, file slurping, streams |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Bump arena allocation (`ferrite-arena`).
///
/// Contains [`arena::Arena`] itself plus checkpoints, temporary scopes,
/// offset handles, and the [`arena::ScopedArena`] lifetime guard.
pub use ferrite_arena as arena;

/// Arena-backed data structures (`ferrite-ds`).
///
/// Provides the open-addressing string-keyed [`ds::Table`] and the
/// growable fixed-element [`ds::List`].
pub use ferrite_ds as ds;

/// Console, formatting, and file I/O (`ferrite-io`).
///
/// Buffered console output via [`io::Console`], printf-style formatting
/// with [`io::format_into`], and arena-backed file reads via [`io::slurp`].
pub use ferrite_io as io;

/// Common imports for typical Ferrite usage.
///
/// ```rust
/// use ferrite::prelude::*;
/// ```
///
/// This imports the most frequently used types: the arena and its handles,
/// the data structures, and the I/O entry points.
pub mod prelude {
    // Arena
    pub use ferrite_arena::{
        AllocHandle, Arena, ArenaConfig, ArenaError, Checkpoint, ScopedArena, TempScope,
        with_arena,
    };

    // Data structures
    pub use ferrite_ds::{List, Table};

    // I/O
    pub use ferrite_io::{Arg, Console, IoError, Str, Stream, format_into, slurp, write_file};
}
