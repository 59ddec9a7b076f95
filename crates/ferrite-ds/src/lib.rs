//! Arena-backed data structures.
//!
//! Both structures here are pure consumers of the
//! [`Arena`](ferrite_arena::Arena) allocation contract — they never touch
//! any other allocator, and they never free memory themselves. Reclamation
//! is entirely the arena's business (reset, rewind, or release).
//!
//! - [`Table`]: open-addressing map from byte-string keys to opaque words.
//! - [`List`]: growable array of fixed-size elements, grown through the
//!   arena's in-place resize path.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod list;
pub mod table;

pub use list::List;
pub use table::Table;
