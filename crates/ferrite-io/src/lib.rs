//! String views, console output, and file streams.
//!
//! These are the toolkit's external collaborators: thin layers with no
//! state machine of their own, consumed by arena users through a narrow
//! interface. The only piece that touches the arena is [`slurp`], which
//! reads a whole file into arena memory.
//!
//! - [`Str`]: borrowed byte-string view — `(pointer, length)` with content
//!   equality, no ownership of its own.
//! - [`Console`]: line-buffered raw/newline writes plus a small
//!   `%i/%f/%s/%S` formatter for diagnostics.
//! - [`Stream`]: open/read/skip/close over a file.
//! - [`slurp`] / [`write_file`]: whole-file convenience built on the above.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod console;
pub mod error;
pub mod format;
pub mod fs;
pub mod str;
pub mod stream;

pub use console::Console;
pub use error::IoError;
pub use format::{format_into, Arg};
pub use fs::{slurp, write_file};
pub use str::Str;
pub use stream::Stream;
