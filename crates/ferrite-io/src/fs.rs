//! Whole-file convenience built on [`Stream`].

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use ferrite_arena::{AllocHandle, Arena};

use crate::error::IoError;
use crate::str::Str;
use crate::stream::Stream;

/// Read an entire file into arena memory.
///
/// Allocates `size + 1` bytes from `arena`, reads exactly `size` bytes, and
/// leaves a NUL sentinel in the final byte; the returned handle is narrowed
/// to the file content. Streams with no measurable size (pipes, devices)
/// fail with [`IoError::UnknownSize`] — they cannot be sized up front. The
/// file is closed on every path, including errors.
pub fn slurp(arena: &mut Arena, path: impl AsRef<Path>) -> Result<AllocHandle, IoError> {
    let path = path.as_ref();
    let mut stream = Stream::open(path)?;
    let Some(size) = stream.size() else {
        return Err(IoError::UnknownSize {
            path: path.to_path_buf(),
        });
    };
    // Oversized requests fall out of the arena as OutOfMemory.
    let size = usize::try_from(size).unwrap_or(usize::MAX);
    let handle = arena.alloc(size.saturating_add(1), 1)?;
    let bytes = arena.slice_mut(handle)?;

    let mut filled = 0;
    while filled < size {
        let n = stream.read(&mut bytes[filled..size])?;
        if n == 0 {
            return Err(IoError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "file ended before its reported size",
            )));
        }
        filled += n;
    }
    bytes[size] = 0;
    Ok(handle.truncated(size as u32))
}

/// Write a byte-string to `path`, creating or truncating it.
pub fn write_file(path: impl AsRef<Path>, content: Str<'_>) -> Result<(), IoError> {
    let mut file = File::create(path.as_ref())?;
    file.write_all(content.as_bytes())?;
    Ok(())
}
