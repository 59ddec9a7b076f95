//! File streams: open, read, skip, close.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use crate::error::IoError;

/// An open file stream.
///
/// Regular files report their size at open; pipes, sockets, and character
/// devices report `None` — they can still be read, but not slurped. The
/// underlying handle closes when the stream drops, so every exit path
/// closes it; [`Stream::close`] exists for callers who want the moment to
/// be explicit.
#[derive(Debug)]
pub struct Stream {
    file: File,
    size: Option<u64>,
}

impl Stream {
    /// Open `path` for reading.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| {
            if err.kind() == io::ErrorKind::NotFound {
                IoError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                IoError::Io(err)
            }
        })?;
        let size = match file.metadata() {
            Ok(meta) if meta.is_file() => Some(meta.len()),
            _ => None,
        };
        Ok(Self { file, size })
    }

    /// Size in bytes, if the stream has a measurable length.
    pub fn size(&self) -> Option<u64> {
        self.size
    }

    /// Read up to `buf.len()` bytes. Returns the count actually read;
    /// zero means end of stream.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize, IoError> {
        Ok(self.file.read(buf)?)
    }

    /// Skip `n` bytes forward. Returns the count skipped.
    ///
    /// Seekable files jump; unseekable streams fall back to reading and
    /// discarding, in which case the count can be short at end of stream.
    pub fn skip(&mut self, n: u64) -> Result<u64, IoError> {
        let step = i64::try_from(n).unwrap_or(i64::MAX);
        match self.file.seek(SeekFrom::Current(step)) {
            Ok(_) => Ok(n),
            Err(_) => Ok(io::copy(
                &mut (&mut self.file).take(n),
                &mut io::sink(),
            )?),
        }
    }

    /// Close the stream now.
    pub fn close(self) {}
}
