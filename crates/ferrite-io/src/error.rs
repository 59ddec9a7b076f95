//! I/O-layer error types.

use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

use ferrite_arena::ArenaError;

/// Errors from the file-stream layer.
#[derive(Debug)]
pub enum IoError {
    /// The path does not name an openable file.
    NotFound {
        /// The path that failed to open.
        path: PathBuf,
    },
    /// The stream has no measurable length (a pipe, socket, or device),
    /// so it cannot be slurped into a single allocation.
    UnknownSize {
        /// The path whose size could not be measured.
        path: PathBuf,
    },
    /// The target arena could not supply the buffer.
    Arena(ArenaError),
    /// An underlying operating-system failure.
    Io(io::Error),
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => {
                write!(f, "file not found: {}", path.display())
            }
            Self::UnknownSize { path } => {
                write!(f, "stream has no measurable size: {}", path.display())
            }
            Self::Arena(err) => write!(f, "arena allocation failed: {err}"),
            Self::Io(err) => write!(f, "i/o failure: {err}"),
        }
    }
}

impl Error for IoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Arena(err) => Some(err),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ArenaError> for IoError {
    fn from(err: ArenaError) -> Self {
        Self::Arena(err)
    }
}

impl From<io::Error> for IoError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}
