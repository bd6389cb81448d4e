//! Dump-specific error types.

use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors that can occur while writing dumps.
#[derive(Debug)]
pub enum DumpError {
    /// Creating the output directory or writing a dump file failed.
    Io {
        /// The path being created or written.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
}

impl fmt::Display for DumpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to write dump {}: {source}", path.display())
            }
        }
    }
}

impl Error for DumpError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
        }
    }
}
