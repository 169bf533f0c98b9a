//! Load-time errors.
//!
//! Decoding never fails; the only fatal conditions happen while filling the
//! program buffer.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::memory::LOAD_CAPACITY;

/// Machine-checkable classification of a [`LoadError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The source could not be opened or fully read.
    Io,

    /// The source does not fit in the loadable region.
    Capacity,
}

impl ErrorKind {
    /// Process exit status the command-line driver reports for this kind.
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::Io => 1,
            ErrorKind::Capacity => 3,
        }
    }
}

/// Errors raised while loading a program image.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(
        "{} too large: {} bytes exceeds the {} byte program region",
        display_source(.path),
        .len,
        LOAD_CAPACITY
    )]
    Capacity { path: Option<PathBuf>, len: u64 },

    #[error("could not read {}: {}", display_source(.path), .source)]
    Io {
        path: Option<PathBuf>,
        #[source]
        source: io::Error,
    },
}

impl LoadError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LoadError::Capacity { .. } => ErrorKind::Capacity,
            LoadError::Io { .. } => ErrorKind::Io,
        }
    }
}

fn display_source(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!("file {}", path.display()),
        None => "program".to_string(),
    }
}
