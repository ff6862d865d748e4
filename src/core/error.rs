//! Error taxonomy for the extraction pipeline.

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::core::header::HeaderError;

/// Unrecovered failures. Any of these aborts the whole read; no partial
/// mapping is returned.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("cannot walk addons directory {}", .path.display())]
    Discovery {
        path: PathBuf,
        #[source]
        source: ignore::Error,
    },

    #[error("found no addon folders in {}", .path.display())]
    NoAddonsFound { path: PathBuf },

    #[error("cannot list functions directory {}", .path.display())]
    Listing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read function file {}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid function file pattern {pattern:?}")]
    Pattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

/// A header-comment failure that was recovered by substituting empty text.
#[derive(Debug)]
pub struct ScanWarning {
    pub path: PathBuf,
    pub reason: HeaderError,
}

impl fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.path.display(), self.reason)
    }
}
