//! Error types for chunk decoding.
//!
//! Every error is scoped to a single chunk source. The driver logs it and
//! moves on to the next source; nothing here aborts a whole run.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for chunk operations.
pub type Result<T> = std::result::Result<T, ChunkError>;

/// Errors that can occur while opening or decoding a chunk source.
#[derive(Debug, Error)]
pub enum ChunkError {
    /// The source could not be opened or its gzip container is malformed.
    #[error("cannot open chunk {}: {source}", path.display())]
    Open {
        /// Path of the offending source.
        path: PathBuf,
        /// Underlying I/O or decompression failure.
        #[source]
        source: io::Error,
    },

    /// A trailing partial record was found.
    ///
    /// Records decoded before this point are still valid.
    #[error("incomplete record {index}: got {actual} bytes, expected {expected}")]
    ShortRead {
        /// Ordinal of the partial record within its source.
        index: usize,
        /// Bytes actually available.
        actual: usize,
        /// Bytes required for one record.
        expected: usize,
    },

    /// A slice longer than one record was handed to the decoder.
    #[error("record slice is {actual} bytes, expected exactly {expected}")]
    RecordSize {
        /// Bytes required for one record.
        expected: usize,
        /// Bytes supplied.
        actual: usize,
    },

    /// The record schema failed its structural check.
    #[error("invalid record layout: {0}")]
    Layout(String),

    /// Stream failure not yet attributed to a path.
    #[error("chunk stream error: {0}")]
    Io(#[from] io::Error),

    /// A directory entry could not be read during discovery.
    #[error("cannot scan {}: {message}", path.display())]
    Discovery {
        /// Path that could not be read.
        path: PathBuf,
        /// Description of the failure.
        message: String,
    },
}

impl ChunkError {
    /// Check whether this error marks a truncated trailing record.
    #[must_use]
    pub fn is_short_read(&self) -> bool {
        matches!(self, ChunkError::ShortRead { .. })
    }

    /// Attach a source path to a stream error.
    ///
    /// Bare `Io` errors become `Open`; everything else is returned as-is.
    #[must_use]
    pub fn with_path(self, path: impl Into<PathBuf>) -> Self {
        match self {
            ChunkError::Io(source) => ChunkError::Open {
                path: path.into(),
                source,
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_read_display() {
        let err = ChunkError::ShortRead {
            index: 3,
            actual: 100,
            expected: 8356,
        };
        assert_eq!(
            err.to_string(),
            "incomplete record 3: got 100 bytes, expected 8356"
        );
        assert!(err.is_short_read());
    }

    #[test]
    fn test_with_path_converts_io() {
        let err = ChunkError::from(io::Error::new(
            io::ErrorKind::InvalidData,
            "corrupt deflate stream",
        ));
        let err = err.with_path("games/training.1.gz");

        match err {
            ChunkError::Open { path, source } => {
                assert_eq!(path, PathBuf::from("games/training.1.gz"));
                assert_eq!(source.kind(), io::ErrorKind::InvalidData);
            }
            other => panic!("expected Open, got {other:?}"),
        }
    }

    #[test]
    fn test_with_path_keeps_short_read() {
        let err = ChunkError::ShortRead {
            index: 0,
            actual: 1,
            expected: 8356,
        }
        .with_path("a.gz");
        assert!(err.is_short_read());
    }

    #[test]
    fn test_open_display_includes_path() {
        let err = ChunkError::Open {
            path: PathBuf::from("missing.gz"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        let text = err.to_string();
        assert!(text.contains("missing.gz"));
        assert!(text.contains("no such file"));
        assert!(!err.is_short_read());
    }
}
