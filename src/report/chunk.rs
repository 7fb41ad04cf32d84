//! Per-source post-processing: materialize, then derive plies-left.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ChunkError, Result};
use crate::format::TrainingRecord;

/// Plies remaining until the end of the game for the record at `index`.
///
/// Assumes the last record of a source is the final move of its game.
#[must_use]
pub fn plies_left(index: usize, total: usize) -> usize {
    debug_assert!(index < total, "index {index} out of range for {total} records");
    total.saturating_sub(index + 1)
}

/// A decoded record with its position-derived fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChunkEntry {
    /// Ordinal position within the source (0-indexed).
    pub index: usize,

    /// Derived plies remaining (`total - index - 1`).
    pub plies_left: usize,

    /// The decoded record.
    pub record: TrainingRecord,
}

/// Everything decoded from one source.
///
/// Decoding stops at the first error; the records before it are kept and
/// the error is stored alongside them.
#[derive(Debug)]
pub struct ChunkReport {
    source: PathBuf,
    entries: Vec<ChunkEntry>,
    error: Option<ChunkError>,
}

impl ChunkReport {
    /// Drain `records` and derive per-record fields.
    ///
    /// Plies-left needs the final count, so all records are collected
    /// before any entry is built. Unattributed stream errors are tagged
    /// with `source`.
    pub fn collect<I>(source: impl Into<PathBuf>, records: I) -> Self
    where
        I: IntoIterator<Item = Result<TrainingRecord>>,
    {
        let source = source.into();

        let mut decoded = Vec::new();
        let mut error = None;
        for item in records {
            match item {
                Ok(record) => decoded.push(record),
                Err(e) => {
                    error = Some(e.with_path(&source));
                    break;
                }
            }
        }

        let total = decoded.len();
        let entries = decoded
            .into_iter()
            .enumerate()
            .map(|(index, record)| ChunkEntry {
                index,
                plies_left: plies_left(index, total),
                record,
            })
            .collect();

        Self {
            source,
            entries,
            error,
        }
    }

    /// Path of the source these records came from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Decoded entries in stream order.
    pub fn entries(&self) -> &[ChunkEntry] {
        &self.entries
    }

    /// The error that stopped decoding, if any.
    pub fn error(&self) -> Option<&ChunkError> {
        self.error.as_ref()
    }

    /// Number of records decoded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no records were decoded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if the source ended in a partial record.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.error.as_ref().is_some_and(ChunkError::is_short_read)
    }

    /// Split into entries and the stopping error.
    pub fn into_parts(self) -> (Vec<ChunkEntry>, Option<ChunkError>) {
        (self.entries, self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{RecordDecoder, RECORD_SIZE};
    use std::io;

    fn record(played_idx: u16) -> TrainingRecord {
        let mut bytes = vec![0u8; RECORD_SIZE];
        bytes[8344..8346].copy_from_slice(&played_idx.to_le_bytes());
        RecordDecoder::new().unwrap().decode(&bytes).unwrap()
    }

    #[test]
    fn test_plies_left() {
        assert_eq!(plies_left(0, 3), 2);
        assert_eq!(plies_left(1, 3), 1);
        assert_eq!(plies_left(2, 3), 0);
        assert_eq!(plies_left(0, 1), 0);
    }

    #[test]
    fn test_collect_three_records() {
        let records = (0..3).map(|i| Ok(record(i)));
        let report = ChunkReport::collect("a.gz", records);

        assert_eq!(report.len(), 3);
        let plies: Vec<usize> = report.entries().iter().map(|e| e.plies_left).collect();
        assert_eq!(plies, vec![2, 1, 0]);
        let indices: Vec<usize> = report.entries().iter().map(|e| e.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert!(report.error().is_none());
        assert!(!report.is_truncated());
    }

    #[test]
    fn test_collect_keeps_partial_result() {
        let records = vec![
            Ok(record(10)),
            Ok(record(11)),
            Err(ChunkError::ShortRead {
                index: 2,
                actual: 17,
                expected: RECORD_SIZE,
            }),
            Ok(record(12)),
        ];
        let report = ChunkReport::collect("b.gz", records);

        assert_eq!(report.len(), 2);
        assert!(report.is_truncated());
        assert_eq!(report.entries()[0].plies_left, 1);
        assert_eq!(report.entries()[1].plies_left, 0);
        assert_eq!(report.entries()[1].record.played_idx, 11);
    }

    #[test]
    fn test_collect_tags_stream_errors() {
        let records = vec![
            Ok(record(1)),
            Err(ChunkError::Io(io::Error::new(io::ErrorKind::InvalidData, "crc mismatch"))),
        ];
        let report = ChunkReport::collect("games/c.gz", records);

        assert_eq!(report.len(), 1);
        assert!(!report.is_truncated());
        match report.error() {
            Some(ChunkError::Open { path, .. }) => assert_eq!(path, Path::new("games/c.gz")),
            other => panic!("expected Open, got {other:?}"),
        }
    }

    #[test]
    fn test_collect_empty() {
        let report = ChunkReport::collect("empty.gz", Vec::<Result<TrainingRecord>>::new());
        assert!(report.is_empty());
        assert!(report.error().is_none());
        assert_eq!(report.source(), Path::new("empty.gz"));
    }

    #[test]
    fn test_into_parts() {
        let report = ChunkReport::collect("d.gz", vec![Ok(record(3))]);
        let (entries, error) = report.into_parts();
        assert_eq!(entries.len(), 1);
        assert!(error.is_none());
    }
}
