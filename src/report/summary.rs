//! Run-level totals accumulated across sources.

use serde::{Deserialize, Serialize};

use super::ChunkReport;

/// Totals for one inspection run.
///
/// Threaded by value through the driver; each source folds into it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Sources that were opened and decoded (possibly partially).
    pub files_processed: usize,

    /// Sources that could not be opened.
    pub files_failed: usize,

    /// Sources that ended in a partial record.
    pub files_truncated: usize,

    /// Records decoded across all sources.
    pub total_records: usize,
}

impl RunSummary {
    /// Create an empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a decoded source into the totals.
    #[must_use]
    pub fn with_report(mut self, report: &ChunkReport) -> Self {
        self.files_processed += 1;
        self.total_records += report.len();
        if report.is_truncated() {
            self.files_truncated += 1;
        }
        self
    }

    /// Count a source that failed to open.
    #[must_use]
    pub fn with_failure(mut self) -> Self {
        self.files_failed += 1;
        self
    }

    /// Total sources seen, successful or not.
    #[must_use]
    pub fn files_seen(&self) -> usize {
        self.files_processed + self.files_failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChunkError;
    use crate::format::{RecordDecoder, RECORD_SIZE};

    fn report(count: usize, truncated: bool) -> ChunkReport {
        let decoder = RecordDecoder::new().unwrap();
        let mut items: Vec<_> = (0..count)
            .map(|_| decoder.decode(&[0u8; RECORD_SIZE]))
            .collect();
        if truncated {
            items.push(Err(ChunkError::ShortRead {
                index: count,
                actual: 1,
                expected: RECORD_SIZE,
            }));
        }
        ChunkReport::collect("x.gz", items)
    }

    #[test]
    fn test_summary_default() {
        let summary = RunSummary::new();
        assert_eq!(summary.total_records, 0);
        assert_eq!(summary.files_seen(), 0);
    }

    #[test]
    fn test_summary_accumulates() {
        let summary = RunSummary::new()
            .with_report(&report(3, false))
            .with_report(&report(2, true))
            .with_failure();

        assert_eq!(summary.files_processed, 2);
        assert_eq!(summary.files_failed, 1);
        assert_eq!(summary.files_truncated, 1);
        assert_eq!(summary.total_records, 5);
        assert_eq!(summary.files_seen(), 3);
    }

    #[test]
    fn test_summary_serialization() {
        let summary = RunSummary::new().with_report(&report(1, false));
        let json = serde_json::to_string(&summary).unwrap();
        let deserialized: RunSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(summary, deserialized);
    }
}
