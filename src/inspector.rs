//! Top-level driver: discover sources, decode each, report, and total.

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::config::InspectConfig;
use crate::error::Result;
use crate::format::RecordDecoder;
use crate::report::{discover_sources, ChunkReport, ReportWriter, RunSummary};
use crate::source::{ChunkStream, RecordReader};

/// Decodes chunk sources and writes their reports.
#[derive(Clone, Debug)]
pub struct Inspector {
    config: InspectConfig,
    decoder: RecordDecoder,
}

impl Inspector {
    /// Create an inspector. Fails only if the record layout is inconsistent.
    pub fn new(config: InspectConfig) -> Result<Self> {
        Ok(Self {
            config,
            decoder: RecordDecoder::new()?,
        })
    }

    /// Decode an already-decompressed byte stream.
    pub fn inspect_stream<R: Read>(&self, source: impl Into<PathBuf>, reader: R) -> ChunkReport {
        ChunkReport::collect(source, RecordReader::new(reader, &self.decoder))
    }

    /// Open and decode one chunk file.
    ///
    /// Open failures are returned as errors. Failures after the first
    /// record are kept in the report next to the records decoded so far.
    pub fn inspect_file(&self, path: &Path) -> Result<ChunkReport> {
        let stream = ChunkStream::open(path)?;
        let report = self.inspect_stream(path, stream);

        if let Some(err) = report.error() {
            warn!("{}: {err}; keeping {} records", path.display(), report.len());
        }
        debug!("{}: {} records", path.display(), report.len());
        Ok(report)
    }

    /// Inspect a file or directory and write every report to `out`.
    ///
    /// Per-source errors are logged and reported, never returned; only
    /// failures writing to `out` end the run early.
    pub fn run<W: Write>(&self, path: &Path, out: W) -> io::Result<RunSummary> {
        let discovered = discover_sources(path, &self.config.extension);
        for err in &discovered.errors {
            warn!("{err}");
        }
        info!(
            "inspecting {} source(s) under {}",
            discovered.sources.len(),
            path.display()
        );

        let mut writer = ReportWriter::new(out, &self.config);
        let summary = discovered.sources.iter().try_fold(
            RunSummary::new(),
            |summary, source| -> io::Result<RunSummary> {
                match self.inspect_file(source) {
                    Ok(report) => {
                        writer.write_report(&report)?;
                        Ok(summary.with_report(&report))
                    }
                    Err(err) => {
                        warn!("skipping {}: {err}", source.display());
                        writer.write_failure(source, &err)?;
                        Ok(summary.with_failure())
                    }
                }
            },
        )?;

        writer.write_summary(&summary)?;
        writer.into_inner()?;

        info!(
            "{} records from {} source(s), {} failed, {} truncated",
            summary.total_records,
            summary.files_processed,
            summary.files_failed,
            summary.files_truncated
        );
        Ok(summary)
    }
}
