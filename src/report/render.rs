//! Human- and machine-readable report output.

use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use super::{ChunkEntry, ChunkReport, RunSummary};
use crate::config::{InspectConfig, ReportFormat};
use crate::error::ChunkError;
use crate::format::RecordSummary;

#[derive(Serialize)]
struct EntryDoc {
    index: usize,
    plies_left: usize,
    #[serde(flatten)]
    record: RecordSummary,
}

impl From<&ChunkEntry> for EntryDoc {
    fn from(entry: &ChunkEntry) -> Self {
        Self {
            index: entry.index,
            plies_left: entry.plies_left,
            record: entry.record.summary(),
        }
    }
}

#[derive(Serialize)]
struct SourceDoc {
    source: String,
    count: usize,
    truncated: bool,
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    records: Option<Vec<EntryDoc>>,
}

#[derive(Serialize)]
struct SummaryDoc<'a> {
    summary: &'a RunSummary,
}

fn to_io(e: serde_json::Error) -> io::Error {
    io::Error::other(e)
}

/// Writes per-source reports and the run total to any sink.
pub struct ReportWriter<W> {
    out: W,
    format: ReportFormat,
    summary_only: bool,
}

impl<W: Write> ReportWriter<W> {
    /// Create a writer using the output options of `config`.
    pub fn new(out: W, config: &InspectConfig) -> Self {
        Self {
            out,
            format: config.format,
            summary_only: config.summary_only,
        }
    }

    /// Write the report block for one decoded source.
    pub fn write_report(&mut self, report: &ChunkReport) -> io::Result<()> {
        match self.format {
            ReportFormat::Text => self.write_report_text(report),
            ReportFormat::Json => {
                let doc = SourceDoc {
                    source: report.source().display().to_string(),
                    count: report.len(),
                    truncated: report.is_truncated(),
                    error: report.error().map(ToString::to_string),
                    records: (!self.summary_only)
                        .then(|| report.entries().iter().map(EntryDoc::from).collect()),
                };
                self.write_json_line(&doc)
            }
        }
    }

    /// Write the block for a source that could not be opened.
    pub fn write_failure(&mut self, source: &Path, error: &ChunkError) -> io::Result<()> {
        match self.format {
            ReportFormat::Text => {
                writeln!(self.out, "--- File: {} ---", source.display())?;
                writeln!(self.out, "  Error: {error}")?;
                writeln!(self.out, "  Total moves in file: 0")?;
                writeln!(self.out)
            }
            ReportFormat::Json => {
                let doc = SourceDoc {
                    source: source.display().to_string(),
                    count: 0,
                    truncated: false,
                    error: Some(error.to_string()),
                    records: None,
                };
                self.write_json_line(&doc)
            }
        }
    }

    /// Write the grand total line.
    pub fn write_summary(&mut self, summary: &RunSummary) -> io::Result<()> {
        match self.format {
            ReportFormat::Text => {
                writeln!(self.out, "Total moves processed: {}", summary.total_records)?;
                if summary.files_failed > 0 || summary.files_truncated > 0 {
                    writeln!(
                        self.out,
                        "Files: {} decoded, {} failed, {} truncated",
                        summary.files_processed, summary.files_failed, summary.files_truncated
                    )?;
                }
                Ok(())
            }
            ReportFormat::Json => self.write_json_line(&SummaryDoc { summary }),
        }
    }

    /// Flush and recover the underlying sink.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }

    fn write_report_text(&mut self, report: &ChunkReport) -> io::Result<()> {
        writeln!(self.out, "--- File: {} ---", report.source().display())?;
        if !self.summary_only {
            for entry in report.entries() {
                write_entry_text(&mut self.out, entry)?;
            }
        }
        if let Some(error) = report.error() {
            writeln!(self.out, "  Error: {error}")?;
        }
        writeln!(self.out, "  Total moves in file: {}", report.len())?;
        writeln!(self.out)
    }

    fn write_json_line<T: Serialize>(&mut self, doc: &T) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, doc).map_err(to_io)?;
        writeln!(self.out)
    }
}

fn write_entry_text<W: Write>(out: &mut W, entry: &ChunkEntry) -> io::Result<()> {
    let r = &entry.record;
    let [us_ooo, us_oo, them_ooo, them_oo] = r.castling();
    writeln!(
        out,
        "  Move {} (MoveId={}): PliesLeft={}, Version={}, Format={}, \
         ResultQ={:.4}, RootQ={:.4}, BestQ={:.4}, \
         PlayedIdx={}, BestIdx={}, Visits={}, \
         Rule50={}, Castling=({}, {}, {}, {}), PolicyKLD={:.4}",
        entry.index,
        r.played_idx,
        entry.plies_left,
        r.version,
        r.input_format,
        r.result_q,
        r.root_q,
        r.best_q,
        r.played_idx,
        r.best_idx,
        r.visits,
        r.rule50_count,
        us_ooo,
        us_oo,
        them_ooo,
        them_oo,
        r.policy_kld,
    )
}
