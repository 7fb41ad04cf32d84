//! # chunk-inspect
//!
//! Decoder and diagnostic reporter for gzipped self-play training chunks.
//!
//! A chunk is a gzip file holding v6 training records back to back: fixed
//! 8356-byte little-endian structs with no length prefix or delimiter.
//!
//! ## Design Principles
//!
//! 1. **Schema First**: The record layout is a declarative table. Offsets are
//!    computed once and checked against the record size before any decoding.
//!
//! 2. **Partial Results**: A truncated trailing record stops decoding of that
//!    source, but the records before it are still reported.
//!
//! 3. **Per-Source Errors**: A source that cannot be opened is logged and
//!    skipped. No single source aborts a run.
//!
//! ## Modules
//!
//! - `format`: Record schema table, `TrainingRecord`, `RecordDecoder`
//! - `source`: Gzip chunk streams and the sequential record reader
//! - `report`: Plies-left derivation, run totals, discovery, rendering
//! - `config`: Inspection options
//! - `inspector`: Top-level driver
//! - `error`: `ChunkError` and the crate `Result`

pub mod config;
pub mod error;
pub mod format;
pub mod inspector;
pub mod report;
pub mod source;

// Re-export commonly used types
pub use crate::config::{InspectConfig, ReportFormat};
pub use crate::error::{ChunkError, Result};
pub use crate::format::{
    FieldKind, FieldLayout, RecordDecoder, RecordSchema, RecordSummary, TrainingRecord,
    RECORD_SIZE,
};
pub use crate::inspector::Inspector;
pub use crate::report::{
    discover_sources, plies_left, ChunkEntry, ChunkReport, ReportWriter, RunSummary,
};
pub use crate::source::{ChunkStream, RecordReader};
