//! Per-source post-processing and report output.
//!
//! ## Overview
//!
//! - **ChunkReport**: all records of one source with derived plies-left
//! - **RunSummary**: totals threaded through a run
//! - **discover_sources**: file or recursive directory input
//! - **ReportWriter**: text or JSON Lines rendering

pub mod chunk;
pub mod discover;
pub mod render;
pub mod summary;

// Re-export main types
pub use chunk::{plies_left, ChunkEntry, ChunkReport};
pub use discover::{discover_sources, DiscoveredSources};
pub use render::ReportWriter;
pub use summary::RunSummary;
