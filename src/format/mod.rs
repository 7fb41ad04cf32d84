//! Binary layout of v6 training records.
//!
//! ## Overview
//!
//! - **Schema**: declarative field table with offsets computed once
//! - **Record**: `TrainingRecord` and the `RecordDecoder` that fills it
//!
//! All values are little-endian and records are exactly
//! [`RECORD_SIZE`] bytes with no delimiter between them.

pub mod record;
pub mod schema;

// Re-export main types
pub use record::{RecordDecoder, RecordSummary, TrainingRecord};
pub use schema::{
    FieldKind, FieldLayout, FieldSpec, RecordSchema, PLANE_COUNT, POLICY_SIZE, RECORD_SIZE,
    V6_FIELDS,
};
