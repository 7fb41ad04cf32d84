//! Declarative byte layout of a v6 training record.
//!
//! The layout is a table of rows (name, kind, count) in byte order. Offsets
//! are computed once from the table; nothing else in the crate hardcodes
//! a field position.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{ChunkError, Result};

/// Size in bytes of one v6 training record.
pub const RECORD_SIZE: usize = 8356;

/// Number of move indices in the policy head.
pub const POLICY_SIZE: usize = 1858;

/// Number of 64-bit input planes.
pub const PLANE_COUNT: usize = 104;

/// Primitive type stored in a field. All values are little-endian.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    U8,
    U16,
    U32,
    U64,
    F32,
}

impl FieldKind {
    /// Width of one element in bytes.
    #[must_use]
    pub const fn width(self) -> usize {
        match self {
            FieldKind::U8 => 1,
            FieldKind::U16 => 2,
            FieldKind::U32 | FieldKind::F32 => 4,
            FieldKind::U64 => 8,
        }
    }
}

/// One row of the layout table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub count: usize,
}

impl FieldSpec {
    const fn scalar(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            count: 1,
        }
    }

    const fn array(name: &'static str, kind: FieldKind, count: usize) -> Self {
        Self { name, kind, count }
    }

    /// Total bytes occupied by this row.
    #[must_use]
    pub const fn byte_len(&self) -> usize {
        self.kind.width() * self.count
    }
}

/// The v6 record table, in byte order.
pub const V6_FIELDS: &[FieldSpec] = &[
    FieldSpec::scalar("version", FieldKind::U32),
    FieldSpec::scalar("input_format", FieldKind::U32),
    FieldSpec::array("probabilities", FieldKind::F32, POLICY_SIZE),
    FieldSpec::array("planes", FieldKind::U64, PLANE_COUNT),
    FieldSpec::scalar("castling_us_ooo", FieldKind::U8),
    FieldSpec::scalar("castling_us_oo", FieldKind::U8),
    FieldSpec::scalar("castling_them_ooo", FieldKind::U8),
    FieldSpec::scalar("castling_them_oo", FieldKind::U8),
    FieldSpec::scalar("side_to_move_or_enpassant", FieldKind::U8),
    FieldSpec::scalar("rule50_count", FieldKind::U8),
    FieldSpec::scalar("invariance_info", FieldKind::U8),
    FieldSpec::scalar("dummy", FieldKind::U8),
    FieldSpec::scalar("root_q", FieldKind::F32),
    FieldSpec::scalar("best_q", FieldKind::F32),
    FieldSpec::scalar("root_d", FieldKind::F32),
    FieldSpec::scalar("best_d", FieldKind::F32),
    FieldSpec::scalar("root_m", FieldKind::F32),
    FieldSpec::scalar("best_m", FieldKind::F32),
    FieldSpec::scalar("plies_left", FieldKind::F32),
    FieldSpec::scalar("result_q", FieldKind::F32),
    FieldSpec::scalar("result_d", FieldKind::F32),
    FieldSpec::scalar("played_q", FieldKind::F32),
    FieldSpec::scalar("played_d", FieldKind::F32),
    FieldSpec::scalar("played_m", FieldKind::F32),
    FieldSpec::scalar("orig_q", FieldKind::F32),
    FieldSpec::scalar("orig_d", FieldKind::F32),
    FieldSpec::scalar("orig_m", FieldKind::F32),
    FieldSpec::scalar("visits", FieldKind::U32),
    FieldSpec::scalar("played_idx", FieldKind::U16),
    FieldSpec::scalar("best_idx", FieldKind::U16),
    FieldSpec::scalar("policy_kld", FieldKind::F32),
    FieldSpec::scalar("reserved", FieldKind::U32),
];

const fn table_size(fields: &[FieldSpec]) -> usize {
    let mut total = 0;
    let mut i = 0;
    while i < fields.len() {
        total += fields[i].byte_len();
        i += 1;
    }
    total
}

const _: () = assert!(table_size(V6_FIELDS) == RECORD_SIZE);

/// A table row with its resolved byte offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldLayout {
    pub name: &'static str,
    pub kind: FieldKind,
    pub count: usize,
    pub offset: usize,
}

impl FieldLayout {
    /// Bytes occupied by this field.
    #[must_use]
    pub const fn byte_len(&self) -> usize {
        self.kind.width() * self.count
    }

    /// Offset one past the last byte of this field.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.offset + self.byte_len()
    }
}

/// Resolved record layout with name lookup.
#[derive(Clone, Debug)]
pub struct RecordSchema {
    fields: Vec<FieldLayout>,
    index: FxHashMap<&'static str, usize>,
    size: usize,
}

static V6_SCHEMA: Lazy<RecordSchema> = Lazy::new(|| RecordSchema::from_fields(V6_FIELDS));

impl RecordSchema {
    /// Compute offsets for a table of rows laid out back to back.
    pub fn from_fields(specs: &[FieldSpec]) -> Self {
        let mut fields = Vec::with_capacity(specs.len());
        let mut index = FxHashMap::default();
        let mut offset = 0;

        for spec in specs {
            index.insert(spec.name, fields.len());
            fields.push(FieldLayout {
                name: spec.name,
                kind: spec.kind,
                count: spec.count,
                offset,
            });
            offset += spec.byte_len();
        }

        Self {
            fields,
            index,
            size: offset,
        }
    }

    /// The shared v6 layout.
    pub fn v6() -> &'static RecordSchema {
        &V6_SCHEMA
    }

    /// Total record size in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// All fields in byte order.
    pub fn fields(&self) -> &[FieldLayout] {
        &self.fields
    }

    /// Look up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldLayout> {
        self.index.get(name).map(|&i| &self.fields[i])
    }

    /// Look up a field and check its declared shape.
    pub fn require(&self, name: &str, kind: FieldKind, count: usize) -> Result<FieldLayout> {
        let field = self
            .field(name)
            .ok_or_else(|| ChunkError::Layout(format!("missing field `{name}`")))?;
        if field.kind != kind || field.count != count {
            return Err(ChunkError::Layout(format!(
                "field `{name}` is {:?}x{}, expected {:?}x{}",
                field.kind, field.count, kind, count
            )));
        }
        Ok(*field)
    }

    /// Check the table against the size a record must have.
    pub fn validate(&self, expected_size: usize) -> Result<()> {
        if self.index.len() != self.fields.len() {
            return Err(ChunkError::Layout("duplicate field names".to_string()));
        }
        if self.size != expected_size {
            return Err(ChunkError::Layout(format!(
                "fields cover {} bytes, expected {}",
                self.size, expected_size
            )));
        }
        Ok(())
    }
}
