//! Training record type and its fixed-layout decoder.

use serde::{Deserialize, Serialize};

use super::schema::{FieldKind, FieldLayout, RecordSchema, PLANE_COUNT, POLICY_SIZE, RECORD_SIZE};
use crate::error::{ChunkError, Result};

/// One decoded v6 training record.
///
/// Values are taken verbatim from the byte stream. Nothing is range-checked,
/// so an unknown `version` is reported as-is.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrainingRecord {
    /// Format version tag.
    pub version: u32,
    /// Board-encoding variant.
    pub input_format: u32,
    /// Policy distribution over move indices.
    pub probabilities: Vec<f32>,
    /// Bitboard feature planes.
    pub planes: Vec<u64>,

    pub castling_us_ooo: u8,
    pub castling_us_oo: u8,
    pub castling_them_ooo: u8,
    pub castling_them_oo: u8,
    pub side_to_move_or_enpassant: u8,
    /// Counter toward the fifty-move draw rule.
    pub rule50_count: u8,
    pub invariance_info: u8,
    pub dummy: u8,

    pub root_q: f32,
    pub best_q: f32,
    pub root_d: f32,
    pub best_d: f32,
    pub root_m: f32,
    pub best_m: f32,
    /// Plies-left value as written by the producer (not the derived count).
    pub plies_left: f32,
    pub result_q: f32,
    pub result_d: f32,
    pub played_q: f32,
    pub played_d: f32,
    pub played_m: f32,
    pub orig_q: f32,
    pub orig_d: f32,
    pub orig_m: f32,

    /// Search visit count.
    pub visits: u32,
    /// Move index actually played.
    pub played_idx: u16,
    /// Move index the search judged best.
    pub best_idx: u16,
    /// KL divergence between search policy and played policy.
    pub policy_kld: f32,
    pub reserved: u32,
}

impl TrainingRecord {
    /// Castling flags as (us OOO, us OO, them OOO, them OO).
    #[must_use]
    pub fn castling(&self) -> [u8; 4] {
        [
            self.castling_us_ooo,
            self.castling_us_oo,
            self.castling_them_ooo,
            self.castling_them_oo,
        ]
    }

    /// Check whether the played move is the one the search preferred.
    #[must_use]
    pub fn best_move_played(&self) -> bool {
        self.played_idx == self.best_idx
    }

    /// Consumer view with the diagnostic fields only.
    #[must_use]
    pub fn summary(&self) -> RecordSummary {
        RecordSummary {
            version: self.version,
            input_format: self.input_format,
            result_q: self.result_q,
            root_q: self.root_q,
            best_q: self.best_q,
            played_idx: self.played_idx,
            best_idx: self.best_idx,
            visits: self.visits,
            rule50_count: self.rule50_count,
            castling: self.castling(),
            side_to_move_or_enpassant: self.side_to_move_or_enpassant,
            invariance_info: self.invariance_info,
            policy_kld: self.policy_kld,
            stored_plies_left: self.plies_left,
        }
    }
}

/// Diagnostic subset of a [`TrainingRecord`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordSummary {
    pub version: u32,
    pub input_format: u32,
    pub result_q: f32,
    pub root_q: f32,
    pub best_q: f32,
    pub played_idx: u16,
    pub best_idx: u16,
    pub visits: u32,
    pub rule50_count: u8,
    pub castling: [u8; 4],
    pub side_to_move_or_enpassant: u8,
    pub invariance_info: u8,
    pub policy_kld: f32,
    pub stored_plies_left: f32,
}

/// Every field position, resolved once from the schema.
#[derive(Clone, Debug)]
struct Offsets {
    version: FieldLayout,
    input_format: FieldLayout,
    probabilities: FieldLayout,
    planes: FieldLayout,
    flags: [FieldLayout; 8],
    stats: [FieldLayout; 15],
    visits: FieldLayout,
    played_idx: FieldLayout,
    best_idx: FieldLayout,
    policy_kld: FieldLayout,
    reserved: FieldLayout,
}

const FLAG_FIELDS: [&str; 8] = [
    "castling_us_ooo",
    "castling_us_oo",
    "castling_them_ooo",
    "castling_them_oo",
    "side_to_move_or_enpassant",
    "rule50_count",
    "invariance_info",
    "dummy",
];

const STAT_FIELDS: [&str; 15] = [
    "root_q",
    "best_q",
    "root_d",
    "best_d",
    "root_m",
    "best_m",
    "plies_left",
    "result_q",
    "result_d",
    "played_q",
    "played_d",
    "played_m",
    "orig_q",
    "orig_d",
    "orig_m",
];

impl Offsets {
    fn resolve(schema: &RecordSchema) -> Result<Self> {
        let mut flags = [FieldLayout {
            name: "",
            kind: FieldKind::U8,
            count: 1,
            offset: 0,
        }; 8];
        for (slot, name) in flags.iter_mut().zip(FLAG_FIELDS) {
            *slot = schema.require(name, FieldKind::U8, 1)?;
        }

        let mut stats = [FieldLayout {
            name: "",
            kind: FieldKind::F32,
            count: 1,
            offset: 0,
        }; 15];
        for (slot, name) in stats.iter_mut().zip(STAT_FIELDS) {
            *slot = schema.require(name, FieldKind::F32, 1)?;
        }

        Ok(Self {
            version: schema.require("version", FieldKind::U32, 1)?,
            input_format: schema.require("input_format", FieldKind::U32, 1)?,
            probabilities: schema.require("probabilities", FieldKind::F32, POLICY_SIZE)?,
            planes: schema.require("planes", FieldKind::U64, PLANE_COUNT)?,
            flags,
            stats,
            visits: schema.require("visits", FieldKind::U32, 1)?,
            played_idx: schema.require("played_idx", FieldKind::U16, 1)?,
            best_idx: schema.require("best_idx", FieldKind::U16, 1)?,
            policy_kld: schema.require("policy_kld", FieldKind::F32, 1)?,
            reserved: schema.require("reserved", FieldKind::U32, 1)?,
        })
    }
}

/// Copy `N` bytes starting at `offset`.
fn le_bytes<const N: usize>(bytes: &[u8], offset: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[offset..offset + N]);
    out
}

fn read_u8(bytes: &[u8], field: &FieldLayout) -> u8 {
    bytes[field.offset]
}

fn read_u16(bytes: &[u8], field: &FieldLayout) -> u16 {
    u16::from_le_bytes(le_bytes(bytes, field.offset))
}

fn read_u32(bytes: &[u8], field: &FieldLayout) -> u32 {
    u32::from_le_bytes(le_bytes(bytes, field.offset))
}

fn read_f32(bytes: &[u8], field: &FieldLayout) -> f32 {
    f32::from_le_bytes(le_bytes(bytes, field.offset))
}

fn read_f32_array(bytes: &[u8], field: &FieldLayout) -> Vec<f32> {
    bytes[field.offset..field.end()]
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes(le_bytes(c, 0)))
        .collect()
}

fn read_u64_array(bytes: &[u8], field: &FieldLayout) -> Vec<u64> {
    bytes[field.offset..field.end()]
        .chunks_exact(8)
        .map(|c| u64::from_le_bytes(le_bytes(c, 0)))
        .collect()
}

/// Decodes fixed-size record slices into [`TrainingRecord`]s.
///
/// Construction resolves and checks every field against the schema, so
/// `decode` itself only does bounds-safe extraction.
#[derive(Clone, Debug)]
pub struct RecordDecoder {
    offsets: Offsets,
    record_size: usize,
}

impl RecordDecoder {
    /// Create a decoder for the v6 layout.
    pub fn new() -> Result<Self> {
        Self::with_schema(RecordSchema::v6())
    }

    /// Create a decoder for a custom schema that carries the v6 fields.
    pub fn with_schema(schema: &RecordSchema) -> Result<Self> {
        schema.validate(RECORD_SIZE)?;
        Ok(Self {
            offsets: Offsets::resolve(schema)?,
            record_size: schema.size(),
        })
    }

    /// Size of one record in bytes.
    #[must_use]
    pub fn record_size(&self) -> usize {
        self.record_size
    }

    /// Decode exactly one record.
    ///
    /// A shorter slice is a short read; a longer one is rejected outright.
    /// The decoder sees a single slice, so a `ShortRead` from here always
    /// carries `index: 0`. [`RecordReader`](crate::source::RecordReader)
    /// checks lengths itself and reports the real ordinal.
    pub fn decode(&self, bytes: &[u8]) -> Result<TrainingRecord> {
        if bytes.len() < self.record_size {
            return Err(ChunkError::ShortRead {
                index: 0,
                actual: bytes.len(),
                expected: self.record_size,
            });
        }
        if bytes.len() > self.record_size {
            return Err(ChunkError::RecordSize {
                expected: self.record_size,
                actual: bytes.len(),
            });
        }

        let o = &self.offsets;
        let [us_ooo, us_oo, them_ooo, them_oo, stm, rule50, invariance, dummy] =
            o.flags.map(|f| read_u8(bytes, &f));
        let [
            root_q,
            best_q,
            root_d,
            best_d,
            root_m,
            best_m,
            plies_left,
            result_q,
            result_d,
            played_q,
            played_d,
            played_m,
            orig_q,
            orig_d,
            orig_m,
        ] = o.stats.map(|f| read_f32(bytes, &f));

        Ok(TrainingRecord {
            version: read_u32(bytes, &o.version),
            input_format: read_u32(bytes, &o.input_format),
            probabilities: read_f32_array(bytes, &o.probabilities),
            planes: read_u64_array(bytes, &o.planes),
            castling_us_ooo: us_ooo,
            castling_us_oo: us_oo,
            castling_them_ooo: them_ooo,
            castling_them_oo: them_oo,
            side_to_move_or_enpassant: stm,
            rule50_count: rule50,
            invariance_info: invariance,
            dummy,
            root_q,
            best_q,
            root_d,
            best_d,
            root_m,
            best_m,
            plies_left,
            result_q,
            result_d,
            played_q,
            played_d,
            played_m,
            orig_q,
            orig_d,
            orig_m,
            visits: read_u32(bytes, &o.visits),
            played_idx: read_u16(bytes, &o.played_idx),
            best_idx: read_u16(bytes, &o.best_idx),
            policy_kld: read_f32(bytes, &o.policy_kld),
            reserved: read_u32(bytes, &o.reserved),
        })
    }
}
