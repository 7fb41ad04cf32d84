//! Shared fixtures: raw record bytes and gzip chunk files.

#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chunk_inspect::{FieldKind, RecordSchema, RECORD_SIZE};
use flate2::write::GzEncoder;
use flate2::Compression;

/// Builds raw record bytes by field name, using the schema offsets.
#[derive(Clone)]
pub struct RecordBuilder {
    bytes: Vec<u8>,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self {
            bytes: vec![0u8; RECORD_SIZE],
        }
    }

    fn put(mut self, name: &str, kind: FieldKind, value: &[u8]) -> Self {
        let field = RecordSchema::v6().field(name).expect("unknown field");
        assert_eq!(field.kind, kind, "wrong kind for {name}");
        self.bytes[field.offset..field.offset + value.len()].copy_from_slice(value);
        self
    }

    pub fn u8(self, name: &str, value: u8) -> Self {
        self.put(name, FieldKind::U8, &[value])
    }

    pub fn u16(self, name: &str, value: u16) -> Self {
        self.put(name, FieldKind::U16, &value.to_le_bytes())
    }

    pub fn u32(self, name: &str, value: u32) -> Self {
        self.put(name, FieldKind::U32, &value.to_le_bytes())
    }

    pub fn f32(self, name: &str, value: f32) -> Self {
        self.put(name, FieldKind::F32, &value.to_le_bytes())
    }

    /// Typical record for a move in a v6 game.
    pub fn game_move(played_idx: u16) -> Self {
        Self::new()
            .u32("version", 6)
            .u32("input_format", 1)
            .u16("played_idx", played_idx)
            .u16("best_idx", played_idx)
            .u32("visits", 400)
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}

/// Concatenate `count` records with ascending `played_idx`.
pub fn game_bytes(count: usize) -> Vec<u8> {
    (0..count)
        .flat_map(|i| RecordBuilder::game_move(i as u16).build())
        .collect()
}

/// Gzip `payload` into `path`.
pub fn write_chunk(path: &Path, payload: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    let file = File::create(path).unwrap();
    let mut encoder = GzEncoder::new(file, Compression::fast());
    encoder.write_all(payload).unwrap();
    encoder.finish().unwrap();
}
