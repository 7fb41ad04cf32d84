//! Chunk sources: compressed files in, fixed-size records out.
//!
//! - **ChunkStream**: opens a gzip chunk file as a decompressed byte stream
//! - **RecordReader**: splits any byte stream into decoded records

pub mod reader;
pub mod stream;

// Re-export main types
pub use reader::RecordReader;
pub use stream::ChunkStream;
