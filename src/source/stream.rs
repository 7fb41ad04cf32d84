//! Gzip-backed chunk stream.

use std::fs::File;
use std::io::{self, BufReader, Read, Seek};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;
use log::debug;

use crate::error::{ChunkError, Result};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Decompressed byte stream over one chunk file.
///
/// The file handle is owned by the stream and released on drop.
pub struct ChunkStream {
    path: PathBuf,
    decoder: Option<MultiGzDecoder<BufReader<File>>>,
}

impl ChunkStream {
    /// Open a gzip chunk file.
    ///
    /// The gzip magic is checked up front. A zero-length file is treated as
    /// an empty stream. Corruption further in (bad deflate data, CRC or size
    /// trailer) surfaces from `read`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let open_err = |source: io::Error| ChunkError::Open {
            path: path.to_path_buf(),
            source,
        };

        let mut file = File::open(path).map_err(open_err)?;
        let len = file.metadata().map_err(open_err)?.len();
        debug!("opening chunk {} ({} compressed bytes)", path.display(), len);

        if len == 0 {
            return Ok(Self {
                path: path.to_path_buf(),
                decoder: None,
            });
        }

        let mut magic = [0u8; 2];
        let is_gzip = match file.read_exact(&mut magic) {
            Ok(()) => magic == GZIP_MAGIC,
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => false,
            Err(e) => return Err(open_err(e)),
        };
        if !is_gzip {
            return Err(open_err(io::Error::new(
                io::ErrorKind::InvalidData,
                "not a gzip stream (bad magic)",
            )));
        }
        file.rewind().map_err(open_err)?;

        Ok(Self {
            path: path.to_path_buf(),
            decoder: Some(MultiGzDecoder::new(BufReader::new(file))),
        })
    }

    /// Path this stream was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Read for ChunkStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.decoder.as_mut() {
            Some(decoder) => decoder.read(buf),
            None => Ok(0),
        }
    }
}

impl std::fmt::Debug for ChunkStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkStream")
            .field("path", &self.path)
            .field("empty", &self.decoder.is_none())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn write_gz(path: &Path, payload: &[u8]) {
        let file = File::create(path).unwrap();
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(payload).unwrap();
        encoder.finish().unwrap();
    }

    #[test]
    fn test_open_and_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chunk.gz");
        write_gz(&path, b"hello chunk");

        let mut stream = ChunkStream::open(&path).unwrap();
        let mut out = Vec::new();
        stream.read_to_end(&mut out).unwrap();
        assert_eq!(out, b"hello chunk");
        assert_eq!(stream.path(), path.as_path());
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ChunkStream::open(dir.path().join("nope.gz")).unwrap_err();
        match err {
            ChunkError::Open { source, .. } => assert_eq!(source.kind(), io::ErrorKind::NotFound),
            other => panic!("expected Open, got {other:?}"),
        }
    }

    #[test]
    fn test_open_bad_magic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.gz");
        std::fs::write(&path, b"definitely not gzip").unwrap();

        let err = ChunkStream::open(&path).unwrap_err();
        match err {
            ChunkError::Open { source, .. } => {
                assert_eq!(source.kind(), io::ErrorKind::InvalidData)
            }
            other => panic!("expected Open, got {other:?}"),
        }
    }

    #[test]
    fn test_open_single_byte_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.gz");
        std::fs::write(&path, [0x1f]).unwrap();

        assert!(matches!(
            ChunkStream::open(&path),
            Err(ChunkError::Open { .. })
        ));
    }

    #[test]
    fn test_empty_file_is_empty_stream() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.gz");
        std::fs::write(&path, b"").unwrap();

        let mut stream = ChunkStream::open(&path).unwrap();
        let mut out = Vec::new();
        assert_eq!(stream.read_to_end(&mut out).unwrap(), 0);
    }

    #[test]
    fn test_multi_member_gzip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("multi.gz");

        let mut bytes = Vec::new();
        for part in [&b"first "[..], &b"second"[..]] {
            let mut encoder = GzEncoder::new(Vec::new(), Compression::fast());
            encoder.write_all(part).unwrap();
            bytes.extend(encoder.finish().unwrap());
        }
        std::fs::write(&path, bytes).unwrap();

        let mut stream = ChunkStream::open(&path).unwrap();
        let mut out = Vec::new();
        stream.read_to_end(&mut out).unwrap();
        assert_eq!(out, b"first second");
    }
}
