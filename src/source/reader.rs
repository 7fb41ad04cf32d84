//! Sequential fixed-size record reader.

use std::io::{self, Read};

use crate::error::{ChunkError, Result};
use crate::format::{RecordDecoder, TrainingRecord};

/// Fill `buf` from `reader`, stopping early only at end of stream.
///
/// Returns the number of bytes read, which is less than `buf.len()` only
/// when the stream ran out.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Iterator over the records of a byte stream.
///
/// Yields `Ok` per whole record. Zero bytes at a record boundary ends the
/// iteration cleanly; a partial trailing record yields one `ShortRead`, and
/// a read failure yields one `Io`. Nothing is yielded after an error.
pub struct RecordReader<'d, R> {
    reader: R,
    decoder: &'d RecordDecoder,
    buf: Vec<u8>,
    records_read: usize,
    done: bool,
}

impl<'d, R: Read> RecordReader<'d, R> {
    /// Create a reader over `reader` using `decoder`.
    pub fn new(reader: R, decoder: &'d RecordDecoder) -> Self {
        Self {
            reader,
            decoder,
            buf: vec![0u8; decoder.record_size()],
            records_read: 0,
            done: false,
        }
    }

    /// Number of whole records decoded so far.
    #[must_use]
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    /// Recover the underlying stream.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn next_record(&mut self) -> Option<Result<TrainingRecord>> {
        let filled = match read_full(&mut self.reader, &mut self.buf) {
            Ok(n) => n,
            Err(e) => return Some(Err(ChunkError::Io(e))),
        };

        if filled == 0 {
            return None;
        }
        if filled < self.buf.len() {
            return Some(Err(ChunkError::ShortRead {
                index: self.records_read,
                actual: filled,
                expected: self.buf.len(),
            }));
        }

        let record = self.decoder.decode(&self.buf);
        if record.is_ok() {
            self.records_read += 1;
        }
        Some(record)
    }
}

impl<R: Read> Iterator for RecordReader<'_, R> {
    type Item = Result<TrainingRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self.next_record();
        if !matches!(item, Some(Ok(_))) {
            self.done = true;
        }
        item
    }
}

impl<R: Read> std::iter::FusedIterator for RecordReader<'_, R> {}
