//! Bounds-checked traversal of a PNG chunk stream.

use crate::chunk::ChunkType;
use crate::common::{be_u32, SIGNATURE};
use crate::error::ConvertError;

/// One chunk, borrowed out of the input buffer.
#[derive(Clone, Copy, Debug)]
pub(crate) struct RawChunk<'a> {
    pub type_: ChunkType,
    pub data: &'a [u8],
    /// The CRC as stored in the stream. The scanner never validates it.
    pub crc: u32,
}

impl RawChunk<'_> {
    /// Re-serializes the chunk exactly as it appeared in the input, stored
    /// CRC included.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&(self.data.len() as u32).to_be_bytes());
        out.extend_from_slice(&self.type_.0);
        out.extend_from_slice(self.data);
        out.extend_from_slice(&self.crc.to_be_bytes());
    }
}

/// Cursor over the chunk records that follow the 8-byte PNG signature.
///
/// Callers are expected to have dealt with the signature themselves; the
/// scanner starts reading right after it.
pub(crate) struct ChunkScanner<'a> {
    buf: &'a [u8],
    cursor: usize,
}

impl<'a> ChunkScanner<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        ChunkScanner { buf, cursor: SIGNATURE.len() }
    }

    /// Returns a view of the next chunk and advances past its CRC, or `None`
    /// once the buffer is exhausted. A record that crosses the end of the
    /// buffer fails instead of reading out of bounds.
    pub fn next_chunk(&mut self) -> Result<Option<RawChunk<'a>>, ConvertError> {
        if self.cursor >= self.buf.len() {
            return Ok(None);
        }
        let offset = self.cursor;
        let truncated = ConvertError::TruncatedChunk { offset };

        let header = match self.buf.get(offset..offset + 8) {
            Some(header) => header,
            None => return Err(truncated),
        };
        let length = be_u32(&header[0..4]) as usize;
        let type_ = ChunkType([header[4], header[5], header[6], header[7]]);

        // `length` is attacker-controlled; all arithmetic on it is checked.
        let data_end = match (offset + 8).checked_add(length) {
            Some(end) => end,
            None => return Err(truncated),
        };
        let data = match self.buf.get(offset + 8..data_end) {
            Some(data) => data,
            None => return Err(truncated),
        };
        let crc = match self.buf.get(data_end..data_end + 4) {
            Some(raw) => be_u32(raw),
            None => return Err(truncated),
        };

        self.cursor = data_end + 4;
        Ok(Some(RawChunk { type_, data, crc }))
    }
}
