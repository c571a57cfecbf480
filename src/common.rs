//! Types shared between dimension probing and conversion.

use crate::adam7;
use crate::error::ConvertError;

/// The 8-byte signature every PNG byte stream starts with.
pub const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// Image geometry pulled out of an `IHDR` chunk.
///
/// Only the fields the conversion pipeline depends on are kept; the Apple
/// variant always carries 8-bit RGBA-shaped pixels, so bit depth and color
/// type are not interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    /// Whether the interlace method byte is 1 (Adam7).
    pub interlaced: bool,
}

impl ImageInfo {
    /// Parses the fixed fields of an `IHDR` chunk's data bytes.
    pub(crate) fn parse(data: &[u8]) -> Result<Self, ConvertError> {
        if data.len() < 13 {
            return Err(ConvertError::ShortImageHeader { length: data.len() });
        }
        Ok(ImageInfo {
            width: be_u32(&data[0..4]),
            height: be_u32(&data[4..8]),
            interlaced: data[12] == 1,
        })
    }

    /// Number of bytes the decompressed, still-filtered pixel stream holds:
    /// one filter-type byte per scanline plus 4 bytes per pixel. Interlaced
    /// images pay one filter byte per scanline of every non-empty Adam7 pass.
    pub(crate) fn filtered_len(&self) -> Result<usize, ConvertError> {
        let pixel_bytes = u64::from(self.width)
            .checked_mul(u64::from(self.height))
            .and_then(|n| n.checked_mul(4))
            .ok_or(ConvertError::ImageTooLarge)?;
        let filter_bytes = if self.interlaced {
            adam7::scanline_count(self.width, self.height)
        } else {
            u64::from(self.height)
        };
        pixel_bytes
            .checked_add(filter_bytes)
            .and_then(|n| usize::try_from(n).ok())
            .ok_or(ConvertError::ImageTooLarge)
    }
}

pub(crate) fn be_u32(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}
