//! The chunk-rewriting pipeline.
//!
//! [`convert`] walks the input chunk by chunk: `CgBI` is dropped, `IDAT`
//! payloads are collected, everything else passes through untouched. When
//! `IEND` appears the collected pixel data is inflated, channel-flipped and
//! re-deflated with zlib framing, and a single fresh `IDAT` chunk is placed
//! right before the trailer.

use crate::chunk::{self, encode_chunk};
use crate::common::{ImageInfo, SIGNATURE};
use crate::error::ConvertError;
use crate::flip::flip_channels;
use crate::scanner::ChunkScanner;
use crate::zlib;

/// The outcome of a successful [`convert`] call.
#[derive(Debug)]
pub struct Converted {
    /// Geometry read from the input's `IHDR` chunk.
    pub info: ImageInfo,
    /// A standards-compliant PNG byte stream.
    pub png: Vec<u8>,
}

/// Reads width, height and interlace flag out of a PNG byte stream without
/// converting anything.
///
/// Stops at the first `IHDR` chunk; neither a `CgBI` chunk nor any `IDAT`
/// data needs to be present, so this works on standard PNGs too.
///
/// # Errors
///
/// [`ConvertError::MissingSignature`] if the buffer does not start with the
/// PNG magic bytes, [`ConvertError::MissingImageHeader`] if it ends before
/// an `IHDR` chunk shows up.
pub fn read_dimensions(data: &[u8]) -> Result<ImageInfo, ConvertError> {
    if !data.starts_with(&SIGNATURE) {
        return Err(ConvertError::MissingSignature);
    }
    let mut chunks = ChunkScanner::new(data);
    while let Some(chunk) = chunks.next_chunk()? {
        if chunk.type_ == chunk::IHDR {
            return ImageInfo::parse(chunk.data);
        }
    }
    Err(ConvertError::MissingImageHeader)
}

/// Converts an Apple CgBI PNG byte stream into a standard one.
///
/// The output carries no `CgBI` chunk and exactly one `IDAT` chunk,
/// compressed with standard zlib framing and placed immediately before
/// `IEND`; every other chunk passes through byte-identically in its
/// original order. Scanning stops at the first `IEND`, so trailing bytes
/// are ignored. The input is assumed to begin with the PNG signature --
/// callers that need the check can run [`read_dimensions`] first.
///
/// On any failure the call returns the error alone; no partial output.
pub fn convert(data: &[u8]) -> Result<Converted, ConvertError> {
    let mut out = Vec::new();
    out.try_reserve(data.len())?;
    out.extend_from_slice(&SIGNATURE);

    let mut info: Option<ImageInfo> = None;
    // All IDAT payloads in file order form one raw deflate stream.
    let mut pixel_data: Vec<u8> = Vec::new();

    let mut chunks = ChunkScanner::new(data);
    while let Some(chunk) = chunks.next_chunk()? {
        match chunk.type_ {
            chunk::IHDR => {
                info = Some(ImageInfo::parse(chunk.data)?);
                chunk.write_to(&mut out);
            }
            chunk::IDAT => {
                pixel_data.try_reserve(chunk.data.len())?;
                pixel_data.extend_from_slice(chunk.data);
            }
            // Dropping this chunk is half the point of the crate.
            chunk::CgBI => {}
            chunk::IEND => {
                let info = info.ok_or(ConvertError::MissingImageHeader)?;
                let idat = recode_pixel_data(&pixel_data, &info)?;
                encode_chunk(&mut out, chunk::IDAT, &idat);
                chunk.write_to(&mut out);
                return Ok(Converted { info, png: out });
            }
            _ => chunk.write_to(&mut out),
        }
    }
    Err(ConvertError::MissingImageTrailer)
}

/// Inflate (raw deflate), swap the red/blue bytes in place, deflate (zlib).
fn recode_pixel_data(compressed: &[u8], info: &ImageInfo) -> Result<Vec<u8>, ConvertError> {
    let mut pixels = zlib::inflate_raw(compressed, info.filtered_len()?)?;
    flip_channels(&mut pixels, info.width, info.height, info.interlaced);
    zlib::deflate_zlib(&pixels)
}
