//! Raw-deflate inflation and zlib re-compression of the pixel stream.
//!
//! Apple's variant stores the concatenated `IDAT` payload as a bare deflate
//! stream, with no zlib header and no Adler-32 trailer. Standard PNG wants
//! the wrapper back, so the pipeline inflates raw and deflates with framing.

use flate2::{Compress, Compression, Decompress, FlushDecompress, FlushCompress, Status};

use crate::error::ConvertError;

/// Inflates a headerless deflate stream into a buffer of exactly
/// `expected_len` bytes.
///
/// The buffer size is derived from the image geometry up front, so a valid
/// stream fills it exactly. A stream that ends early or tries to write past
/// it fails; nothing partial escapes.
pub(crate) fn inflate_raw(input: &[u8], expected_len: usize) -> Result<Vec<u8>, ConvertError> {
    let mut out = Vec::new();
    out.try_reserve_exact(expected_len)?;

    // `false`: no zlib wrapper, matching inflate with negative window bits.
    let mut strm = Decompress::new(false);
    loop {
        let before_in = strm.total_in();
        let before_out = strm.total_out();
        let status = match strm.decompress_vec(
            &input[before_in as usize..],
            &mut out,
            FlushDecompress::Finish,
        ) {
            Ok(status) => status,
            // The backend reports a plain error once the exactly-sized
            // output fills with compressed input left over; that is the
            // stream overrunning the geometry, not corrupt data.
            Err(_) if out.len() >= expected_len && (strm.total_in() as usize) < input.len() => {
                return Err(ConvertError::ExcessPixelData { expected: expected_len });
            }
            Err(err) => return Err(ConvertError::Inflate(err)),
        };
        match status {
            Status::StreamEnd => break,
            Status::Ok | Status::BufError => {
                // Consuming input without producing output is still progress
                // (the end-of-stream marker needs no output space). Only a
                // full stall is fatal.
                if strm.total_in() == before_in && strm.total_out() == before_out {
                    return Err(if out.len() >= expected_len {
                        ConvertError::ExcessPixelData { expected: expected_len }
                    } else {
                        ConvertError::ShortPixelData {
                            expected: expected_len,
                            got: out.len(),
                        }
                    });
                }
            }
        }
    }
    if out.len() < expected_len {
        return Err(ConvertError::ShortPixelData { expected: expected_len, got: out.len() });
    }
    if out.len() > expected_len {
        return Err(ConvertError::ExcessPixelData { expected: expected_len });
    }
    Ok(out)
}

/// Recompresses the pixel buffer with standard zlib framing at the default
/// compression level.
///
/// The output is sized from [`deflate_bound`]; the final length comes out of
/// the codec's running total, which `compress_vec` mirrors into the vector
/// length.
pub(crate) fn deflate_zlib(input: &[u8]) -> Result<Vec<u8>, ConvertError> {
    let mut out = Vec::new();
    out.try_reserve_exact(deflate_bound(input.len()))?;

    let mut strm = Compress::new(Compression::default(), true);
    loop {
        let consumed = strm.total_in() as usize;
        let status = strm.compress_vec(&input[consumed..], &mut out, FlushCompress::Finish)?;
        match status {
            Status::StreamEnd => break,
            // The bound fell short of what this backend emits; grow and keep
            // flushing.
            Status::Ok | Status::BufError => out.try_reserve(out.len() / 2 + 64)?,
        }
    }
    Ok(out)
}

/// Worst-case zlib output size for `len` input bytes, after zlib's
/// `deflateBound`: raw deflate overhead plus 2 header and 4 trailer bytes.
fn deflate_bound(len: usize) -> usize {
    len + (len >> 12) + (len >> 14) + (len >> 25) + 13 + 6
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::ZlibDecoder;
    use flate2::write::DeflateEncoder;
    use std::io::{Read, Write};

    fn raw_deflate(data: &[u8]) -> Vec<u8> {
        let mut enc = DeflateEncoder::new(Vec::new(), Compression::default());
        enc.write_all(data).unwrap();
        enc.finish().unwrap()
    }

    #[test]
    fn inflates_exactly() {
        let pixels: Vec<u8> = (0..200u8).cycle().take(4096).collect();
        let out = inflate_raw(&raw_deflate(&pixels), pixels.len()).unwrap();
        assert_eq!(out, pixels);
    }

    #[test]
    fn truncated_stream_is_short() {
        let compressed = raw_deflate(&[42; 1000]);
        let cut = &compressed[..compressed.len() / 2];
        match inflate_raw(cut, 1000) {
            Err(ConvertError::ShortPixelData { expected: 1000, .. }) => {}
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn oversized_stream_is_excess() {
        let compressed = raw_deflate(&[42; 1000]);
        match inflate_raw(&compressed, 10) {
            Err(ConvertError::ExcessPixelData { expected: 10 }) => {}
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn garbage_is_a_data_error() {
        // final block with reserved type 11
        let err = inflate_raw(&[0x07, 0x00, 0x00, 0x00], 16).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Data);
    }

    #[test]
    fn deflate_output_carries_zlib_framing() {
        let pixels: Vec<u8> = (0..251u8).cycle().take(10_000).collect();
        let compressed = deflate_zlib(&pixels).unwrap();
        // 0x78 is the zlib CMF byte for a 32K window.
        assert_eq!(compressed[0], 0x78);

        let mut round = Vec::new();
        ZlibDecoder::new(&compressed[..]).read_to_end(&mut round).unwrap();
        assert_eq!(round, pixels);
    }

    #[test]
    fn deflates_incompressible_input() {
        // rand-free pseudo noise; forces stored blocks past the happy path
        let pixels: Vec<u8> = (0u32..60_000)
            .map(|i| (i.wrapping_mul(2654435761) >> 19) as u8)
            .collect();
        let compressed = deflate_zlib(&pixels).unwrap();
        let mut round = Vec::new();
        ZlibDecoder::new(&compressed[..]).read_to_end(&mut round).unwrap();
        assert_eq!(round, pixels);
    }
}
