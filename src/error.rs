//! Error type shared by dimension probing and conversion.

use std::collections::TryReserveError;
use std::{error, fmt};

use flate2::{CompressError, DecompressError};

/// Everything that can go wrong while probing or converting an Apple PNG.
///
/// Each variant names the failing stage; [`ConvertError::kind`] folds them
/// into the small set of categories a caller usually dispatches on.
#[derive(Debug)]
pub enum ConvertError {
    /// The input does not start with the 8-byte PNG signature.
    MissingSignature,
    /// The chunk stream ended before an `IHDR` chunk was seen.
    MissingImageHeader,
    /// The chunk stream ended before an `IEND` chunk was seen.
    MissingImageTrailer,
    /// A chunk record extends past the end of the input buffer.
    TruncatedChunk { offset: usize },
    /// The `IHDR` chunk holds fewer than the 13 required data bytes.
    ShortImageHeader { length: usize },
    /// Width and height imply a pixel buffer larger than the address space.
    ImageTooLarge,
    /// The accumulated `IDAT` payload is not a valid raw deflate stream.
    Inflate(DecompressError),
    /// The raw deflate stream ended before filling the pixel buffer implied
    /// by `IHDR`.
    ShortPixelData { expected: usize, got: usize },
    /// The raw deflate stream holds more pixel data than `IHDR` implies.
    ExcessPixelData { expected: usize },
    /// Recompression with zlib framing failed.
    Deflate(CompressError),
    /// An input-proportional allocation could not be satisfied.
    OutOfMemory(TryReserveError),
}

/// User-facing error categories, one per failure mode a caller can react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input is not a PNG chunk stream at all.
    InvalidFormat,
    /// The compressed pixel data is corrupt.
    Data,
    /// The compressed pixel data does not line up with the image geometry.
    Stream,
    /// An allocation failed or would have to overflow.
    OutOfMemory,
    /// A codec failure outside the documented ones.
    Unexpected,
}

impl ConvertError {
    /// The category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConvertError::MissingSignature
            | ConvertError::MissingImageHeader
            | ConvertError::MissingImageTrailer
            | ConvertError::TruncatedChunk { .. }
            | ConvertError::ShortImageHeader { .. } => ErrorKind::InvalidFormat,
            ConvertError::Inflate(_) | ConvertError::ExcessPixelData { .. } => ErrorKind::Data,
            ConvertError::ShortPixelData { .. } => ErrorKind::Stream,
            ConvertError::ImageTooLarge | ConvertError::OutOfMemory(_) => ErrorKind::OutOfMemory,
            ConvertError::Deflate(_) => ErrorKind::Unexpected,
        }
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::MissingSignature => write!(
                fmt,
                "input data is not a valid PNG file (missing the PNG magic bytes)"
            ),
            Self::MissingImageHeader => {
                write!(fmt, "input data is not a valid PNG file (missing IHDR chunk)")
            }
            Self::MissingImageTrailer => {
                write!(fmt, "input data is not a valid PNG file (missing IEND chunk)")
            }
            Self::TruncatedChunk { offset } => write!(
                fmt,
                "chunk at byte offset {} extends past the end of the input",
                offset
            ),
            Self::ShortImageHeader { length } => write!(
                fmt,
                "IHDR chunk holds {} bytes where at least 13 were expected",
                length
            ),
            Self::ImageTooLarge => write!(
                fmt,
                "image dimensions are too large for an in-memory pixel buffer"
            ),
            Self::Inflate(err) => write!(
                fmt,
                "could not process the pixel data ({}); make sure this is valid Apple PNG format data",
                err
            ),
            Self::ShortPixelData { expected, got } => write!(
                fmt,
                "pixel data ended after {} of {} bytes; make sure this is valid Apple PNG format data",
                got, expected
            ),
            Self::ExcessPixelData { expected } => write!(
                fmt,
                "pixel data exceeds the {} bytes implied by IHDR; make sure this is valid Apple PNG format data",
                expected
            ),
            Self::Deflate(err) => write!(fmt, "could not recompress the pixel data ({})", err),
            Self::OutOfMemory(_) => {
                write!(fmt, "ran out of memory while processing the PNG data")
            }
        }
    }
}

impl error::Error for ConvertError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            ConvertError::Inflate(err) => Some(err),
            ConvertError::Deflate(err) => Some(err),
            ConvertError::OutOfMemory(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TryReserveError> for ConvertError {
    fn from(err: TryReserveError) -> Self {
        Self::OutOfMemory(err)
    }
}

impl From<DecompressError> for ConvertError {
    fn from(err: DecompressError) -> Self {
        Self::Inflate(err)
    }
}

impl From<CompressError> for ConvertError {
    fn from(err: CompressError) -> Self {
        Self::Deflate(err)
    }
}
