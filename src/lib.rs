//! # Apple CgBI PNG converter
//!
//! iOS app bundles ship PNGs run through Apple's `pngcrush` fork. The result
//! is not a valid PNG: a proprietary `CgBI` chunk sits ahead of `IHDR`, the
//! `IDAT` payload is a bare deflate stream with the zlib wrapper stripped,
//! and the red and blue channel bytes of every pixel are swapped. Standard
//! decoders reject such files outright.
//!
//! This crate rewrites the chunk stream in memory: [`convert`] turns Apple
//! CgBI PNG bytes into a standards-compliant PNG, and [`read_dimensions`]
//! pulls width and height out of any PNG buffer without paying for the full
//! conversion.
//!
//! ```no_run
//! let data = std::fs::read("AppIcon60x60@2x.png")?;
//!
//! let info = cgbi::read_dimensions(&data)?;
//! println!("{}x{}", info.width, info.height);
//!
//! let converted = cgbi::convert(&data)?;
//! std::fs::write("AppIcon.standard.png", converted.png)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Conversion is whole-buffer and synchronous; the only artifact whose
//! ownership transfers is the output byte vector.

#![deny(unsafe_code)]

pub mod chunk;

mod adam7;
mod common;
mod convert;
mod error;
mod flip;
mod scanner;
mod zlib;

pub use common::{ImageInfo, SIGNATURE};
pub use convert::{convert, read_dimensions, Converted};
pub use error::{ConvertError, ErrorKind};
