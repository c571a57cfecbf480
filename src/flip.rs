//! Red/blue channel permutation over filtered scanline buffers.
//!
//! Apple stores pixels blue-before-red. Because the swap is a pure byte
//! permutation within each 4-byte pixel it can run directly on the filtered
//! scanline stream, before any unfiltering, as long as the per-scanline
//! filter-type bytes are stepped over.

use crate::adam7;

/// Swaps the bytes at offsets 0 and 2 of every 4-byte pixel, leaving offsets
/// 1 and 3 untouched. `pixels` must hold exactly the filtered stream for the
/// given geometry (see `ImageInfo::filtered_len`).
pub(crate) fn flip_channels(pixels: &mut [u8], width: u32, height: u32, interlaced: bool) {
    let mut cursor = 0;
    if interlaced {
        for pass in 0..7 {
            let (pass_width, pass_height) = adam7::pass_size(pass, width, height);
            if pass_width == 0 {
                continue;
            }
            flip_rows(pixels, &mut cursor, pass_width, pass_height);
        }
    } else {
        flip_rows(pixels, &mut cursor, width, height);
    }
}

/// One sub-image: per scanline, step over the filter-type byte, then swap
/// within each pixel.
fn flip_rows(pixels: &mut [u8], cursor: &mut usize, width: u32, height: u32) {
    for _ in 0..height {
        *cursor += 1;
        for _ in 0..width {
            pixels.swap(*cursor, *cursor + 2);
            *cursor += 4;
        }
    }
}
