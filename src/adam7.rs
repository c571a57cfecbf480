//! Pass geometry for
//! [the Adam7 algorithm](https://en.wikipedia.org/wiki/Adam7_algorithm).
//!
//! An interlaced PNG stores seven consecutive sub-images instead of one.
//! The pattern over an 8x8 tile is:
//!     16462646
//!     77777777
//!     56565656
//!     77777777
//!     36463646
//!     77777777
//!     56565656
//!     77777777

/// (y start, y stride, x start, x stride) of each pass, in pass order.
const PASSES: [(u32, u32, u32, u32); 7] = [
    (0, 8, 0, 8),
    (0, 8, 4, 8),
    (4, 8, 0, 4),
    (0, 4, 2, 4),
    (2, 4, 0, 2),
    (0, 2, 1, 2),
    (1, 2, 0, 1),
];

/// Width and height, in pixels, of one pass's sub-image within an image of
/// the given size. Either may come out as 0 for small images; a pass with
/// zero width stores no scanlines at all.
pub(crate) fn pass_size(pass: usize, width: u32, height: u32) -> (u32, u32) {
    let (y_start, y_stride, x_start, x_stride) = PASSES[pass];
    (
        width.saturating_sub(x_start).div_ceil(x_stride),
        height.saturating_sub(y_start).div_ceil(y_stride),
    )
}

/// Total number of scanlines (and therefore filter-type bytes) an Adam7
/// interlaced image of the given size stores across all seven passes.
pub(crate) fn scanline_count(width: u32, height: u32) -> u64 {
    (0..PASSES.len())
        .map(|pass| match pass_size(pass, width, height) {
            (0, _) => 0,
            (_, lines) => u64::from(lines),
        })
        .sum()
}
