//! # Resample Module
//!
//! Nearest-neighbor resizing onto a common pixel grid.
//!
//! Destination pixel `(x, y)` copies every channel of source pixel
//! `(x * src_w / dst_w, y * src_h / dst_h)` using integer division. No
//! blending happens, so downsampling may alias and upsampling may block;
//! what matters is that two images end up byte-comparable.

use crate::core::buffer::PixelBuffer;
use tracing::debug;

/// Resize `source` to `target_width` x `target_height`.
///
/// Returns an empty image (same channel layout) when either target
/// dimension is zero or the source has no pixels.
pub fn resize(source: &PixelBuffer, target_width: usize, target_height: usize) -> PixelBuffer {
    let format = source.format();

    if target_width == 0 || target_height == 0 || source.is_empty() {
        debug!(
            target_width,
            target_height,
            source_width = source.width(),
            source_height = source.height(),
            "Degenerate resize, returning empty image"
        );
        return PixelBuffer::empty(format);
    }

    let channels = format.channels();
    let (src_width, src_height) = source.dimensions();
    let src_stride = source.row_stride();
    let src = source.as_bytes();

    let mut data = Vec::with_capacity(target_width * target_height * channels);
    for y in 0..target_height {
        let src_y = y * src_height / target_height;
        let row = &src[src_y * src_stride..(src_y + 1) * src_stride];
        for x in 0..target_width {
            let start = (x * src_width / target_width) * channels;
            data.extend_from_slice(&row[start..start + channels]);
        }
    }

    PixelBuffer::from_sized(target_width, target_height, format, data)
}

/// The grid both images fit on: the smaller width and the smaller height,
/// chosen independently.
pub fn common_grid(a: &PixelBuffer, b: &PixelBuffer) -> (usize, usize) {
    (a.width().min(b.width()), a.height().min(b.height()))
}

/// Bring two images onto their common grid.
pub fn unify(a: &PixelBuffer, b: &PixelBuffer) -> (PixelBuffer, PixelBuffer) {
    let (width, height) = common_grid(a, b);
    debug!(
        first = ?a.dimensions(),
        second = ?b.dimensions(),
        width,
        height,
        "Unifying image dimensions"
    );
    (resize(a, width, height), resize(b, width, height))
}
