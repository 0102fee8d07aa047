//! # Compositor Module
//!
//! Builds split-view frames: one image on each side of a straight cut.
//!
//! With a vertical cut at column `c`, pixels left of `c` come from the first
//! image and the rest from the second. A horizontal cut does the same with
//! rows. A white separator [`SEPARATOR_WIDTH`] pixels wide marks the cut
//! whenever it falls strictly inside the image.

use crate::core::buffer::PixelBuffer;
use crate::core::comparator::assert_shapes_match;
use serde::{Deserialize, Serialize};

/// Width of the separator line in pixels
pub const SEPARATOR_WIDTH: usize = 2;

/// Byte written to every channel of the separator
pub const SEPARATOR_VALUE: u8 = u8::MAX;

/// Direction of the cut
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Cut runs top to bottom; the fraction applies to the width
    #[default]
    Vertical,
    /// Cut runs left to right; the fraction applies to the height
    Horizontal,
}

impl Orientation {
    /// The other orientation
    pub fn toggled(self) -> Self {
        match self {
            Orientation::Vertical => Orientation::Horizontal,
            Orientation::Horizontal => Orientation::Vertical,
        }
    }

    /// Build from the mobile bridge flag
    pub fn from_vertical_flag(vertical: bool) -> Self {
        if vertical {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        }
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Orientation::Vertical => write!(f, "vertical"),
            Orientation::Horizontal => write!(f, "horizontal"),
        }
    }
}

/// Clamp a cut fraction into `[0, 1]`; NaN maps to 0.
pub fn clamp_fraction(fraction: f64) -> f64 {
    if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    }
}

/// Index of the first column (or row) taken from the second image
pub fn cut_index(extent: usize, fraction: f64) -> usize {
    let cut = (extent as f64 * clamp_fraction(fraction)).floor() as usize;
    cut.min(extent)
}

/// Compose `a` and `b` split at `cut_fraction` along `orientation`.
///
/// A cut on the image edge yields a plain copy of the one contributing
/// image: fraction 0 gives `b`, fraction 1 gives `a`.
///
/// # Panics
/// When the images differ in dimensions or channel layout.
pub fn compose(
    a: &PixelBuffer,
    b: &PixelBuffer,
    cut_fraction: f64,
    orientation: Orientation,
) -> PixelBuffer {
    assert_shapes_match(a, b, "compose");

    let (width, height) = a.dimensions();
    let extent = match orientation {
        Orientation::Vertical => width,
        Orientation::Horizontal => height,
    };
    let cut = cut_index(extent, cut_fraction);

    if cut == 0 {
        return b.clone();
    }
    if cut >= extent {
        return a.clone();
    }

    let stride = a.row_stride();
    let mut data = vec![0u8; a.as_bytes().len()];

    match orientation {
        Orientation::Vertical => {
            let split = cut * a.channels();
            let rows = data
                .chunks_exact_mut(stride)
                .zip(a.as_bytes().chunks_exact(stride))
                .zip(b.as_bytes().chunks_exact(stride));
            for ((out, left), right) in rows {
                out[..split].copy_from_slice(&left[..split]);
                out[split..].copy_from_slice(&right[split..]);
            }
        }
        Orientation::Horizontal => {
            let split = cut * stride;
            data[..split].copy_from_slice(&a.as_bytes()[..split]);
            data[split..].copy_from_slice(&b.as_bytes()[split..]);
        }
    }

    let mut frame = PixelBuffer::from_sized(width, height, a.format(), data);
    draw_separator(&mut frame, cut, orientation);
    frame
}

/// Paint the separator starting at `cut`, clipped to the image.
fn draw_separator(frame: &mut PixelBuffer, cut: usize, orientation: Orientation) {
    let (width, height) = frame.dimensions();
    let channels = frame.channels();
    let stride = frame.row_stride();

    match orientation {
        Orientation::Vertical => {
            let end = (cut + SEPARATOR_WIDTH).min(width);
            for row in frame.as_bytes_mut().chunks_exact_mut(stride) {
                row[cut * channels..end * channels].fill(SEPARATOR_VALUE);
            }
        }
        Orientation::Horizontal => {
            let end = (cut + SEPARATOR_WIDTH).min(height);
            frame.as_bytes_mut()[cut * stride..end * stride].fill(SEPARATOR_VALUE);
        }
    }
}
