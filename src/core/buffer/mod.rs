//! # Buffer Module
//!
//! Owned, row-major, channel-interleaved pixel buffers.
//!
//! A [`PixelBuffer`] always satisfies
//! `data.len() == width * height * format.channels()`. Buffers built from
//! caller data are validated; buffers produced by the resampler and
//! compositor are built with the right length directly.

use crate::error::BufferError;
use image::{DynamicImage, RgbImage, RgbaImage};
use serde::{Deserialize, Serialize};

/// Channel layout of a pixel buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PixelFormat {
    /// 3 bytes per pixel: R, G, B (desktop decode path)
    Rgb8,
    /// 4 bytes per pixel: A, R, G, B (mobile bitmap path)
    Argb8,
}

impl PixelFormat {
    /// Number of interleaved bytes per pixel
    pub fn channels(&self) -> usize {
        match self {
            PixelFormat::Rgb8 => 3,
            PixelFormat::Argb8 => 4,
        }
    }

    /// Pick the layout for a channel count
    pub fn from_channels(channels: usize) -> Result<Self, BufferError> {
        match channels {
            3 => Ok(PixelFormat::Rgb8),
            4 => Ok(PixelFormat::Argb8),
            _ => Err(BufferError::UnsupportedChannels { channels }),
        }
    }
}

impl std::fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PixelFormat::Rgb8 => write!(f, "RGB"),
            PixelFormat::Argb8 => write!(f, "ARGB"),
        }
    }
}

/// An owned image buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    format: PixelFormat,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap caller-supplied bytes, checking the length against the dimensions
    pub fn from_vec(
        width: usize,
        height: usize,
        format: PixelFormat,
        data: Vec<u8>,
    ) -> Result<Self, BufferError> {
        let expected = byte_len(width, height, format)?;
        if data.len() != expected {
            return Err(BufferError::LengthMismatch {
                width,
                height,
                channels: format.channels(),
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            format,
            data,
        })
    }

    /// A buffer with every byte set to `value`
    pub fn filled(
        width: usize,
        height: usize,
        format: PixelFormat,
        value: u8,
    ) -> Result<Self, BufferError> {
        let len = byte_len(width, height, format)?;
        Ok(Self {
            width,
            height,
            format,
            data: vec![value; len],
        })
    }

    /// The zero-sized image
    pub fn empty(format: PixelFormat) -> Self {
        Self {
            width: 0,
            height: 0,
            format,
            data: Vec::new(),
        }
    }

    /// Build from bytes the caller has already sized correctly.
    pub(crate) fn from_sized(
        width: usize,
        height: usize,
        format: PixelFormat,
        data: Vec<u8>,
    ) -> Self {
        debug_assert_eq!(data.len(), width * height * format.channels());
        Self {
            width,
            height,
            format,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn channels(&self) -> usize {
        self.format.channels()
    }

    /// True when the image has no pixels
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes per row
    pub fn row_stride(&self) -> usize {
        self.width * self.channels()
    }

    /// True when both buffers have the same dimensions and channel layout
    pub fn same_shape(&self, other: &PixelBuffer) -> bool {
        self.dimensions() == other.dimensions() && self.format == other.format
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// All channel bytes of row `y`, or `None` when out of bounds
    pub fn row(&self, y: usize) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let stride = self.row_stride();
        self.data.get(y * stride..(y + 1) * stride)
    }

    /// Channel bytes of the pixel at `(x, y)`, or `None` when out of bounds
    pub fn pixel(&self, x: usize, y: usize) -> Option<&[u8]> {
        if x >= self.width {
            return None;
        }
        let channels = self.channels();
        self.row(y)?.get(x * channels..(x + 1) * channels)
    }

    /// Convert a decoded image into this crate's layout.
    ///
    /// ARGB buffers are produced by rotating each RGBA pixel so alpha leads.
    pub fn from_dynamic(image: &DynamicImage, format: PixelFormat) -> Self {
        let width = image.width() as usize;
        let height = image.height() as usize;

        let data = match format {
            PixelFormat::Rgb8 => image.to_rgb8().into_raw(),
            PixelFormat::Argb8 => {
                let mut raw = image.to_rgba8().into_raw();
                for pixel in raw.chunks_exact_mut(4) {
                    pixel.rotate_right(1);
                }
                raw
            }
        };

        Self::from_sized(width, height, format, data)
    }

    /// Convert back into an `image` crate buffer for encoding.
    ///
    /// Returns `None` for empty images or dimensions beyond `u32`.
    pub fn to_dynamic(&self) -> Option<DynamicImage> {
        if self.is_empty() {
            return None;
        }
        let width = u32::try_from(self.width).ok()?;
        let height = u32::try_from(self.height).ok()?;

        match self.format {
            PixelFormat::Rgb8 => {
                RgbImage::from_raw(width, height, self.data.clone()).map(DynamicImage::ImageRgb8)
            }
            PixelFormat::Argb8 => {
                let mut raw = self.data.clone();
                for pixel in raw.chunks_exact_mut(4) {
                    pixel.rotate_left(1);
                }
                RgbaImage::from_raw(width, height, raw).map(DynamicImage::ImageRgba8)
            }
        }
    }
}

fn byte_len(width: usize, height: usize, format: PixelFormat) -> Result<usize, BufferError> {
    width
        .checked_mul(height)
        .and_then(|pixels| pixels.checked_mul(format.channels()))
        .ok_or(BufferError::TooLarge { width, height })
}
