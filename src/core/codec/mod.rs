//! # Codec Module
//!
//! Reads image files into [`PixelBuffer`]s and writes frames back out.
//!
//! Uses zune-jpeg for JPEG files (1.5-2x faster than the image crate),
//! falling back to the image crate for everything else and for JPEGs
//! zune-jpeg rejects.

use crate::core::buffer::{PixelBuffer, PixelFormat};
use crate::error::CodecError;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageBuffer, Luma, Rgb, Rgba};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;
use tracing::{debug, info};
use zune_core::colorspace::ColorSpace;
use zune_core::options::DecoderOptions;
use zune_jpeg::JpegDecoder;

/// Quality used when a caller does not pick one
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Image file formats the codec distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    WebP,
    Other,
}

impl ImageFormat {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref()
        {
            Some("jpg" | "jpeg") => Self::Jpeg,
            Some("png") => Self::Png,
            Some("webp") => Self::WebP,
            _ => Self::Other,
        }
    }
}

/// Decode the file at `path` into `format`.
///
/// Missing files, undecodable data and zero-sized images are errors.
pub fn decode(path: &Path, format: PixelFormat) -> Result<PixelBuffer, CodecError> {
    if !path.exists() {
        return Err(CodecError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let image = match ImageFormat::from_path(path) {
        ImageFormat::Jpeg => decode_jpeg(path).or_else(|e| {
            debug!(path = %path.display(), error = %e, "Fast JPEG decode failed, falling back");
            decode_fallback(path)
        })?,
        _ => decode_fallback(path)?,
    };

    let buffer = PixelBuffer::from_dynamic(&image, format);
    if buffer.is_empty() {
        return Err(CodecError::EmptyImage {
            path: path.to_path_buf(),
        });
    }

    debug!(
        path = %path.display(),
        width = buffer.width(),
        height = buffer.height(),
        %format,
        "Decoded image"
    );
    Ok(buffer)
}

/// Encode `image` to `path`.
///
/// `.jpg`/`.jpeg` paths are written as JPEG at `quality` (1-100, alpha is
/// dropped); any other extension is left to the image crate.
pub fn encode(image: &PixelBuffer, path: &Path, quality: u8) -> Result<(), CodecError> {
    let dynamic = image.to_dynamic().ok_or_else(|| CodecError::EmptyImage {
        path: path.to_path_buf(),
    })?;

    match ImageFormat::from_path(path) {
        ImageFormat::Jpeg => {
            let file = File::create(path).map_err(|e| CodecError::IoError {
                path: path.to_path_buf(),
                source: e,
            })?;
            let encoder = JpegEncoder::new_with_quality(BufWriter::new(file), quality.clamp(1, 100));
            DynamicImage::ImageRgb8(dynamic.to_rgb8())
                .write_with_encoder(encoder)
                .map_err(|e| CodecError::EncodeError {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })?;
        }
        _ => {
            dynamic.save(path).map_err(|e| CodecError::EncodeError {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        }
    }

    info!(path = %path.display(), "Saved image");
    Ok(())
}

/// Fast JPEG decoding using zune-jpeg
fn decode_jpeg(path: &Path) -> Result<DynamicImage, CodecError> {
    let file_bytes = fs::read(path).map_err(|e| CodecError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let options = DecoderOptions::new_fast().jpeg_set_out_colorspace(ColorSpace::RGB);
    let mut decoder = JpegDecoder::new_with_options(&file_bytes, options);

    let pixels = decoder.decode().map_err(|e| CodecError::DecodeError {
        path: path.to_path_buf(),
        reason: format!("zune-jpeg decode failed: {:?}", e),
    })?;

    let info = decoder.info().ok_or_else(|| CodecError::DecodeError {
        path: path.to_path_buf(),
        reason: "Failed to get image info".to_string(),
    })?;

    let width = info.width as u32;
    let height = info.height as u32;
    let buffer_error = |kind: &str| CodecError::DecodeError {
        path: path.to_path_buf(),
        reason: format!("Failed to create {} buffer", kind),
    };

    let image = match decoder.get_output_colorspace().unwrap_or(ColorSpace::RGB) {
        ColorSpace::RGB => {
            let buffer: ImageBuffer<Rgb<u8>, Vec<u8>> =
                ImageBuffer::from_raw(width, height, pixels).ok_or_else(|| buffer_error("RGB"))?;
            DynamicImage::ImageRgb8(buffer)
        }
        ColorSpace::RGBA => {
            let buffer: ImageBuffer<Rgba<u8>, Vec<u8>> =
                ImageBuffer::from_raw(width, height, pixels).ok_or_else(|| buffer_error("RGBA"))?;
            DynamicImage::ImageRgba8(buffer)
        }
        ColorSpace::Luma => {
            let buffer: ImageBuffer<Luma<u8>, Vec<u8>> =
                ImageBuffer::from_raw(width, height, pixels).ok_or_else(|| buffer_error("Luma"))?;
            DynamicImage::ImageLuma8(buffer)
        }
        _ => return decode_fallback(path),
    };

    Ok(image)
}

/// Fallback to the image crate
fn decode_fallback(path: &Path) -> Result<DynamicImage, CodecError> {
    image::open(path).map_err(|e| CodecError::DecodeError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
