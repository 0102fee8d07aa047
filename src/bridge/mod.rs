//! # Bridge Module
//!
//! Entry points for mobile callers that already hold decoded bitmaps.
//!
//! Callers hand over two raw 4-bytes-per-pixel buffers with explicit
//! dimensions. The bridge validates them, brings them onto a common grid,
//! and either scores them or writes a split-view frame to a file whose
//! path it returns. A failed write is reported as an empty path so the
//! caller never has to handle a crash across the boundary.

mod commands;

pub use commands::{handle_method_call, ComparisonArgs, SimilarityArgs};

use crate::core::buffer::{PixelBuffer, PixelFormat};
use crate::core::codec::{self, DEFAULT_JPEG_QUALITY};
use crate::core::comparator::Comparator;
use crate::core::compositor::{compose, Orientation};
use crate::core::resample::unify;
use crate::error::BridgeError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Channel layout of bitmaps handed over by mobile callers
pub const BRIDGE_FORMAT: PixelFormat = PixelFormat::Argb8;

/// File name of the persisted comparison frame
pub const COMPARISON_FILE_NAME: &str = "comparison.jpg";

/// A raw bitmap as it arrives from the platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawImage {
    pub pixels: Vec<u8>,
    pub width: usize,
    pub height: usize,
}

impl RawImage {
    pub fn new(pixels: Vec<u8>, width: usize, height: usize) -> Self {
        Self {
            pixels,
            width,
            height,
        }
    }

    fn into_buffer(self) -> Result<PixelBuffer, BridgeError> {
        Ok(PixelBuffer::from_vec(
            self.width,
            self.height,
            BRIDGE_FORMAT,
            self.pixels,
        )?)
    }
}

impl From<PixelBuffer> for RawImage {
    fn from(buffer: PixelBuffer) -> Self {
        let (width, height) = buffer.dimensions();
        Self::new(buffer.into_vec(), width, height)
    }
}

/// Mobile-facing comparison service
#[derive(Debug, Clone)]
pub struct ImageCompareBridge {
    output_dir: PathBuf,
    comparator: Comparator,
    quality: u8,
}

impl ImageCompareBridge {
    /// Create a bridge writing comparison frames into `output_dir`
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            comparator: Comparator::default(),
            quality: DEFAULT_JPEG_QUALITY,
        }
    }

    /// Create a bridge writing into the platform's local data directory
    pub fn with_default_dir() -> Result<Self, BridgeError> {
        let dir = dirs::data_local_dir().ok_or_else(|| {
            BridgeError::Unavailable("no local data directory on this platform".to_string())
        })?;
        Ok(Self::new(dir.join("split-view-compare")))
    }

    /// Use a custom comparator
    pub fn comparator(mut self, comparator: Comparator) -> Self {
        self.comparator = comparator;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Where comparison frames are persisted
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(COMPARISON_FILE_NAME)
    }

    /// Score two bitmaps
    pub fn compute_similarity(&self, first: RawImage, second: RawImage) -> Result<f64, BridgeError> {
        let (first, second) = unify(&first.into_buffer()?, &second.into_buffer()?);
        let score = self.comparator.similarity(&first, &second);
        info!(score, "Bridge similarity computed");
        Ok(score)
    }

    /// Build a split-view frame and persist it.
    ///
    /// Returns the written path, or an empty string when the frame could
    /// not be written.
    pub fn create_comparison_image(
        &self,
        first: RawImage,
        second: RawImage,
        alpha: f64,
        vertical_cut: bool,
    ) -> Result<String, BridgeError> {
        let (first, second) = unify(&first.into_buffer()?, &second.into_buffer()?);
        let frame = compose(&first, &second, alpha, Orientation::from_vertical_flag(vertical_cut));
        Ok(self.persist(&frame))
    }

    fn persist(&self, frame: &PixelBuffer) -> String {
        let path = self.output_path();

        if let Err(e) = fs::create_dir_all(&self.output_dir) {
            warn!(dir = %self.output_dir.display(), error = %e, "Failed to save comparison image");
            return String::new();
        }
        if let Err(e) = codec::encode(frame, &path, self.quality) {
            warn!(path = %path.display(), error = %e, "Failed to save comparison image");
            return String::new();
        }

        path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn raw(width: usize, height: usize, value: u8) -> RawImage {
        RawImage::new(vec![value; width * height * 4], width, height)
    }

    #[test]
    fn near_identical_bitmaps_score_one() {
        let dir = TempDir::new().unwrap();
        let bridge = ImageCompareBridge::new(dir.path());

        let score = bridge.compute_similarity(raw(3, 3, 40), raw(3, 3, 45)).unwrap();
        assert_eq!(score, 1.0);
    }

    #[test]
    fn differently_sized_bitmaps_are_unified() {
        let dir = TempDir::new().unwrap();
        let bridge = ImageCompareBridge::new(dir.path());

        let score = bridge.compute_similarity(raw(6, 2, 0), raw(3, 4, 255)).unwrap();
        assert_eq!(score, 0.0);
    }

    #[test]
    fn short_buffer_is_rejected() {
        let dir = TempDir::new().unwrap();
        let bridge = ImageCompareBridge::new(dir.path());
        let broken = RawImage::new(vec![0; 10], 2, 2);

        let error = bridge.compute_similarity(broken, raw(2, 2, 0)).unwrap_err();
        assert_eq!(error.code(), "INVALID_ARGUMENTS");
    }

    #[test]
    fn comparison_image_is_written() {
        let dir = TempDir::new().unwrap();
        let bridge = ImageCompareBridge::new(dir.path());

        let path = bridge
            .create_comparison_image(raw(8, 8, 0), raw(8, 8, 255), 0.5, true)
            .unwrap();

        assert_eq!(PathBuf::from(&path), dir.path().join(COMPARISON_FILE_NAME));
        assert!(Path::new(&path).exists());
    }

    #[test]
    fn write_failure_returns_empty_path() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, b"file in the way").unwrap();
        let bridge = ImageCompareBridge::new(&blocker);

        let path = bridge
            .create_comparison_image(raw(4, 4, 0), raw(4, 4, 255), 0.5, false)
            .unwrap();

        assert!(path.is_empty());
    }

    #[test]
    fn default_dir_is_app_scoped() {
        if let Ok(bridge) = ImageCompareBridge::with_default_dir() {
            assert!(bridge.output_dir().ends_with("split-view-compare"));
            assert!(bridge.output_path().ends_with(COMPARISON_FILE_NAME));
        }
    }

    #[test]
    fn raw_image_round_trips_through_buffer() {
        let buffer = PixelBuffer::filled(2, 3, BRIDGE_FORMAT, 9).unwrap();
        let raw: RawImage = buffer.clone().into();

        assert_eq!((raw.width, raw.height), (2, 3));
        assert_eq!(raw.into_buffer().unwrap(), buffer);
    }
}
