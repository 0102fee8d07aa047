//! Session configuration.

use crate::core::codec::DEFAULT_JPEG_QUALITY;
use crate::core::comparator::{ThresholdStrategy, DEFAULT_TOLERANCE};
use crate::error::{Result, SplitCompareError};
use std::path::PathBuf;

/// Cut movement per `+`/`-` key press
pub const DEFAULT_STEP: f64 = 0.01;

/// Where the cut starts
pub const DEFAULT_INITIAL_CUT: f64 = 0.5;

/// Name of the review window
pub const DEFAULT_WINDOW_NAME: &str = "ImageCompare";

/// Configuration for a comparison session
#[derive(Debug, Clone, PartialEq)]
pub struct CompareConfig {
    /// Byte differences below this count as similar
    pub tolerance: u8,
    /// Scores at or above this skip the review
    pub acceptance_threshold: f64,
    /// Cut movement per key press
    pub step: f64,
    /// Cut position of the first frame
    pub initial_cut: f64,
    /// Name of the review window
    pub window_name: String,
    /// Where frames are written
    pub output_dir: PathBuf,
    /// JPEG quality of written frames
    pub jpeg_quality: u8,
}

impl CompareConfig {
    /// Create a configuration with defaults
    pub fn new() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            acceptance_threshold: ThresholdStrategy::DEFAULT_THRESHOLD,
            step: DEFAULT_STEP,
            initial_cut: DEFAULT_INITIAL_CUT,
            window_name: DEFAULT_WINDOW_NAME.to_string(),
            output_dir: PathBuf::from("."),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }

    pub fn tolerance(mut self, tolerance: u8) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn acceptance_threshold(mut self, threshold: f64) -> Self {
        self.acceptance_threshold = threshold;
        self
    }

    pub fn step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    pub fn initial_cut(mut self, cut: f64) -> Self {
        self.initial_cut = cut;
        self
    }

    pub fn window_name(mut self, name: impl Into<String>) -> Self {
        self.window_name = name.into();
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality;
        self
    }

    /// Reject values the session cannot work with
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.acceptance_threshold) {
            return Err(SplitCompareError::Config(format!(
                "acceptance threshold {} must be within 0-1",
                self.acceptance_threshold
            )));
        }
        if !(self.step > 0.0 && self.step <= 1.0) {
            return Err(SplitCompareError::Config(format!(
                "step {} must be within (0, 1]",
                self.step
            )));
        }
        if !(0.0..=1.0).contains(&self.initial_cut) {
            return Err(SplitCompareError::Config(format!(
                "initial cut {} must be within 0-1",
                self.initial_cut
            )));
        }
        if self.window_name.trim().is_empty() {
            return Err(SplitCompareError::Config(
                "window name must not be empty".to_string(),
            ));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(SplitCompareError::Config(format!(
                "JPEG quality {} must be within 1-100",
                self.jpeg_quality
            )));
        }
        Ok(())
    }
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fixed_constants() {
        let config = CompareConfig::default();

        assert_eq!(config.tolerance, 10);
        assert_eq!(config.acceptance_threshold, 0.90);
        assert_eq!(config.step, 0.01);
        assert_eq!(config.initial_cut, 0.5);
        assert_eq!(config.window_name, "ImageCompare");
        assert_eq!(config.jpeg_quality, 90);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_builder_works() {
        let config = CompareConfig::new()
            .tolerance(4)
            .acceptance_threshold(0.75)
            .window_name("Review");

        assert_eq!(config.tolerance, 4);
        assert_eq!(config.acceptance_threshold, 0.75);
        assert_eq!(config.window_name, "Review");
    }

    #[test]
    fn validate_rejects_out_of_range_values() {
        assert!(CompareConfig::new().acceptance_threshold(1.5).validate().is_err());
        assert!(CompareConfig::new().step(0.0).validate().is_err());
        assert!(CompareConfig::new().step(f64::NAN).validate().is_err());
        assert!(CompareConfig::new().initial_cut(-0.1).validate().is_err());
        assert!(CompareConfig::new().window_name(" ").validate().is_err());
        assert!(CompareConfig::new().jpeg_quality(0).validate().is_err());
    }
}
