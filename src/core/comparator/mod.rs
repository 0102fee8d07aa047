//! # Comparator Module
//!
//! Scores how alike two same-sized images are.
//!
//! ## How It Works
//! 1. Walk every byte of both buffers in lockstep
//! 2. Count positions whose absolute difference is below the tolerance
//! 3. Divide by the total byte count
//!
//! Each channel byte is judged on its own against one uniform tolerance,
//! so this is a raw byte metric rather than a perceptual one.
//!
//! ## Verdicts
//! | Score          | Classification         |
//! |----------------|------------------------|
//! | 1.0            | Identical              |
//! | >= threshold   | Sufficiently similar   |
//! | below          | Different              |

mod strategy;

pub use strategy::ThresholdStrategy;

use crate::core::buffer::PixelBuffer;
use serde::{Deserialize, Serialize};

/// Byte differences strictly below this count as similar
pub const DEFAULT_TOLERANCE: u8 = 10;

/// Byte-wise tolerance comparator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comparator {
    tolerance: u8,
}

impl Comparator {
    /// Create a comparator with a custom tolerance
    pub fn new(tolerance: u8) -> Self {
        Self { tolerance }
    }

    pub fn tolerance(&self) -> u8 {
        self.tolerance
    }

    /// Fraction of byte positions where `a` and `b` differ by less than
    /// the tolerance, in `[0, 1]`.
    ///
    /// # Panics
    /// When the images differ in dimensions or channel layout. Callers
    /// must bring both onto a common grid first (see
    /// [`crate::core::resample::unify`]).
    pub fn similarity(&self, a: &PixelBuffer, b: &PixelBuffer) -> f64 {
        assert_shapes_match(a, b, "similarity");

        let total = a.as_bytes().len();
        if total == 0 {
            return 1.0;
        }

        let similar = a
            .as_bytes()
            .iter()
            .zip(b.as_bytes())
            .filter(|(x, y)| x.abs_diff(**y) < self.tolerance)
            .count();

        similar as f64 / total as f64
    }
}

impl Default for Comparator {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE)
    }
}

/// Score two images with the default tolerance
pub fn similarity(a: &PixelBuffer, b: &PixelBuffer) -> f64 {
    Comparator::default().similarity(a, b)
}

pub(crate) fn assert_shapes_match(a: &PixelBuffer, b: &PixelBuffer, operation: &str) {
    assert!(
        a.same_shape(b),
        "{} requires images of equal shape, got {}x{} {} and {}x{} {}",
        operation,
        a.width(),
        a.height(),
        a.format(),
        b.width(),
        b.height(),
        b.format()
    );
}

/// Classification of a similarity score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchVerdict {
    /// Every byte within tolerance
    Identical,
    /// At or above the acceptance threshold
    SufficientlySimilar,
    /// Below the acceptance threshold, worth a visual review
    Different,
}

impl MatchVerdict {
    /// Classify a score against an acceptance threshold
    pub fn from_score(similarity: f64, threshold: f64) -> Self {
        if similarity >= 1.0 {
            MatchVerdict::Identical
        } else if similarity >= threshold {
            MatchVerdict::SufficientlySimilar
        } else {
            MatchVerdict::Different
        }
    }

    /// Whether this verdict skips the interactive review
    pub fn is_acceptable(&self) -> bool {
        matches!(self, MatchVerdict::Identical | MatchVerdict::SufficientlySimilar)
    }
}

impl std::fmt::Display for MatchVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchVerdict::Identical => write!(f, "Identical"),
            MatchVerdict::SufficientlySimilar => write!(f, "Sufficiently Similar"),
            MatchVerdict::Different => write!(f, "Different"),
        }
    }
}

/// Outcome of scoring one image pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityReport {
    /// Score in `[0, 1]`
    pub similarity: f64,
    /// Score as a percentage (0-100)
    pub similarity_percent: f64,
    /// Classification against the acceptance threshold
    pub verdict: MatchVerdict,
    /// Threshold the verdict was made against
    pub threshold: f64,
    /// Tolerance used for the byte comparison
    pub tolerance: u8,
    /// Common grid both images were compared on
    pub compared_width: usize,
    pub compared_height: usize,
}

impl SimilarityReport {
    /// Build a report for a score computed on a `width` x `height` grid
    pub fn new(
        similarity: f64,
        strategy: &ThresholdStrategy,
        tolerance: u8,
        (compared_width, compared_height): (usize, usize),
    ) -> Self {
        Self {
            similarity,
            similarity_percent: similarity * 100.0,
            verdict: strategy.classify(similarity),
            threshold: strategy.threshold(),
            tolerance,
            compared_width,
            compared_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::buffer::PixelFormat;

    fn image(width: usize, height: usize, bytes: &[u8]) -> PixelBuffer {
        PixelBuffer::from_vec(width, height, PixelFormat::Rgb8, bytes.to_vec()).unwrap()
    }

    fn solid(width: usize, height: usize, value: u8) -> PixelBuffer {
        PixelBuffer::filled(width, height, PixelFormat::Rgb8, value).unwrap()
    }

    #[test]
    fn identical_images_score_one() {
        let a = image(2, 1, &[1, 2, 3, 200, 100, 50]);
        assert_eq!(similarity(&a, &a), 1.0);
    }

    #[test]
    fn opposite_images_score_zero() {
        let zeros = solid(4, 4, 0);
        let full = solid(4, 4, 255);
        assert_eq!(similarity(&zeros, &full), 0.0);
    }

    #[test]
    fn tolerance_is_exclusive() {
        let a = image(1, 1, &[0, 0, 0]);
        let b = image(1, 1, &[9, 10, 11]);

        // only the byte differing by 9 is within tolerance
        assert!((similarity(&a, &b) - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn similarity_is_symmetric() {
        let a = image(2, 1, &[0, 50, 100, 150, 200, 250]);
        let b = image(2, 1, &[5, 70, 100, 140, 180, 255]);

        assert_eq!(similarity(&a, &b), similarity(&b, &a));
    }

    #[test]
    fn similarity_stays_in_unit_range() {
        let a = image(2, 1, &[0, 50, 100, 150, 200, 250]);
        let b = image(2, 1, &[255, 0, 95, 150, 0, 250]);
        let score = similarity(&a, &b);

        assert!((0.0..=1.0).contains(&score));
        assert_eq!(score, 0.5);
    }

    #[test]
    fn custom_tolerance_widens_matches() {
        let a = solid(2, 2, 100);
        let b = solid(2, 2, 120);

        assert_eq!(Comparator::default().similarity(&a, &b), 0.0);
        assert_eq!(Comparator::new(21).similarity(&a, &b), 1.0);
    }

    #[test]
    fn works_on_four_channel_buffers() {
        let a = PixelBuffer::filled(3, 3, PixelFormat::Argb8, 10).unwrap();
        let b = PixelBuffer::filled(3, 3, PixelFormat::Argb8, 15).unwrap();
        assert_eq!(similarity(&a, &b), 1.0);
    }

    #[test]
    #[should_panic(expected = "equal shape")]
    fn mismatched_dimensions_panic() {
        let a = solid(2, 2, 0);
        let b = solid(3, 2, 0);
        similarity(&a, &b);
    }

    #[test]
    #[should_panic(expected = "equal shape")]
    fn mismatched_channels_panic() {
        let a = PixelBuffer::filled(2, 2, PixelFormat::Rgb8, 0).unwrap();
        let b = PixelBuffer::filled(2, 2, PixelFormat::Argb8, 0).unwrap();
        similarity(&a, &b);
    }

    #[test]
    fn verdict_from_score() {
        assert_eq!(MatchVerdict::from_score(1.0, 0.9), MatchVerdict::Identical);
        assert_eq!(
            MatchVerdict::from_score(0.9, 0.9),
            MatchVerdict::SufficientlySimilar
        );
        assert_eq!(MatchVerdict::from_score(0.2, 0.9), MatchVerdict::Different);
        assert!(!MatchVerdict::Different.is_acceptable());
    }

    #[test]
    fn report_carries_percentage() {
        let report = SimilarityReport::new(0.25, &ThresholdStrategy::default(), 10, (4, 4));

        assert_eq!(report.similarity_percent, 25.0);
        assert_eq!(report.verdict, MatchVerdict::Different);
        assert_eq!((report.compared_width, report.compared_height), (4, 4));
    }
}
