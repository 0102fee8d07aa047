//! Acceptance threshold for skipping the interactive review.

use super::MatchVerdict;

/// Decides whether a similarity score is good enough to skip the review
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdStrategy {
    /// Minimum score (0-1) considered sufficiently similar
    threshold: f64,
}

impl ThresholdStrategy {
    /// Default acceptance threshold
    pub const DEFAULT_THRESHOLD: f64 = 0.90;

    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// True when the score meets the threshold
    pub fn is_acceptable(&self, similarity: f64) -> bool {
        similarity >= self.threshold
    }

    pub fn classify(&self, similarity: f64) -> MatchVerdict {
        MatchVerdict::from_score(similarity, self.threshold)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Default for ThresholdStrategy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_strategy_at_boundary() {
        let strategy = ThresholdStrategy::new(0.9);

        assert!(strategy.is_acceptable(0.95));
        assert!(strategy.is_acceptable(0.9));
        assert!(!strategy.is_acceptable(0.899));
    }

    #[test]
    fn threshold_strategy_classifies_correctly() {
        let strategy = ThresholdStrategy::default();

        assert_eq!(strategy.classify(1.0), MatchVerdict::Identical);
        assert_eq!(strategy.classify(0.93), MatchVerdict::SufficientlySimilar);
        assert_eq!(strategy.classify(0.5), MatchVerdict::Different);
    }

    #[test]
    fn default_threshold_is_ninety_percent() {
        assert_eq!(ThresholdStrategy::default().threshold(), 0.90);
    }
}
