//! # Session Module
//!
//! Drives a comparison from two decoded images to a finished review.
//!
//! ## Flow
//! 1. Bring both images onto their common grid
//! 2. Score them; stop here when the score meets the acceptance threshold
//! 3. Otherwise open a window and loop: render the split frame, read a key,
//!    update the [`SplitState`], until the user quits
//!
//! ## Example
//! ```rust,ignore
//! let session = Session::new(CompareConfig::default())?;
//! let mut surface = FileSurface::new(".", TerminalKeys::new());
//!
//! match session.run(&first, &second, &mut surface)? {
//!     SessionOutcome::SufficientlySimilar { score } => println!("{score}"),
//!     SessionOutcome::Reviewed { frames, .. } => println!("{frames} frames"),
//! }
//! ```

mod config;
mod state;

pub use config::{CompareConfig, DEFAULT_INITIAL_CUT, DEFAULT_STEP, DEFAULT_WINDOW_NAME};
pub use state::{SplitAction, SplitState};

use crate::core::buffer::PixelBuffer;
use crate::core::comparator::{Comparator, SimilarityReport, ThresholdStrategy};
use crate::core::compositor::{compose, Orientation};
use crate::core::display::DisplaySurface;
use crate::core::resample::unify;
use crate::error::{DisplayError, Result};
use crate::events::{null_sender, EventSender, FrameInfo, SessionEvent};
use tracing::{debug, info};

/// Two images on a common grid plus their score
#[derive(Debug, Clone)]
pub struct Comparison {
    /// First image, resized to the common grid
    pub first: PixelBuffer,
    /// Second image, resized to the common grid
    pub second: PixelBuffer,
    /// Score and verdict
    pub report: SimilarityReport,
}

impl Comparison {
    pub fn similarity(&self) -> f64 {
        self.report.similarity
    }

    /// Whether the review can be skipped
    pub fn is_acceptable(&self) -> bool {
        self.report.verdict.is_acceptable()
    }
}

/// How a session ended
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    /// The score met the threshold; no window was opened
    SufficientlySimilar { score: f64 },
    /// The user reviewed the split view and quit
    Reviewed {
        score: f64,
        frames: usize,
        final_state: SplitState,
    },
}

impl SessionOutcome {
    pub fn score(&self) -> f64 {
        match self {
            SessionOutcome::SufficientlySimilar { score } => *score,
            SessionOutcome::Reviewed { score, .. } => *score,
        }
    }
}

/// Interactive comparison session
#[derive(Debug, Clone)]
pub struct Session {
    config: CompareConfig,
    comparator: Comparator,
    strategy: ThresholdStrategy,
}

impl Session {
    /// Create a session, validating the configuration
    pub fn new(config: CompareConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            comparator: Comparator::new(config.tolerance),
            strategy: ThresholdStrategy::new(config.acceptance_threshold),
            config,
        })
    }

    pub fn config(&self) -> &CompareConfig {
        &self.config
    }

    /// Unify and score two images.
    ///
    /// # Panics
    /// When the images use different channel layouts.
    pub fn compare(&self, first: &PixelBuffer, second: &PixelBuffer) -> Comparison {
        let (first, second) = unify(first, second);
        let similarity = self.comparator.similarity(&first, &second);
        let report = SimilarityReport::new(
            similarity,
            &self.strategy,
            self.comparator.tolerance(),
            first.dimensions(),
        );

        info!(
            similarity,
            verdict = %report.verdict,
            width = first.width(),
            height = first.height(),
            "Scored image pair"
        );

        Comparison {
            first,
            second,
            report,
        }
    }

    /// Compare and review without reporting events
    pub fn run<S: DisplaySurface>(
        &self,
        first: &PixelBuffer,
        second: &PixelBuffer,
        surface: &mut S,
    ) -> Result<SessionOutcome> {
        self.run_with_events(first, second, surface, &null_sender())
    }

    /// Compare and review, reporting progress through `events`
    pub fn run_with_events<S: DisplaySurface>(
        &self,
        first: &PixelBuffer,
        second: &PixelBuffer,
        surface: &mut S,
        events: &EventSender,
    ) -> Result<SessionOutcome> {
        let comparison = self.compare(first, second);
        self.review(&comparison, surface, events)
    }

    /// Run the interactive loop for an already scored pair.
    ///
    /// Returns immediately, without touching the surface, when the pair is
    /// already similar enough.
    pub fn review<S: DisplaySurface>(
        &self,
        comparison: &Comparison,
        surface: &mut S,
        events: &EventSender,
    ) -> Result<SessionOutcome> {
        let score = comparison.similarity();
        events.send(SessionEvent::Scored {
            similarity: score,
            width: comparison.first.width(),
            height: comparison.first.height(),
        });

        if self.strategy.is_acceptable(score) {
            events.send(SessionEvent::Accepted {
                similarity: score,
                threshold: self.strategy.threshold(),
            });
            return Ok(SessionOutcome::SufficientlySimilar { score });
        }

        let name = self.config.window_name.as_str();
        surface.create_window(name)?;
        events.send(SessionEvent::WindowOpened {
            name: name.to_string(),
        });

        let looped = self.interact(comparison, surface, events);
        let closed = surface.destroy_window(name);
        let (frames, final_state) = looped?;
        closed?;

        events.send(SessionEvent::Completed { frames });
        info!(frames, "Review finished");

        Ok(SessionOutcome::Reviewed {
            score,
            frames,
            final_state,
        })
    }

    fn interact<S: DisplaySurface>(
        &self,
        comparison: &Comparison,
        surface: &mut S,
        events: &EventSender,
    ) -> std::result::Result<(usize, SplitState), DisplayError> {
        let name = self.config.window_name.as_str();
        let mut state = SplitState::new(self.config.initial_cut, Orientation::Vertical);
        let mut frames = 0;

        loop {
            let frame = compose(
                &comparison.first,
                &comparison.second,
                state.cut_fraction(),
                state.orientation(),
            );
            surface.show_image(name, &frame)?;
            frames += 1;
            events.send(SessionEvent::FrameShown(FrameInfo {
                frame: frames,
                cut_fraction: state.cut_fraction(),
                orientation: state.orientation(),
            }));

            let key = surface.poll_key()?;
            debug!(?key, "Key pressed");
            events.send(SessionEvent::KeyPressed { key });

            if state.apply(key, self.config.step) == SplitAction::Quit {
                return Ok((frames, state));
            }
        }
    }
}
