//! Transient split-view state.

use crate::core::compositor::{clamp_fraction, Orientation};
use crate::core::display::KeyCode;
use serde::{Deserialize, Serialize};

/// What the session should do after a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitAction {
    /// Render the next frame
    Continue,
    /// Leave the session
    Quit,
}

/// Cut position and direction of the current frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitState {
    cut_fraction: f64,
    orientation: Orientation,
}

impl SplitState {
    /// Create a state; the cut is clamped into `[0, 1]`
    pub fn new(cut_fraction: f64, orientation: Orientation) -> Self {
        Self {
            cut_fraction: clamp_fraction(cut_fraction),
            orientation,
        }
    }

    pub fn cut_fraction(&self) -> f64 {
        self.cut_fraction
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Move the cut by `delta`, staying within `[0, 1]`
    pub fn nudge(&mut self, delta: f64) {
        self.cut_fraction = clamp_fraction(self.cut_fraction + delta);
    }

    /// Update the state for one key press
    pub fn apply(&mut self, key: KeyCode, step: f64) -> SplitAction {
        match key {
            KeyCode::Increase => self.nudge(step),
            KeyCode::Decrease => self.nudge(-step),
            KeyCode::ToggleOrientation => self.orientation = self.orientation.toggled(),
            KeyCode::Quit => return SplitAction::Quit,
            KeyCode::Other(_) => {}
        }
        SplitAction::Continue
    }
}

impl Default for SplitState {
    fn default() -> Self {
        Self::new(0.5, Orientation::Vertical)
    }
}
