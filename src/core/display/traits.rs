//! Trait definitions for display surfaces and key input.

use crate::core::buffer::PixelBuffer;
use crate::error::DisplayError;
use serde::{Deserialize, Serialize};

/// A key event, already mapped to what it means for the split view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyCode {
    /// `+` moves the cut forward
    Increase,
    /// `-` moves the cut back
    Decrease,
    /// `d` switches between vertical and horizontal cuts
    ToggleOrientation,
    /// Escape, `q`, or the end of input
    Quit,
    /// Anything else
    Other(char),
}

impl KeyCode {
    /// Escape as delivered by line-oriented input
    pub const ESCAPE: char = '\u{1b}';

    /// Map a typed character
    pub fn from_char(c: char) -> Self {
        match c {
            '+' => KeyCode::Increase,
            '-' => KeyCode::Decrease,
            'd' => KeyCode::ToggleOrientation,
            'q' | Self::ESCAPE => KeyCode::Quit,
            other => KeyCode::Other(other),
        }
    }
}

/// Where split-view frames go and where key input comes from
pub trait DisplaySurface {
    /// Open a named window
    fn create_window(&mut self, name: &str) -> Result<(), DisplayError>;

    /// Render `image` into the named window
    fn show_image(&mut self, name: &str, image: &PixelBuffer) -> Result<(), DisplayError>;

    /// Close the named window
    fn destroy_window(&mut self, name: &str) -> Result<(), DisplayError>;

    /// Block until the next key event
    fn poll_key(&mut self) -> Result<KeyCode, DisplayError>;
}

/// A source of key events
pub trait KeySource {
    /// Block until the next key; end of input is reported as [`KeyCode::Quit`]
    fn next_key(&mut self) -> Result<KeyCode, DisplayError>;
}
