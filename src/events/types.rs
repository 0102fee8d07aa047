//! Event type definitions for session reporting.

use crate::core::compositor::Orientation;
use crate::core::display::KeyCode;
use serde::{Deserialize, Serialize};

/// Events during a comparison session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SessionEvent {
    /// Both images were scored on their common grid
    Scored {
        similarity: f64,
        width: usize,
        height: usize,
    },
    /// The score met the threshold, no review needed
    Accepted { similarity: f64, threshold: f64 },
    /// The review window was opened
    WindowOpened { name: String },
    /// A frame was rendered
    FrameShown(FrameInfo),
    /// A key was read
    KeyPressed { key: KeyCode },
    /// The session ended
    Completed { frames: usize },
}

/// Split settings of a rendered frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameInfo {
    /// 1-based frame number
    pub frame: usize,
    /// Cut position in `[0, 1]`
    pub cut_fraction: f64,
    /// Cut direction
    pub orientation: Orientation,
}

impl std::fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionEvent::Scored {
                similarity,
                width,
                height,
            } => write!(f, "Scored {}% on {}x{}", similarity * 100.0, width, height),
            SessionEvent::Accepted {
                similarity,
                threshold,
            } => write!(
                f,
                "Accepted {}% (threshold {}%)",
                similarity * 100.0,
                threshold * 100.0
            ),
            SessionEvent::WindowOpened { name } => write!(f, "Opened window {}", name),
            SessionEvent::FrameShown(info) => write!(
                f,
                "Frame {}: {} cut at {:.2}",
                info.frame, info.orientation, info.cut_fraction
            ),
            SessionEvent::KeyPressed { key } => write!(f, "Key {:?}", key),
            SessionEvent::Completed { frames } => write!(f, "Session finished after {} frames", frames),
        }
    }
}
