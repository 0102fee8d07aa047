//! # Core Module
//!
//! The comparison engine, independent of how frames are presented.
//!
//! ## Modules
//! - `buffer` - Owned pixel buffers and channel layouts
//! - `resample` - Nearest-neighbor resizing onto a common grid
//! - `comparator` - Byte-wise tolerance similarity scoring
//! - `compositor` - Split-view frame building
//! - `codec` - Reading and writing image files
//! - `display` - Window/key interface and the file-backed surface
//! - `session` - The interactive review loop

pub mod buffer;
pub mod codec;
pub mod comparator;
pub mod compositor;
pub mod display;
pub mod resample;
pub mod session;

// Re-export commonly used types
pub use buffer::{PixelBuffer, PixelFormat};
pub use comparator::{similarity, Comparator, MatchVerdict, SimilarityReport};
pub use compositor::{compose, Orientation};
pub use display::{DisplaySurface, FileSurface, KeyCode};
pub use resample::{resize, unify};
pub use session::{CompareConfig, Session, SessionOutcome, SplitState};
