//! # Split View Compare
//!
//! Scores how alike two images are and lets a user inspect the
//! differences through a movable split view.
//!
//! ## Architecture
//! - `core` - The comparison engine: resampling, scoring, compositing,
//!   and the interactive session
//! - `bridge` - Entry points for mobile callers handing over raw pixels
//! - `events` - Event-driven session reporting
//! - `error` - Error types

pub mod bridge;
pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{Result, SplitCompareError};

/// Initialize tracing for the library
///
/// This should be called by the application entry point. Logs go to
/// stderr so stdout stays free for reports.
pub fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set global default tracing subscriber");
}
