//! # Error Module
//!
//! Error types for the split-view image comparator.
//!
//! ## Design Principles
//! - **Never panic** on user data - decoding, buffer validation and file
//!   output return errors instead
//! - **Panic on contract violations** - scoring or compositing buffers of
//!   different shapes is a programming error, caught with assertions
//! - **Include context** - paths, dimensions, what went wrong

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum SplitCompareError {
    #[error("Image codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Pixel buffer error: {0}")]
    Buffer(#[from] BufferError),

    #[error("Display error: {0}")]
    Display(#[from] DisplayError),

    #[error("Bridge error: {0}")]
    Bridge(#[from] BridgeError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors raised while constructing a pixel buffer from caller data
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    #[error("Buffer holds {actual} bytes but {width}x{height}x{channels} needs {expected}")]
    LengthMismatch {
        width: usize,
        height: usize,
        channels: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Image dimensions {width}x{height} overflow the addressable size")]
    TooLarge { width: usize, height: usize },

    #[error("Unsupported channel count: {channels} (expected 3 or 4)")]
    UnsupportedChannels { channels: usize },
}

/// Errors that occur while decoding or encoding image files
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Image file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to decode image {path}: {reason}")]
    DecodeError { path: PathBuf, reason: String },

    #[error("Image is empty or corrupted: {path}")]
    EmptyImage { path: PathBuf },

    #[error("Failed to encode image to {path}: {reason}")]
    EncodeError { path: PathBuf, reason: String },

    #[error("Failed to access image file {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by a display surface
#[derive(Error, Debug)]
pub enum DisplayError {
    #[error("Window {name} has not been created")]
    UnknownWindow { name: String },

    #[error("Failed to prepare output directory {path}: {source}")]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to render frame: {0}")]
    Render(#[from] CodecError),

    #[error("Failed to read key input: {0}")]
    Input(#[source] std::io::Error),
}

/// Errors reported across the mobile bridge boundary
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("One or both image files not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Failed to decode {path}: {reason}")]
    Decoding { path: PathBuf, reason: String },

    #[error("Invalid pixel buffer: {0}")]
    InvalidBuffer(#[from] BufferError),

    #[error("Image comparison unavailable: {0}")]
    Unavailable(String),

    #[error("Method {method} is not implemented")]
    NotImplemented { method: String },
}

impl BridgeError {
    /// Stable error code handed back to the platform caller
    pub fn code(&self) -> &'static str {
        match self {
            BridgeError::InvalidArguments(_) | BridgeError::InvalidBuffer(_) => "INVALID_ARGUMENTS",
            BridgeError::FileNotFound { .. } => "FILE_NOT_FOUND",
            BridgeError::Decoding { .. } => "DECODING_ERROR",
            BridgeError::Unavailable(_) => "UNAVAILABLE",
            BridgeError::NotImplemented { .. } => "NOT_IMPLEMENTED",
        }
    }
}

impl From<CodecError> for BridgeError {
    fn from(error: CodecError) -> Self {
        match error {
            CodecError::NotFound { path } => BridgeError::FileNotFound { path },
            CodecError::DecodeError { path, reason } => BridgeError::Decoding { path, reason },
            CodecError::EmptyImage { path } => BridgeError::Decoding {
                path,
                reason: "decoded image is empty".to_string(),
            },
            CodecError::EncodeError { path, reason } => BridgeError::Decoding { path, reason },
            CodecError::IoError { path, source } => BridgeError::Decoding {
                path,
                reason: source.to_string(),
            },
        }
    }
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, SplitCompareError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codec_error_includes_path() {
        let error = CodecError::DecodeError {
            path: PathBuf::from("/photos/broken.jpg"),
            reason: "invalid JPEG".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("/photos/broken.jpg"));
        assert!(message.contains("invalid JPEG"));
    }

    #[test]
    fn buffer_error_reports_expected_length() {
        let error = BufferError::LengthMismatch {
            width: 4,
            height: 2,
            channels: 3,
            expected: 24,
            actual: 20,
        };
        let message = error.to_string();
        assert!(message.contains("24"));
        assert!(message.contains("20"));
    }

    #[test]
    fn bridge_codes_follow_codec_failures() {
        let missing: BridgeError = CodecError::NotFound {
            path: PathBuf::from("/sdcard/a.jpg"),
        }
        .into();
        assert_eq!(missing.code(), "FILE_NOT_FOUND");

        let broken: BridgeError = CodecError::EmptyImage {
            path: PathBuf::from("/sdcard/b.jpg"),
        }
        .into();
        assert_eq!(broken.code(), "DECODING_ERROR");

        let unavailable = BridgeError::Unavailable("no storage".to_string());
        assert_eq!(unavailable.code(), "UNAVAILABLE");
    }

    #[test]
    fn top_level_error_wraps_display_errors() {
        let error: SplitCompareError = DisplayError::UnknownWindow {
            name: "ImageCompare".to_string(),
        }
        .into();
        assert!(error.to_string().contains("ImageCompare"));
    }
}
