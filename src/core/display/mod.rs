//! # Display Module
//!
//! The narrow window/key interface the interactive session talks to.
//!
//! [`FileSurface`] is the stock implementation: each frame shown in a
//! window is written to `<output_dir>/<window>.out.jpg`, so any image viewer
//! that reloads on change works as the "window", and keys come from a
//! [`KeySource`].

mod keys;
mod traits;

pub use keys::{ScriptedKeys, TerminalKeys};
pub use traits::{DisplaySurface, KeyCode, KeySource};

use crate::core::buffer::PixelBuffer;
use crate::core::codec::{self, DEFAULT_JPEG_QUALITY};
use crate::core::session::CompareConfig;
use crate::error::DisplayError;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Display surface that renders frames to JPEG files
pub struct FileSurface<K: KeySource> {
    output_dir: PathBuf,
    quality: u8,
    keys: K,
    windows: HashSet<String>,
    frames_written: usize,
}

impl<K: KeySource> FileSurface<K> {
    /// Create a surface writing into `output_dir` and reading from `keys`
    pub fn new(output_dir: impl Into<PathBuf>, keys: K) -> Self {
        Self {
            output_dir: output_dir.into(),
            quality: DEFAULT_JPEG_QUALITY,
            keys,
            windows: HashSet::new(),
            frames_written: 0,
        }
    }

    /// Create a surface writing where `config` says, at its JPEG quality
    pub fn from_config(config: &CompareConfig, keys: K) -> Self {
        Self::new(&config.output_dir, keys).quality(config.jpeg_quality)
    }

    /// Set the JPEG quality of written frames
    pub fn quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    /// Path a window's frames are written to
    pub fn frame_path(&self, name: &str) -> PathBuf {
        frame_path(&self.output_dir, name)
    }

    /// Number of frames rendered so far
    pub fn frames_written(&self) -> usize {
        self.frames_written
    }

    /// Give back the key source
    pub fn into_keys(self) -> K {
        self.keys
    }
}

impl<K: KeySource> DisplaySurface for FileSurface<K> {
    fn create_window(&mut self, name: &str) -> Result<(), DisplayError> {
        fs::create_dir_all(&self.output_dir).map_err(|e| DisplayError::OutputDirectory {
            path: self.output_dir.clone(),
            source: e,
        })?;
        info!(window = name, "Creating window");
        self.windows.insert(name.to_string());
        Ok(())
    }

    fn show_image(&mut self, name: &str, image: &PixelBuffer) -> Result<(), DisplayError> {
        if !self.windows.contains(name) {
            return Err(DisplayError::UnknownWindow {
                name: name.to_string(),
            });
        }

        let path = self.frame_path(name);
        codec::encode(image, &path, self.quality)?;
        self.frames_written += 1;
        debug!(window = name, path = %path.display(), frame = self.frames_written, "Rendered frame");
        Ok(())
    }

    fn destroy_window(&mut self, name: &str) -> Result<(), DisplayError> {
        if !self.windows.remove(name) {
            return Err(DisplayError::UnknownWindow {
                name: name.to_string(),
            });
        }
        info!(window = name, "Destroying window");
        Ok(())
    }

    fn poll_key(&mut self) -> Result<KeyCode, DisplayError> {
        self.keys.next_key()
    }
}

fn frame_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.out.jpg", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::buffer::PixelFormat;
    use tempfile::TempDir;

    fn surface(dir: &TempDir, script: &str) -> FileSurface<ScriptedKeys> {
        FileSurface::new(dir.path(), ScriptedKeys::from_script(script))
    }

    #[test]
    fn show_image_writes_frame_file() {
        let dir = TempDir::new().unwrap();
        let mut surface = surface(&dir, "");
        let image = PixelBuffer::filled(8, 8, PixelFormat::Rgb8, 128).unwrap();

        surface.create_window("ImageCompare").unwrap();
        surface.show_image("ImageCompare", &image).unwrap();

        assert!(dir.path().join("ImageCompare.out.jpg").exists());
        assert_eq!(surface.frames_written(), 1);
    }

    #[test]
    fn show_image_requires_window() {
        let dir = TempDir::new().unwrap();
        let mut surface = surface(&dir, "");
        let image = PixelBuffer::filled(2, 2, PixelFormat::Rgb8, 0).unwrap();

        let error = surface.show_image("missing", &image).unwrap_err();
        assert!(matches!(error, DisplayError::UnknownWindow { .. }));
    }

    #[test]
    fn destroy_twice_fails() {
        let dir = TempDir::new().unwrap();
        let mut surface = surface(&dir, "");

        surface.create_window("w").unwrap();
        surface.destroy_window("w").unwrap();
        assert!(surface.destroy_window("w").is_err());
    }

    #[test]
    fn create_window_makes_output_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("frames").join("today");
        let mut surface = FileSurface::new(&nested, ScriptedKeys::default());

        surface.create_window("w").unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn from_config_uses_configured_directory_and_quality() {
        let dir = TempDir::new().unwrap();
        let config = CompareConfig::new()
            .output_dir(dir.path().join("frames"))
            .jpeg_quality(40);
        let surface = FileSurface::from_config(&config, ScriptedKeys::default());

        assert_eq!(surface.quality, 40);
        assert_eq!(
            surface.frame_path("ImageCompare"),
            dir.path().join("frames").join("ImageCompare.out.jpg")
        );
    }

    #[test]
    fn poll_key_reads_from_source() {
        let dir = TempDir::new().unwrap();
        let mut surface = surface(&dir, "d");

        assert_eq!(surface.poll_key().unwrap(), KeyCode::ToggleOrientation);
        assert_eq!(surface.poll_key().unwrap(), KeyCode::Quit);
    }
}
