//! Screenshot export
//!
//! The frame loop reads the frame buffer back when a screenshot has been
//! requested and hands the capture to a [`ScreenshotSink`].

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::render::backend::FrameCapture;

/// Screenshot export errors
#[derive(Error, Debug)]
pub enum ScreenshotError {
    /// Capture size and pixel data disagree
    #[error("Capture of {width}x{height} has {len} bytes")]
    MalformedCapture {
        /// Capture width
        width: u32,
        /// Capture height
        height: u32,
        /// Byte length of the pixel data
        len: usize,
    },

    /// Encoding or writing the image failed
    #[error("Image export failed: {0}")]
    Image(#[from] image::ImageError),
}

/// Destination for exported frames
pub trait ScreenshotSink {
    /// Export one captured frame
    fn export(&mut self, capture: &FrameCapture) -> Result<(), ScreenshotError>;
}

/// Writes captures as PNG to a fixed file name, replacing the previous one
#[derive(Debug, Clone)]
pub struct PngFileSink {
    path: PathBuf,
}

impl PngFileSink {
    /// Sink writing `file_name` inside `dir`
    pub fn new(dir: impl AsRef<Path>, file_name: &str) -> Self {
        Self {
            path: dir.as_ref().join(file_name),
        }
    }

    /// Output path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScreenshotSink for PngFileSink {
    fn export(&mut self, capture: &FrameCapture) -> Result<(), ScreenshotError> {
        let len = capture.rgba.len();
        let image = image::RgbaImage::from_raw(capture.width, capture.height, capture.rgba.clone())
            .ok_or(ScreenshotError::MalformedCapture {
                width: capture.width,
                height: capture.height,
                len,
            })?;

        image.save_with_format(&self.path, image::ImageFormat::Png)?;
        log::info!("Screenshot saved to {}", self.path.display());
        Ok(())
    }
}
