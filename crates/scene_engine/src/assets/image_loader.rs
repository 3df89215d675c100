//! Image loading utilities for texture data
//!
//! Decoding goes through the `image` crate and always produces RGBA8.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::assets::AssetError;

/// Decoded image ready for texture upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    /// Raw RGBA pixel data
    pub rgba: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl ImageData {
    /// Decode an image file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let image = image::open(path)
            .map_err(|e| AssetError::LoadFailed(format!("{}: {e}", path.display())))?
            .to_rgba8();
        let (width, height) = image.dimensions();

        log::debug!("Decoded image {width}x{height} from {}", path.display());
        Ok(Self {
            rgba: image.into_raw(),
            width,
            height,
        })
    }

    /// Decode an encoded image held in memory
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| AssetError::LoadFailed(format!("Failed to decode image from bytes: {e}")))?
            .to_rgba8();
        let (width, height) = image.dimensions();

        Ok(Self {
            rgba: image.into_raw(),
            width,
            height,
        })
    }

    /// Solid color image
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixels = width as usize * height as usize;
        Self {
            rgba: color.repeat(pixels),
            width,
            height,
        }
    }

    /// Whether both dimensions are powers of two
    pub fn is_power_of_two(&self) -> bool {
        self.width.is_power_of_two() && self.height.is_power_of_two()
    }
}

/// Turns an asset path into decoded pixels
pub trait ImageSource: Send + Sync {
    /// Load the image stored at `path`
    fn load_image(&self, path: &Path) -> Result<ImageData, AssetError>;
}

/// Image files decoded with the `image` crate
#[derive(Debug, Default, Clone, Copy)]
pub struct FileImageSource;

impl ImageSource for FileImageSource {
    fn load_image(&self, path: &Path) -> Result<ImageData, AssetError> {
        ImageData::from_file(path)
    }
}

/// Images held in memory, keyed by path
#[derive(Debug, Default, Clone)]
pub struct MemoryImageSource {
    images: HashMap<PathBuf, ImageData>,
}

impl MemoryImageSource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: serve `image` for `path`
    pub fn with_image(mut self, path: impl Into<PathBuf>, image: ImageData) -> Self {
        self.images.insert(path.into(), image);
        self
    }
}

impl ImageSource for MemoryImageSource {
    fn load_image(&self, path: &Path) -> Result<ImageData, AssetError> {
        self.images
            .get(path)
            .cloned()
            .ok_or_else(|| AssetError::NotFound(path.display().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_color_fills_every_pixel() {
        let image = ImageData::solid_color(3, 2, [1, 2, 3, 4]);
        assert_eq!(image.rgba.len(), 3 * 2 * 4);
        assert!(image.rgba.chunks_exact(4).all(|p| p == [1, 2, 3, 4]));
    }

    #[test]
    fn power_of_two_needs_both_dimensions() {
        assert!(ImageData::solid_color(64, 16, [0; 4]).is_power_of_two());
        assert!(!ImageData::solid_color(64, 48, [0; 4]).is_power_of_two());
        assert!(!ImageData::solid_color(3, 4, [0; 4]).is_power_of_two());
    }

    #[test]
    fn png_bytes_decode_to_rgba() {
        let mut encoded = Vec::new();
        image::RgbaImage::from_pixel(2, 2, image::Rgba([10, 20, 30, 255]))
            .write_to(&mut std::io::Cursor::new(&mut encoded), image::ImageFormat::Png)
            .expect("encode");

        let image = ImageData::from_bytes(&encoded).expect("decode");
        assert_eq!((image.width, image.height), (2, 2));
        assert_eq!(&image.rgba[0..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        assert!(matches!(
            ImageData::from_bytes(b"not an image"),
            Err(AssetError::LoadFailed(_))
        ));
    }
}
