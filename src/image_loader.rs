//! Image loading for the command-line front end
//!
//! The grading core only needs an [`RgbImage`]; this module turns a file
//! on disk into one. Decoding uses the `image` crate with the PNG and JPEG
//! codecs enabled. Alpha is dropped and other pixel layouts are converted
//! to 8-bit RGB.

use image::{ImageReader, RgbImage};
use std::path::Path;

use crate::error::{ClassificationError, Result};

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// JPEG image
    Jpeg,
    /// PNG image
    Png,
}

impl ImageFormat {
    /// Detect format from file extension
    pub fn from_extension(path: &Path) -> Option<ImageFormat> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            _ => None,
        }
    }
}

/// Load an image from disk as 8-bit RGB
///
/// # Errors
///
/// Returns `ImageLoadError` if the extension is not supported, the file
/// cannot be opened, or decoding fails.
///
/// # Example
///
/// ```rust,no_run
/// use yolk_scan::image_loader::load_image;
/// use std::path::Path;
///
/// let image = load_image(Path::new("yolk.jpg"))?;
/// println!("Loaded image: {}x{}", image.width(), image.height());
/// # Ok::<(), yolk_scan::ClassificationError>(())
/// ```
pub fn load_image(path: &Path) -> Result<RgbImage> {
    if ImageFormat::from_extension(path).is_none() {
        return Err(ClassificationError::ImageLoadError {
            message: format!("Unsupported image format: {}", path.display()),
            source: None,
        });
    }

    let reader = ImageReader::open(path).map_err(|e| {
        ClassificationError::image_load(
            format!("Failed to open image file: {}", path.display()),
            e,
        )
    })?;

    let decoded = reader.decode().map_err(|e| {
        ClassificationError::image_load(
            format!("Failed to decode image: {}", path.display()),
            e,
        )
    })?;

    Ok(decoded.to_rgb8())
}
