//! # Yolk Scan
//!
//! A Rust crate for grading egg yolk color against the Roche YolkFan scale.
//!
//! This library provides:
//! - sRGB to CIE L*a*b* conversion under D65
//! - ΔE76 nearest-shade classification over a fixed, ordered reference scale
//! - Automatic yolk localization by hue-band segmentation, mask cleanup and
//!   largest-region selection
//!
//! ## Example
//!
//! ```rust,no_run
//! use yolk_scan::YolkAnalyzer;
//! use yolk_scan::image_loader::load_image;
//! use std::path::Path;
//!
//! let analyzer = YolkAnalyzer::new();
//! let image = load_image(Path::new("yolk.jpg"))?;
//!
//! let (shade, detection) = analyzer.classify_auto(&image)?;
//! println!(
//!     "Fan level {} (ΔE {:.2}) at {:?}",
//!     shade.shade.label, shade.distance, detection.centroid
//! );
//!
//! let picked = analyzer.classify_point(&image, 120, 80)?;
//! println!("Picked point: level {}", picked.shade.label);
//! # Ok::<(), yolk_scan::ClassificationError>(())
//! ```

use std::path::Path;

pub mod color;
pub mod config;
pub mod constants;
pub mod detection;
pub mod error;
pub mod image_loader;
pub mod pipeline;

pub use color::{Classification, ColorConverter, ReferenceScale, ReferenceShade, ShadeClassifier};
pub use config::{AnalyzerConfig, SegmentationConfig};
pub use detection::{Detection, RegionSegmenter, RegionSelector};
pub use error::{ClassificationError, Result};
pub use pipeline::{ShadeReport, YolkAnalyzer};

/// Locate and grade the yolk in an image file
///
/// Convenience entry for one-off use; loads the image and runs automatic
/// detection with the default calibration. Long-running callers should
/// build one [`YolkAnalyzer`] and reuse it.
///
/// # Errors
///
/// Returns `ImageLoadError` if the file cannot be decoded and
/// `NoRegionDetected` if no yolk-colored region is found.
pub fn analyze_image(image_path: &Path) -> Result<ShadeReport> {
    let image = image_loader::load_image(image_path)?;
    YolkAnalyzer::new().report_auto(&image)
}
