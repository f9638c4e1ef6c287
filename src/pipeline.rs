//! Classification orchestrator
//!
//! Ties the colorimetric pipeline to the two ways a sample is obtained:
//! - a single pixel picked by the caller (`classify_point`)
//! - the dominant yolk-colored region found automatically (`classify_auto`)
//!
//! The analyzer holds only immutable calibration state. Every call is
//! independent, so one analyzer can serve many threads.

use std::sync::Arc;

use image::RgbImage;
use palette::{Lab, Srgb};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    color::{Classification, ColorConverter, ReferenceScale, ShadeClassifier},
    config::AnalyzerConfig,
    detection::{Detection, RegionSegmenter, RegionSelector},
    ClassificationError, Result,
};

/// Yolk color grader
#[derive(Debug, Clone)]
pub struct YolkAnalyzer {
    converter: ColorConverter,
    classifier: ShadeClassifier,
    segmenter: RegionSegmenter,
    selector: RegionSelector,
}

impl Default for YolkAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl YolkAnalyzer {
    /// Create an analyzer with the default band and the Roche YolkFan scale
    pub fn new() -> Self {
        Self::with_scale(Arc::new(ReferenceScale::roche_yolk_fan()))
    }

    /// Create an analyzer with the default band and a shared scale
    pub fn with_scale(scale: Arc<ReferenceScale>) -> Self {
        Self {
            converter: ColorConverter::new(),
            classifier: ShadeClassifier::new(scale),
            segmenter: RegionSegmenter::new(),
            selector: RegionSelector::new(),
        }
    }

    /// Create an analyzer from configuration
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` for an empty or out-of-range reference
    /// scale, or an unusable segmentation band.
    pub fn from_config(config: &AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        let scale = ReferenceScale::new(&config.reference_scale)?;
        let segmenter = RegionSegmenter::from_config(&config.segmentation)?;

        Ok(Self {
            converter: ColorConverter::new(),
            classifier: ShadeClassifier::new(Arc::new(scale)),
            segmenter,
            selector: RegionSelector::new(),
        })
    }

    pub fn scale(&self) -> &ReferenceScale {
        self.classifier.scale()
    }

    pub fn converter(&self) -> &ColorConverter {
        &self.converter
    }

    pub fn segmenter(&self) -> &RegionSegmenter {
        &self.segmenter
    }

    /// Classify an already-sampled color
    pub fn classify_rgb(&self, rgb: Srgb<u8>) -> Classification {
        let lab = self.converter.rgb_to_lab(rgb);
        self.classifier.classify(lab)
    }

    /// Classify the pixel at `(x, y)`
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` unless `0 <= x < width` and `0 <= y < height`.
    /// Coordinates are never clamped.
    pub fn classify_point(&self, image: &RgbImage, x: i64, y: i64) -> Result<Classification> {
        let rgb = sample_point(image, x, y)?;
        Ok(self.classify_rgb(rgb))
    }

    /// Locate the yolk region and classify its mean color
    ///
    /// # Returns
    ///
    /// The classification together with where and what was detected.
    ///
    /// # Errors
    ///
    /// Returns `NoRegionDetected` when segmentation finds no candidate region.
    pub fn classify_auto(&self, image: &RgbImage) -> Result<(Classification, Detection)> {
        // Step 1: Segmentation
        let mask = self.segmenter.segment(image);

        // Step 2: Region selection and reduction
        let detection = self.selector.select(&mask, image)?;

        // Step 3: Classification of the mean color
        let classification = self.classify_rgb(detection.mean_color);

        debug!(
            shade = %classification.shade.label,
            delta_e = classification.distance,
            area = detection.area,
            "automatic classification complete"
        );
        Ok((classification, detection))
    }

    /// Classify a point and summarize the result
    pub fn report_point(&self, image: &RgbImage, x: i64, y: i64) -> Result<ShadeReport> {
        let rgb = sample_point(image, x, y)?;
        let classification = self.classify_rgb(rgb);
        Ok(ShadeReport::new(&self.converter, rgb, &classification, None))
    }

    /// Detect, classify and summarize the result
    pub fn report_auto(&self, image: &RgbImage) -> Result<ShadeReport> {
        let (classification, detection) = self.classify_auto(image)?;
        Ok(ShadeReport::new(
            &self.converter,
            detection.mean_color,
            &classification,
            Some(detection),
        ))
    }
}

fn sample_point(image: &RgbImage, x: i64, y: i64) -> Result<Srgb<u8>> {
    let (width, height) = image.dimensions();
    if x < 0 || y < 0 || x >= i64::from(width) || y >= i64::from(height) {
        return Err(ClassificationError::OutOfBounds {
            x,
            y,
            width,
            height,
        });
    }
    let [r, g, b] = image.get_pixel(x as u32, y as u32).0;
    Ok(Srgb::new(r, g, b))
}

/// Summary of one grading, ready for serialization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShadeReport {
    /// Sampled (or region mean) color
    pub rgb: [u8; 3],
    /// Lab coordinates of `rgb`
    pub lab: Lab,
    /// Label of the nearest reference shade
    pub shade: String,
    /// Position of the shade in the scale
    pub shade_index: usize,
    /// Reference shade color for previews
    pub shade_hex: String,
    /// ΔE76 to the reference shade
    pub delta_e: f32,
    /// Present when the sample came from automatic detection
    pub detection: Option<Detection>,
    pub auto_detected: bool,
}

impl ShadeReport {
    fn new(
        converter: &ColorConverter,
        rgb: Srgb<u8>,
        classification: &Classification,
        detection: Option<Detection>,
    ) -> Self {
        Self {
            rgb: [rgb.red, rgb.green, rgb.blue],
            lab: converter.rgb_to_lab(rgb),
            shade: classification.shade.label.clone(),
            shade_index: classification.index,
            shade_hex: converter.srgb_to_hex(classification.shade.rgb),
            delta_e: classification.distance,
            auto_detected: detection.is_some(),
            detection,
        }
    }
}
