//! Configuration structures for the yolk grading pipeline.
//!
//! All tunable calibration data in one place: the HSV band and mask
//! cleanup parameters used by the detector, and the reference scale used
//! by the classifier. Defaults come from [`crate::constants`].
//!
//! # Configuration Loading
//!
//! ```no_run
//! use yolk_scan::AnalyzerConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = AnalyzerConfig::from_json_file(Path::new("calibration.json"))?;
//!
//! // Or use defaults
//! let config = AnalyzerConfig::default();
//! # Ok::<(), yolk_scan::ClassificationError>(())
//! ```
//!
//! A configuration is read once at startup and validated when the
//! analyzer is built; nothing mutates it afterwards.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{color::ShadeEntry, constants::segmentation, ClassificationError, Result};

/// Complete analyzer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Region detection parameters
    pub segmentation: SegmentationConfig,

    /// Ordered calibration scale
    #[serde(default = "ShadeEntry::roche_yolk_fan")]
    pub reference_scale: Vec<ShadeEntry>,
}

/// Region detection parameters.
///
/// A pixel is a yolk candidate when its hue lies in
/// `[hue_min, hue_max]` degrees and its saturation and value reach the
/// given floors (0-255 scale). The resulting mask is opened and closed with
/// an elliptical element of `morph_radius`, then smoothed with a Gaussian of
/// `blur_kernel_size` taps and `blur_sigma`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentationConfig {
    /// Lower hue bound in degrees [0, 360]
    pub hue_min: f32,

    /// Upper hue bound in degrees [0, 360]
    pub hue_max: f32,

    /// Minimum saturation (0-255)
    pub saturation_min: u8,

    /// Minimum value (0-255)
    pub value_min: u8,

    /// Structuring element radius in pixels
    pub morph_radius: u8,

    /// Gaussian kernel size (odd)
    pub blur_kernel_size: u32,

    /// Gaussian sigma
    pub blur_sigma: f32,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            hue_min: segmentation::HUE_MIN_DEG,
            hue_max: segmentation::HUE_MAX_DEG,
            saturation_min: segmentation::SATURATION_MIN,
            value_min: segmentation::VALUE_MIN,
            morph_radius: segmentation::MORPH_RADIUS,
            blur_kernel_size: segmentation::BLUR_KERNEL_SIZE,
            blur_sigma: segmentation::BLUR_SIGMA,
        }
    }
}

impl SegmentationConfig {
    /// Check the band and filter parameters
    pub fn validate(&self) -> Result<()> {
        for (name, hue) in [("hue_min", self.hue_min), ("hue_max", self.hue_max)] {
            if !hue.is_finite() || !(0.0..=360.0).contains(&hue) {
                return Err(ClassificationError::invalid_config(
                    name,
                    format!("{} is outside [0, 360] degrees", hue),
                ));
            }
        }

        if self.hue_min > self.hue_max {
            return Err(ClassificationError::invalid_config(
                "hue_min",
                format!("band is inverted ({} > {})", self.hue_min, self.hue_max),
            ));
        }

        if self.blur_kernel_size == 0 || self.blur_kernel_size % 2 == 0 {
            return Err(ClassificationError::invalid_config(
                "blur_kernel_size",
                format!("{} must be odd", self.blur_kernel_size),
            ));
        }

        if !self.blur_sigma.is_finite() || self.blur_sigma <= 0.0 {
            return Err(ClassificationError::invalid_config(
                "blur_sigma",
                format!("{} must be positive", self.blur_sigma),
            ));
        }

        Ok(())
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            segmentation: SegmentationConfig::default(),
            reference_scale: ShadeEntry::roche_yolk_fan(),
        }
    }
}

impl AnalyzerConfig {
    /// Check every section; the reference scale itself is checked when built
    pub fn validate(&self) -> Result<()> {
        self.segmentation.validate()?;
        if self.reference_scale.is_empty() {
            return Err(ClassificationError::invalid_config(
                "reference_scale",
                "at least one reference shade is required",
            ));
        }
        Ok(())
    }

    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ClassificationError::config_io(format!("cannot read {}", path.display()), e)
        })?;
        Self::from_json_str(&content)
    }

    /// Parse configuration from a JSON string
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| ClassificationError::config_io("invalid configuration JSON", e))
    }

    /// Render configuration as pretty JSON
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ClassificationError::config_io("cannot serialize configuration", e))
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = self.to_json_string()?;
        std::fs::write(path, json).map_err(|e| {
            ClassificationError::config_io(format!("cannot write {}", path.display()), e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = AnalyzerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.reference_scale.len(), 15);
        assert_eq!(config.segmentation.hue_min, segmentation::HUE_MIN_DEG);
    }

    #[test]
    fn test_json_round_trip() {
        let config = AnalyzerConfig::default();
        let json = config.to_json_string().unwrap();
        assert!(json.contains("\"segmentation\""));
        assert!(json.contains("\"reference_scale\""));
        let parsed = AnalyzerConfig::from_json_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_missing_scale_defaults_to_roche() {
        let json = r#"{
            "segmentation": {
                "hue_min": 15.0, "hue_max": 60.0,
                "saturation_min": 50, "value_min": 70,
                "morph_radius": 1, "blur_kernel_size": 5, "blur_sigma": 1.0
            }
        }"#;
        let config = AnalyzerConfig::from_json_str(json).unwrap();
        assert_eq!(config.reference_scale, ShadeEntry::roche_yolk_fan());
        assert_eq!(config.segmentation.morph_radius, 1);
    }

    #[test]
    fn test_inverted_hue_band_rejected() {
        let mut config = AnalyzerConfig::default();
        config.segmentation.hue_min = 80.0;
        config.segmentation.hue_max = 20.0;
        assert!(matches!(
            config.validate(),
            Err(ClassificationError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_hue_out_of_range_rejected() {
        let mut config = AnalyzerConfig::default();
        config.segmentation.hue_max = 400.0;
        assert!(config.validate().is_err());

        config.segmentation.hue_max = 70.0;
        config.segmentation.hue_min = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blur_parameters_rejected() {
        let mut config = AnalyzerConfig::default();
        config.segmentation.blur_kernel_size = 8;
        assert!(config.validate().is_err());

        let mut config = AnalyzerConfig::default();
        config.segmentation.blur_sigma = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_scale_rejected() {
        let mut config = AnalyzerConfig::default();
        config.reference_scale.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_saturation_out_of_range_fails_to_parse() {
        let json = r#"{
            "segmentation": {
                "hue_min": 20.0, "hue_max": 70.0,
                "saturation_min": 300, "value_min": 80,
                "morph_radius": 2, "blur_kernel_size": 9, "blur_sigma": 2.0
            }
        }"#;
        assert!(matches!(
            AnalyzerConfig::from_json_str(json),
            Err(ClassificationError::ConfigIoError { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = AnalyzerConfig::from_json_file(Path::new("does/not/exist.json"));
        assert!(matches!(result, Err(ClassificationError::ConfigIoError { .. })));
    }
}
