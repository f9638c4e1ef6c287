//! Reference color scale
//!
//! An ordered, immutable bank of calibrated reference shades. Every entry
//! is converted to Lab once when the scale is built; afterwards the scale
//! is only ever read, so it can be shared freely between threads behind an
//! `Arc`.

use palette::{Lab, Srgb};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{color::ColorConverter, constants::roche, ClassificationError, Result};

/// Calibration entry as written in a configuration file
///
/// Channels are on the 0-255 scale and may be fractional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShadeEntry {
    pub label: String,
    pub rgb: [f32; 3],
}

impl ShadeEntry {
    pub fn new(label: impl Into<String>, rgb: [f32; 3]) -> Self {
        Self {
            label: label.into(),
            rgb,
        }
    }

    /// The Roche YolkFan table as configuration entries
    pub fn roche_yolk_fan() -> Vec<ShadeEntry> {
        roche::YOLK_FAN
            .iter()
            .map(|(label, rgb)| ShadeEntry::new(*label, *rgb))
            .collect()
    }
}

/// A calibrated reference color with its cached Lab coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceShade {
    /// Scale label (e.g. "7")
    pub label: String,
    /// Calibrated color, channels normalized to [0, 1]
    pub rgb: Srgb<f32>,
    /// Lab coordinates of `rgb`
    pub lab: Lab,
}

/// Ordered, non-empty set of reference shades
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceScale {
    shades: Vec<ReferenceShade>,
}

impl ReferenceScale {
    /// Build a scale from calibration entries
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if `entries` is empty or any channel is
    /// not a finite value in [0, 255].
    pub fn new(entries: &[ShadeEntry]) -> Result<Self> {
        if entries.is_empty() {
            return Err(ClassificationError::invalid_config(
                "reference_scale",
                "at least one reference shade is required",
            ));
        }

        for entry in entries {
            if entry
                .rgb
                .iter()
                .any(|c| !c.is_finite() || !(0.0..=255.0).contains(c))
            {
                return Err(ClassificationError::invalid_config(
                    format!("reference_scale[{}]", entry.label),
                    format!("channels {:?} outside [0, 255]", entry.rgb),
                ));
            }
        }

        Ok(Self::from_entries(entries))
    }

    /// The Roche YolkFan scale (levels "1" to "15")
    pub fn roche_yolk_fan() -> Self {
        Self::from_entries(&ShadeEntry::roche_yolk_fan())
    }

    fn from_entries(entries: &[ShadeEntry]) -> Self {
        let converter = ColorConverter::new();
        let shades: Vec<ReferenceShade> = entries
            .iter()
            .map(|entry| {
                let rgb = Srgb::new(
                    entry.rgb[0] / 255.0,
                    entry.rgb[1] / 255.0,
                    entry.rgb[2] / 255.0,
                );
                ReferenceShade {
                    label: entry.label.clone(),
                    rgb,
                    lab: converter.srgb_to_lab(rgb),
                }
            })
            .collect();

        info!(shades = shades.len(), "reference scale built");
        Self { shades }
    }

    /// Shades in declaration order
    pub fn shades(&self) -> &[ReferenceShade] {
        &self.shades
    }

    pub fn get(&self, index: usize) -> Option<&ReferenceShade> {
        self.shades.get(index)
    }

    pub fn len(&self) -> usize {
        self.shades.len()
    }

    /// Always false; kept alongside `len`
    pub fn is_empty(&self) -> bool {
        self.shades.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ReferenceShade> {
        self.shades.iter()
    }
}

impl<'a> IntoIterator for &'a ReferenceScale {
    type Item = &'a ReferenceShade;
    type IntoIter = std::slice::Iter<'a, ReferenceShade>;

    fn into_iter(self) -> Self::IntoIter {
        self.shades.iter()
    }
}
