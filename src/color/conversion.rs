//! Color space conversion utilities
//!
//! Provides the conversions used for grading:
//! - sRGB (8-bit or normalized) to CIE XYZ to CIE L*a*b* under D65
//! - sRGB to HSV for hue-band thresholding
//! - Hex color representation
//!
//! The XYZ to Lab step uses the classic 0.008856 / 7.787 constants so
//! that sample colors and the calibration table go through exactly the
//! same transform.

use palette::{FromColor, Hsv, Lab, Srgb};

use crate::constants::{lab, srgb, D65_WHITE_POINT_XYZ};

/// Color converter targeting the D65 reference white
#[derive(Debug, Clone)]
pub struct ColorConverter {
    /// Reference white in XYZ (Y = 100)
    white_point: [f32; 3],
}

impl Default for ColorConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorConverter {
    /// Create a new color converter with D65 as reference white
    pub fn new() -> Self {
        Self {
            white_point: D65_WHITE_POINT_XYZ,
        }
    }

    /// Convert an 8-bit sRGB sample to Lab color space
    ///
    /// # Arguments
    ///
    /// * `rgb` - sRGB sample with channels in [0, 255]
    ///
    /// # Returns
    ///
    /// Lab color relative to D65
    pub fn rgb_to_lab(&self, rgb: Srgb<u8>) -> Lab {
        self.srgb_to_lab(rgb.into_format::<f32>())
    }

    /// Convert a normalized sRGB color (channels in [0, 1]) to Lab
    ///
    /// Used directly for calibration values that are not whole numbers.
    pub fn srgb_to_lab(&self, rgb: Srgb<f32>) -> Lab {
        let [x, y, z] = self.srgb_to_xyz(rgb);

        let fx = lab_f(x / self.white_point[0]);
        let fy = lab_f(y / self.white_point[1]);
        let fz = lab_f(z / self.white_point[2]);

        Lab::new(116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz))
    }

    /// Convert a normalized sRGB color to CIE XYZ scaled so that Y = 100 for white
    pub fn srgb_to_xyz(&self, rgb: Srgb<f32>) -> [f32; 3] {
        let linear = [
            srgb_to_linear(rgb.red),
            srgb_to_linear(rgb.green),
            srgb_to_linear(rgb.blue),
        ];

        let mut xyz = [0.0f32; 3];
        for (out, row) in xyz.iter_mut().zip(srgb::TO_XYZ.iter()) {
            *out = 100.0 * (row[0] * linear[0] + row[1] * linear[1] + row[2] * linear[2]);
        }
        xyz
    }

    /// Convert an 8-bit sRGB sample to HSV
    ///
    /// Hue is in degrees [0, 360), saturation and value in [0, 1].
    /// Achromatic samples report a hue of 0 and zero saturation.
    pub fn rgb_to_hsv(&self, rgb: Srgb<u8>) -> Hsv {
        Hsv::from_color(rgb.into_format::<f32>())
    }

    /// Convert sRGB to hexadecimal color string
    ///
    /// # Arguments
    ///
    /// * `srgb` - sRGB color, channels in [0, 1]
    ///
    /// # Returns
    ///
    /// Hex color string (e.g., "#FFB903")
    pub fn srgb_to_hex(&self, srgb: Srgb<f32>) -> String {
        let r = (srgb.red.clamp(0.0, 1.0) * 255.0).round() as u8;
        let g = (srgb.green.clamp(0.0, 1.0) * 255.0).round() as u8;
        let b = (srgb.blue.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    }
}

/// Inverse sRGB companding for a single normalized channel
fn srgb_to_linear(channel: f32) -> f32 {
    if channel > srgb::GAMMA_THRESHOLD {
        ((channel + srgb::GAMMA_OFFSET) / (1.0 + srgb::GAMMA_OFFSET)).powf(srgb::GAMMA_EXPONENT)
    } else {
        channel / srgb::LINEAR_SLOPE
    }
}

/// Lab companding for a white-normalized XYZ component
fn lab_f(t: f32) -> f32 {
    if t > lab::EPSILON {
        t.cbrt()
    } else {
        lab::KAPPA_SLOPE * t + lab::LINEAR_OFFSET
    }
}
