//! Calibration constants and reference values for yolk color grading
//!
//! This module contains compile-time constants for the colorimetric
//! pipeline and the region detector. Runtime configuration
//! ([`crate::config::AnalyzerConfig`]) defaults to these values.

/// D65 Standard Illuminant Reference
///
/// CIE Standard Illuminant D65 represents average daylight with a correlated
/// color temperature of 6504K. It is the reference white for sRGB.
pub mod d65 {
    /// D65 white point in CIE XYZ, scaled so that Y = 100
    /// Source: CIE 15:2004 Colorimetry, 3rd edition
    pub const WHITE_POINT_XYZ: [f32; 3] = [95.047, 100.000, 108.883];
}

/// Re-export D65 white point at top level for convenience
pub const D65_WHITE_POINT_XYZ: [f32; 3] = d65::WHITE_POINT_XYZ;

/// sRGB transfer function and primaries
pub mod srgb {
    /// Encoded value below which the sRGB curve is linear
    pub const GAMMA_THRESHOLD: f32 = 0.04045;

    /// Slope of the linear segment
    pub const LINEAR_SLOPE: f32 = 12.92;

    /// Offset and exponent of the power segment
    pub const GAMMA_OFFSET: f32 = 0.055;
    pub const GAMMA_EXPONENT: f32 = 2.4;

    /// Linear sRGB to CIE XYZ (D65), rows X, Y, Z
    pub const TO_XYZ: [[f32; 3]; 3] = [
        [0.4124, 0.3576, 0.1805],
        [0.2126, 0.7152, 0.0722],
        [0.0193, 0.1192, 0.9505],
    ];
}

/// CIE L*a*b* nonlinearity
pub mod lab {
    /// Normalized component above which the cube root applies
    pub const EPSILON: f32 = 0.008856;

    /// Slope of the linear segment near black
    pub const KAPPA_SLOPE: f32 = 7.787;

    /// Offset of the linear segment (16/116)
    pub const LINEAR_OFFSET: f32 = 16.0 / 116.0;
}

/// Yolk region detection parameters
pub mod segmentation {
    /// Lower hue bound in degrees (yellow-orange band)
    pub const HUE_MIN_DEG: f32 = 20.0;

    /// Upper hue bound in degrees, inclusive
    ///
    /// An 8-bit half-degree hue of 35 reaches just under 71 degrees; this
    /// band stops at a whole 70.
    pub const HUE_MAX_DEG: f32 = 70.0;

    /// Minimum saturation on a 0-255 scale
    pub const SATURATION_MIN: u8 = 60;

    /// Minimum value (brightness) on a 0-255 scale
    pub const VALUE_MIN: u8 = 80;

    /// Radius of the elliptical structuring element (5x5)
    pub const MORPH_RADIUS: u8 = 2;

    /// Gaussian kernel size applied to the cleaned mask (must be odd)
    pub const BLUR_KERNEL_SIZE: u32 = 9;

    /// Gaussian sigma applied to the cleaned mask
    pub const BLUR_SIGMA: f32 = 2.0;

    /// Blurred mask level at or above which a background pixel joins the mask
    pub const MASK_THRESHOLD: u8 = 128;
}

/// Roche YolkFan calibration scale
///
/// Fifteen levels from pale yellow ("1") to deep orange ("15"), as average
/// sRGB values measured from the printed fan. Channel values are fractional
/// because they are averages over the measured patch.
pub mod roche {
    pub const YOLK_FAN: [(&str, [f32; 3]); 15] = [
        ("1", [245.5, 218.8, 101.8]),
        ("2", [252.2, 216.2, 80.2]),
        ("3", [252.4, 212.1, 69.7]),
        ("4", [254.7, 208.7, 48.7]),
        ("5", [253.6, 197.5, 29.3]),
        ("6", [253.5, 191.1, 18.0]),
        ("7", [254.2, 185.9, 5.6]),
        ("8", [255.0, 179.0, 3.0]),
        ("9", [253.0, 168.0, 1.1]),
        ("10", [254.0, 155.8, 2.4]),
        ("11", [254.7, 141.9, 4.3]),
        ("12", [254.2, 131.7, 7.5]),
        ("13", [253.8, 123.4, 16.1]),
        ("14", [254.7, 105.7, 25.7]),
        ("15", [254.0, 94.0, 32.3]),
    ];
}
