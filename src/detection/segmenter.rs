//! Yolk region segmentation by hue band
//!
//! Produces a binary mask of yolk candidates:
//! - HSV thresholding against a fixed yellow-orange band
//! - Morphological opening to drop speckles, then closing to fill pinholes
//! - Gaussian smoothing of the mask; pixels the blur lifts to mid level
//!   join the mask, so notches along region boundaries are filled while
//!   no cleaned pixel is ever dropped
//!
//! Every step is deterministic; the same image always yields the same mask.

use image::{GrayImage, Luma, RgbImage};
use imageproc::{
    distance_transform::Norm,
    filter::separable_filter_equal,
    morphology::{close, open},
};
use palette::{Hsv, Srgb};
use tracing::debug;

use crate::{
    color::ColorConverter,
    config::SegmentationConfig,
    constants::segmentation::MASK_THRESHOLD,
    Result,
};

/// Mask value for candidate pixels
pub const FOREGROUND: u8 = 255;

/// Mask value for background pixels
pub const BACKGROUND: u8 = 0;

/// Inclusive HSV acceptance band
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HsvBand {
    /// Hue bounds in degrees
    pub hue_min: f32,
    pub hue_max: f32,
    /// Saturation and value floors on a 0-255 scale
    pub saturation_min: u8,
    pub value_min: u8,
}

impl HsvBand {
    /// Check whether an HSV color falls inside the band
    pub fn contains(&self, hsv: &Hsv) -> bool {
        let hue = hsv.hue.into_positive_degrees();
        let saturation = (hsv.saturation * 255.0).round();
        let value = (hsv.value * 255.0).round();

        hue >= self.hue_min
            && hue <= self.hue_max
            && saturation >= f32::from(self.saturation_min)
            && value >= f32::from(self.value_min)
    }
}

/// Region segmenter with fixed calibration
#[derive(Debug, Clone)]
pub struct RegionSegmenter {
    converter: ColorConverter,
    band: HsvBand,
    morph_radius: u8,
    blur_kernel: Vec<f32>,
}

impl Default for RegionSegmenter {
    fn default() -> Self {
        Self::build(&SegmentationConfig::default())
    }
}

impl RegionSegmenter {
    /// Create a segmenter with the default yolk band
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a segmenter from validated configuration
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the band is inverted or out of range,
    /// or the blur parameters are unusable.
    pub fn from_config(config: &SegmentationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: &SegmentationConfig) -> Self {
        Self {
            converter: ColorConverter::new(),
            band: HsvBand {
                hue_min: config.hue_min,
                hue_max: config.hue_max,
                saturation_min: config.saturation_min,
                value_min: config.value_min,
            },
            morph_radius: config.morph_radius,
            blur_kernel: gaussian_kernel(config.blur_kernel_size, config.blur_sigma),
        }
    }

    pub fn band(&self) -> &HsvBand {
        &self.band
    }

    /// Segment yolk candidates in an RGB image
    ///
    /// # Arguments
    ///
    /// * `image` - RGB image, any size
    ///
    /// # Returns
    ///
    /// Same-size mask with [`FOREGROUND`] for candidate pixels and
    /// [`BACKGROUND`] elsewhere. An all-background mask is a valid result.
    pub fn segment(&self, image: &RgbImage) -> GrayImage {
        // Step 1: Hue band threshold
        let binary = self.threshold(image);

        // Step 2: Morphological refinement
        let cleaned = self.morphological_refinement(&binary);

        // Step 3: Edge smoothing
        let mask = self.smooth(&cleaned);

        debug!(
            width = image.width(),
            height = image.height(),
            thresholded = count_foreground(&binary),
            foreground = count_foreground(&mask),
            "segmented image"
        );
        mask
    }

    /// Mark pixels whose HSV falls in the band
    pub fn threshold(&self, image: &RgbImage) -> GrayImage {
        GrayImage::from_fn(image.width(), image.height(), |x, y| {
            let [r, g, b] = image.get_pixel(x, y).0;
            let hsv = self.converter.rgb_to_hsv(Srgb::new(r, g, b));
            if self.band.contains(&hsv) {
                Luma([FOREGROUND])
            } else {
                Luma([BACKGROUND])
            }
        })
    }

    /// Opening removes speckle, closing fills small holes; same element for both
    fn morphological_refinement(&self, binary: &GrayImage) -> GrayImage {
        if self.morph_radius == 0 {
            return binary.clone();
        }
        let opened = open(binary, Norm::L2, self.morph_radius);
        close(&opened, Norm::L2, self.morph_radius)
    }

    /// Blur the mask and add every pixel that reaches mid level
    ///
    /// The result is a superset of `mask`, so region area and moments are
    /// never eroded by the blur.
    fn smooth(&self, mask: &GrayImage) -> GrayImage {
        let mut blurred = separable_filter_equal(mask, &self.blur_kernel);
        for (pixel, original) in blurred.pixels_mut().zip(mask.pixels()) {
            pixel.0[0] = if original.0[0] != BACKGROUND || pixel.0[0] >= MASK_THRESHOLD {
                FOREGROUND
            } else {
                BACKGROUND
            };
        }
        blurred
    }
}

/// Count foreground pixels in a mask
pub fn count_foreground(mask: &GrayImage) -> usize {
    mask.pixels().filter(|p| p.0[0] != BACKGROUND).count()
}

/// Normalized 1-D Gaussian kernel with `size` taps
fn gaussian_kernel(size: u32, sigma: f32) -> Vec<f32> {
    let radius = (size / 2) as i32;
    let denom = 2.0 * sigma * sigma;
    let mut kernel: Vec<f32> = (-radius..=radius)
        .map(|i| (-((i * i) as f32) / denom).exp())
        .collect();
    let sum: f32 = kernel.iter().sum();
    for weight in kernel.iter_mut() {
        *weight /= sum;
    }
    kernel
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    const ORANGE: Rgb<u8> = Rgb([250, 150, 10]);
    const GRAY: Rgb<u8> = Rgb([128, 128, 128]);

    fn square_image(size: u32, lo: u32, hi: u32) -> RgbImage {
        RgbImage::from_fn(size, size, |x, y| {
            if x >= lo && x < hi && y >= lo && y < hi {
                ORANGE
            } else {
                GRAY
            }
        })
    }

    #[test]
    fn test_band_contains_orange_not_gray() {
        let segmenter = RegionSegmenter::new();
        let converter = ColorConverter::new();
        let band = segmenter.band();

        assert!(band.contains(&converter.rgb_to_hsv(Srgb::new(250, 150, 10))));
        assert!(band.contains(&converter.rgb_to_hsv(Srgb::new(254, 185, 6))));
        assert!(!band.contains(&converter.rgb_to_hsv(Srgb::new(128, 128, 128))));
        // Red and blue hues fall outside the band
        assert!(!band.contains(&converter.rgb_to_hsv(Srgb::new(230, 20, 20))));
        assert!(!band.contains(&converter.rgb_to_hsv(Srgb::new(20, 40, 230))));
        // Too dark
        assert!(!band.contains(&converter.rgb_to_hsv(Srgb::new(60, 40, 5))));
    }

    #[test]
    fn test_gaussian_kernel_normalized() {
        let kernel = gaussian_kernel(9, 2.0);
        assert_eq!(kernel.len(), 9);
        let sum: f32 = kernel.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        assert_eq!(kernel[0], kernel[8]);
        assert!(kernel[4] > kernel[3]);
    }

    #[test]
    fn test_segment_all_gray_is_empty() {
        let segmenter = RegionSegmenter::new();
        let image = RgbImage::from_pixel(40, 30, GRAY);
        let mask = segmenter.segment(&image);
        assert_eq!(mask.dimensions(), (40, 30));
        assert_eq!(count_foreground(&mask), 0);
    }

    #[test]
    fn test_segment_keeps_solid_square() {
        let segmenter = RegionSegmenter::new();
        let image = square_image(60, 20, 40);
        let mask = segmenter.segment(&image);

        assert_eq!(mask.get_pixel(30, 30).0[0], FOREGROUND);
        assert_eq!(mask.get_pixel(5, 5).0[0], BACKGROUND);
        let area = count_foreground(&mask) as f32;
        assert!((area - 400.0).abs() / 400.0 < 0.1, "area {}", area);
    }

    #[test]
    fn test_band_hue_edges_are_whole_degrees() {
        let band = *RegionSegmenter::new().band();
        assert!(band.contains(&Hsv::new(20.0, 1.0, 1.0)));
        assert!(band.contains(&Hsv::new(70.0, 1.0, 1.0)));
        assert!(!band.contains(&Hsv::new(19.5, 1.0, 1.0)));
        assert!(!band.contains(&Hsv::new(70.5, 1.0, 1.0)));
    }

    #[test]
    fn test_smoothing_never_drops_pixels() {
        let config = SegmentationConfig {
            morph_radius: 0,
            ..SegmentationConfig::default()
        };
        let segmenter = RegionSegmenter::from_config(&config).unwrap();
        let image = RgbImage::from_fn(40, 40, |x, y| {
            let dx = x as f32 - 20.3;
            let dy = y as f32 - 17.7;
            if dx * dx + dy * dy <= 64.0 {
                ORANGE
            } else {
                GRAY
            }
        });

        let thresholded = segmenter.threshold(&image);
        let mask = segmenter.segment(&image);
        for (before, after) in thresholded.pixels().zip(mask.pixels()) {
            if before.0[0] == FOREGROUND {
                assert_eq!(after.0[0], FOREGROUND);
            }
        }

        let disc = count_foreground(&thresholded) as f32;
        let area = count_foreground(&mask) as f32;
        assert!((area - disc) / disc < 0.01, "area {} vs disc {}", area, disc);
    }

    #[test]
    fn test_segment_removes_speckle() {
        let segmenter = RegionSegmenter::new();
        let mut image = RgbImage::from_pixel(40, 40, GRAY);
        image.put_pixel(10, 10, ORANGE);
        image.put_pixel(30, 12, ORANGE);
        let mask = segmenter.segment(&image);
        assert_eq!(count_foreground(&mask), 0);
    }

    #[test]
    fn test_segment_fills_pinhole() {
        let segmenter = RegionSegmenter::new();
        let mut image = square_image(60, 15, 45);
        image.put_pixel(30, 30, GRAY);
        let mask = segmenter.segment(&image);
        assert_eq!(mask.get_pixel(30, 30).0[0], FOREGROUND);
    }

    #[test]
    fn test_segment_is_idempotent() {
        let segmenter = RegionSegmenter::new();
        let image = RgbImage::from_fn(50, 50, |x, y| {
            if (x * 7 + y * 3) % 11 < 6 || (x > 10 && x < 30 && y > 12 && y < 35) {
                ORANGE
            } else {
                GRAY
            }
        });
        let first = segmenter.segment(&image);
        let second = segmenter.segment(&image);
        assert_eq!(first.as_raw(), second.as_raw());
    }

    #[test]
    fn test_from_config_rejects_inverted_band() {
        let config = SegmentationConfig {
            hue_min: 70.0,
            hue_max: 20.0,
            ..SegmentationConfig::default()
        };
        assert!(RegionSegmenter::from_config(&config).is_err());
    }

    #[test]
    fn test_zero_radius_skips_morphology() {
        let config = SegmentationConfig {
            morph_radius: 0,
            blur_kernel_size: 1,
            ..SegmentationConfig::default()
        };
        let segmenter = RegionSegmenter::from_config(&config).unwrap();
        let mut image = RgbImage::from_pixel(20, 20, GRAY);
        image.put_pixel(4, 4, ORANGE);
        let mask = segmenter.segment(&image);
        assert_eq!(count_foreground(&mask), 1);
        assert_eq!(mask.get_pixel(4, 4).0[0], FOREGROUND);
    }
}
