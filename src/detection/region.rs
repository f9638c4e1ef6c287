//! Connected-region extraction and reduction
//!
//! Labels 8-connected foreground components of a segmentation mask, keeps
//! the largest one (first found on ties), and reduces it to a centroid from
//! its first-order moments and a mean color taken from the original image.

use std::collections::HashMap;

use image::{GrayImage, Luma, RgbImage};
use imageproc::region_labelling::{connected_components, Connectivity};
use palette::Srgb;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{detection::segmenter::BACKGROUND, ClassificationError, Result};

/// Axis-aligned bounds of a region, inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl BoundingBox {
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

/// One connected foreground component
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Component label from the labelling pass
    pub label: u32,
    /// Pixel count (zeroth moment M00)
    pub area: u32,
    /// First-order moments: sum of x (M10) and sum of y (M01)
    pub m10: u64,
    pub m01: u64,
    pub bounding_box: BoundingBox,
    /// Per-channel sums of original-image colors under the component
    color_sum: [u64; 3],
}

impl Region {
    fn new(label: u32, x: u32, y: u32) -> Self {
        Self {
            label,
            area: 0,
            m10: 0,
            m01: 0,
            bounding_box: BoundingBox {
                min_x: x,
                min_y: y,
                max_x: x,
                max_y: y,
            },
            color_sum: [0; 3],
        }
    }

    fn add(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        self.area += 1;
        self.m10 += u64::from(x);
        self.m01 += u64::from(y);

        let bbox = &mut self.bounding_box;
        bbox.min_x = bbox.min_x.min(x);
        bbox.min_y = bbox.min_y.min(y);
        bbox.max_x = bbox.max_x.max(x);
        bbox.max_y = bbox.max_y.max(y);

        for (sum, channel) in self.color_sum.iter_mut().zip(rgb) {
            *sum += u64::from(channel);
        }
    }

    /// Centroid `(M10 / M00, M01 / M00)` truncated to pixel coordinates
    pub fn centroid(&self) -> Option<(u32, u32)> {
        if self.area == 0 {
            return None;
        }
        let m00 = u64::from(self.area);
        Some(((self.m10 / m00) as u32, (self.m01 / m00) as u32))
    }

    /// Mean original-image color, rounded per channel
    pub fn mean_color(&self) -> Option<Srgb<u8>> {
        if self.area == 0 {
            return None;
        }
        let n = u64::from(self.area);
        let [r, g, b] = self.color_sum.map(|sum| ((sum + n / 2) / n) as u8);
        Some(Srgb::new(r, g, b))
    }
}

/// Location and color of the selected yolk region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Centroid in pixel coordinates
    pub centroid: (u32, u32),
    /// Mean color of the region in the original image
    pub mean_color: Srgb<u8>,
    /// Region pixel count
    pub area: u32,
    pub bounding_box: BoundingBox,
}

/// Picks the dominant region from a segmentation mask
#[derive(Debug, Clone, Default)]
pub struct RegionSelector;

impl RegionSelector {
    pub fn new() -> Self {
        Self
    }

    /// Extract all 8-connected foreground components
    ///
    /// Components are returned in the order their first pixel appears in a
    /// row-major scan, which is also the tie-break order for [`select`].
    ///
    /// [`select`]: RegionSelector::select
    pub fn extract_regions(&self, mask: &GrayImage, image: &RgbImage) -> Result<Vec<Region>> {
        if mask.dimensions() != image.dimensions() {
            return Err(ClassificationError::DimensionMismatch {
                mask_width: mask.width(),
                mask_height: mask.height(),
                width: image.width(),
                height: image.height(),
            });
        }

        // The labeller cannot take a single-pixel mask
        if u64::from(mask.width()) * u64::from(mask.height()) <= 1 {
            return Ok(mask
                .enumerate_pixels()
                .filter(|(_, _, p)| p.0[0] != BACKGROUND)
                .map(|(x, y, _)| {
                    let mut region = Region::new(1, x, y);
                    region.add(x, y, image.get_pixel(x, y).0);
                    region
                })
                .collect());
        }

        let labels = connected_components(mask, Connectivity::Eight, Luma([BACKGROUND]));

        let mut regions: Vec<Region> = Vec::new();
        let mut slots: HashMap<u32, usize> = HashMap::new();

        for (x, y, label) in labels.enumerate_pixels() {
            let label = label.0[0];
            if label == 0 {
                continue;
            }
            let slot = *slots.entry(label).or_insert_with(|| {
                regions.push(Region::new(label, x, y));
                regions.len() - 1
            });
            regions[slot].add(x, y, image.get_pixel(x, y).0);
        }

        Ok(regions)
    }

    /// Select the largest region and reduce it to a [`Detection`]
    ///
    /// # Errors
    ///
    /// Returns `NoRegionDetected` if the mask has no foreground pixels, or
    /// `DimensionMismatch` if mask and image sizes differ.
    pub fn select(&self, mask: &GrayImage, image: &RgbImage) -> Result<Detection> {
        let regions = self.extract_regions(mask, image)?;

        let mut best: Option<&Region> = None;
        for region in &regions {
            if best.map_or(true, |b| region.area > b.area) {
                best = Some(region);
            }
        }

        let region = best.ok_or(ClassificationError::NoRegionDetected)?;
        let (centroid, mean_color) = match (region.centroid(), region.mean_color()) {
            (Some(centroid), Some(mean_color)) => (centroid, mean_color),
            _ => return Err(ClassificationError::NoRegionDetected),
        };

        debug!(
            regions = regions.len(),
            area = region.area,
            cx = centroid.0,
            cy = centroid.1,
            "selected region"
        );

        Ok(Detection {
            centroid,
            mean_color,
            area: region.area,
            bounding_box: region.bounding_box,
        })
    }
}
