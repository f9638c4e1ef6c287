//! Yolk region detection module
//!
//! This module segments candidate yolk pixels by hue and reduces the
//! dominant connected region to a location and representative color.

pub mod region;
pub mod segmenter;

pub use region::{BoundingBox, Detection, Region, RegionSelector};
pub use segmenter::{HsvBand, RegionSegmenter};
