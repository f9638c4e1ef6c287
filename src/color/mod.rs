//! Colorimetric pipeline
//!
//! Conversion of device RGB into CIE L*a*b*, perceptual distance,
//! the calibrated reference scale and nearest-shade classification.

pub mod classifier;
pub mod conversion;
pub mod distance;
pub mod scale;

pub use classifier::{Classification, ShadeClassifier};
pub use conversion::ColorConverter;
pub use distance::delta_e;
pub use scale::{ReferenceScale, ReferenceShade, ShadeEntry};
