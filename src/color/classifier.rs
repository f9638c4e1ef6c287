//! Nearest-shade classification
//!
//! Linear scan over the reference scale. The scale is small and fixed, so
//! no spatial index is used. Ties keep the earliest-declared shade because
//! the running best is only replaced on a strictly smaller distance.

use std::sync::Arc;

use palette::Lab;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::{delta_e, ReferenceScale, ReferenceShade};

/// Nearest reference shade for a sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Winning reference shade
    pub shade: ReferenceShade,
    /// Position of `shade` in the scale
    pub index: usize,
    /// ΔE76 between the sample and `shade`
    pub distance: f32,
}

/// Classifier over a shared, read-only reference scale
#[derive(Debug, Clone)]
pub struct ShadeClassifier {
    scale: Arc<ReferenceScale>,
}

impl ShadeClassifier {
    pub fn new(scale: Arc<ReferenceScale>) -> Self {
        Self { scale }
    }

    pub fn scale(&self) -> &ReferenceScale {
        &self.scale
    }

    /// Find the reference shade nearest to `lab`
    ///
    /// Always returns a shade, however far away it is. A NaN component in
    /// `lab` makes every distance NaN, in which case the first shade is
    /// reported with a NaN distance.
    pub fn classify(&self, lab: Lab) -> Classification {
        let mut best_index = 0;
        let mut best_distance = f32::INFINITY;

        for (index, shade) in self.scale.iter().enumerate() {
            let distance = delta_e(lab, shade.lab);
            if distance < best_distance {
                best_distance = distance;
                best_index = index;
            }
        }

        if best_distance.is_infinite() {
            // Only reachable when every distance compared false (NaN input)
            best_distance = delta_e(lab, self.scale.shades()[0].lab);
        }

        let shade = self.scale.shades()[best_index].clone();
        debug!(shade = %shade.label, delta_e = best_distance, "classified sample");

        Classification {
            shade,
            index: best_index,
            distance: best_distance,
        }
    }
}
