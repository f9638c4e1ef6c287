//! Perceptual color difference
//!
//! CIE76 ΔE: plain Euclidean distance in L*a*b*. It is not hue-corrected,
//! so saturated yellows and oranges read somewhat further apart than
//! CIEDE2000 would report. The grading scale was calibrated with this
//! metric, so it is kept as is.

use palette::Lab;

/// Compute ΔE76 between two Lab colors
///
/// Symmetric, non-negative, and zero only for identical colors.
pub fn delta_e(p: Lab, q: Lab) -> f32 {
    let dl = p.l - q.l;
    let da = p.a - q.a;
    let db = p.b - q.b;
    (dl * dl + da * da + db * db).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<Lab> {
        vec![
            Lab::new(0.0, 0.0, 0.0),
            Lab::new(50.0, 0.0, 0.0),
            Lab::new(60.0, 10.0, 10.0),
            Lab::new(80.0, 12.5, 85.0),
            Lab::new(100.0, -128.0, 127.0),
            Lab::new(-20.0, 300.0, -400.0),
        ]
    }

    #[test]
    fn test_delta_e_same_color() {
        for p in samples() {
            assert_eq!(delta_e(p, p), 0.0);
        }
    }

    #[test]
    fn test_delta_e_symmetric_and_non_negative() {
        let all = samples();
        for &p in &all {
            for &q in &all {
                let d = delta_e(p, q);
                assert!(d >= 0.0);
                assert_eq!(d, delta_e(q, p));
            }
        }
    }

    #[test]
    fn test_delta_e_known_value() {
        let d = delta_e(Lab::new(50.0, 0.0, 0.0), Lab::new(53.0, 4.0, 0.0));
        assert!((d - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_delta_e_distinguishes_single_component() {
        let p = Lab::new(50.0, 10.0, 10.0);
        assert!(delta_e(p, Lab::new(50.0, 10.0, 10.5)) > 0.0);
        assert!(delta_e(p, Lab::new(50.0, 9.5, 10.0)) > 0.0);
        assert!(delta_e(p, Lab::new(50.5, 10.0, 10.0)) > 0.0);
    }
}
