//! Signed-distance-like fields over 4D space.
//!
//! The selector is a continuous scalar, not an integer: base shapes live in
//! half-open bands `[0,1), [1,2), ...` up to 8, hypersphere-core variants in
//! `[8,16)`, hypertetrahedron-core variants in `[16,+inf)`. Fractional and
//! out-of-range selectors are accepted and fall into whichever band they land
//! in; every input produces a finite value.

use crate::math::Vec4;

/// Number of selectable shape variants (8 base + 8 + 8 core variants).
pub const GEOMETRY_COUNT: u32 = 24;

const HYPERSPHERE_CORE_RADIUS: f32 = 1.2;

/// One of the 8 base shapes, selected by band. `time` is the raw frame time
/// in milliseconds; only the wave shape consumes it.
pub fn base_geometry(p: Vec4, shape: f32, time: f32) -> f32 {
    if shape < 0.5 {
        // Tetrahedron
        ((p.x() + p.y()).abs() - p.z())
            .max((p.x() - p.y()).abs() - p.z())
            .max((p.x() + p.y()).abs() + p.z())
            .max((p.x() - p.y()).abs() + p.z())
            / 3.0f32.sqrt()
    } else if shape < 1.5 {
        // Hypercube
        let q = p.abs() - 0.8;
        let outside = Vec4::new([
            q.x().max(0.0),
            q.y().max(0.0),
            q.z().max(0.0),
            q.w().max(0.0),
        ]);
        outside.length() + q.max_component().min(0.0)
    } else if shape < 2.5 {
        // Sphere
        p.length() - 1.0
    } else if shape < 3.5 {
        // Torus
        let ring = (p.x() * p.x() + p.y() * p.y()).sqrt() - 0.8;
        (ring * ring + p.z() * p.z()).sqrt() - 0.3
    } else if shape < 4.5 {
        // Klein-bottle-like band
        let r = (p.x() * p.x() + p.y() * p.y()).sqrt();
        (r - 0.7).abs() - 0.2 + (p.y().atan2(p.x()) * 3.0 + p.z() * 5.0).sin() * 0.1
    } else if shape < 5.5 {
        // Fractal-like perturbed sphere
        p.length() - 0.8 + (p.x() * 5.0).sin() * (p.y() * 5.0).sin() * (p.z() * 5.0).sin() * 0.2
    } else if shape < 6.5 {
        // Time-animated wave sheet
        (p.z() - (p.x() * 5.0 + time).sin() * (p.y() * 5.0 + time).cos() * 0.3).abs() - 0.1
    } else {
        // Crystal
        p.abs().max_component() - 0.8
    }
}

fn tetrahedral_field(p: Vec4) -> f32 {
    ((p.x() + p.y()).abs() - p.z() - p.w())
        .max((p.x() - p.y()).abs() - p.z() + p.w())
        .max((p.x() + p.y()).abs() + p.z() - p.w())
        .max((p.x() - p.y()).abs() + p.z() + p.w())
        / 4.0f32.sqrt()
}

/// Base shape intersected with a sphere of radius 1.2.
pub fn hypersphere_core(p: Vec4, base_shape: f32, time: f32) -> f32 {
    let base = base_geometry(p, base_shape, time);
    let sphere_field = p.length() - HYPERSPHERE_CORE_RADIUS;
    base.max(sphere_field)
}

/// Base shape intersected with a 4D tetrahedral field.
pub fn hypertetrahedron_core(p: Vec4, base_shape: f32, time: f32) -> f32 {
    let base = base_geometry(p, base_shape, time);
    base.max(tetrahedral_field(p))
}

/// Dispatch on the continuous selector. Half-integer thresholds keep
/// externally supplied fractional selectors valid.
pub fn evaluate(p: Vec4, selector: f32, time: f32) -> f32 {
    if selector < 8.0 {
        base_geometry(p, selector, time)
    } else if selector < 16.0 {
        hypersphere_core(p, selector - 8.0, time)
    } else {
        hypertetrahedron_core(p, selector - 16.0, time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_points() -> Vec<Vec4> {
        vec![
            Vec4::ZERO,
            Vec4::new([1.0, 0.0, 0.0, 0.0]),
            Vec4::new([0.3, -0.8, 1.7, -0.2]),
            Vec4::new([-2.5, 1.1, 0.6, 3.0]),
            Vec4::new([0.05, 0.05, -0.05, 0.9]),
        ]
    }

    #[test]
    fn sphere_is_norm_minus_one() {
        for p in sample_points() {
            assert_eq!(evaluate(p, 2.0, 0.0), p.length() - 1.0);
        }
    }

    #[test]
    fn fractional_selector_stays_in_band() {
        for p in sample_points() {
            assert_eq!(evaluate(p, 2.4, 0.0), evaluate(p, 2.0, 0.0));
        }
    }

    #[test]
    fn hypersphere_core_intersects_base_with_sphere() {
        for p in sample_points() {
            let expected = base_geometry(p, 2.0, 0.0).max(p.length() - 1.2);
            assert_eq!(evaluate(p, 10.0, 0.0), expected);
        }
    }

    #[test]
    fn hypertetrahedron_core_bucket_offsets_by_sixteen() {
        for p in sample_points() {
            assert_eq!(
                evaluate(p, 18.0, 0.0),
                hypertetrahedron_core(p, 2.0, 0.0)
            );
        }
    }

    #[test]
    fn negative_selector_falls_into_first_band() {
        let p = Vec4::new([0.4, 0.2, -0.1, 0.0]);
        assert_eq!(evaluate(p, -3.0, 0.0), base_geometry(p, 0.0, 0.0));
    }

    #[test]
    fn crystal_is_chebyshev_box() {
        let p = Vec4::new([0.1, -1.5, 0.3, 0.2]);
        assert_eq!(evaluate(p, 7.0, 0.0), 1.5 - 0.8);
    }

    #[test]
    fn wave_follows_time() {
        let p = Vec4::new([0.5, 0.5, 0.0, 0.0]);
        let a = evaluate(p, 6.0, 0.0);
        let b = evaluate(p, 6.0, 1.0);
        assert_ne!(a, b);
    }

    #[test]
    fn all_selectors_finite_everywhere() {
        for p in sample_points() {
            for g in 0..GEOMETRY_COUNT {
                assert!(evaluate(p, g as f32, 123.0).is_finite());
            }
        }
    }
}
