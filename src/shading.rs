//! The two pixel programs and their shared sample-point derivation.

use crate::math::Vec4;
use serde::{Deserialize, Serialize};

/// Which shading program is active.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemMode {
    #[default]
    Quantum,
    Holographic,
}

impl SystemMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "quantum" => Some(Self::Quantum),
            "holographic" => Some(Self::Holographic),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Quantum => "quantum",
            Self::Holographic => "holographic",
        }
    }
}

/// Scale from raw frame milliseconds to the animated palette/sample phase.
pub const TIME_PHASE_SCALE: f32 = 0.0001;

const QUANTUM_BASE_COLOR: [f32; 3] = [0.0, 0.8, 1.0];
const HOLOGRAPHIC_EXPONENT: f32 = 1.5;
const FIELD_SCALE: f32 = 0.8;

/// Build the untransformed 4D sample point for one pixel: the centered UV
/// spans the first two coordinates, the time phase drives the last two.
pub fn sample_point(uv: [f32; 2], time_phase: f32) -> Vec4 {
    Vec4::new([
        uv[0] * 3.0,
        uv[1] * 3.0,
        (time_phase * 3.0).sin(),
        (time_phase * 2.0).cos(),
    ])
}

fn field_intensity(value: f32) -> f32 {
    1.0 - (value * FIELD_SCALE).abs().clamp(0.0, 1.0)
}

/// Map a role intensity to one of the 5 palette layers. Exact equality is
/// deliberate: the control surface supplies these four literal constants, and
/// anything else is the base layer. Fragile if role values are ever computed
/// rather than passed through verbatim.
pub fn layer_for_role(role_intensity: f32) -> usize {
    if role_intensity == 0.7 {
        1
    } else if role_intensity == 1.0 {
        2
    } else if role_intensity == 0.85 {
        3
    } else if role_intensity == 0.6 {
        4
    } else {
        0
    }
}

fn mix(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

/// Two-stage animated gradient per layer. Anchor colors and modulation
/// frequencies are the system's visual identity; do not retune them.
pub fn layer_palette(layer: usize, t: f32) -> [f32; 3] {
    match layer {
        1 => mix(
            mix([0.0, 1.0, 0.0], [0.8, 1.0, 0.0], (t * 7.0).sin() * 0.5 + 0.5),
            [0.0, 0.8, 0.3],
            (t * 5.0).cos() * 0.5 + 0.5,
        ),
        2 => mix(
            mix([1.0, 0.0, 0.0], [1.0, 0.5, 0.0], (t * 11.0).sin() * 0.5 + 0.5),
            [1.0, 1.0, 1.0],
            (t * 8.0).cos() * 0.5 + 0.5,
        ),
        3 => mix(
            mix([0.0, 1.0, 1.0], [0.0, 0.5, 1.0], (t * 13.0).sin() * 0.5 + 0.5),
            [0.5, 1.0, 1.0],
            (t * 9.0).cos() * 0.5 + 0.5,
        ),
        4 => mix(
            mix([1.0, 0.0, 1.0], [0.8, 0.0, 1.0], (t * 17.0).sin() * 0.5 + 0.5),
            [1.0, 0.3, 1.0],
            (t * 12.0).cos() * 0.5 + 0.5,
        ),
        _ => mix(
            mix([0.05, 0.0, 0.2], [0.0, 0.0, 0.1], (t * 3.0).sin() * 0.5 + 0.5),
            [0.0, 0.05, 0.3],
            (t * 2.0).cos() * 0.5 + 0.5,
        ),
    }
}

/// Minimal program: linear field intensity times a fixed cyan-blue base.
/// Opacity is the raw field intensity, without the `intensity` scale.
pub fn shade_quantum(value: f32, intensity: f32) -> ([f32; 3], f32) {
    let geometry_intensity = field_intensity(value);
    let color = [
        QUANTUM_BASE_COLOR[0] * geometry_intensity * intensity,
        QUANTUM_BASE_COLOR[1] * geometry_intensity * intensity,
        QUANTUM_BASE_COLOR[2] * geometry_intensity * intensity,
    ];
    (color, geometry_intensity)
}

/// Layered program: sharpened field intensity scaled by `intensity`, tinted by
/// the role-selected animated palette. Opacity carries the `intensity` scale.
pub fn shade_holographic(
    value: f32,
    time_phase: f32,
    intensity: f32,
    role_intensity: f32,
) -> ([f32; 3], f32) {
    let geometry_intensity = field_intensity(value).powf(HOLOGRAPHIC_EXPONENT) * intensity;
    let palette = layer_palette(layer_for_role(role_intensity), time_phase);
    let color = [
        palette[0] * geometry_intensity,
        palette[1] * geometry_intensity,
        palette[2] * geometry_intensity,
    ];
    (color, geometry_intensity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_names_round_trip() {
        assert_eq!(SystemMode::from_name("quantum"), Some(SystemMode::Quantum));
        assert_eq!(
            SystemMode::from_name("holographic"),
            Some(SystemMode::Holographic)
        );
        assert_eq!(SystemMode::from_name("plasma"), None);
        assert_eq!(SystemMode::Holographic.name(), "holographic");
        assert_eq!(SystemMode::default(), SystemMode::Quantum);
    }

    #[test]
    fn role_layers_match_on_exact_constants_only() {
        assert_eq!(layer_for_role(0.7), 1);
        assert_eq!(layer_for_role(1.0), 2);
        assert_eq!(layer_for_role(0.85), 3);
        assert_eq!(layer_for_role(0.6), 4);
        assert_eq!(layer_for_role(0.0), 0);
        assert_eq!(layer_for_role(0.3), 0);
        assert_eq!(layer_for_role(0.7000001), 0);
    }

    #[test]
    fn base_layer_palette_at_phase_zero() {
        // sin(0) = 0 picks the midpoint of stage one, cos(0) = 1 picks the
        // third anchor outright.
        let color = layer_palette(0, 0.0);
        assert_eq!(color, [0.0, 0.05, 0.3]);
        assert_eq!(layer_palette(2, 0.0), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn quantum_on_surface_is_full_base_color() {
        let (color, alpha) = shade_quantum(0.0, 1.0);
        assert_eq!(color, QUANTUM_BASE_COLOR);
        assert_eq!(alpha, 1.0);
    }

    #[test]
    fn quantum_alpha_ignores_intensity_scale() {
        let (color, alpha) = shade_quantum(0.0, 0.25);
        assert_eq!(alpha, 1.0);
        assert_eq!(color[1], 0.8 * 0.25);
    }

    #[test]
    fn holographic_alpha_carries_intensity_scale() {
        let (_, alpha) = shade_holographic(0.0, 0.0, 0.5, 0.0);
        assert_eq!(alpha, 0.5);
    }

    #[test]
    fn far_field_shades_to_nothing() {
        let (color, alpha) = shade_quantum(10.0, 1.0);
        assert_eq!(color, [0.0, 0.0, 0.0]);
        assert_eq!(alpha, 0.0);
        let (_, h_alpha) = shade_holographic(-10.0, 0.3, 1.0, 0.85);
        assert_eq!(h_alpha, 0.0);
    }
}
