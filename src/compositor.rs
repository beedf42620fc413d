//! Per-frame orchestration: snapshot in, RGBA buffer out.

use crate::geometry;
use crate::params::{VisualParams, PARAM_INTENSITY, PARAM_ROLE_INTENSITY, PARAM_SPEED};
use crate::rotation::{self, RotationState};
use crate::shading::{self, SystemMode, TIME_PHASE_SCALE};
use image::{Rgba, RgbaImage};

/// Fixed square render-target edge, chosen for performance.
pub const SURFACE_SIZE: u32 = 512;

/// Everything one frame depends on. Rendering is a pure function of this
/// snapshot, so frames are replayable offline.
#[derive(Clone, Debug)]
pub struct FrameParams {
    pub mode: SystemMode,
    pub geometry: f32,
    pub rotation: RotationState,
    pub visual: VisualParams,
    /// Elapsed milliseconds since the engine's epoch.
    pub time_ms: f32,
    pub width: u32,
    pub height: u32,
}

impl Default for FrameParams {
    fn default() -> Self {
        Self {
            mode: SystemMode::default(),
            geometry: 0.0,
            rotation: RotationState::default(),
            visual: VisualParams::default(),
            time_ms: 0.0,
            width: SURFACE_SIZE,
            height: SURFACE_SIZE,
        }
    }
}

fn to_rgba(color: [f32; 3], alpha: f32) -> Rgba<u8> {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8;
    Rgba([
        channel(color[0]),
        channel(color[1]),
        channel(color[2]),
        channel(alpha),
    ])
}

/// Render one full frame. The rotation transform is composed once; each pixel
/// derives a centered aspect-corrected UV (the exact viewport center maps to
/// UV (0,0)), builds the 4D sample point, applies the transform, evaluates the
/// selected geometry, and shades under the active program.
pub fn render_frame(frame: &FrameParams) -> RgbaImage {
    let transform = rotation::compose(&frame.rotation);
    let speed = frame.visual.get(PARAM_SPEED);
    let intensity = frame.visual.get(PARAM_INTENSITY);
    let role_intensity = frame.visual.get(PARAM_ROLE_INTENSITY);
    let time_phase = frame.time_ms * TIME_PHASE_SCALE * speed;

    let half_w = frame.width as f32 * 0.5;
    let half_h = frame.height as f32 * 0.5;
    let min_dim = frame.width.min(frame.height).max(1) as f32;

    let mut image = RgbaImage::new(frame.width, frame.height);
    for py in 0..frame.height {
        for px in 0..frame.width {
            let uv = [
                (px as f32 - half_w) / min_dim,
                (py as f32 - half_h) / min_dim,
            ];
            let pos = transform * shading::sample_point(uv, time_phase);
            let value = geometry::evaluate(pos, frame.geometry, frame.time_ms);
            let (color, alpha) = match frame.mode {
                SystemMode::Quantum => shading::shade_quantum(value, intensity),
                SystemMode::Holographic => {
                    shading::shade_holographic(value, time_phase, intensity, role_intensity)
                }
            };
            image.put_pixel(px, py, to_rgba(color, alpha));
        }
    }
    image
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_pixel_golden_output_at_time_zero() {
        // UV at the center is exactly (0,0), so the sample point is purely
        // the time-phase terms: (0, 0, sin 0, cos 0) = (0, 0, 0, 1). The
        // tetrahedron field there is 0, so quantum shades at full strength.
        let mut visual = VisualParams::new();
        visual.set(PARAM_INTENSITY, 1.0);
        let frame = FrameParams {
            visual,
            ..FrameParams::default()
        };
        let image = render_frame(&frame);
        assert_eq!(image.dimensions(), (SURFACE_SIZE, SURFACE_SIZE));
        assert_eq!(
            *image.get_pixel(SURFACE_SIZE / 2, SURFACE_SIZE / 2),
            Rgba([0, 204, 255, 255])
        );
    }

    #[test]
    fn default_intensity_leaves_color_black_but_alpha_live() {
        let frame = FrameParams::default();
        let image = render_frame(&frame);
        assert_eq!(
            *image.get_pixel(SURFACE_SIZE / 2, SURFACE_SIZE / 2),
            Rgba([0, 0, 0, 255])
        );
    }

    #[test]
    fn rendering_is_deterministic() {
        let frame = FrameParams {
            mode: SystemMode::Holographic,
            geometry: 10.0,
            time_ms: 4321.0,
            width: 64,
            height: 64,
            ..FrameParams::default()
        };
        assert_eq!(render_frame(&frame), render_frame(&frame));
    }

    #[test]
    fn missing_speed_behaves_as_one() {
        let base = FrameParams {
            time_ms: 5000.0,
            width: 32,
            height: 32,
            ..FrameParams::default()
        };
        let mut explicit = base.clone();
        explicit.visual.set(PARAM_SPEED, 1.0);
        assert_eq!(render_frame(&base), render_frame(&explicit));

        let mut faster = base.clone();
        faster.visual.set(PARAM_SPEED, 2.0);
        assert_ne!(render_frame(&base), render_frame(&faster));
    }

    #[test]
    fn non_square_viewport_aspect_corrects_by_min_dimension() {
        let frame = FrameParams {
            time_ms: 2500.0,
            width: 64,
            height: 32,
            ..FrameParams::default()
        };
        let wide = render_frame(&frame);
        let square = render_frame(&FrameParams {
            width: 32,
            ..frame.clone()
        });
        // The shared center column matches: both viewports assign the same UV
        // to pixels equidistant from center when min(w,h) is equal.
        assert_eq!(wide.get_pixel(32, 16), square.get_pixel(16, 16));
    }
}
