//! Real-time animated rendering of 4D distance-field geometry projected to 2D.
//!
//! The pipeline is pure — `(time, viewport, parameters) → color buffer` — and
//! runs on a dedicated render worker owned by [`engine::Engine`]. The offline
//! renderer binary drives [`compositor::render_frame`] directly with explicit
//! timestamps.

pub mod compositor;
pub mod engine;
pub mod geometry;
pub mod math;
pub mod params;
pub mod rotation;
pub mod shading;

pub use compositor::{render_frame, FrameParams, SURFACE_SIZE};
pub use engine::{Engine, EngineError, SurfaceHandle};
pub use params::VisualParams;
pub use rotation::{RotationPlane, RotationState};
pub use shading::SystemMode;
