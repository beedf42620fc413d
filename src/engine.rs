//! Engine lifecycle and the render worker.
//!
//! The control path mutates rotation, geometry, and visual parameters under
//! their own locks; the render worker snapshots them once per frame. Writes
//! become visible within one subsequent frame, with no cross-field snapshot
//! guarantee. The active shading program is owned by the worker; `set_system`
//! hands the swap over through a channel instead of mutating worker state
//! from the control path.

use crate::compositor::{render_frame, FrameParams, SURFACE_SIZE};
use crate::params::VisualParams;
use crate::rotation::{RotationPlane, RotationState};
use crate::shading::SystemMode;
use image::RgbaImage;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

/// The engine's output color buffer, shared with the host display pipeline.
pub type SurfaceHandle = Arc<Mutex<RgbaImage>>;

const FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

#[derive(Debug)]
pub enum EngineError {
    AlreadyInitialized,
    Disposed,
    UnknownSystem(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyInitialized => write!(f, "engine is already initialized"),
            Self::Disposed => write!(f, "engine has been disposed"),
            Self::UnknownSystem(name) => write!(f, "unknown shading system '{name}'"),
        }
    }
}

impl std::error::Error for EngineError {}

enum Command {
    SetSystem(SystemMode),
}

struct SharedControls {
    rotation: Mutex<RotationState>,
    visual: Mutex<VisualParams>,
    geometry: Mutex<f32>,
    rendering: AtomicBool,
    shutdown: AtomicBool,
    frames_rendered: AtomicU64,
}

impl SharedControls {
    fn new() -> Self {
        Self {
            rotation: Mutex::new(RotationState::default()),
            visual: Mutex::new(VisualParams::new()),
            geometry: Mutex::new(0.0),
            rendering: AtomicBool::new(false),
            shutdown: AtomicBool::new(false),
            frames_rendered: AtomicU64::new(0),
        }
    }
}

pub struct Engine {
    shared: Arc<SharedControls>,
    mode: SystemMode,
    commands: Option<mpsc::Sender<Command>>,
    worker: Option<thread::JoinHandle<()>>,
    surface: Option<SurfaceHandle>,
    disposed: bool,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(SharedControls::new()),
            mode: SystemMode::default(),
            commands: None,
            worker: None,
            surface: None,
            disposed: false,
        }
    }

    /// Allocate the render target and bring up the render worker with the
    /// currently selected shading program. Frames are not scheduled until
    /// `start_rendering`.
    pub fn initialize(&mut self) -> Result<SurfaceHandle, EngineError> {
        if self.disposed {
            return Err(EngineError::Disposed);
        }
        if self.worker.is_some() {
            return Err(EngineError::AlreadyInitialized);
        }

        let surface: SurfaceHandle =
            Arc::new(Mutex::new(RgbaImage::new(SURFACE_SIZE, SURFACE_SIZE)));
        let (tx, rx) = mpsc::channel();
        let shared = self.shared.clone();
        let worker_surface = surface.clone();
        let initial_mode = self.mode;
        let worker = thread::spawn(move || {
            render_worker(shared, worker_surface, rx, initial_mode);
        });

        self.commands = Some(tx);
        self.worker = Some(worker);
        self.surface = Some(surface.clone());
        log::info!(
            "engine initialized ({}x{} surface, program {})",
            SURFACE_SIZE,
            SURFACE_SIZE,
            self.mode.name()
        );
        Ok(surface)
    }

    /// Stop scheduling, release the worker and the surface. Idempotent; no
    /// frame callbacks are observable after this returns.
    pub fn dispose(&mut self) {
        self.stop_rendering();
        self.shared.shutdown.store(true, Ordering::Relaxed);
        // Dropping the sender wakes the worker out of its frame wait.
        self.commands = None;
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::warn!("render worker panicked during dispose");
            }
        }
        self.surface = None;
        self.disposed = true;
        log::info!("engine disposed");
    }

    /// Swap the shading program. Unknown names are rejected and the previous
    /// program keeps rendering. The swap itself happens on the render worker.
    pub fn set_system(&mut self, name: &str) -> Result<(), EngineError> {
        let mode = SystemMode::from_name(name)
            .ok_or_else(|| EngineError::UnknownSystem(name.to_string()))?;
        self.mode = mode;
        if let Some(commands) = &self.commands {
            let _ = commands.send(Command::SetSystem(mode));
        }
        Ok(())
    }

    pub fn system(&self) -> SystemMode {
        self.mode
    }

    pub fn set_geometry(&self, index: i32) {
        *self.shared.geometry.lock().expect("geometry lock poisoned") = index as f32;
    }

    pub fn set_visual_param(&self, name: &str, value: f32) {
        self.shared
            .visual
            .lock()
            .expect("visual params lock poisoned")
            .set(name, value);
    }

    pub fn set_visual_params<I: IntoIterator<Item = (String, f32)>>(&self, entries: I) {
        self.shared
            .visual
            .lock()
            .expect("visual params lock poisoned")
            .extend(entries);
    }

    /// Add a delta to one plane's angle. Unknown plane names degrade to a
    /// logged no-op.
    pub fn rotate(&self, plane: &str, angle: f32) {
        match RotationPlane::from_name(plane) {
            Some(plane) => self
                .shared
                .rotation
                .lock()
                .expect("rotation lock poisoned")
                .add_angle(plane, angle),
            None => log::warn!("ignoring rotate on unknown plane '{plane}'"),
        }
    }

    /// Overwrite all six angles as one unit.
    pub fn set_rotation(&self, xy: f32, xz: f32, yz: f32, xw: f32, yw: f32, zw: f32) {
        self.shared
            .rotation
            .lock()
            .expect("rotation lock poisoned")
            .set(xy, xz, yz, xw, yw, zw);
    }

    pub fn reset_rotation(&self) {
        self.shared
            .rotation
            .lock()
            .expect("rotation lock poisoned")
            .reset();
    }

    pub fn rotation(&self) -> RotationState {
        *self.shared.rotation.lock().expect("rotation lock poisoned")
    }

    pub fn start_rendering(&self) {
        self.shared.rendering.store(true, Ordering::Relaxed);
    }

    pub fn stop_rendering(&self) {
        self.shared.rendering.store(false, Ordering::Relaxed);
    }

    pub fn surface(&self) -> Option<SurfaceHandle> {
        self.surface.clone()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.shared.frames_rendered.load(Ordering::Relaxed)
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        if self.worker.is_some() {
            self.dispose();
        }
    }
}

fn render_worker(
    shared: Arc<SharedControls>,
    surface: SurfaceHandle,
    commands: mpsc::Receiver<Command>,
    initial_mode: SystemMode,
) {
    let start = Instant::now();
    let mut program = initial_mode;
    log::debug!("render worker up (program {})", program.name());

    loop {
        if shared.shutdown.load(Ordering::Relaxed) {
            break;
        }
        match commands.recv_timeout(FRAME_INTERVAL) {
            Ok(Command::SetSystem(mode)) => {
                if mode != program {
                    log::info!(
                        "swapping shading program {} -> {}",
                        program.name(),
                        mode.name()
                    );
                    program = mode;
                }
                continue;
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
        if !shared.rendering.load(Ordering::Relaxed) {
            continue;
        }

        let frame = FrameParams {
            mode: program,
            geometry: *shared.geometry.lock().expect("geometry lock poisoned"),
            rotation: *shared.rotation.lock().expect("rotation lock poisoned"),
            visual: shared
                .visual
                .lock()
                .expect("visual params lock poisoned")
                .clone(),
            time_ms: start.elapsed().as_secs_f32() * 1000.0,
            width: SURFACE_SIZE,
            height: SURFACE_SIZE,
        };
        let image = render_frame(&frame);
        *surface.lock().expect("surface lock poisoned") = image;
        shared.frames_rendered.fetch_add(1, Ordering::Relaxed);
    }
    log::debug!("render worker exited");
}
