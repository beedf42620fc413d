use clap::Parser;
use std::fs;
use std::path::PathBuf;
use vib3_engine::{FrameParams, RotationState, SystemMode, VisualParams, SURFACE_SIZE};

#[derive(Parser)]
#[command(
    name = "vib3-render",
    about = "Render vib3 4D geometry frames to PNG files"
)]
struct Cli {
    /// Shading system: "quantum" or "holographic"
    #[arg(long, default_value = "quantum")]
    system: String,
    /// Geometry selector (0-23; out-of-range values degrade gracefully)
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    geometry: i32,
    /// Number of frames to render
    #[arg(long, default_value_t = 8)]
    frames: u32,
    /// Simulated time step between frames, in milliseconds
    #[arg(long, default_value_t = 33.0)]
    step_ms: f32,
    /// Square frame edge in pixels
    #[arg(long, default_value_t = SURFACE_SIZE)]
    size: u32,
    /// Six plane angles in radians: XY XZ YZ XW YW ZW
    #[arg(long, num_args = 6, value_names = ["XY", "XZ", "YZ", "XW", "YW", "ZW"], allow_hyphen_values = true)]
    rotation: Option<Vec<f32>>,
    /// JSON file with a flat name -> value visual-parameter map
    #[arg(long)]
    params: Option<PathBuf>,
    /// Output directory for frame_NNNN.png files
    #[arg(long, short, default_value = "frames")]
    output: PathBuf,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let mode = SystemMode::from_name(&cli.system)
        .unwrap_or_else(|| panic!("unknown shading system '{}'", cli.system));

    let mut visual = VisualParams::new();
    if let Some(path) = &cli.params {
        let text = fs::read_to_string(path)
            .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()));
        visual = serde_json::from_str(&text)
            .unwrap_or_else(|e| panic!("failed to parse {}: {e}", path.display()));
    }

    let mut rotation = RotationState::default();
    if let Some(angles) = &cli.rotation {
        rotation.set(
            angles[0], angles[1], angles[2], angles[3], angles[4], angles[5],
        );
    }

    fs::create_dir_all(&cli.output)
        .unwrap_or_else(|e| panic!("failed to create {}: {e}", cli.output.display()));

    eprintln!(
        "rendering {} frame(s) of geometry {} under '{}' at {}x{}",
        cli.frames,
        cli.geometry,
        mode.name(),
        cli.size,
        cli.size
    );

    for index in 0..cli.frames {
        let frame = FrameParams {
            mode,
            geometry: cli.geometry as f32,
            rotation,
            visual: visual.clone(),
            time_ms: index as f32 * cli.step_ms,
            width: cli.size,
            height: cli.size,
        };
        let image = vib3_engine::render_frame(&frame);
        let path = cli.output.join(format!("frame_{index:04}.png"));
        image
            .save(&path)
            .unwrap_or_else(|e| panic!("failed to write {}: {e}", path.display()));
        log::info!("wrote {}", path.display());
    }

    eprintln!("done ({} frames in {})", cli.frames, cli.output.display());
}
