use clap::{Parser, Subcommand};
use fl_adapter::{
    AdapterConfig, AdapterError, AdapterResult, FdmAdapter, FrameConverter, HostControlLevels,
    ModelCatalog, ModelResolver, StateSnapshot, list_available_aircraft,
};
use fl_core::Vec3;
use fl_core::convert::radians_to_degrees;
use fl_solver::{KinematicLibrary, Property, SolverLibrary, read};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fl-cli")]
#[command(about = "FlightLink CLI - flight-dynamics solver adapter diagnostics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show which data-root candidates qualify and the aircraft they hold
    Probe {
        /// Directory the solver library is installed in
        #[arg(long)]
        module_dir: PathBuf,
        /// Model catalog YAML (defaults to the built-in table)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Fly an adapter over the reference solver and print each frame
    Run {
        /// Requested aircraft alias
        #[arg(long, default_value = "f16")]
        alias: String,
        /// Number of frames
        #[arg(long, default_value_t = 60)]
        frames: usize,
        /// Frame time step in seconds
        #[arg(long, default_value_t = 1.0 / 60.0)]
        dt: f64,
        /// Throttle [0, 1]
        #[arg(long, default_value_t = 0.8)]
        throttle: f64,
        /// Pitch command [-1, 1]
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        elevator: f64,
        /// Roll command [-1, 1]
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        aileron: f64,
        /// Yaw command [-1, 1]
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        rudder: f64,
        /// Directory the solver library is installed in
        #[arg(long, default_value = ".")]
        module_dir: PathBuf,
        /// Model catalog YAML (defaults to the built-in table)
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Print one JSON object per frame
        #[arg(long)]
        json: bool,
    },
    /// Verify elevator polarity: +1 must pitch the nose up, -1 down
    PitchCheck {
        /// Requested aircraft alias
        #[arg(long, default_value = "f16")]
        alias: String,
        /// Frames to hold each command
        #[arg(long, default_value_t = 100)]
        frames: usize,
    },
}

fn main() -> AdapterResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Probe {
            module_dir,
            catalog,
        } => cmd_probe(&module_dir, catalog.as_deref()),
        Commands::Run {
            alias,
            frames,
            dt,
            throttle,
            elevator,
            aileron,
            rudder,
            module_dir,
            catalog,
            json,
        } => {
            let controls = HostControlLevels::new(throttle, elevator, rudder, aileron);
            let opts = RunOptions {
                alias: &alias,
                frames,
                dt,
                module_dir: &module_dir,
                json,
            };
            cmd_run(&opts, &controls, catalog.as_deref())
        }
        Commands::PitchCheck { alias, frames } => {
            cmd_pitch_check(&KinematicLibrary::new("."), &alias, frames)
        }
    }
}

fn load_catalog(path: Option<&Path>) -> AdapterResult<ModelCatalog> {
    match path {
        Some(path) => ModelCatalog::load(path),
        None => Ok(ModelCatalog::default()),
    }
}

fn cmd_probe(module_dir: &Path, catalog: Option<&Path>) -> AdapterResult<()> {
    let catalog = load_catalog(catalog)?;
    let resolver = ModelResolver::new(&catalog);

    println!("Probing data roots for: {}", module_dir.display());
    for root in resolver.candidate_roots(module_dir) {
        let aircraft_dir = root.join("aircraft");
        if aircraft_dir.is_dir() {
            let ids = list_available_aircraft(&root);
            println!("  ✓ {} ({} aircraft)", root.display(), ids.len());
            for id in ids {
                println!("      {}", id);
            }
        } else {
            println!("  ✗ {}", root.display());
        }
    }

    match resolver.probe_data_root(module_dir) {
        Ok(root) => println!("Selected data root: {}", root.display()),
        Err(e) => println!("{} (the solver's default root will be used)", e),
    }
    Ok(())
}

struct RunOptions<'a> {
    alias: &'a str,
    frames: usize,
    dt: f64,
    module_dir: &'a Path,
    json: bool,
}

#[derive(Serialize)]
struct FrameRecord<'a> {
    frame: usize,
    time_s: f64,
    host_position: [f64; 3],
    snapshot: &'a StateSnapshot,
}

fn cmd_run(
    opts: &RunOptions<'_>,
    controls: &HostControlLevels,
    catalog: Option<&Path>,
) -> AdapterResult<()> {
    let config = AdapterConfig::new(opts.alias, true).with_catalog(load_catalog(catalog)?);
    let library = KinematicLibrary::new(opts.module_dir);
    let mut adapter = FdmAdapter::new(config, &library);

    match adapter.resolved_model() {
        Some(model) => println!(
            "Flying {} (alias '{}') from {}",
            model.canonical_id(),
            opts.alias,
            model.data_root_path().display()
        ),
        None => {
            println!(
                "External solver unavailable: {}",
                adapter.state().reason().unwrap_or("unknown")
            );
            println!("Falling back to simplified physics");
            return Ok(());
        }
    }

    let mut position = Vec3::zeros();
    for frame in 0..opts.frames {
        let Some(snap) = adapter.update(opts.dt, controls) else {
            println!(
                "Frame {}: solver degraded ({}), falling back to simplified physics",
                frame,
                adapter.state().reason().unwrap_or("invalid time step")
            );
            break;
        };

        // Host integrates horizontal position; altitude comes from the solver
        position += snap.host_velocity() * opts.dt;
        position = FrameConverter::host_position(&position, snap.altitude_meters);
        let time_s = (frame + 1) as f64 * opts.dt;

        if opts.json {
            let record = FrameRecord {
                frame,
                time_s,
                host_position: [position.x, position.y, position.z],
                snapshot: &snap,
            };
            let line = serde_json::to_string(&record).map_err(|e| AdapterError::Backend {
                message: format!("JSON encoding failed: {}", e),
            })?;
            println!("{}", line);
        } else {
            println!(
                "{:4} t={:6.3}s alt={:8.1}m roll={:7.2}° pitch={:7.2}° yaw={:7.2}° \
                 speed={:6.1}m/s",
                frame,
                time_s,
                snap.altitude_meters,
                snap.roll_deg,
                snap.pitch_deg,
                snap.yaw_deg,
                snap.speed()
            );
        }
    }

    let diag = adapter.diagnostics();
    println!(
        "Frames stepped: {}, skipped: {}, absorbed writes: {}, absorbed reads: {}, non-finite: {}",
        diag.frames_stepped,
        diag.frames_skipped,
        diag.property_write_failures,
        diag.property_read_failures,
        diag.total_non_finite()
    );
    Ok(())
}

/// Solver-convention pitch change [deg] from initial conditions after holding
/// `elevator` for `frames`, or None if the adapter failed.
fn pitch_change(
    library: &dyn SolverLibrary,
    alias: &str,
    elevator: f64,
    frames: usize,
) -> Option<f64> {
    let mut adapter = FdmAdapter::new(AdapterConfig::new(alias, true), library);
    let initial = read(adapter.solver()?, Property::PitchRad).ok()?;
    let controls = HostControlLevels::new(0.8, elevator, 0.0, 0.0);

    let mut last = None;
    for _ in 0..frames.max(1) {
        last = Some(adapter.update(1.0 / 60.0, &controls)?);
    }
    // Snapshot pitch is in display convention; undo the flip for the solver's view
    let end = -last?.pitch_deg;
    Some(end - radians_to_degrees(initial))
}

fn cmd_pitch_check(library: &dyn SolverLibrary, alias: &str, frames: usize) -> AdapterResult<()> {
    println!("Elevator polarity check for '{}' over {} frames", alias, frames);

    let mut failures = Vec::new();
    for (elevator, expect_up) in [(1.0, true), (-1.0, false)] {
        match pitch_change(library, alias, elevator, frames) {
            Some(change) => {
                let ok = if expect_up { change > 0.0 } else { change < 0.0 };
                println!(
                    "  elevator {:+.1}: pitch change {:+.3}° {}",
                    elevator,
                    change,
                    if ok { "✓" } else { "✗ inverted" }
                );
                if !ok {
                    failures.push(format!(
                        "elevator {:+.1} moved pitch {:+.3}°",
                        elevator, change
                    ));
                }
            }
            None => {
                println!("  elevator {:+.1}: solver unavailable", elevator);
                failures.push(format!("elevator {:+.1}: solver unavailable", elevator));
            }
        }
    }

    if failures.is_empty() {
        println!("✓ Elevator polarity correct");
        Ok(())
    } else {
        println!("✗ Elevator polarity check failed");
        Err(AdapterError::Backend {
            message: format!("elevator polarity check failed: {}", failures.join("; ")),
        })
    }
}
