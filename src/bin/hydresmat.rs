use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing::level_filters::LevelFilter;

use hydresmat::{compute_submatrices, io, logging, MotionKind, ResistanceReport, RunConfig};

/// Calculate resistance submatrices from simulation results
#[derive(Parser)]
#[command(name = "hydresmat")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Hydrodynamic resistance submatrices from three Stokes-flow simulations", long_about = None)]
struct Cli {
    /// Kind of simulation to calculate the submatrices from, 'rot' or 'trans'
    kind: String,

    /// Run configuration (TOML); the demo setup is used if omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => LevelFilter::INFO,
    };
    logging::init(level);

    let kind: MotionKind = cli.kind.parse()?;

    let config = match &cli.config {
        Some(path) => RunConfig::from_file(path)
            .with_context(|| format!("failed to load configuration {}", path.display()))?,
        None => RunConfig::default(),
    };
    let case = config.case(kind);

    // Create the solution directory if necessary
    if let Some(dir) = case.solution.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    }

    info!("Reading mesh data...");
    let mesh = Arc::new(
        io::load_mesh(&config.mesh)
            .with_context(|| format!("failed to read mesh {}", config.mesh.display()))?,
    );
    info!(
        nodes = mesh.num_nodes(),
        vertices = mesh.connectivity.corner_nodes().len(),
        elements = mesh.num_elements(),
        surfaces = ?mesh.boundary_tags(),
        "mesh ready"
    );

    info!("Reading simulation data...");
    let fields = io::load_solutions(&case.simulations, &mesh).context("failed to read simulation data")?;

    let basis = case.basis();
    let symbol = match kind {
        MotionKind::Rotational => "Omega",
        MotionKind::Translational => "U_0",
    };
    for k in 0..3 {
        let m = basis.motion(k);
        info!("  Simulation {}: {} = ({:.7}, {:.7}, {:.7})", k + 1, symbol, m.x, m.y, m.z);
    }

    let submatrices = compute_submatrices(&basis, &fields, mesh.as_ref(), config.particle_surface_tag)?;

    let report = ResistanceReport::new(kind, submatrices);
    report
        .save(&case.solution)
        .with_context(|| format!("failed to write {}", case.solution.display()))?;
    info!("Submatrices written to {}", case.solution.display());

    Ok(())
}
