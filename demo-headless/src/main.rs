use clap::{Parser, ValueEnum};
use heat_grid_core::{
    HeatSimulation, LaplacianParams, NeighborTransferParams, SolverConfig, SolverKind,
    TemperatureGrid,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Diffusion model selectable from the command line
#[derive(Clone, Copy, Debug, ValueEnum)]
enum SolverArg {
    NeighborTransfer,
    Laplacian,
}

impl From<SolverArg> for SolverKind {
    fn from(arg: SolverArg) -> Self {
        match arg {
            SolverArg::NeighborTransfer => SolverKind::NeighborTransfer,
            SolverArg::Laplacian => SolverKind::Laplacian,
        }
    }
}

/// Headless temperature-grid diffusion demo
#[derive(Parser, Debug)]
#[command(name = "heat-grid-demo")]
#[command(about = "Runs a diffusion model on a random temperature grid", long_about = None)]
struct Args {
    /// Grid width in cells
    #[arg(long, default_value_t = 64)]
    width: usize,

    /// Grid height in cells
    #[arg(long, default_value_t = 64)]
    height: usize,

    /// Number of frames to run
    #[arg(short, long, default_value_t = 500)]
    steps: u64,

    /// Diffusion model
    #[arg(long, value_enum, default_value_t = SolverArg::NeighborTransfer)]
    solver: SolverArg,

    /// Neighbor-transfer flow rate, in (0, 1]
    #[arg(long, default_value_t = NeighborTransferParams::DEFAULT_FLOW_RATE)]
    flow_rate: f32,

    /// Laplacian diffusivity, in (0, 0.25]
    #[arg(long, default_value_t = LaplacianParams::DEFAULT_DIFFUSIVITY)]
    diffusivity: f32,

    /// Seed for the random initial field
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Resize the grid before this frame
    #[arg(long)]
    resize_at: Option<u64>,

    /// Width after the resize (defaults to double the width)
    #[arg(long)]
    resize_width: Option<usize>,

    /// Height after the resize (defaults to double the height)
    #[arg(long)]
    resize_height: Option<usize>,

    /// JSON solver config; overrides the solver flags
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print stats every N frames
    #[arg(short, long, default_value_t = 50)]
    report_interval: u64,

    /// Switch to the other model before this frame
    #[arg(long)]
    switch_at: Option<u64>,
}

fn solver_config(args: &Args) -> Result<SolverConfig, String> {
    if let Some(path) = &args.config {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
        let config: SolverConfig = serde_json::from_str(&text)
            .map_err(|e| format!("invalid config {}: {e}", path.display()))?;
        info!("Loaded solver config from {}", path.display());
        return Ok(config);
    }

    let mut config = SolverConfig::with_kind(args.solver.into());
    config.neighbor_transfer.flow_rate = args.flow_rate;
    config.laplacian.diffusivity = args.diffusivity;
    Ok(config)
}

fn print_report(sim: &HeatSimulation) {
    let stats = sim.stats();
    println!(
        "{:6} | {:17} | {:5}x{:<5} | {:3} | {:3} | {:6.2} | {:7.3}",
        sim.frame(),
        sim.solver_name(),
        sim.grid().width(),
        sim.grid().height(),
        stats.min,
        stats.max,
        stats.mean,
        sim.last_frame_time_ms()
    );
}

fn other_kind(kind: SolverKind) -> SolverKind {
    match kind {
        SolverKind::NeighborTransfer => SolverKind::Laplacian,
        SolverKind::Laplacian => SolverKind::NeighborTransfer,
    }
}

fn run(args: &Args) -> Result<(), String> {
    let config = solver_config(args)?;

    let mut grid = TemperatureGrid::new(args.width, args.height, 0).map_err(|e| e.to_string())?;
    grid.randomize(&mut StdRng::seed_from_u64(args.seed));
    let radius = (args.width.min(args.height) / 8).max(1) as u32;
    let painted = grid.paint_disc(
        (args.width / 2) as i64,
        (args.height / 2) as i64,
        radius,
        i32::from(heat_grid_core::TEMP_MAX),
    );
    info!("Painted hot disc: {} cells, radius {}", painted, radius);

    let mut sim = HeatSimulation::new(grid, config).map_err(|e| e.to_string())?;
    let report_interval = args.report_interval.max(1);

    println!("=== Heat Grid Demo ===\n");
    println!(" Frame | Solver            | Size        | Min | Max |   Mean | Step ms");
    println!("-------|-------------------|-------------|-----|-----|--------|--------");
    print_report(&sim);

    for frame in 0..args.steps {
        if args.resize_at == Some(frame) {
            let width = args.resize_width.unwrap_or(args.width * 2);
            let height = args.resize_height.unwrap_or(args.height * 2);
            sim.resize(width, height, 0).map_err(|e| e.to_string())?;
            info!("Resized grid to {}x{} before frame {}", width, height, frame);
        }

        if args.switch_at == Some(frame) {
            let mut next = *sim.config();
            next.kind = other_kind(next.kind);
            if let Err(e) = sim.set_solver(next) {
                warn!("Solver switch rejected, keeping {}: {}", sim.solver_name(), e);
            }
        }

        sim.update();

        if sim.frame() % report_interval == 0 {
            print_report(&sim);
        }
    }

    let stats = sim.stats();
    println!("\n=== Simulation Complete ===");
    println!("Frames: {}", sim.frame());
    println!("Final solver: {}", sim.solver_name());
    println!("Spread: {} (min {}, max {})", stats.max - stats.min, stats.min, stats.max);
    println!("Total heat: {}", stats.total);
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
