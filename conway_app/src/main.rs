// main.rs - Game of Life viewer: window by default, headless with --headless

use std::error::Error;
use std::path::{Path, PathBuf};

use clap::Parser;
use conway::{Config, ConfigError, LatestFrame, SimulationController, Viewport};
use eframe::egui;

mod ui;

use ui::GameOfLifeApp;

#[derive(Parser)]
#[command(name = "conway")]
#[command(version)]
#[command(about = "Conway's Game of Life on a wrapping grid")]
struct Cli {
    /// Configuration file (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Run without a window
    #[arg(long)]
    headless: bool,

    /// Generations to run in headless mode
    #[arg(short, long, default_value = "100")]
    generations: u64,

    /// Drawing surface width in pixels
    #[arg(long, default_value = "800")]
    width: f32,

    /// Drawing surface height in pixels
    #[arg(long, default_value = "600")]
    height: f32,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_deref())?;
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    let viewport = Viewport::new(cli.width, cli.height);

    if cli.headless {
        return run_headless(config, viewport, cli.generations);
    }

    let controller = SimulationController::new(config, viewport, LatestFrame::new())?;
    run_window(controller, viewport)?;
    Ok(())
}

/// Load the config file if one was given. A file that does not exist yet
/// means defaults; one that exists but cannot be read, parsed or validated
/// is an error.
fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let Some(path) = path else {
        log::info!("Using default configuration");
        return Ok(Config::default());
    };
    if !path.exists() {
        log::warn!("{} does not exist; using default configuration", path.display());
        return Ok(Config::default());
    }
    let config = Config::from_file(path)?;
    log::info!("Loaded config from: {}", path.display());
    Ok(config)
}

fn run_headless(
    config: Config,
    viewport: Viewport,
    generations: u64,
) -> Result<(), Box<dyn Error>> {
    let mut controller = SimulationController::new(config, viewport, LatestFrame::new())?;
    let (rows, cols) = controller.dimensions();
    log::info!("Headless run: {rows}x{cols} grid, {generations} generations");

    let runtime = tokio::runtime::Builder::new_current_thread().enable_time().build()?;
    let ticks = runtime.block_on(conway::driver::run(&mut controller, generations));

    let frame = controller.renderer().frame();
    println!(
        "generations: {ticks}  population: {}  cycle: {}",
        frame.population(),
        controller.cycle_detected()
    );
    Ok(())
}

fn run_window(
    controller: SimulationController<LatestFrame>,
    viewport: Viewport,
) -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([viewport.width, viewport.height + ui::CONTROLS_HEIGHT]),
        ..Default::default()
    };

    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(|_cc| Box::new(GameOfLifeApp::new(controller))),
    )
}
