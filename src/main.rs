mod app;
mod color;
mod config;
mod data;
mod error;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use app::LaunchDashApp;
use clap::Parser;
use config::DashboardConfig;
use eframe::egui;
use state::{AppState, initial_selection};

#[derive(Parser)]
#[command(name = "launch-dash")]
#[command(version)]
#[command(about = "Interactive dashboard for SpaceX launch records")]
struct Cli {
    /// Launch table to open at startup (.csv, .json or .parquet)
    data: Option<PathBuf>,

    /// Initial site selection ("ALL" for every site)
    #[arg(long, default_value = "ALL")]
    site: String,

    /// Path to a JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let mut config = match &cli.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };
    if cli.data.is_some() {
        config.data_path = cli.data;
    }

    let mut state = AppState::new(config.slider.clone());

    // A dataset named at startup must load; schema problems are fatal here.
    if let Some(path) = &config.data_path {
        let dataset = data::loader::load_file(path)
            .with_context(|| format!("cannot start with dataset {}", path.display()))?;
        log::info!(
            "Loaded {} launches from {} sites, payload range {:?}",
            dataset.len(),
            dataset.sites().len(),
            dataset.payload_bounds()
        );
        state.set_dataset(dataset);
    }

    let selection = initial_selection(&state, &cli.site)?;
    state.select_site(selection);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.title.clone())
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let title = config.title.clone();
    eframe::run_native(
        &config.title,
        options,
        Box::new(|_cc| Ok(Box::new(LaunchDashApp::new(title, state)))),
    )
    .map_err(|e| anyhow!("{e}"))
}
