//! # Nickel Dashboard Entry Point
//!
//! ```text
//! main()
//!   │
//!   ├─> Parse CLI arguments (clap)
//!   ├─> Load config (JSON, defaults when absent)
//!   ├─> Load the production table (fatal on error)
//!   │
//!   ├─> If command provided:
//!   │   └─> Run report / export and exit
//!   │
//!   └─> Otherwise:
//!       └─> Launch the eframe dashboard
//! ```

#![warn(clippy::all, rust_2018_idioms)]
#![expect(clippy::print_stdout)] // Reports go to stdout
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod cli;

use anyhow::{Context as _, Result};
use clap::Parser as _;
use eframe::egui;
use nickel_dash::analytics::DatasetCache;
use nickel_dash::{config, gui, logging};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Headless runs keep the console clean of file-appender setup
    if cli.command.is_some() {
        logging::init_console();
    } else if let Err(e) = logging::init() {
        logging::init_console();
        tracing::warn!("File logging unavailable: {e:#}");
    }

    let config_path = cli.config.clone().unwrap_or_else(config::get_config_path);
    let mut config = config::load_config(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    if let Some(data) = cli.data {
        config.data_path = data;
    }

    let mut cache = DatasetCache::new(config.classifier());
    let table = match cache.get_or_load(&config.source()) {
        Ok(table) => table,
        Err(e) => {
            if e.is_load_error() {
                tracing::error!("Dataset {} is unusable: {e}", config.data_path.display());
            }
            return Err(anyhow::Error::new(e)
                .context(format!("Failed to load dataset {}", config.data_path.display())));
        }
    };
    let settings = config.view_settings();

    if let Some(command) = cli.command {
        return cli::run_command(command, &table, &settings);
    }

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(egui::vec2(1280.0, 860.0))
            .with_title("Nickel Production Intelligence Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Nickel Production Intelligence Dashboard",
        native_options,
        Box::new(move |cc| Ok(Box::new(gui::DashboardApp::new(cc, table, settings)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to start dashboard: {e}"))
}
