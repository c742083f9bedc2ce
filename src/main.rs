mod app;
mod cli;
mod color;
mod config;
mod data;
mod error;
mod state;
mod ui;
mod view;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;

use app::FalloutExplorerApp;
use cli::CliArgs;
use config::ColumnConfig;
use data::model::ExplosionDataset;

fn main() -> Result<()> {
    let args = CliArgs::parse();

    let default_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let columns = args.column_config()?;
    let dataset = Arc::new(load_dataset(&args.data, &columns)?);

    if args.headless {
        return print_view(&args, &dataset);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Nuclear Explosions Data Explorer",
        options,
        Box::new(move |_cc| Ok(Box::new(FalloutExplorerApp::new(dataset, columns)))),
    )
    .map_err(|e| anyhow::anyhow!("GUI terminated: {e}"))
}

pub fn load_dataset(path: &Path, columns: &ColumnConfig) -> Result<ExplosionDataset> {
    data::loader::load_file_with(path, columns)
        .with_context(|| format!("loading dataset {}", path.display()))
}

fn print_view(args: &CliArgs, dataset: &ExplosionDataset) -> Result<()> {
    let view = args.headless_view(dataset);
    let json = serde_json::to_string_pretty(&view).context("serializing view")?;
    println!("{json}");
    Ok(())
}
