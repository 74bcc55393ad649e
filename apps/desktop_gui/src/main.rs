mod backend_bridge;
mod controller;
mod ui;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use crossbeam_channel::bounded;
use deploy_core::load_settings;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::DeployerApp;

#[derive(Parser, Debug)]
#[command(name = "desktop_gui", version, about = "Neon ERC-20 token deployment simulator")]
struct Args {
    /// Config file to load instead of the default search locations.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    explorer_url: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut settings =
        load_settings(args.config.as_deref()).context("failed to load desktop settings")?;
    if let Some(url) = &args.explorer_url {
        settings.set_explorer_url(url)?;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Token Deployer")
            .with_inner_size([900.0, 960.0])
            .with_min_inner_size([640.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Token Deployer",
        options,
        Box::new(move |_cc| Ok(Box::new(DeployerApp::new(cmd_tx, ui_rx, settings)))),
    )
    .map_err(|err| anyhow::anyhow!("desktop window failed: {err}"))
}
