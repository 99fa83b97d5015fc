use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use eframe::egui;

use scan_assist::app::ScanAssistApp;
use scan_assist::client::ApiClient;
use scan_assist::config::Config;
use scan_assist::state::AppState;

/// Brain MRI / chest X-ray classification client
#[derive(Parser, Debug)]
#[command(name = "scan-assist", version, about)]
struct Args {
    /// Inference server base URL, e.g. http://localhost:10000
    #[arg(long)]
    api_base: Option<String>,

    /// Configuration file (defaults to the per-user config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = Config::resolve(args.api_base.as_deref(), args.config.as_deref())
        .context("loading configuration")?;
    log::info!("using API base '{}'", config.api_base);

    let client = Arc::new(ApiClient::new(&config.api_base).context("creating HTTP client")?);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([640.0, 420.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Scan Assist – MRI & X-ray Classifier",
        options,
        Box::new(move |cc| {
            // Install image loaders so egui can render png/jpg/etc.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            let state = AppState::new(client.clone(), client);
            Ok(Box::new(ScanAssistApp::new(state)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("running UI: {e}"))
}
