mod config;
mod download;
mod errors;
mod form;
mod theme;
mod transfer;
mod ui;

use anyhow::{anyhow, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CVV Desktop v{}", env!("CARGO_PKG_VERSION"));
    info!("API base URL: {}", config.api_url);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("CVV Resume Optimizer")
            .with_inner_size([760.0, 600.0])
            .with_min_inner_size([540.0, 480.0]),
        centered: true,
        ..Default::default()
    };

    eframe::run_native(
        "cvv-desktop",
        options,
        Box::new(move |cc| Ok(Box::new(ui::CvvApp::new(cc, config)?))),
    )
    .map_err(|e| anyhow!("UI event loop failed: {e}"))?;

    Ok(())
}
