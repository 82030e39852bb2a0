use anyhow::{Context, Result};
use clap::Parser;
use resume_insight::cli::{handle_command, DashboardCli};
use resume_insight::core::FsOps;
use resume_insight::ConfigManager;
use std::fs::OpenOptions;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = DashboardCli::parse();
    let config = ConfigManager::load(&cli.env, &cli.config)?;

    // The terminal UI owns stdout, so logs go to a file
    if let Some(parent) = config.environment.log_path.parent() {
        FsOps::ensure_dir_exists(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true) // Clear file on startup
        .open(&config.environment.log_path)
        .with_context(|| {
            format!(
                "Failed to open log file: {}",
                config.environment.log_path.display()
            )
        })?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .json()
                .with_writer(std::sync::Mutex::new(file))
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(filter)
        .init();

    tracing::info!("Starting resume-insight");
    config.log_summary();

    handle_command(cli, config).await
}
