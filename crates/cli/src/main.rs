//! theme-resolve - resolves a theme configuration for the build pipeline

use anyhow::{Context, Result};
use clap::Parser;
use std::env;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;

use app::{Application, Args};

fn main() -> Result<()> {
    // Load .env file if it exists
    let dotenv_result = dotenv::dotenv();

    // Initialize logging
    init_logging()?;

    match dotenv_result {
        Ok(path) => info!("Loaded environment variables from {}", path.display()),
        Err(e) if !e.not_found() => warn!("Could not load .env file: {}", e),
        Err(_) => {}
    }

    let args = Args::parse();
    info!("Starting theme-resolve v{}", env!("CARGO_PKG_VERSION"));

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    Application::new(args).run(&mut out)
}

/// Initialize logging based on environment variables
fn init_logging() -> Result<()> {
    let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    // stdout carries the resolved configuration, logs go to stderr
    match log_format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .try_init()
                .context("Failed to initialize JSON logging")?;
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
                .try_init()
                .context("Failed to initialize pretty logging")?;
        }
    }

    if log_level == "trace" || log_level == "debug" {
        warn!("Debug/trace logging enabled");
    }

    Ok(())
}
