//! Headless weapon simulator entry point.
mod app;
mod config;
mod host;
mod presentation;

use std::path::Path;

use anyhow::Result;
use app::SimApp;
use config::SimConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = SimConfig::from_env();

    // Keep the guard alive so the file writer flushes on exit
    let _guard = setup_logging(config.log_dir.as_deref())?;

    let report = SimApp::builder(config).build()?.run()?;
    println!("{}", report.summary());
    Ok(())
}

/// Setup logging to stderr, and to a file when a log directory is given
fn setup_logging(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    // INFO unless RUST_LOG says otherwise
    let env_filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file_appender = tracing_appender::rolling::never(dir, "weapon-sim.log");
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking_file)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    if let Some(dir) = log_dir {
        tracing::info!("Log file: {}/weapon-sim.log", dir.display());
    }
    Ok(guard)
}
