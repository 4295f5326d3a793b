//! sessionfs - file-per-session backing store
//!
//! Operator entry point: reads, writes, destroys and garbage collects
//! sessions in a save directory.

mod cli;
mod cmd_session;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sessionfs_config::{ConfigLoader, ConfigValidator, LoggingConfig};
use sessionfs_monitor::{LogCollector, MetricsCollector, MetricsRegistry};
use sessionfs_store::FileSessionStore;

use crate::cli::Cli;

/// Initialize tracing with console output and optional file output.
///
/// Console logs go to stderr so stdout carries only session payloads. When
/// `logging.dir` is set, logs are also written there with daily rotation.
fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let file_layer = match &logging.dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;

            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("sessionfs")
                .filename_suffix("log")
                .max_log_files(30)
                .build(dir)?;

            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            // The guard flushes on drop and must live as long as the process.
            static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
                std::sync::OnceLock::new();
            let _ = GUARD.set(guard);

            Some(fmt::layer().with_writer(non_blocking).with_ansi(false))
        }
        None => None,
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .with(file_layer)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = ConfigLoader::load_or_default(cli.config.as_deref())?;
    if let Some(save_path) = cli.save_path {
        config.session.save_path = save_path;
    }
    let warnings = ConfigValidator::validate(&config).into_result()?;

    init_tracing(&config.logging)?;
    for warning in warnings {
        warn!("{}: {}", warning.path, warning.message);
    }
    info!("Session save directory: {}", config.session.save_path.display());

    let registry = Arc::new(MetricsRegistry::new());
    let metrics: Arc<dyn MetricsCollector> = if cli.print_metrics {
        registry.clone()
    } else {
        Arc::new(LogCollector)
    };

    let store = FileSessionStore::new(
        config.session.save_path.clone(),
        config.session.lifetime,
        metrics,
    );

    let succeeded = cmd_session::run(&store, &config, cli.command).await?;

    if cli.print_metrics {
        eprint!("{}", registry.export());
    }

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
