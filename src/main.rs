//! Till access tooling.
//!
//! Entry point for the `till` binary: parses the command line, initializes
//! logging from configuration, and dispatches.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use till_cli::Cli;
use till_cli::output;
use till_core::config::{LogFormat, LoggingConfig};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Commands that need no configuration still run without a config file.
    let logging = cli
        .load_config()
        .map(|config| config.logging)
        .unwrap_or_default();
    init_logging(&logging);

    tracing::debug!(command = ?cli.command, "Starting till v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = cli.execute().await {
        tracing::error!(error = %e, "Command failed");
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}

/// Initialize tracing/logging. Logs go to stderr so JSON output on stdout
/// stays parseable.
fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format {
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Pretty => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
