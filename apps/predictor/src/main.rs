use std::{path::PathBuf, process::ExitCode};

use anyhow::Result;
use clap::{Parser, Subcommand};
use client_core::{HttpPredictionService, PredictionFormController};
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod session;
mod view;

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;

#[derive(Parser, Debug)]
#[command(name = "predictor", about = "NYC taxi trip-duration prediction client")]
struct Cli {
    /// Config file (defaults to ./predictor.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Prediction endpoint, overriding config and environment.
    #[arg(long)]
    endpoint: Option<String>,
    /// Transport timeout in seconds for the prediction request.
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// Log filter, e.g. `debug` or `client_core=trace`.
    #[arg(long)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit one pickup/dropoff pair and print the estimate.
    Predict {
        #[arg(long, default_value = "")]
        pickup: String,
        #[arg(long, default_value = "")]
        dropoff: String,
    },
    /// Fill in the form line by line.
    Interactive,
}

/// `--log-level` wins over `RUST_LOG`, which wins over the configured level.
fn init_tracing(cli_level: Option<&str>, configured: &str) {
    let filter = match cli_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(configured)),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut settings = config::load_settings(cli.config.as_deref())?;
    if let Some(endpoint) = cli.endpoint {
        settings.endpoint = endpoint;
    }
    if let Some(secs) = cli.timeout_secs {
        settings.request_timeout_secs = Some(secs);
    }
    init_tracing(cli.log_level.as_deref(), &settings.log_level);

    let service = HttpPredictionService::new(&settings.endpoint, settings.request_timeout())?;
    info!(endpoint = %settings.endpoint, "prediction client ready");
    let mut controller = PredictionFormController::new(service);
    let mut stdout = std::io::stdout();

    match cli.command {
        Command::Predict { pickup, dropoff } => {
            controller.set_pickup_id(pickup);
            controller.set_dropoff_id(dropoff);
            controller.submit().await;
            print!("{}", view::render(&controller));
            if controller.state().error().is_some() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Interactive => {
            let stdin = BufReader::new(tokio::io::stdin());
            session::run(&mut controller, stdin, &mut stdout).await?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
