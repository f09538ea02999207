//! ASPM API - service entry point

use aspm_api::{logging, AspmApi, Lifecycle, ServiceConfig};
use clap::Parser;

/// ASPM API CLI
#[derive(Parser)]
#[command(name = "aspm-api")]
#[command(about = "ASPM API service", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "ASPM_CONFIG")]
    config: Option<String>,

    /// Log level [default: info]
    #[arg(long, env = "ASPM_LOG_LEVEL")]
    log_level: Option<String>,

    /// Enable JSON logging
    #[arg(long, env = "ASPM_LOG_JSON")]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = ServiceConfig::load(cli.config.as_deref())?;

    // Override with CLI args
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if cli.json {
        config.logging.json = true;
    }

    logging::init(&config.logging)?;

    Lifecycle::from_sigterm()?
        .run(AspmApi::new(config))
        .await;

    Ok(())
}
