use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing::{info, warn};

use rcon_whitelist::args::Args;
use rcon_whitelist::logging::init_logging;
use rcon_whitelist::{WhitelistClient, load_config_with_fallback};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_logging();

    let args = Args::parse();

    let (config, source) = load_config_with_fallback(&args.config)?;
    info!(
        "Loaded configuration from {} (server {}:{})",
        source.description(),
        config.rcon.host,
        config.rcon.port
    );

    let client = WhitelistClient::from_config(&config);
    let report = args.action.run(&client).await;

    println!("{}", report);

    if report.outcome.requires_manual_action() {
        warn!("Manual action required: {}", report.outcome);
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
