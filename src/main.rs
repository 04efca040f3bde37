mod telemetry;

use std::process::ExitCode;

use api::app::config::AppConfig;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load .env before the subscriber so RUST_LOG from the file applies.
    let dotenv = dotenvy::dotenv();

    telemetry::init();

    if let Err(e) = dotenv {
        warn!(error = %e, "no .env loaded, using process environment only");
    }

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return Ok(ExitCode::FAILURE);
        }
    };
    info!(?config, "configuration loaded");

    api::start(config).await?;

    Ok(ExitCode::SUCCESS)
}
