//! # Statsbot
//!
//! Runs the mention loop: every 30 seconds it checks the bot account's new
//! mentions and answers `my stats` / `their stats` commands with emoji and
//! hashtag statistics.
//!
//! ## Environment Variables
//!
//! - `API_KEY`, `API_SECRET`, `BEARER_TOKEN`, `ACCESS_TOKEN`, `ACCESS_TOKEN_SECRET`: X API credentials
//! - `X_API_BASE_URL`: Optional API host override
//! - `RUST_LOG`: Log level filter (e.g. `info`, `statsbot=debug`)
//!
//! A `.env` file in the working directory is loaded first if present.

use log::{error, info};
use statsbot::{MentionBot, TwitterConfig, XApiClient};

/// Main entry point for the statsbot service.
///
/// Initializes logging, loads the credentials, and runs the mention loop until
/// the process is terminated or receives Ctrl+C.
///
/// # Example Usage
///
/// ```bash
/// # Run with info logging
/// RUST_LOG=info cargo run
///
/// # Run with debug logging for this crate only
/// RUST_LOG=statsbot=debug cargo run
/// ```
#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = match TwitterConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let client = match XApiClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create X API client: {}", e);
            std::process::exit(1);
        }
    };

    let mut bot = MentionBot::new(client);

    tokio::select! {
        _ = bot.run() => {}
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                error!("Failed to listen for shutdown signal: {}", e);
            }
            info!("Received shutdown signal, stopping mention loop");
        }
    }
}
