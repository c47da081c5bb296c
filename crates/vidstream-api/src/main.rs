//! API server entry point
//!
//! `cargo run -p vidstream-api`. All settings come from environment
//! variables; a `.env` file is picked up when present.

use tracing::{error, info};
use vidstream_common::{try_init_tracing, AppConfig};

#[tokio::main]
async fn main() {
    if let Err(e) = try_init_tracing() {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    info!(
        env = ?config.app.env,
        port = config.api.port,
        "Starting vidstream API server"
    );

    if let Err(e) = vidstream_api::run(config).await {
        error!(error = %e, "Server exited with error");
        std::process::exit(1);
    }
}
