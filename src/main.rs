use std::sync::{Arc, Mutex};

use ordercast::config::load_config;
use ordercast::registry::Registry;
use ordercast::transport::websocket::start_websocket_server;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ordercast::utils::logging::init("info");

    let config = load_config()?;
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let registry = Arc::new(Mutex::new(Registry::new()));

    tokio::select! {
        _ = start_websocket_server(addr, registry, config.clone()) => {
            error!("WebSocket server exited unexpectedly.");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received. Exiting gracefully.");
        }
    }

    Ok(())
}
