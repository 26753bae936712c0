use anyhow::Result;
use stress_predictor::{config, logging, model, server};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (before logging setup)
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Environment variable overrides config
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.server.logs.level.clone());

    if let Err(e) = logging::init(&log_level) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    info!("Starting stress predictor with log level: {}", log_level);
    info!("Configuration loaded successfully");

    let model = match model::load(&config.model.path).await {
        Ok(model) => model,
        Err(e) => {
            error!("Failed to load model from {}: {}", config.model.path, e);
            std::process::exit(1);
        }
    };

    server::run(config, model).await?;

    Ok(())
}
