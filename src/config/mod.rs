mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, path::Path};
use tracing::debug;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

pub async fn load() -> Result<Config> {
    let mut config = match env::var("CONFIG_PATH") {
        Ok(config_path) => from_file(&config_path).await?,
        Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => {
            from_file(DEFAULT_CONFIG_PATH).await?
        }
        Err(_) => {
            debug!("No configuration file found, using defaults");
            Config::default()
        }
    };

    apply_overrides(&mut config, |key| env::var(key).ok())?;

    Ok(config)
}

pub async fn from_file(config_path: &str) -> Result<Config> {
    debug!("Loading configuration from: {}", config_path);

    let config_str = tokio::fs::read_to_string(config_path).await?;
    let config: Config = serde_yaml::from_str(&config_str)?;

    Ok(config)
}

/// Applies `PORT`, `HOST` and `MODEL_PATH` on top of the parsed configuration.
pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(port) = lookup("PORT") {
        config.server.port = port
            .trim()
            .parse()
            .map_err(|_| Error::config(format!("Invalid PORT value: '{}'", port)))?;
    }

    if let Some(host) = lookup("HOST") {
        config.server.host = host;
    }

    if let Some(model_path) = lookup("MODEL_PATH") {
        config.model.path = model_path;
    }

    Ok(())
}
