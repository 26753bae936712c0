use crate::{Error, Result};
use tracing::Subscriber;
use tracing_subscriber::{EnvFilter, fmt::MakeWriter};

/// Parses a `RUST_LOG`-style directive list such as `info` or
/// `stress_predictor=debug,tower_http=info`.
pub fn filter(directives: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directives).map_err(|e| {
        Error::config(format!(
            "Invalid log filter '{}': {}. Use a level (error, warn, info, debug, trace) \
             or target=level directives",
            directives, e
        ))
    })
}

/// JSON log subscriber writing to `writer`.
pub fn subscriber<W>(filter: EnvFilter, writer: W) -> impl Subscriber + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .json()
        .finish()
}

/// Installs the process-wide subscriber. Diagnostics go to stderr.
pub fn init(directives: &str) -> Result<()> {
    let subscriber = subscriber(filter(directives)?, std::io::stderr);
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::config(format!("Failed to install log subscriber: {}", e)))
}
