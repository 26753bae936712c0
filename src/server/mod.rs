pub mod handlers;
mod types;

pub use types::{ErrorResponse, HealthResponse, PredictionResponse};

use crate::{Result, config::Config, model::LoadedModel};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub fn router(state: handlers::AppState, cors: bool) -> Router {
    let mut app = Router::new()
        .route("/predict", post(handlers::predict))
        .route("/health", get(handlers::health))
        // Oversized bodies must reach `predict` so they fail with the JSON error shape.
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http());

    if cors {
        app = app.layer(CorsLayer::permissive());
    }

    app.with_state(state)
}

pub async fn run(config: Config, model: LoadedModel) -> Result<()> {
    let app = router(handlers::AppState::from(model), config.server.cors);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
