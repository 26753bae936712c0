use super::types::{ErrorResponse, HealthResponse, PredictionResponse};
use crate::{
    Error, Result,
    frame::FeatureFrame,
    model::{Classifier, LoadedModel},
};
use axum::{body::Bytes, extract::State, http::StatusCode, response::Json};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, error, info_span};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub model: Arc<dyn Classifier>,
    pub loaded_at: DateTime<Utc>,
}

impl From<LoadedModel> for AppState {
    fn from(loaded: LoadedModel) -> Self {
        Self {
            model: loaded.classifier,
            loaded_at: loaded.loaded_at,
        }
    }
}

pub async fn predict(
    State(state): State<AppState>,
    body: Bytes,
) -> std::result::Result<Json<PredictionResponse>, (StatusCode, Json<ErrorResponse>)> {
    let span = info_span!("predict", request_id = %Uuid::new_v4());

    span.in_scope(|| match classify(state.model.as_ref(), &body) {
        Ok(predicted_class) => Ok(Json(PredictionResponse { predicted_class })),
        Err(e) => {
            error!("Prediction failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            ))
        }
    })
}

fn classify(model: &dyn Classifier, body: &[u8]) -> Result<i64> {
    let input: serde_json::Value = serde_json::from_slice(body)?;
    debug!("Received input: {}", input);

    let frame = FeatureFrame::from_json(input)?;
    debug!("Feature frame shape: {:?}", frame.shape());

    let prediction = model
        .predict(&frame)?
        .into_iter()
        .next()
        .ok_or_else(|| Error::model("model returned no prediction"))?;
    debug!("Prediction: {}", prediction);

    Ok(prediction)
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        model: state.model.kind().to_string(),
        features: state.model.feature_names().len(),
        classes: state.model.classes().to_vec(),
        loaded_at: state.loaded_at,
    })
}
