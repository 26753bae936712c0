use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response},
};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Map, Value, json};
use std::{path::PathBuf, sync::Arc};
use stress_predictor::{
    model::{Classifier, LoadedModel, LogisticRegression, MultiClass},
    server::{self, handlers::AppState},
};
use tempfile::TempDir;

/// Questionnaire features the shipped model was fitted with.
pub const FEATURES: [&str; 20] = [
    "anxiety_level",
    "self_esteem",
    "mental_health_history",
    "depression",
    "headache",
    "blood_pressure",
    "sleep_quality",
    "breathing_problem",
    "noise_level",
    "living_conditions",
    "safety",
    "basic_needs",
    "academic_performance",
    "study_load",
    "teacher_student_relationship",
    "future_career_concerns",
    "social_support",
    "peer_pressure",
    "extracurricular_activities",
    "bullying",
];

/// Path of the model file checked into the repository root.
pub fn shipped_model_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("final_model.json")
}

/// Three-class model over all questionnaire features.
///
/// Class 0 when the mean answer is at most 1, class 2 above 2.5, class 1 otherwise.
pub fn create_test_model() -> LogisticRegression {
    LogisticRegression {
        feature_names: FEATURES.iter().map(|f| f.to_string()).collect(),
        classes: vec![0, 1, 2],
        coef: vec![vec![-0.5; 20], vec![0.0; 20], vec![0.5; 20]],
        intercept: vec![10.0, 0.0, -25.0],
        multi_class: MultiClass::Multinomial,
    }
}

/// A record with every feature set to `value`.
pub fn uniform_record(value: f64) -> Value {
    let record: Map<String, Value> = FEATURES
        .iter()
        .map(|f| (f.to_string(), json!(value)))
        .collect();
    Value::Object(record)
}

/// Fixed load time reported by `/health` in tests.
pub fn test_loaded_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap()
}

pub fn create_test_app(model: Arc<dyn Classifier>) -> Router {
    let loaded = LoadedModel::new(model, test_loaded_at());
    server::router(AppState::from(loaded), true)
}

pub fn create_default_app() -> Router {
    create_test_app(Arc::new(create_test_model()))
}

pub fn predict_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/predict")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

pub fn predict_json(body: &Value) -> Request<Body> {
    predict_request(body.to_string())
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Writes `contents` to a model file inside a fresh temp directory.
pub async fn write_model_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let path = temp_dir.path().join("final_model.json");
    tokio::fs::write(&path, contents).await.unwrap();
    (temp_dir, path)
}

/// Create a test config YAML file
pub async fn create_test_config_file(dir: &TempDir, content: &str) -> String {
    let config_path = dir.path().join("config.yaml");
    tokio::fs::write(&config_path, content).await.unwrap();
    config_path.to_string_lossy().to_string()
}

pub const SAMPLE_CONFIG_YAML: &str = r#"
server:
  host: "127.0.0.1"
  port: 8080
  cors: false
  logs:
    level: "debug"

model:
  path: "models/stress.json"
"#;

pub const INVALID_CONFIG_YAML: &str = r#"
server:
  host: "127.0.0.1"
  port: "not-a-number"
"#;
