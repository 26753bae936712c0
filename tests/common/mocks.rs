use std::sync::{Arc, Mutex};
use stress_predictor::{Error, Result, frame::FeatureFrame, model::Classifier};

/// Mock classifier that returns canned labels and records every frame it sees
#[derive(Debug)]
pub struct MockClassifier {
    pub feature_names: Vec<String>,
    pub classes: Vec<i64>,
    pub labels: Vec<i64>,
    pub error: Option<String>,
    pub frames: Arc<Mutex<Vec<FeatureFrame>>>,
}

impl MockClassifier {
    pub fn new() -> Self {
        Self {
            feature_names: vec!["x".to_string()],
            classes: vec![0, 1],
            labels: vec![1],
            error: None,
            frames: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_labels(mut self, labels: Vec<i64>) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_error(mut self, error: &str) -> Self {
        self.error = Some(error.to_string());
        self
    }

    pub fn get_frames(&self) -> Vec<FeatureFrame> {
        self.frames.lock().unwrap().clone()
    }
}

impl Classifier for MockClassifier {
    fn kind(&self) -> &str {
        "mock"
    }

    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn predict(&self, frame: &FeatureFrame) -> Result<Vec<i64>> {
        self.frames.lock().unwrap().push(frame.clone());

        if let Some(ref error) = self.error {
            return Err(Error::model(error.clone()));
        }

        Ok(self.labels.clone())
    }
}
