mod logistic;

pub use logistic::{LogisticRegression, MultiClass};

use crate::{Error, Result, frame::FeatureFrame};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{path::Path, sync::Arc};
use tracing::{debug, info};

/// A fitted classifier shared read-only across request handlers.
pub trait Classifier: Send + Sync {
    fn kind(&self) -> &str;

    /// Feature schema the model was fitted with, in column order.
    fn feature_names(&self) -> &[String];

    fn classes(&self) -> &[i64];

    /// Returns one predicted label per frame row.
    fn predict(&self, frame: &FeatureFrame) -> Result<Vec<i64>>;
}

/// On-disk representation of a serialized model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    LogisticRegression(LogisticRegression),
}

impl ModelArtifact {
    pub fn from_json(contents: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(contents)?;

        if !value.is_object() {
            return Err(Error::model(
                "model file does not contain a classifier object; \
                 save the fitted model, not its coefficients or predictions",
            ));
        }

        let artifact: ModelArtifact = serde_json::from_value(value)
            .map_err(|e| Error::model(format!("unrecognised model definition: {}", e)))?;
        artifact.validate()?;

        Ok(artifact)
    }

    fn validate(&self) -> Result<()> {
        match self {
            Self::LogisticRegression(model) => model.validate(),
        }
    }

    pub fn into_classifier(self) -> Arc<dyn Classifier> {
        match self {
            Self::LogisticRegression(model) => Arc::new(model),
        }
    }
}

/// A classifier together with the moment it was read from disk.
#[derive(Clone)]
pub struct LoadedModel {
    pub classifier: Arc<dyn Classifier>,
    pub loaded_at: DateTime<Utc>,
}

impl LoadedModel {
    pub fn new(classifier: Arc<dyn Classifier>, loaded_at: DateTime<Utc>) -> Self {
        Self {
            classifier,
            loaded_at,
        }
    }
}

/// Reads, validates and shares the model stored at `path`.
pub async fn load(path: impl AsRef<Path>) -> Result<LoadedModel> {
    let path = path.as_ref();
    debug!("Loading model from: {}", path.display());

    let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
        Error::model(format!("cannot read model file {}: {}", path.display(), e))
    })?;
    let model = ModelArtifact::from_json(&contents)?.into_classifier();

    info!(
        "Loaded {} model from {} ({} features, classes {:?})",
        model.kind(),
        path.display(),
        model.feature_names().len(),
        model.classes()
    );

    Ok(LoadedModel::new(model, Utc::now()))
}
