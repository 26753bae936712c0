use super::Classifier;
use crate::{Error, Result, frame::FeatureFrame};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiClass {
    #[default]
    Multinomial,
    Ovr,
}

/// Fitted linear classifier in the layout scikit-learn exports.
///
/// `coef` holds one row of weights per class, or a single row for a two-class
/// model where a positive decision selects `classes[1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub feature_names: Vec<String>,
    pub classes: Vec<i64>,
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
    #[serde(default)]
    pub multi_class: MultiClass,
}

impl LogisticRegression {
    pub fn validate(&self) -> Result<()> {
        if self.feature_names.is_empty() {
            return Err(Error::model("model declares no feature names"));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = self.feature_names.iter().find(|name| !seen.insert(*name)) {
            return Err(Error::model(format!("duplicate feature name '{}'", dup)));
        }

        if self.classes.len() < 2 {
            return Err(Error::model(format!(
                "a classifier needs at least two classes, found {}",
                self.classes.len()
            )));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = self.classes.iter().find(|class| !seen.insert(**class)) {
            return Err(Error::model(format!("duplicate class label {}", dup)));
        }

        let binary = self.classes.len() == 2 && self.coef.len() == 1;
        if !binary && self.coef.len() != self.classes.len() {
            return Err(Error::model(format!(
                "coef has {} rows for {} classes",
                self.coef.len(),
                self.classes.len()
            )));
        }
        if self.intercept.len() != self.coef.len() {
            return Err(Error::model(format!(
                "intercept has {} entries for {} coef rows",
                self.intercept.len(),
                self.coef.len()
            )));
        }
        for (idx, row) in self.coef.iter().enumerate() {
            if row.len() != self.feature_names.len() {
                return Err(Error::model(format!(
                    "coef row {} has {} weights for {} features",
                    idx,
                    row.len(),
                    self.feature_names.len()
                )));
            }
        }

        let all_finite = self
            .coef
            .iter()
            .flatten()
            .chain(self.intercept.iter())
            .all(|w| w.is_finite());
        if !all_finite {
            return Err(Error::model("model weights contain non-finite values"));
        }

        Ok(())
    }

    /// One decision value per coef row.
    fn decision_function(&self, sample: &[f64]) -> Vec<f64> {
        self.coef
            .iter()
            .zip(&self.intercept)
            .map(|(weights, bias)| {
                weights
                    .iter()
                    .zip(sample)
                    .map(|(w, x)| w * x)
                    .sum::<f64>()
                    + bias
            })
            .collect()
    }

    fn predict_one(&self, sample: &[f64]) -> i64 {
        let scores = self.decision_function(sample);

        if scores.len() == 1 {
            return if scores[0] > 0.0 {
                self.classes[1]
            } else {
                self.classes[0]
            };
        }

        // Softmax and one-vs-rest sigmoid are both monotonic, so the arg-max of
        // the raw scores picks the same class. The first maximum wins ties.
        let mut best = 0;
        for (idx, score) in scores.iter().enumerate().skip(1) {
            if *score > scores[best] {
                best = idx;
            }
        }
        self.classes[best]
    }
}

impl Classifier for LogisticRegression {
    fn kind(&self) -> &str {
        "logistic_regression"
    }

    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn predict(&self, frame: &FeatureFrame) -> Result<Vec<i64>> {
        let matrix = frame.to_matrix(&self.feature_names)?;
        Ok(matrix.iter().map(|sample| self.predict_one(sample)).collect())
    }
}
