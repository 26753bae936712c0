//! Tabular input handed to a classifier.
//!
//! A request body becomes a [`FeatureFrame`] with one row whose columns are the
//! request keys. The frame does no schema checking of its own; a model aligns it
//! against the features it was fitted with via [`FeatureFrame::to_matrix`].

use crate::{Error, Result};
use serde_json::{Map, Value};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureFrame {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl FeatureFrame {
    /// Wraps a single key-value record into a one-row frame.
    pub fn from_record(record: Map<String, Value>) -> Self {
        let (columns, row): (Vec<String>, Vec<Value>) = record.into_iter().unzip();
        Self {
            columns,
            rows: vec![row],
        }
    }

    /// Builds a frame from a request body. Anything but a JSON object is rejected.
    pub fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::Object(record) => Ok(Self::from_record(record)),
            other => Err(Error::input(format!(
                "expected a JSON object of feature values, got {}",
                json_type(&other)
            ))),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.columns.len())
    }

    /// Reorders every row into `feature_names` order and converts the values to `f64`.
    ///
    /// Fails when a feature is missing, when a column was not part of
    /// `feature_names`, or when a value cannot be read as a finite number.
    pub fn to_matrix(&self, feature_names: &[String]) -> Result<Vec<Vec<f64>>> {
        let present: HashSet<&str> = self.columns.iter().map(String::as_str).collect();
        let expected: HashSet<&str> = feature_names.iter().map(String::as_str).collect();

        let missing: Vec<&str> = feature_names
            .iter()
            .map(String::as_str)
            .filter(|name| !present.contains(name))
            .collect();
        if !missing.is_empty() {
            return Err(Error::input(format!(
                "missing features: {}",
                missing.join(", ")
            )));
        }

        let unexpected: Vec<&str> = self
            .columns
            .iter()
            .map(String::as_str)
            .filter(|name| !expected.contains(name))
            .collect();
        if !unexpected.is_empty() {
            return Err(Error::input(format!(
                "features not seen at fit time: {}",
                unexpected.join(", ")
            )));
        }

        let positions: Vec<usize> = feature_names
            .iter()
            .filter_map(|name| self.columns.iter().position(|column| column == name))
            .collect();

        self.rows
            .iter()
            .map(|row| {
                positions
                    .iter()
                    .map(|&idx| to_f64(&self.columns[idx], &row[idx]))
                    .collect()
            })
            .collect()
    }
}

fn to_f64(feature: &str, value: &Value) -> Result<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match number {
        Some(n) if n.is_finite() => Ok(n),
        _ => Err(Error::input(format!(
            "feature '{}' has non-numeric value {}",
            feature, value
        ))),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
