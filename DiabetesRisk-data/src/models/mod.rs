//! Model artifact schema.
//!
//! A model artifact is a JSON document describing a binary classifier's
//! parameters. The `kind` field selects the model family; the remaining
//! fields are shared metadata plus family-specific parameters:
//!
//! ```json
//! {
//!   "name": "pima-logreg",
//!   "version": "1.0.0",
//!   "kind": "logistic_regression",
//!   "feature_names": ["pregnancies", "glucose", "..."],
//!   "coefficients": [0.12, 0.035, "..."],
//!   "intercept": -8.4,
//!   "threshold": 0.5
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::ModelError;

pub mod logistic;
pub mod tree_ensemble;

pub use logistic::{LogisticRegressionParams, StandardScaler};
pub use tree_ensemble::{DecisionTree, TreeEnsembleParams, TreeNode};

/// Family-specific model parameters, tagged by `kind`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelParams {
    LogisticRegression(LogisticRegressionParams),
    TreeEnsemble(TreeEnsembleParams),
}

/// A persisted binary classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Model name
    pub name: String,

    /// Model version
    pub version: String,

    /// Optional free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Names of the input features, in the order the model expects them
    pub feature_names: Vec<String>,

    /// Model family and its parameters
    #[serde(flatten)]
    pub params: ModelParams,
}

impl ModelArtifact {
    /// Parse an artifact from JSON text without validating it
    pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read, parse and validate an artifact from disk
    pub fn load(path: impl AsRef<Path>, expected_features: &[&str]) -> Result<Self, ModelError> {
        let path = path.as_ref();
        debug!("Loading model artifact from {}", path.display());

        let contents = std::fs::read_to_string(path)?;
        let artifact = Self::from_json_str(&contents)?;
        artifact.validate(expected_features)?;

        debug!(
            "Loaded {} model '{}' version {}",
            artifact.kind(),
            artifact.name,
            artifact.version
        );
        Ok(artifact)
    }

    /// Check that the artifact matches the expected feature layout and that
    /// its parameters are internally consistent
    pub fn validate(&self, expected_features: &[&str]) -> Result<(), ModelError> {
        let matches = self.feature_names.len() == expected_features.len()
            && self
                .feature_names
                .iter()
                .zip(expected_features)
                .all(|(found, expected)| found == expected);

        if !matches {
            return Err(ModelError::FeatureMismatch {
                expected: expected_features.iter().map(|s| s.to_string()).collect(),
                found: self.feature_names.clone(),
            });
        }

        let feature_count = self.feature_names.len();
        match &self.params {
            ModelParams::LogisticRegression(params) => params.validate(feature_count),
            ModelParams::TreeEnsemble(params) => params.validate(feature_count),
        }
    }

    /// Short identifier of the model family
    pub fn kind(&self) -> &'static str {
        match self.params {
            ModelParams::LogisticRegression(_) => "logistic_regression",
            ModelParams::TreeEnsemble(_) => "tree_ensemble",
        }
    }

    /// Decision threshold on the positive-class probability
    pub fn threshold(&self) -> f64 {
        match &self.params {
            ModelParams::LogisticRegression(params) => params.threshold,
            ModelParams::TreeEnsemble(params) => params.threshold,
        }
    }

    /// Probability of the positive class for one feature vector
    pub fn positive_probability(&self, features: &[f64]) -> Result<f64, ModelError> {
        if features.len() != self.feature_names.len() {
            return Err(ModelError::InputLength {
                expected: self.feature_names.len(),
                found: features.len(),
            });
        }

        match &self.params {
            ModelParams::LogisticRegression(params) => params.positive_probability(features),
            ModelParams::TreeEnsemble(params) => params.positive_probability(features),
        }
    }

    /// Predicted class (0 or 1) for one feature vector
    pub fn predict_class(&self, features: &[f64]) -> Result<u8, ModelError> {
        let probability = self.positive_probability(features)?;
        Ok(u8::from(probability >= self.threshold()))
    }
}

pub(crate) fn default_threshold() -> f64 {
    0.5
}

pub(crate) fn check_finite(field: &str, values: &[f64]) -> Result<(), ModelError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(ModelError::schema(format!(
            "{}[{}] is not a finite number",
            field, index
        ))),
        None => Ok(()),
    }
}

pub(crate) fn check_probability(field: &str, value: f64) -> Result<(), ModelError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ModelError::schema(format!(
            "{} must be within [0, 1], got {}",
            field, value
        )))
    }
}
