//! The predictor seam.
//!
//! The risk evaluator treats the classifier as a black box behind the
//! [`Predictor`] trait. [`ArtifactPredictor`] adapts a model artifact from
//! the data layer to that trait.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

use diabetes_risk_data::models::ModelArtifact;
use diabetes_risk_data::store;
use diabetes_risk_data::ModelError;

use crate::entities::{FeatureVector, FEATURE_NAMES};

/// Failure raised by a predictor while classifying or estimating probability
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{0}")]
pub struct PredictorError(pub String);

impl From<ModelError> for PredictorError {
    fn from(err: ModelError) -> Self {
        PredictorError(err.to_string())
    }
}

/// Descriptive metadata about the loaded predictor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct ModelInfo {
    /// Model name
    pub name: String,

    /// Model version
    pub version: String,

    /// Model family (e.g. "logistic_regression")
    pub kind: String,

    /// Optional free-form description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Input features in the order the predictor consumes them
    pub feature_names: Vec<String>,

    /// Decision threshold on the high-risk probability, if the model has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
}

/// Binary classifier over the fixed-order feature vector
#[cfg_attr(test, mockall::automock)]
pub trait Predictor: Send + Sync {
    /// Predicted class: 0 for low risk, 1 for high risk
    fn classify(&self, features: &FeatureVector) -> Result<u8, PredictorError>;

    /// Probability of the high-risk class, in [0, 1]
    fn estimate_probability(&self, features: &FeatureVector) -> Result<f64, PredictorError>;

    /// Metadata describing this predictor
    fn describe(&self) -> ModelInfo;
}

/// Predictor backed by a loaded model artifact
#[derive(Debug, Clone)]
pub struct ArtifactPredictor {
    artifact: Arc<ModelArtifact>,
}

impl ArtifactPredictor {
    /// Wrap an artifact once it matches the fixed feature layout
    pub fn new(artifact: Arc<ModelArtifact>) -> Result<Self, PredictorError> {
        artifact.validate(&FEATURE_NAMES)?;
        Ok(Self { artifact })
    }

    /// Use the artifact held by the process-wide model store
    pub fn from_store() -> Result<Self, PredictorError> {
        Self::new(store::get_model()?)
    }
}

impl Predictor for ArtifactPredictor {
    fn classify(&self, features: &FeatureVector) -> Result<u8, PredictorError> {
        Ok(self.artifact.predict_class(features)?)
    }

    fn estimate_probability(&self, features: &FeatureVector) -> Result<f64, PredictorError> {
        Ok(self.artifact.positive_probability(features)?)
    }

    fn describe(&self) -> ModelInfo {
        ModelInfo {
            name: self.artifact.name.clone(),
            version: self.artifact.version.clone(),
            kind: self.artifact.kind().to_string(),
            description: self.artifact.description.clone(),
            feature_names: self.artifact.feature_names.clone(),
            threshold: Some(self.artifact.threshold()),
        }
    }
}
