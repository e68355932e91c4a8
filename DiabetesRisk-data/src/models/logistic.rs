use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::models::{check_finite, check_probability, default_threshold};

/// Standardization applied to raw features before the linear term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Per-feature mean subtracted from the raw value
    pub mean: Vec<f64>,
    /// Per-feature scale the centered value is divided by
    pub scale: Vec<f64>,
}

/// Parameters of a binary logistic regression classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegressionParams {
    /// Optional standardization step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaler: Option<StandardScaler>,

    /// One coefficient per feature, in feature order
    pub coefficients: Vec<f64>,

    /// Bias term
    pub intercept: f64,

    /// Probability at or above which the positive class is predicted
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl LogisticRegressionParams {
    pub(crate) fn validate(&self, feature_count: usize) -> Result<(), ModelError> {
        if self.coefficients.len() != feature_count {
            return Err(ModelError::schema(format!(
                "logistic regression has {} coefficients for {} features",
                self.coefficients.len(),
                feature_count
            )));
        }
        check_finite("coefficients", &self.coefficients)?;
        check_finite("intercept", &[self.intercept])?;
        check_probability("threshold", self.threshold)?;

        if let Some(scaler) = &self.scaler {
            if scaler.mean.len() != feature_count || scaler.scale.len() != feature_count {
                return Err(ModelError::schema(format!(
                    "scaler must have {} mean and scale entries",
                    feature_count
                )));
            }
            check_finite("scaler.mean", &scaler.mean)?;
            check_finite("scaler.scale", &scaler.scale)?;
            if let Some(index) = scaler.scale.iter().position(|s| *s == 0.0) {
                return Err(ModelError::schema(format!(
                    "scaler.scale[{}] must not be zero",
                    index
                )));
            }
        }

        Ok(())
    }

    /// Probability of the positive class
    pub fn positive_probability(&self, features: &[f64]) -> Result<f64, ModelError> {
        if features.len() != self.coefficients.len() {
            return Err(ModelError::InputLength {
                expected: self.coefficients.len(),
                found: features.len(),
            });
        }

        let mut z = self.intercept;
        for (i, (x, w)) in features.iter().zip(&self.coefficients).enumerate() {
            let x = match &self.scaler {
                Some(scaler) => match (scaler.mean.get(i), scaler.scale.get(i)) {
                    (Some(mean), Some(scale)) => (x - mean) / scale,
                    _ => {
                        return Err(ModelError::schema(format!(
                            "scaler has no entry for feature {}",
                            i
                        )))
                    }
                },
                None => *x,
            };
            z += w * x;
        }
        Ok(sigmoid(z))
    }
}

fn sigmoid(z: f64) -> f64 {
    // Split on sign so exp never overflows
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
