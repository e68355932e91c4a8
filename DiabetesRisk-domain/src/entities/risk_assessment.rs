use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// Binary risk decision produced by the predictor
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLabel {
    /// Predictor class 0
    Low,

    /// Predictor class 1
    High,
}

impl RiskLabel {
    /// Headline shown alongside the assessment
    pub fn message(&self) -> &'static str {
        match self {
            RiskLabel::High => "High Diabetes Risk Detected",
            RiskLabel::Low => "Low Diabetes Risk",
        }
    }

    /// Advisory text for the user
    pub fn advice(&self) -> &'static str {
        match self {
            RiskLabel::High => {
                "Please consult a healthcare professional for comprehensive screening and advice."
            }
            RiskLabel::Low => "Maintain healthy habits with regular check-ups to stay low-risk.",
        }
    }
}

impl TryFrom<u8> for RiskLabel {
    type Error = u8;

    fn try_from(class: u8) -> Result<Self, Self::Error> {
        match class {
            0 => Ok(RiskLabel::Low),
            1 => Ok(RiskLabel::High),
            other => Err(other),
        }
    }
}

impl std::fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLabel::Low => write!(f, "LOW"),
            RiskLabel::High => write!(f, "HIGH"),
        }
    }
}

/// Result of evaluating one set of health metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct RiskAssessment {
    /// Predictor's binary decision
    pub label: RiskLabel,

    /// Probability of the high-risk class, scaled to percent and not rounded
    pub probability_percent: f64,

    /// Headline selected from the label
    pub message: String,

    /// Advisory selected from the label
    pub advice: String,

    /// Fixed-threshold risk factors keyed by name, in catalogue order
    #[cfg_attr(feature = "with-api", schema(value_type = Object))]
    pub risk_factors: IndexMap<String, bool>,
}

impl RiskAssessment {
    /// Names of the risk factors that are present
    pub fn active_risk_factors(&self) -> Vec<&str> {
        self.risk_factors
            .iter()
            .filter(|(_, present)| **present)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}
