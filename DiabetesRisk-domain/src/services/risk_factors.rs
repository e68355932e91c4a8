use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

use crate::entities::HealthMetrics;

/// Fixed clinical thresholds checked against the raw metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskFactor {
    /// glucose > 140 mg/dL
    HighGlucose,
    /// BMI > 30
    HighBmi,
    /// age > 45
    AgeRisk,
    /// diastolic blood pressure > 90 mmHg
    HighBloodPressure,
}

impl RiskFactor {
    /// All risk factors in reporting order
    pub const ALL: [RiskFactor; 4] = [
        RiskFactor::HighGlucose,
        RiskFactor::HighBmi,
        RiskFactor::AgeRisk,
        RiskFactor::HighBloodPressure,
    ];

    /// Key used in the assessment's risk factor map
    pub fn name(&self) -> &'static str {
        match self {
            RiskFactor::HighGlucose => "High Glucose",
            RiskFactor::HighBmi => "High BMI",
            RiskFactor::AgeRisk => "Age Risk",
            RiskFactor::HighBloodPressure => "High Blood Pressure",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RiskFactor::HighGlucose => "High Glucose (>140 mg/dL)",
            RiskFactor::HighBmi => "High BMI (>30)",
            RiskFactor::AgeRisk => "Age >45",
            RiskFactor::HighBloodPressure => "High Blood Pressure (>90 mmHg)",
        }
    }

    /// Metric the threshold applies to
    pub fn metric(&self) -> &'static str {
        match self {
            RiskFactor::HighGlucose => "glucose",
            RiskFactor::HighBmi => "bmi",
            RiskFactor::AgeRisk => "age",
            RiskFactor::HighBloodPressure => "blood_pressure",
        }
    }

    /// Exclusive lower bound above which the factor is present
    pub fn threshold(&self) -> f64 {
        match self {
            RiskFactor::HighGlucose => 140.0,
            RiskFactor::HighBmi => 30.0,
            RiskFactor::AgeRisk => 45.0,
            RiskFactor::HighBloodPressure => 90.0,
        }
    }

    /// Whether the factor is present for the given metrics
    pub fn is_present(&self, metrics: &HealthMetrics) -> bool {
        match self {
            RiskFactor::HighGlucose => metrics.glucose > 140,
            RiskFactor::HighBmi => metrics.bmi > 30.0,
            RiskFactor::AgeRisk => metrics.age > 45,
            RiskFactor::HighBloodPressure => metrics.blood_pressure > 90,
        }
    }

    pub fn definition(&self) -> RiskFactorDefinition {
        RiskFactorDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            metric: self.metric().to_string(),
            threshold: self.threshold(),
        }
    }
}

/// Serializable description of a risk factor threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct RiskFactorDefinition {
    /// Key used in assessment results
    pub name: String,

    /// Human-readable description including the threshold
    pub description: String,

    /// Metric the threshold applies to
    pub metric: String,

    /// The factor is present when the metric is strictly greater than this
    pub threshold: f64,
}

/// Evaluate every risk factor against the raw metrics
pub fn evaluate_risk_factors(metrics: &HealthMetrics) -> IndexMap<String, bool> {
    RiskFactor::ALL
        .iter()
        .map(|factor| (factor.name().to_string(), factor.is_present(metrics)))
        .collect()
}

/// Definitions of all risk factors in reporting order
pub fn risk_factor_catalogue() -> Vec<RiskFactorDefinition> {
    RiskFactor::ALL.iter().map(RiskFactor::definition).collect()
}
