// Testing utilities and mock implementations for the domain layer
// This module is only available when the "mock" feature is enabled

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use crate::entities::{FeatureVector, HealthMetrics, FEATURE_NAMES};
use crate::health::{ComponentStatus, HealthComponent, HealthServiceTrait, SystemHealth};
use crate::services::predictor::{ModelInfo, Predictor, PredictorError};

/// Predictor returning fixed outputs, configurable to fail or stall
#[derive(Debug, Clone)]
pub struct StubPredictor {
    class: u8,
    probability: f64,
    classify_failure: Option<String>,
    probability_failure: Option<String>,
    delay: Option<Duration>,
}

impl StubPredictor {
    /// Create a stub that always answers with `class` and `probability`
    pub fn new(class: u8, probability: f64) -> Self {
        Self {
            class,
            probability,
            classify_failure: None,
            probability_failure: None,
            delay: None,
        }
    }

    /// Configure the stub to fail classification
    pub fn with_classify_failure(mut self, message: &str) -> Self {
        self.classify_failure = Some(message.to_string());
        self
    }

    /// Configure the stub to fail probability estimation
    pub fn with_probability_failure(mut self, message: &str) -> Self {
        self.probability_failure = Some(message.to_string());
        self
    }

    /// Block the calling thread for `delay` before classifying
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

impl Predictor for StubPredictor {
    fn classify(&self, _features: &FeatureVector) -> Result<u8, PredictorError> {
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        match &self.classify_failure {
            Some(message) => Err(PredictorError(message.clone())),
            None => Ok(self.class),
        }
    }

    fn estimate_probability(&self, _features: &FeatureVector) -> Result<f64, PredictorError> {
        match &self.probability_failure {
            Some(message) => Err(PredictorError(message.clone())),
            None => Ok(self.probability),
        }
    }

    fn describe(&self) -> ModelInfo {
        ModelInfo {
            name: "stub".to_string(),
            version: "0.0.0".to_string(),
            kind: "stub".to_string(),
            description: Some("Fixed-output predictor for tests".to_string()),
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            threshold: None,
        }
    }
}

/// Health service reporting a fixed model status
#[derive(Debug, Clone)]
pub struct MockHealthService {
    model_status: ComponentStatus,
}

impl Default for MockHealthService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHealthService {
    /// Create a mock health service with a healthy model
    pub fn new() -> Self {
        Self {
            model_status: ComponentStatus::Healthy,
        }
    }

    /// Configure the mock to report the model as unavailable
    pub fn with_unhealthy_model(mut self) -> Self {
        self.model_status = ComponentStatus::Unhealthy;
        self
    }
}

#[async_trait]
impl HealthServiceTrait for MockHealthService {
    async fn get_system_health(&self) -> SystemHealth {
        let mut components = HashMap::new();
        components.insert(
            "model".to_string(),
            HealthComponent {
                status: self.model_status.clone(),
                details: match self.model_status {
                    ComponentStatus::Healthy => None,
                    _ => Some("Model store is not initialized".to_string()),
                },
            },
        );
        components.insert(
            "api".to_string(),
            HealthComponent {
                status: ComponentStatus::Healthy,
                details: None,
            },
        );
        SystemHealth::from_components(components)
    }
}

/// Metrics with no risk factors present
pub fn sample_low_risk_metrics() -> HealthMetrics {
    HealthMetrics {
        pregnancies: 1,
        glucose: 85,
        blood_pressure: 66,
        skin_thickness: 29,
        insulin: 0,
        bmi: 26.6,
        diabetes_pedigree: 0.35,
        age: 31,
    }
}

/// Metrics with high glucose, high BMI and age risk present
pub fn sample_high_risk_metrics() -> HealthMetrics {
    HealthMetrics {
        pregnancies: 6,
        glucose: 148,
        blood_pressure: 72,
        skin_thickness: 35,
        insulin: 0,
        bmi: 33.6,
        diabetes_pedigree: 0.627,
        age: 50,
    }
}
