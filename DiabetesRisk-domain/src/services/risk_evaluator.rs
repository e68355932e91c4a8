use std::sync::Arc;

use thiserror::Error;
use tracing::debug;
use validator::Validate;

use crate::entities::{HealthMetrics, RiskAssessment, RiskLabel};
use crate::services::predictor::{ArtifactPredictor, ModelInfo, Predictor, PredictorError};
use crate::services::risk_factors::{evaluate_risk_factors, risk_factor_catalogue, RiskFactorDefinition};

/// Risk evaluation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RiskEvaluatorError {
    /// A metric is outside its declared domain
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The predictor failed or violated its output contract
    #[error("Predictor error: {0}")]
    PredictorError(String),
}

impl From<PredictorError> for RiskEvaluatorError {
    fn from(err: PredictorError) -> Self {
        RiskEvaluatorError::PredictorError(err.0)
    }
}

/// Check every metric against its declared domain
pub fn validate_metrics(metrics: &HealthMetrics) -> Result<(), RiskEvaluatorError> {
    if let Err(validation_errors) = metrics.validate() {
        // Sort by field so the message is stable across runs
        let mut field_errors: Vec<_> = validation_errors.field_errors().into_iter().collect();
        field_errors.sort_by_key(|(field, _)| *field);

        let error_message = field_errors
            .iter()
            .map(|(field, errors)| {
                let error_msgs: Vec<String> = errors
                    .iter()
                    .map(|err| match &err.message {
                        Some(msg) => msg.to_string(),
                        None => format!("Invalid {}", field),
                    })
                    .collect();
                format!("{}: {}", field, error_msgs.join(", "))
            })
            .collect::<Vec<String>>()
            .join("; ");

        return Err(RiskEvaluatorError::InvalidInput(error_message));
    }

    // Range checks let NaN through
    for (field, value) in [("bmi", metrics.bmi), ("diabetes_pedigree", metrics.diabetes_pedigree)] {
        if !value.is_finite() {
            return Err(RiskEvaluatorError::InvalidInput(format!(
                "{}: must be a finite number",
                field
            )));
        }
    }

    Ok(())
}

/// Evaluate one set of health metrics against a predictor.
///
/// Validation happens before the predictor is touched. The label and its
/// message come from `classify`; the percentage comes from
/// `estimate_probability` unrounded; risk factors come from the raw metrics
/// only. The two predictor outputs are not cross-checked against each other.
pub fn evaluate(
    metrics: &HealthMetrics,
    predictor: &dyn Predictor,
) -> Result<RiskAssessment, RiskEvaluatorError> {
    validate_metrics(metrics)?;

    let features = metrics.to_feature_vector();

    let class = predictor.classify(&features)?;
    let label = RiskLabel::try_from(class).map_err(|class| {
        RiskEvaluatorError::PredictorError(format!(
            "classifier returned unknown class {}",
            class
        ))
    })?;

    let probability = predictor.estimate_probability(&features)?;
    if !(0.0..=1.0).contains(&probability) {
        return Err(RiskEvaluatorError::PredictorError(format!(
            "probability {} is outside [0, 1]",
            probability
        )));
    }

    let assessment = RiskAssessment {
        label,
        probability_percent: probability * 100.0,
        message: label.message().to_string(),
        advice: label.advice().to_string(),
        risk_factors: evaluate_risk_factors(metrics),
    };

    debug!(
        "Risk evaluated: label={} probability={:.1}% factors={:?}",
        assessment.label,
        assessment.probability_percent,
        assessment.active_risk_factors()
    );

    Ok(assessment)
}

/// Trait for risk evaluation operations
pub trait RiskEvaluatorServiceTrait: Send + Sync {
    /// Produce a risk assessment for the metrics
    fn evaluate(&self, metrics: &HealthMetrics) -> Result<RiskAssessment, RiskEvaluatorError>;

    /// Definitions of the fixed risk factor thresholds
    fn risk_factor_catalogue(&self) -> Vec<RiskFactorDefinition>;

    /// Metadata of the predictor in use
    fn model_info(&self) -> ModelInfo;
}

/// Risk evaluation service over a shared, read-only predictor
#[derive(Clone)]
pub struct RiskEvaluatorService {
    predictor: Arc<dyn Predictor>,
}

impl RiskEvaluatorService {
    /// Create a new risk evaluator service
    pub fn new(predictor: Arc<dyn Predictor>) -> Self {
        Self { predictor }
    }
}

impl RiskEvaluatorServiceTrait for RiskEvaluatorService {
    fn evaluate(&self, metrics: &HealthMetrics) -> Result<RiskAssessment, RiskEvaluatorError> {
        evaluate(metrics, self.predictor.as_ref())
    }

    fn risk_factor_catalogue(&self) -> Vec<RiskFactorDefinition> {
        risk_factor_catalogue()
    }

    fn model_info(&self) -> ModelInfo {
        self.predictor.describe()
    }
}

/// Create a risk evaluator service using the model from the data layer store
pub fn create_default_risk_evaluator_service() -> Result<RiskEvaluatorService, RiskEvaluatorError> {
    let predictor = ArtifactPredictor::from_store()?;
    Ok(RiskEvaluatorService::new(Arc::new(predictor)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::predictor::MockPredictor;
    use mockall::predicate::eq;

    fn scenario_low() -> HealthMetrics {
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

    fn scenario_high() -> HealthMetrics {
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

    /// Predictor that always answers with the given class and probability
    fn predictor(class: u8, probability: f64) -> MockPredictor {
        let mut mock = MockPredictor::new();
        mock.expect_classify().returning(move |_| Ok(class));
        mock.expect_estimate_probability().returning(move |_| Ok(probability));
        mock
    }

    #[test]
    fn test_low_risk_scenario() {
        let assessment = evaluate(&scenario_low(), &predictor(0, 0.15)).unwrap();

        assert_eq!(assessment.label, RiskLabel::Low);
        assert_eq!(assessment.probability_percent, 0.15 * 100.0);
        assert!((assessment.probability_percent - 15.0).abs() < 1e-9);
        assert_eq!(assessment.message, "Low Diabetes Risk");
        assert_eq!(
            assessment.advice,
            "Maintain healthy habits with regular check-ups to stay low-risk."
        );
        assert!(assessment.risk_factors.values().all(|present| !present));
    }

    #[test]
    fn test_high_risk_scenario() {
        let assessment = evaluate(&scenario_high(), &predictor(1, 0.72)).unwrap();

        assert_eq!(assessment.label, RiskLabel::High);
        assert!((assessment.probability_percent - 72.0).abs() < 1e-9);
        assert_eq!(assessment.message, "High Diabetes Risk Detected");
        assert!(assessment.advice.contains("consult a healthcare professional"));
        assert!(assessment.risk_factors["High Glucose"]);
        assert!(assessment.risk_factors["High BMI"]);
        assert!(assessment.risk_factors["Age Risk"]);
        assert!(!assessment.risk_factors["High Blood Pressure"]);
    }

    #[test]
    fn test_predictor_receives_fixed_order_vector() {
        let expected = [6.0, 148.0, 72.0, 35.0, 0.0, 33.6, 0.627, 50.0];

        let mut mock = MockPredictor::new();
        mock.expect_classify()
            .with(eq(expected))
            .times(1)
            .returning(|_| Ok(1));
        mock.expect_estimate_probability()
            .with(eq(expected))
            .times(1)
            .returning(|_| Ok(0.72));

        assert!(evaluate(&scenario_high(), &mock).is_ok());
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let mock = predictor(1, 0.72);
        let first = evaluate(&scenario_high(), &mock).unwrap();
        let second = evaluate(&scenario_high(), &mock).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_risk_factors_ignore_prediction() {
        let metrics = HealthMetrics { glucose: 150, ..scenario_low() };
        for (class, probability) in [(0, 0.01), (1, 0.99)] {
            let assessment = evaluate(&metrics, &predictor(class, probability)).unwrap();
            assert!(assessment.risk_factors["High Glucose"]);
        }
    }

    #[test]
    fn test_message_follows_label_not_probability() {
        // Borderline: low label with probability just under one half
        let assessment = evaluate(&scenario_low(), &predictor(0, 0.49)).unwrap();
        assert_eq!(assessment.label, RiskLabel::Low);
        assert_eq!(assessment.message, "Low Diabetes Risk");

        // Inconsistent predictor output is accepted as-is
        let assessment = evaluate(&scenario_low(), &predictor(1, 0.10)).unwrap();
        assert_eq!(assessment.label, RiskLabel::High);
        assert_eq!(assessment.message, "High Diabetes Risk Detected");
        assert!((assessment.probability_percent - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_probability_extremes_are_not_clamped() {
        let zero = evaluate(&scenario_low(), &predictor(0, 0.0)).unwrap();
        assert_eq!(zero.probability_percent, 0.0);

        let one = evaluate(&scenario_high(), &predictor(1, 1.0)).unwrap();
        assert_eq!(one.probability_percent, 100.0);
    }

    #[test]
    fn test_probability_is_not_rounded() {
        let assessment = evaluate(&scenario_low(), &predictor(0, 0.123456)).unwrap();
        assert!((assessment.probability_percent - 12.3456).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_input_never_reaches_predictor() {
        let mut mock = MockPredictor::new();
        mock.expect_classify().never();
        mock.expect_estimate_probability().never();

        let metrics = HealthMetrics { glucose: 201, ..scenario_low() };
        let err = evaluate(&metrics, &mock).unwrap_err();
        match err {
            RiskEvaluatorError::InvalidInput(message) => {
                assert!(message.contains("Glucose must be between 0 and 200"))
            }
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_metric_is_invalid() {
        let metrics = HealthMetrics { bmi: f64::NAN, ..scenario_low() };
        let err = validate_metrics(&metrics).unwrap_err();
        assert!(matches!(err, RiskEvaluatorError::InvalidInput(_)));
    }

    #[test]
    fn test_classification_failure_propagates() {
        let mut mock = MockPredictor::new();
        mock.expect_classify()
            .returning(|_| Err(PredictorError("model unavailable".to_string())));
        mock.expect_estimate_probability().never();

        let err = evaluate(&scenario_low(), &mock).unwrap_err();
        assert_eq!(
            err,
            RiskEvaluatorError::PredictorError("model unavailable".to_string())
        );
    }

    #[test]
    fn test_probability_failure_propagates() {
        let mut mock = MockPredictor::new();
        mock.expect_classify().returning(|_| Ok(0));
        mock.expect_estimate_probability()
            .returning(|_| Err(PredictorError("probability unavailable".to_string())));

        let err = evaluate(&scenario_low(), &mock).unwrap_err();
        assert!(matches!(err, RiskEvaluatorError::PredictorError(_)));
    }

    #[test]
    fn test_unknown_class_is_a_predictor_error() {
        let err = evaluate(&scenario_low(), &predictor(2, 0.5)).unwrap_err();
        assert!(err.to_string().contains("unknown class 2"));
    }

    #[test]
    fn test_out_of_range_probability_is_a_predictor_error() {
        for probability in [-0.01, 1.01, f64::NAN] {
            let err = evaluate(&scenario_low(), &predictor(0, probability)).unwrap_err();
            assert!(matches!(err, RiskEvaluatorError::PredictorError(_)));
        }
    }

    #[test]
    fn test_service_delegates_to_predictor() {
        let mut mock = predictor(1, 0.72);
        mock.expect_describe().returning(|| ModelInfo {
            name: "mock".to_string(),
            version: "0".to_string(),
            kind: "mock".to_string(),
            description: None,
            feature_names: Vec::new(),
            threshold: None,
        });

        let service = RiskEvaluatorService::new(Arc::new(mock));
        assert_eq!(service.evaluate(&scenario_high()).unwrap().label, RiskLabel::High);
        assert_eq!(service.model_info().name, "mock");
        assert_eq!(service.risk_factor_catalogue().len(), 4);
    }
}
