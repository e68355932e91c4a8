pub mod predictor;
pub mod risk_evaluator;
pub mod risk_factors;

// Domain services
// This module contains business logic implementations.

// Re-export service traits and factory functions
pub use predictor::{ArtifactPredictor, ModelInfo, Predictor, PredictorError};
pub use risk_evaluator::{
    create_default_risk_evaluator_service, evaluate, RiskEvaluatorError, RiskEvaluatorService,
    RiskEvaluatorServiceTrait,
};
pub use risk_factors::{evaluate_risk_factors, risk_factor_catalogue, RiskFactor, RiskFactorDefinition};
