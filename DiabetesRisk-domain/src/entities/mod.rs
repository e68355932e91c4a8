// Domain entities and value objects
pub mod health_metrics;
pub mod risk_assessment;

// Re-export common types for easier imports
pub use health_metrics::{FeatureVector, HealthMetrics, FEATURE_COUNT, FEATURE_NAMES};
pub use risk_assessment::{RiskAssessment, RiskLabel};
