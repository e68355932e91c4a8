use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use diabetes_risk_domain::entities::{HealthMetrics, RiskAssessment};
use diabetes_risk_domain::services::{RiskEvaluatorError, RiskFactorDefinition};

use crate::api::routes::AppState;
use crate::entities::assessment::{PublicAssessmentRequest, PublicRiskAssessment};
use crate::entities::common::ErrorResponse;

/// Evaluate diabetes risk for a set of health metrics
#[utoipa::path(
    post,
    path = "/api/v1/assessments",
    request_body = PublicAssessmentRequest,
    responses(
        (status = 200, description = "Risk assessment produced", body = PublicRiskAssessment),
        (status = 400, description = "A metric is outside its allowed range", body = ErrorResponse),
        (status = 500, description = "The risk model failed", body = ErrorResponse),
        (status = 504, description = "The risk model timed out", body = ErrorResponse),
    ),
    tag = "assessment"
)]
#[instrument(skip(state, request))]
pub async fn create_assessment(
    State(state): State<AppState>,
    Json(request): Json<PublicAssessmentRequest>,
) -> Result<impl IntoResponse, Response> {
    info!("Evaluating diabetes risk");

    if let Err(validation_errors) = request.validate() {
        let details = serde_json::to_value(validation_errors.field_errors())
            .unwrap_or(serde_json::Value::Null);
        warn!("Rejected assessment request: {}", validation_errors);
        return Err(ErrorResponse::validation_error(
            "One or more health metrics are out of range",
            Some(details),
        )
        .into_response());
    }

    let metrics = convert_to_domain_metrics(&request);

    // The predictor is synchronous, so keep it off the async workers
    let evaluator = state.evaluator.clone();
    let task = tokio::task::spawn_blocking(move || evaluator.evaluate(&metrics));

    let outcome = match tokio::time::timeout(state.predictor_timeout, task).await {
        Ok(joined) => joined,
        Err(_) => {
            error!(
                "Risk evaluation timed out after {} ms",
                state.predictor_timeout.as_millis()
            );
            return Err(ErrorResponse::predictor_timeout(state.predictor_timeout.as_millis())
                .into_response());
        }
    };

    match outcome {
        Ok(Ok(assessment)) => {
            info!(
                "Risk assessment complete: {} ({:.1}%)",
                assessment.label, assessment.probability_percent
            );
            Ok((StatusCode::OK, Json(convert_to_public_assessment(assessment))))
        }
        Ok(Err(RiskEvaluatorError::InvalidInput(message))) => {
            warn!("Invalid health metrics: {}", message);
            Err(ErrorResponse::validation_error(&message, None).into_response())
        }
        Ok(Err(RiskEvaluatorError::PredictorError(message))) => {
            error!("Predictor failed: {}", message);
            Err(ErrorResponse::predictor_error(&message).into_response())
        }
        Err(join_error) => {
            error!("Risk evaluation task failed: {}", join_error);
            Err(ErrorResponse::internal_error().into_response())
        }
    }
}

/// List the fixed risk factor thresholds
#[utoipa::path(
    get,
    path = "/api/v1/risk-factors",
    responses(
        (status = 200, description = "Risk factor thresholds", body = [RiskFactorDefinition]),
    ),
    tag = "assessment"
)]
#[instrument(skip(state))]
pub async fn list_risk_factors(State(state): State<AppState>) -> Json<Vec<RiskFactorDefinition>> {
    Json(state.evaluator.risk_factor_catalogue())
}

// Convert public request to domain metrics
fn convert_to_domain_metrics(request: &PublicAssessmentRequest) -> HealthMetrics {
    HealthMetrics {
        pregnancies: request.pregnancies,
        glucose: request.glucose,
        blood_pressure: request.blood_pressure,
        skin_thickness: request.skin_thickness,
        insulin: request.insulin,
        bmi: request.bmi,
        diabetes_pedigree: request.diabetes_pedigree,
        age: request.age,
    }
}

// Convert domain assessment to public assessment
fn convert_to_public_assessment(assessment: RiskAssessment) -> PublicRiskAssessment {
    let percent = assessment.probability_percent;

    PublicRiskAssessment {
        assessment_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        label: assessment.label,
        probability_percent: percent,
        probability_display: format!("{:.1}%", percent),
        // `as` saturates, and the percent is already within [0, 100]
        risk_score: percent.trunc() as u8,
        message: assessment.message,
        advice: assessment.advice,
        risk_factors: assessment.risk_factors,
    }
}
