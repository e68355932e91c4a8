use axum::{extract::State, Json};
use tracing::{info, instrument};

use diabetes_risk_domain::services::ModelInfo;

use crate::api::routes::AppState;

/// Describe the loaded risk model
#[utoipa::path(
    get,
    path = "/api/v1/model",
    responses(
        (status = 200, description = "Loaded model metadata", body = ModelInfo),
    ),
    tag = "model"
)]
#[instrument(skip(state))]
pub async fn get_model_info(State(state): State<AppState>) -> Json<ModelInfo> {
    let info = state.evaluator.model_info();
    info!("Model info requested: {} {}", info.name, info.version);
    Json(info)
}
