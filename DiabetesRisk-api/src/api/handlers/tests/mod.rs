
use std::sync::Arc;
use std::time::Duration;

use axum::{body::Body, http::Request, response::Response, Router};
use serde_json::Value;
use tower::ServiceExt;

use diabetes_risk_domain::health::HealthServiceTrait;
use diabetes_risk_domain::services::{Predictor, RiskEvaluatorService};
use diabetes_risk_domain::testing::MockHealthService;

use crate::api::routes::{create_app, AppState};
use crate::config::AppConfig;

/// Build a router around the given predictor and health service
pub(crate) fn test_app_with(
    predictor: impl Predictor + 'static,
    health: impl HealthServiceTrait + 'static,
    timeout: Duration,
) -> Router {
    let config = AppConfig {
        predictor_timeout: timeout,
        environment: "test".to_string(),
        ..AppConfig::default()
    };
    let evaluator = Arc::new(RiskEvaluatorService::new(Arc::new(predictor)));
    let state = AppState::new(evaluator, Arc::new(health), &config);
    create_app(state, &config)
}

/// Build a router around the given predictor with a healthy model
pub(crate) fn test_app(predictor: impl Predictor + 'static) -> Router {
    test_app_with(predictor, MockHealthService::new(), Duration::from_secs(5))
}

pub(crate) async fn send(app: Router, request: Request<Body>) -> (Response, Value) {
    let response = app.oneshot(request).await.unwrap();
    let (parts, body) = response.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (Response::from_parts(parts, Body::empty()), json)
}

pub(crate) fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub(crate) fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
