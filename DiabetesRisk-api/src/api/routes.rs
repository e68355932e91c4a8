use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use tracing::debug;

use diabetes_risk_domain::health::HealthServiceTrait;
use diabetes_risk_domain::services::{
    create_default_risk_evaluator_service, RiskEvaluatorError, RiskEvaluatorServiceTrait,
};

use crate::api::handlers::{assessment, health, model};
use crate::config::AppConfig;
use crate::openapi::configure_swagger_routes;

/// Shared risk evaluator used by the handlers
pub type RiskEvaluator = Arc<dyn RiskEvaluatorServiceTrait>;

/// Shared health service used by the health check
pub type HealthService = Arc<dyn HealthServiceTrait + Send + Sync>;

/// State shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Risk evaluator over the loaded predictor
    pub evaluator: RiskEvaluator,
    /// Health reporting service
    pub health: HealthService,
    /// Upper bound on one evaluation
    pub predictor_timeout: Duration,
    /// Deployment environment name
    pub environment: String,
}

impl AppState {
    /// Create handler state from services and configuration
    pub fn new(evaluator: RiskEvaluator, health: HealthService, config: &AppConfig) -> Self {
        Self {
            evaluator,
            health,
            predictor_timeout: config.predictor_timeout,
            environment: config.environment.clone(),
        }
    }
}

/// Create the application router using the process-wide model
pub fn create_application(config: &AppConfig) -> Result<Router, RiskEvaluatorError> {
    let evaluator: RiskEvaluator = Arc::new(create_default_risk_evaluator_service()?);
    let health_service = health::create_health_service();

    Ok(create_app(AppState::new(evaluator, health_service, config), config))
}

/// Create the application router from explicit state
pub fn create_app(state: AppState, config: &AppConfig) -> Router {
    debug!("Creating application router");

    // Assessments carry health data, so responses must not be cached
    let api_routes = Router::new()
        .route("/assessments", post(assessment::create_assessment))
        .route("/risk-factors", get(assessment::list_risk_factors))
        .route("/model", get(model::get_model_info))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ));

    debug!("API routes configured");

    let public_routes = Router::new().route("/health", get(health::health_check));

    debug!("Public routes configured");

    let app = Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .with_state(state);

    debug!("API routes nested");

    // Configure the Swagger UI using the helper function
    let app = add_swagger_ui(app);

    debug!("Swagger UI merged");

    // Initialize health check service startup time
    health::initialize_server_start_time();

    app.layer(cors_layer(config.cors_allow_origin.clone()))
        .layer(TraceLayer::new_for_http())
}

/// Add Swagger UI to the router
pub fn add_swagger_ui(app: Router) -> Router {
    // Get Swagger UI routes
    let swagger = configure_swagger_routes();

    // Merge Swagger UI with the app router
    app.merge(swagger)
}

/// CORS policy: the configured origin, or any origin when none is set
fn cors_layer(allow_origin: Option<HeaderValue>) -> CorsLayer {
    let origin = match allow_origin {
        Some(value) => AllowOrigin::exact(value),
        None => AllowOrigin::from(Any),
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}
