use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Configure Swagger UI endpoints
pub fn configure_swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}

// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::api::handlers::health::health_check,

        // Assessment endpoints
        crate::api::handlers::assessment::create_assessment,
        crate::api::handlers::assessment::list_risk_factors,

        // Model endpoints
        crate::api::handlers::model::get_model_info
    ),
    components(
        schemas(
            // Entities
            crate::entities::assessment::PublicAssessmentRequest,
            crate::entities::assessment::PublicRiskAssessment,
            crate::entities::common::ErrorResponse,

            // Health handlers
            crate::api::handlers::health::HealthResponse,
            crate::api::handlers::health::ComponentStatus,
            crate::api::handlers::health::ComponentHealthStatus,

            // Domain types
            diabetes_risk_domain::entities::RiskLabel,
            diabetes_risk_domain::services::RiskFactorDefinition,
            diabetes_risk_domain::services::ModelInfo
        )
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "assessment", description = "Diabetes risk assessment endpoints"),
        (name = "model", description = "Loaded risk model metadata")
    ),
    info(
        title = "DiabetesRisk API",
        version = "0.1.0",
        description = "Diabetes risk assessment from routine health metrics",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        ),
    ),
    servers(
        (url = "/", description = "Local development server")
    )
)]
pub struct ApiDoc;
