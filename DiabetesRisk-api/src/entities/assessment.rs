use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use diabetes_risk_domain::entities::RiskLabel;

/// Request payload for a diabetes risk assessment
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct PublicAssessmentRequest {
    /// Number of times pregnant
    #[validate(range(min = 0, max = 20, message = "Pregnancies must be between 0 and 20"))]
    #[schema(minimum = 0, maximum = 20, example = 1)]
    pub pregnancies: i32,

    /// Plasma glucose concentration (mg/dL)
    #[validate(range(min = 0, max = 200, message = "Glucose must be between 0 and 200"))]
    #[schema(minimum = 0, maximum = 200, example = 85)]
    pub glucose: i32,

    /// Diastolic blood pressure (mmHg)
    #[validate(range(min = 0, max = 130, message = "Blood pressure must be between 0 and 130"))]
    #[schema(minimum = 0, maximum = 130, example = 66)]
    pub blood_pressure: i32,

    /// Triceps skinfold thickness (mm)
    #[validate(range(min = 0, max = 100, message = "Skin thickness must be between 0 and 100"))]
    #[schema(minimum = 0, maximum = 100, example = 29)]
    pub skin_thickness: i32,

    /// 2-hour serum insulin (μU/mL)
    #[validate(range(min = 0, max = 300, message = "Insulin must be between 0 and 300"))]
    #[schema(minimum = 0, maximum = 300, example = 0)]
    pub insulin: i32,

    /// Body mass index
    #[validate(range(min = 0.0, max = 70.0, message = "BMI must be between 0 and 70"))]
    #[schema(minimum = 0.0, maximum = 70.0, example = 26.6)]
    pub bmi: f64,

    /// Diabetes pedigree function
    #[validate(range(min = 0.0, max = 3.0, message = "Diabetes pedigree must be between 0 and 3"))]
    #[schema(minimum = 0.0, maximum = 3.0, example = 0.351)]
    pub diabetes_pedigree: f64,

    /// Age in years
    #[validate(range(min = 0, max = 100, message = "Age must be between 0 and 100"))]
    #[schema(minimum = 0, maximum = 100, example = 31)]
    pub age: i32,
}

/// Public representation of a risk assessment
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PublicRiskAssessment {
    /// Identifier of this assessment response
    pub assessment_id: Uuid,

    /// When the assessment was produced
    pub generated_at: DateTime<Utc>,

    /// Binary risk decision
    pub label: RiskLabel,

    /// Probability of high risk in percent, unrounded
    pub probability_percent: f64,

    /// Probability rounded to one decimal place, e.g. "72.0%"
    pub probability_display: String,

    /// Whole-number risk score (truncated percent)
    pub risk_score: u8,

    /// Headline for the result
    pub message: String,

    /// Advisory for the user
    pub advice: String,

    /// Risk factor name to presence, in catalogue order
    #[schema(value_type = Object)]
    pub risk_factors: IndexMap<String, bool>,
}
