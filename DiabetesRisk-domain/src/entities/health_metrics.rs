use serde::{Deserialize, Serialize};
use validator::Validate;

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// Number of features the predictor consumes
pub const FEATURE_COUNT: usize = 8;

/// Feature names in the order the predictor expects them
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "pregnancies",
    "glucose",
    "blood_pressure",
    "skin_thickness",
    "insulin",
    "bmi",
    "diabetes_pedigree",
    "age",
];

/// Fixed-order numeric input handed to the predictor
pub type FeatureVector = [f64; FEATURE_COUNT];

/// Health metrics entered for a single assessment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct HealthMetrics {
    /// Number of times pregnant
    #[validate(range(min = 0, max = 20, message = "Pregnancies must be between 0 and 20"))]
    pub pregnancies: i32,

    /// Plasma glucose concentration (mg/dL)
    #[validate(range(min = 0, max = 200, message = "Glucose must be between 0 and 200"))]
    pub glucose: i32,

    /// Diastolic blood pressure (mmHg)
    #[validate(range(min = 0, max = 130, message = "Blood pressure must be between 0 and 130"))]
    pub blood_pressure: i32,

    /// Triceps skinfold thickness (mm)
    #[validate(range(min = 0, max = 100, message = "Skin thickness must be between 0 and 100"))]
    pub skin_thickness: i32,

    /// 2-hour serum insulin (μU/mL)
    #[validate(range(min = 0, max = 300, message = "Insulin must be between 0 and 300"))]
    pub insulin: i32,

    /// Body mass index
    #[validate(range(min = 0.0, max = 70.0, message = "BMI must be between 0 and 70"))]
    pub bmi: f64,

    /// Diabetes pedigree function (genetic predisposition)
    #[validate(range(min = 0.0, max = 3.0, message = "Diabetes pedigree must be between 0 and 3"))]
    pub diabetes_pedigree: f64,

    /// Age in years
    #[validate(range(min = 0, max = 100, message = "Age must be between 0 and 100"))]
    pub age: i32,
}

impl HealthMetrics {
    /// Assemble the metrics into the predictor's feature order
    pub fn to_feature_vector(&self) -> FeatureVector {
        [
            f64::from(self.pregnancies),
            f64::from(self.glucose),
            f64::from(self.blood_pressure),
            f64::from(self.skin_thickness),
            f64::from(self.insulin),
            self.bmi,
            self.diabetes_pedigree,
            f64::from(self.age),
        ]
    }
}
