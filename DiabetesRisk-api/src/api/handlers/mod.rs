pub mod assessment;
pub mod health;
pub mod model;

// Tests module
#[cfg(test)]
mod tests;

// Re-export handlers for easier imports
pub use assessment::{create_assessment, list_risk_factors};
pub use health::health_check;
pub use model::get_model_info;
