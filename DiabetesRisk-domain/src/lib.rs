// DiabetesRisk Domain
// This crate contains the business logic for the DiabetesRisk application

// Services that implement business logic
pub mod services;

// Domain entities
pub mod entities;

// Health checks and system status
pub mod health;

// Re-export the model store from the data layer for convenience
pub use diabetes_risk_data::store;

// Testing utilities - only available with mock feature
#[cfg(feature = "mock")]
pub mod testing;
