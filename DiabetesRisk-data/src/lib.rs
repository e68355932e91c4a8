// DiabetesRisk Data
// This crate handles model artifacts and their process-wide storage

// Error types
pub mod errors;

// Model artifact schema and scoring
pub mod models;

// Single-assignment model store
pub mod store;

pub use errors::ModelError;
pub use models::ModelArtifact;
