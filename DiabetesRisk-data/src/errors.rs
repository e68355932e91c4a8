use thiserror::Error;

/// Error type for model artifact loading and access
#[derive(Error, Debug)]
pub enum ModelError {
    /// The artifact file could not be read
    #[error("Failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),

    /// The artifact is not valid JSON or does not match the schema
    #[error("Failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    /// The artifact parsed but its parameters are inconsistent
    #[error("Invalid model artifact: {0}")]
    Schema(String),

    /// The artifact was trained on a different feature layout
    #[error("Feature mismatch: expected {expected:?}, found {found:?}")]
    FeatureMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// The feature vector handed to the model has the wrong length
    #[error("Expected {expected} features, got {found}")]
    InputLength { expected: usize, found: usize },

    /// Model store already holds a model
    #[error("Model store is already initialized")]
    AlreadyInitialized,

    /// Model store has not been initialized yet
    #[error("Model store is not initialized")]
    NotInitialized,
}

impl ModelError {
    pub(crate) fn schema(message: impl Into<String>) -> Self {
        ModelError::Schema(message.into())
    }
}
