//! Process-wide model store.
//!
//! The model is loaded once before the server accepts requests and is then
//! shared read-only for the lifetime of the process. The cell can be set
//! exactly once; it is never replaced or cleared.

use std::path::Path;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::{error, info};

use crate::errors::ModelError;
use crate::models::ModelArtifact;

/// Global model used throughout the application
static MODEL: OnceCell<Arc<ModelArtifact>> = OnceCell::new();

/// Load the artifact at `path` and install it as the process-wide model
pub fn initialize_model_store(
    path: impl AsRef<Path>,
    expected_features: &[&str],
) -> Result<Arc<ModelArtifact>, ModelError> {
    if is_model_loaded() {
        return Err(ModelError::AlreadyInitialized);
    }

    let path = path.as_ref();
    let artifact = ModelArtifact::load(path, expected_features).map_err(|e| {
        error!("Failed to load model from {}: {}", path.display(), e);
        e
    })?;

    store_artifact(artifact)
}

fn store_artifact(artifact: ModelArtifact) -> Result<Arc<ModelArtifact>, ModelError> {
    let artifact = Arc::new(artifact);
    MODEL
        .set(artifact.clone())
        .map_err(|_| ModelError::AlreadyInitialized)?;

    info!(
        "Model store initialized with '{}' ({}) version {}",
        artifact.name,
        artifact.kind(),
        artifact.version
    );
    Ok(artifact)
}

/// Get the process-wide model
pub fn get_model() -> Result<Arc<ModelArtifact>, ModelError> {
    MODEL.get().cloned().ok_or(ModelError::NotInitialized)
}

/// Whether the model store has been initialized
pub fn is_model_loaded() -> bool {
    MODEL.get().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEATURES: [&str; 1] = ["glucose"];

    fn write_artifact(tag: &str, json: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "diabetes-risk-store-{}-{}.json",
            tag,
            std::process::id()
        ));
        std::fs::write(&path, json).unwrap();
        path
    }

    // The store is process-global, so the whole lifecycle lives in one test
    #[test]
    fn test_store_is_single_assignment() {
        assert!(!is_model_loaded());
        assert!(matches!(get_model(), Err(ModelError::NotInitialized)));

        // An invalid artifact is rejected before the store is touched
        let invalid = write_artifact(
            "invalid",
            r#"{
                "name": "store-test",
                "version": "1",
                "kind": "tree_ensemble",
                "feature_names": ["glucose"],
                "trees": [{"nodes": [
                    {"type": "split", "feature": 5, "threshold": 1.0, "left": 0, "right": 0}
                ]}]
            }"#,
        );
        let rejected = initialize_model_store(&invalid, &FEATURES);
        let _ = std::fs::remove_file(&invalid);
        assert!(matches!(rejected, Err(ModelError::Schema(_))));
        assert!(!is_model_loaded());

        let valid = write_artifact(
            "valid",
            r#"{
                "name": "store-test",
                "version": "1",
                "kind": "logistic_regression",
                "feature_names": ["glucose"],
                "coefficients": [0.01],
                "intercept": -1.0
            }"#,
        );
        let installed = initialize_model_store(&valid, &FEATURES);
        let again = initialize_model_store(&valid, &FEATURES);
        let _ = std::fs::remove_file(&valid);

        assert_eq!(installed.unwrap().name, "store-test");
        assert!(is_model_loaded());
        assert_eq!(get_model().unwrap().name, "store-test");
        assert!(matches!(again, Err(ModelError::AlreadyInitialized)));
    }
}
