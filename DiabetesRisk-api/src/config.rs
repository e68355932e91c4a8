//! Server configuration loaded from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use axum::http::HeaderValue;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable holds a value that cannot be parsed
    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port the HTTP server listens on (`PORT`)
    pub port: u16,
    /// Path to the model artifact (`MODEL_PATH`)
    pub model_path: PathBuf,
    /// Upper bound on a single predictor evaluation (`PREDICTOR_TIMEOUT_MS`)
    pub predictor_timeout: Duration,
    /// Deployment environment name reported by the health check (`APP_ENV`)
    pub environment: String,
    /// Allowed CORS origin; any origin when unset (`CORS_ALLOW_ORIGIN`)
    pub cors_allow_origin: Option<HeaderValue>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            model_path: PathBuf::from("models/diabetes_model.json"),
            predictor_timeout: Duration::from_millis(5000),
            environment: "development".to_string(),
            cors_allow_origin: None,
        }
    }
}

impl AppConfig {
    /// Create a configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Create a configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue { name: "PORT", value })?,
            None => defaults.port,
        };

        let predictor_timeout = match lookup("PREDICTOR_TIMEOUT_MS") {
            Some(value) => match value.parse::<u64>() {
                Ok(ms) if ms > 0 => Duration::from_millis(ms),
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: "PREDICTOR_TIMEOUT_MS",
                        value,
                    })
                }
            },
            None => defaults.predictor_timeout,
        };

        // A restrictive setting that cannot be honored must not widen access
        let cors_allow_origin = match lookup("CORS_ALLOW_ORIGIN").filter(|o| !o.is_empty()) {
            Some(value) => match HeaderValue::from_str(&value) {
                Ok(origin) => Some(origin),
                Err(_) => {
                    return Err(ConfigError::InvalidValue {
                        name: "CORS_ALLOW_ORIGIN",
                        value,
                    })
                }
            },
            None => None,
        };

        Ok(Self {
            port,
            model_path: lookup("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.model_path),
            predictor_timeout,
            environment: lookup("APP_ENV").unwrap_or(defaults.environment),
            cors_allow_origin,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.model_path, PathBuf::from("models/diabetes_model.json"));
        assert_eq!(config.predictor_timeout, Duration::from_secs(5));
        assert_eq!(config.environment, "development");
        assert!(config.cors_allow_origin.is_none());
    }

    #[test]
    fn test_values_from_environment() {
        let config = AppConfig::from_lookup(lookup(&[
            ("PORT", "8080"),
            ("MODEL_PATH", "/srv/model.json"),
            ("PREDICTOR_TIMEOUT_MS", "250"),
            ("APP_ENV", "production"),
            ("CORS_ALLOW_ORIGIN", "https://example.org"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.model_path, PathBuf::from("/srv/model.json"));
        assert_eq!(config.predictor_timeout, Duration::from_millis(250));
        assert_eq!(config.environment, "production");
        assert_eq!(
            config.cors_allow_origin,
            Some(HeaderValue::from_static("https://example.org"))
        );
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[("PORT", "not-a-port")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_invalid_cors_origin_is_rejected() {
        let vars = [("CORS_ALLOW_ORIGIN", "https://good.example\n")];
        let err = AppConfig::from_lookup(lookup(&vars)).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { name: "CORS_ALLOW_ORIGIN", .. }
        ));
    }

    #[test]
    fn test_empty_cors_origin_means_any() {
        let config = AppConfig::from_lookup(lookup(&[("CORS_ALLOW_ORIGIN", "")])).unwrap();
        assert!(config.cors_allow_origin.is_none());
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        assert!(AppConfig::from_lookup(lookup(&[("PREDICTOR_TIMEOUT_MS", "0")])).is_err());
    }
}
