//! Domain layer health check functionality
//! This module provides health check services for the application

use diabetes_risk_data::store;
use std::collections::HashMap;
use async_trait::async_trait;

/// System health status
#[derive(Debug, Clone, PartialEq)]
pub enum SystemStatus {
    /// All components are healthy
    Healthy,
    /// Some components are degraded but the system is functional
    Degraded,
    /// System is not functioning properly
    Unhealthy,
}

/// Component health status
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentStatus {
    /// Component is functioning normally
    Healthy,
    /// Component is functioning but with reduced performance
    Degraded,
    /// Component is not functioning
    Unhealthy,
}

/// Represents a health component with status and optional details
#[derive(Debug, Clone)]
pub struct HealthComponent {
    /// Status of the component
    pub status: ComponentStatus,
    /// Optional details about the component status
    pub details: Option<String>,
}

/// Represents the overall health of the system
#[derive(Debug, Clone)]
pub struct SystemHealth {
    /// Overall system status
    pub status: SystemStatus,
    /// Map of component names to their health status
    pub components: HashMap<String, HealthComponent>,
}

impl SystemHealth {
    /// Build a report whose overall status is the worst component status
    pub fn from_components(components: HashMap<String, HealthComponent>) -> Self {
        let status = if components.values().any(|c| c.status == ComponentStatus::Unhealthy) {
            SystemStatus::Unhealthy
        } else if components.values().any(|c| c.status == ComponentStatus::Degraded) {
            SystemStatus::Degraded
        } else {
            SystemStatus::Healthy
        };

        SystemHealth { status, components }
    }
}

/// Trait for health services
#[async_trait]
pub trait HealthServiceTrait: Send + Sync + std::fmt::Debug {
    /// Get the overall system health
    async fn get_system_health(&self) -> SystemHealth;
}

/// Check whether the process-wide model store holds a model
///
/// Returns a short description of the loaded model, or the reason it is
/// unavailable.
pub async fn check_model_status() -> Result<String, String> {
    store::get_model()
        .map(|model| format!("{} {} ({})", model.name, model.version, model.kind()))
        .map_err(|e| e.to_string())
}

/// Get overall system health
pub async fn get_system_health() -> SystemHealth {
    let model_component = match check_model_status().await {
        Ok(description) => HealthComponent {
            status: ComponentStatus::Healthy,
            details: Some(description),
        },
        Err(e) => HealthComponent {
            status: ComponentStatus::Unhealthy,
            details: Some(e),
        },
    };

    let api_component = HealthComponent {
        status: ComponentStatus::Healthy,
        details: None,
    };

    SystemHealth::from_components(
        vec![
            ("model".to_string(), model_component),
            ("api".to_string(), api_component),
        ]
        .into_iter()
        .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(status: ComponentStatus) -> HealthComponent {
        HealthComponent { status, details: None }
    }

    #[tokio::test]
    async fn test_get_system_health() {
        let health = get_system_health().await;
        // The model store is never initialized in domain tests
        assert!(health.components.contains_key("model"));
        assert!(health.components.contains_key("api"));
        assert_eq!(health.status, SystemStatus::Unhealthy);
    }

    #[test]
    fn test_worst_component_wins() {
        let mut components = HashMap::new();
        components.insert("api".to_string(), component(ComponentStatus::Healthy));
        assert_eq!(SystemHealth::from_components(components.clone()).status, SystemStatus::Healthy);

        components.insert("model".to_string(), component(ComponentStatus::Degraded));
        assert_eq!(SystemHealth::from_components(components.clone()).status, SystemStatus::Degraded);

        components.insert("cache".to_string(), component(ComponentStatus::Unhealthy));
        assert_eq!(SystemHealth::from_components(components).status, SystemStatus::Unhealthy);
    }
}
