//! Domain layer health check functionality

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use health_dashboard_data::repository::ReadingRepositoryTrait;

use crate::auth::credentials::CredentialVerifier;

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
    Healthy,
    Degraded,
    Unhealthy,
}

/// Represents a health component with status and optional details
#[derive(Debug, Clone)]
pub struct HealthComponent {
    pub status: ComponentStatus,
    pub details: Option<String>,
}

impl HealthComponent {
    fn healthy(details: Option<String>) -> Self {
        Self {
            status: ComponentStatus::Healthy,
            details,
        }
    }

    fn unhealthy(details: String) -> Self {
        Self {
            status: ComponentStatus::Unhealthy,
            details: Some(details),
        }
    }
}

/// Represents the overall health of the system
#[derive(Debug, Clone)]
pub struct SystemHealth {
    pub status: SystemStatus,
    /// Component name to health
    pub components: HashMap<String, HealthComponent>,
}

impl SystemHealth {
    /// Aggregate components: any unhealthy one makes the system unhealthy,
    /// otherwise any degraded one makes it degraded
    pub fn from_components(components: HashMap<String, HealthComponent>) -> Self {
        let status = if components.values().any(|c| c.status == ComponentStatus::Unhealthy) {
            SystemStatus::Unhealthy
        } else if components.values().any(|c| c.status == ComponentStatus::Degraded) {
            SystemStatus::Degraded
        } else {
            SystemStatus::Healthy
        };

        Self { status, components }
    }
}

/// Trait for health services
#[async_trait]
pub trait HealthServiceTrait: Send + Sync + std::fmt::Debug {
    /// Get the overall system health
    async fn get_system_health(&self) -> SystemHealth;
}

/// Health of the dashboard: api, credential store, reading store and save endpoint config
pub struct DashboardHealthService<R> {
    credentials: Arc<dyn CredentialVerifier>,
    readings: R,
    save_endpoint: Option<String>,
}

impl<R> std::fmt::Debug for DashboardHealthService<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardHealthService")
            .field("save_endpoint", &self.save_endpoint)
            .finish_non_exhaustive()
    }
}

impl<R: ReadingRepositoryTrait + Send + Sync> DashboardHealthService<R> {
    pub fn new(credentials: Arc<dyn CredentialVerifier>, readings: R, save_endpoint: Option<String>) -> Self {
        Self {
            credentials,
            readings,
            save_endpoint,
        }
    }
}

#[async_trait]
impl<R: ReadingRepositoryTrait + Send + Sync> HealthServiceTrait for DashboardHealthService<R> {
    async fn get_system_health(&self) -> SystemHealth {
        let mut components = HashMap::new();

        components.insert("api".to_string(), HealthComponent::healthy(None));

        let credential_store = match self.credentials.user_count() {
            Ok(count) => HealthComponent::healthy(Some(format!("{} registered users", count))),
            Err(e) => HealthComponent::unhealthy(e.to_string()),
        };
        components.insert("credential_store".to_string(), credential_store);

        let reading_store = match self.readings.count().await {
            Ok(count) => HealthComponent::healthy(Some(format!("{} stored readings", count))),
            Err(e) => HealthComponent::unhealthy(e.to_string()),
        };
        components.insert("reading_store".to_string(), reading_store);

        let save_endpoint = match &self.save_endpoint {
            Some(url) => HealthComponent::healthy(Some(format!("Forwarding readings to {}", url))),
            None => HealthComponent::healthy(Some("Remote saving disabled".to_string())),
        };
        components.insert("save_endpoint".to_string(), save_endpoint);

        SystemHealth::from_components(components)
    }
}

/// Mock health service for testing
#[cfg(any(test, feature = "mock"))]
pub mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    pub struct MockHealthService {
        components: HashMap<String, HealthComponent>,
    }

    impl Default for MockHealthService {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockHealthService {
        /// A service reporting a healthy api component only
        pub fn new() -> Self {
            let mut components = HashMap::new();
            components.insert("api".to_string(), HealthComponent::healthy(None));
            Self { components }
        }

        pub fn with_component(mut self, name: &str, status: ComponentStatus, details: Option<String>) -> Self {
            self.components
                .insert(name.to_string(), HealthComponent { status, details });
            self
        }
    }

    #[async_trait]
    impl HealthServiceTrait for MockHealthService {
        async fn get_system_health(&self) -> SystemHealth {
            SystemHealth::from_components(self.components.clone())
        }
    }
}

#[cfg(test)]
mod health_tests {
    use super::tests::MockHealthService;
    use super::*;
    use crate::auth::credentials::InMemoryCredentialStore;
    use health_dashboard_data::repository::tests::MockReadingRepository;
    use health_dashboard_data::repository::ReadingRepository;

    #[tokio::test]
    async fn test_dashboard_health_lists_all_components() {
        let service = DashboardHealthService::new(
            Arc::new(InMemoryCredentialStore::seeded()),
            ReadingRepository::new(),
            Some("http://localhost/save".to_string()),
        );

        let health = service.get_system_health().await;

        assert_eq!(health.status, SystemStatus::Healthy);
        for name in ["api", "credential_store", "reading_store", "save_endpoint"] {
            assert!(health.components.contains_key(name), "missing component {}", name);
        }
        assert_eq!(
            health.components["credential_store"].details.as_deref(),
            Some("1 registered users")
        );
    }

    #[tokio::test]
    async fn test_failing_reading_store_is_unhealthy() {
        let service = DashboardHealthService::new(
            Arc::new(InMemoryCredentialStore::seeded()),
            MockReadingRepository::failing(),
            None,
        );

        let health = service.get_system_health().await;

        assert_eq!(health.status, SystemStatus::Unhealthy);
        assert_eq!(health.components["reading_store"].status, ComponentStatus::Unhealthy);
        assert_eq!(
            health.components["save_endpoint"].details.as_deref(),
            Some("Remote saving disabled")
        );
    }

    #[tokio::test]
    async fn test_degraded_component_degrades_system() {
        let service = MockHealthService::new().with_component("save_endpoint", ComponentStatus::Degraded, None);

        assert_eq!(service.get_system_health().await.status, SystemStatus::Degraded);
    }
}
