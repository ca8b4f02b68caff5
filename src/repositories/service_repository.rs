use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use super::latency::SimulatedLatency;
use super::seed;
use crate::models::{RepositoryError, RepositoryResult, Service};

/// Data access for service listings
#[async_trait]
pub trait ServiceRepository: Send + Sync {
    /// Every listing in the catalogue, in insertion order
    async fn find_all(&self) -> RepositoryResult<Vec<Service>>;

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Service>>;

    /// Store a new listing; ids must be unique
    async fn create(&self, service: Service) -> RepositoryResult<Service>;
}

/// In-memory catalogue standing in for a remote listings API
pub struct InMemoryServiceRepository {
    services: RwLock<Vec<Service>>,
    latency: SimulatedLatency,
}

impl InMemoryServiceRepository {
    /// Repository preloaded with the mock catalogue
    pub fn new(latency: SimulatedLatency) -> Self {
        Self::with_services(seed::services(), latency)
    }

    pub fn with_services(services: Vec<Service>, latency: SimulatedLatency) -> Self {
        Self {
            services: RwLock::new(services),
            latency,
        }
    }
}

#[async_trait]
impl ServiceRepository for InMemoryServiceRepository {
    #[instrument(skip(self))]
    async fn find_all(&self) -> RepositoryResult<Vec<Service>> {
        self.latency.before_read().await;
        let services = self.services.read().await.clone();
        debug!("Loaded {} services", services.len());
        Ok(services)
    }

    #[instrument(skip(self), fields(service_id = %id))]
    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Service>> {
        self.latency.before_read().await;
        let services = self.services.read().await;
        Ok(services.iter().find(|s| s.id == id).cloned())
    }

    #[instrument(skip(self, service), fields(service_id = %service.id))]
    async fn create(&self, service: Service) -> RepositoryResult<Service> {
        self.latency.before_write().await;
        let mut services = self.services.write().await;
        if services.iter().any(|s| s.id == service.id) {
            return Err(RepositoryError::ConstraintViolation {
                message: format!("service {} already exists", service.id),
            });
        }
        services.push(service.clone());
        info!("Service listing stored");
        Ok(service)
    }
}
