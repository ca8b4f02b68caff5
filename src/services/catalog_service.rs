use std::sync::Arc;
use tracing::instrument;

use super::loader::{LoadOutcome, LoadState, Loader};
use crate::models::{
    filter_and_sort, parse_price, service_categories, CategoryInfo, SearchCriteria, SearchParams,
    Service, ServiceError, ServiceForm, ServiceListResponse, ServiceResult, Validate,
    CURRENT_USER_NAME,
};
use crate::repositories::ServiceRepository;

/// Search, browse and publish service listings
pub struct CatalogService {
    repository: Arc<dyn ServiceRepository>,
    snapshot: Loader<Vec<Service>>,
}

impl CatalogService {
    pub fn new(repository: Arc<dyn ServiceRepository>) -> Self {
        Self {
            repository,
            snapshot: Loader::new("catalog"),
        }
    }

    /// Loader holding the listing snapshot; subscribe to follow reloads
    pub fn snapshot(&self) -> &Loader<Vec<Service>> {
        &self.snapshot
    }

    /// Filter and sort the catalogue with the given query-string parameters
    #[instrument(skip(self, params))]
    pub async fn search(&self, params: &SearchParams) -> ServiceResult<ServiceListResponse> {
        let criteria = SearchCriteria::from_params(params);
        crate::info_with_trace!(criteria = ?criteria, "Searching services");

        let services = self.listings().await?;
        let services = filter_and_sort(&services, &criteria);
        let total_count = services.len();

        crate::info_with_trace!("Found {} services matching criteria", total_count);

        Ok(ServiceListResponse {
            services,
            total_count,
            criteria,
        })
    }

    #[instrument(skip(self), fields(service_id = %id))]
    pub async fn get_service(&self, id: &str) -> ServiceResult<Service> {
        if id.trim().is_empty() {
            return Err(ServiceError::ValidationError {
                message: "Service ID cannot be empty".to_string(),
            });
        }

        match self.repository.find_by_id(id).await? {
            Some(service) => Ok(service),
            None => {
                crate::warn_with_trace!("Service not found");
                Err(ServiceError::ServiceNotFound { id: id.to_string() })
            }
        }
    }

    /// Validate the creation form and publish the listing under the current user
    #[instrument(skip(self, form), fields(title = %form.title, category = %form.category))]
    pub async fn create_service(&self, form: ServiceForm) -> ServiceResult<Service> {
        crate::info_with_trace!("Creating service listing");

        form.validate()?;
        let price = parse_price(&form.price).map_err(|message| ServiceError::ValidationError {
            message: message.to_string(),
        })?;

        let service = Service::from_form(form, price, CURRENT_USER_NAME);
        let created = self.repository.create(service).await?;

        if let Err(e) = self.refresh().await {
            crate::warn_with_trace!(error = %e, "Catalog refresh after create failed");
        }

        crate::info_with_trace!("Service created successfully with ID: {}", created.id);
        Ok(created)
    }

    /// Reload the listing snapshot from the repository
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> ServiceResult<Vec<Service>> {
        let repository = self.repository.clone();
        let outcome = self
            .snapshot
            .load(|| async move { repository.find_all().await })
            .await;

        match outcome {
            LoadOutcome::Ready(services) => Ok(services),
            LoadOutcome::Failed(message) => Err(ServiceError::Load { message }),
            // A newer reload won; report whatever it settles on
            LoadOutcome::Stale => Self::settled_listings(self.snapshot.settled().await),
        }
    }

    pub fn categories(&self) -> &'static [CategoryInfo] {
        service_categories()
    }

    async fn listings(&self) -> ServiceResult<Vec<Service>> {
        match self.snapshot.current() {
            Some(services) => Ok(services),
            None => self.refresh().await,
        }
    }

    fn settled_listings(state: LoadState<Vec<Service>>) -> ServiceResult<Vec<Service>> {
        match state {
            LoadState::Ready(services) => Ok(services),
            LoadState::Failed(message) => Err(ServiceError::Load { message }),
            LoadState::Idle | LoadState::Loading => Err(ServiceError::Load {
                message: "catalog load was cancelled".to_string(),
            }),
        }
    }
}
