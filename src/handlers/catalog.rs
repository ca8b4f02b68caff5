use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use tracing::{info, instrument};

use super::api::{ApiResult, ApiState};
use crate::models::{CategoryInfo, SearchParams, Service, ServiceForm, ServiceListResponse};

/// Filter and sort the catalogue
#[instrument(name = "search_services", skip(state, params), fields(
    query = params.q.as_deref(),
    category = params.category.as_deref(),
    sort = params.sort.as_deref(),
))]
pub async fn search_services(
    State(state): State<ApiState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<ServiceListResponse> {
    info!("Searching services");

    state
        .traced("search_services", state.catalog_service.search(&params))
        .await
}

#[instrument(name = "get_service", skip(state), fields(service_id = %service_id))]
pub async fn get_service(
    State(state): State<ApiState>,
    Path(service_id): Path<String>,
) -> ApiResult<Service> {
    state
        .traced("get_service", state.catalog_service.get_service(&service_id))
        .await
}

/// Publish a new listing from the create-service form
#[instrument(name = "create_service", skip(state, form), fields(title = %form.title))]
pub async fn create_service(
    State(state): State<ApiState>,
    Json(form): Json<ServiceForm>,
) -> Result<(StatusCode, Json<Service>), super::api::ApiError> {
    crate::info_with_trace!("Creating service listing");

    state
        .traced("create_service", state.catalog_service.create_service(form))
        .await
        .map(|service| (StatusCode::CREATED, service))
}

#[instrument(name = "list_categories", skip(state))]
pub async fn list_categories(State(state): State<ApiState>) -> Json<&'static [CategoryInfo]> {
    Json(state.catalog_service.categories())
}

/// Reload the catalogue snapshot, superseding any load still in flight
#[instrument(name = "refresh_catalog", skip(state))]
pub async fn refresh_catalog(State(state): State<ApiState>) -> ApiResult<Vec<Service>> {
    state
        .traced("refresh_catalog", state.catalog_service.refresh())
        .await
}
