use axum::{
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;

use super::{accounts, catalog, messages, orders, reviews};
use crate::models::{RepositoryError, ServiceError, ServiceResult};
use crate::observability::{Metrics, OperationTracer};
use crate::services::{
    AccountService, CatalogService, MessageService, OrderService, ReviewService,
};

/// Error half of every API handler result
pub type ApiError = (StatusCode, Json<Value>);

pub type ApiResult<T> = Result<Json<T>, ApiError>;

/// Shared application state containing all services
#[derive(Clone)]
pub struct ApiState {
    pub catalog_service: Arc<CatalogService>,
    pub order_service: Arc<OrderService>,
    pub message_service: Arc<MessageService>,
    pub review_service: Arc<ReviewService>,
    pub account_service: Arc<AccountService>,
    pub metrics: Arc<Metrics>,
    tracer: OperationTracer,
}

impl ApiState {
    pub fn new(
        catalog_service: Arc<CatalogService>,
        order_service: Arc<OrderService>,
        message_service: Arc<MessageService>,
        review_service: Arc<ReviewService>,
        account_service: Arc<AccountService>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            catalog_service,
            order_service,
            message_service,
            review_service,
            account_service,
            tracer: OperationTracer::new(metrics.clone()),
            metrics,
        }
    }

    /// Run a service call under `operation`, counting rejected forms, and map its error
    pub(crate) async fn traced<T, F>(&self, operation: &'static str, future: F) -> ApiResult<T>
    where
        F: Future<Output = ServiceResult<T>>,
    {
        match self.tracer.trace_operation(operation, future).await {
            Ok(value) => Ok(Json(value)),
            Err(err) => {
                if matches!(err, ServiceError::InvalidFields { .. }) {
                    self.metrics.record_validation_failure(operation);
                }
                Err(service_error_to_response(err))
            }
        }
    }
}

/// Create API router with all endpoints
pub fn create_api_router(state: ApiState) -> Router {
    Router::new()
        // Catalogue
        .route(
            "/api/services",
            get(catalog::search_services).post(catalog::create_service),
        )
        .route("/api/services/:service_id", get(catalog::get_service))
        .route("/api/categories", get(catalog::list_categories))
        .route("/api/catalog/refresh", post(catalog::refresh_catalog))
        // Orders
        .route("/api/orders", get(orders::list_orders))
        .route("/api/orders/:order_id", get(orders::get_order))
        .route("/api/orders/:order_id/status", post(orders::update_order_status))
        // Messages
        .route(
            "/api/conversations",
            get(messages::list_conversations).post(messages::start_conversation),
        )
        .route(
            "/api/conversations/:conversation_id/messages",
            get(messages::open_conversation).post(messages::send_message),
        )
        .route("/api/recipients/:recipient_id", get(messages::get_recipient))
        // Reviews
        .route("/api/reviews", get(reviews::list_reviews))
        .route(
            "/api/reviews/pending/:order_id",
            get(reviews::pending_review),
        )
        .route("/api/reviews/:order_id", post(reviews::submit_review))
        // Accounts
        .route("/api/accounts", post(accounts::register))
        .route("/api/profiles/:profile_id", get(accounts::get_profile))
        .route("/api/dashboard", get(accounts::dashboard))
        .route(
            "/api/profile/settings",
            get(accounts::get_settings).put(accounts::update_settings),
        )
        .with_state(state)
}

/// Parse an optional enum query parameter, falling back to its default when absent
pub(crate) fn parse_param<T>(value: Option<&str>) -> Result<T, ApiError>
where
    T: FromStr<Err = String> + Default,
{
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(raw) => raw
            .parse()
            .map_err(|message| service_error_to_response(ServiceError::ValidationError { message })),
        None => Ok(T::default()),
    }
}

/// Convert service errors to HTTP responses
pub(crate) fn service_error_to_response(err: ServiceError) -> ApiError {
    let status = match &err {
        ServiceError::ServiceNotFound { .. }
        | ServiceError::OrderNotFound { .. }
        | ServiceError::ConversationNotFound { .. }
        | ServiceError::RecipientNotFound { .. }
        | ServiceError::ProfileNotFound { .. } => StatusCode::NOT_FOUND,
        ServiceError::InvalidFields { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        ServiceError::ValidationError { .. } => StatusCode::BAD_REQUEST,
        ServiceError::InvalidStatusTransition { .. } | ServiceError::ReviewNotPending { .. } => {
            StatusCode::CONFLICT
        }
        ServiceError::Load { .. } => StatusCode::SERVICE_UNAVAILABLE,
        ServiceError::Repository { source } => match source {
            RepositoryError::NotFound => StatusCode::NOT_FOUND,
            RepositoryError::ConstraintViolation { .. } => StatusCode::CONFLICT,
        },
    };

    let timestamp = chrono::Utc::now().to_rfc3339();
    let body = match err {
        ServiceError::InvalidFields { fields } => json!({
            "error": "Validation failed",
            "fields": fields,
            "timestamp": timestamp,
        }),
        ServiceError::Repository {
            source: RepositoryError::NotFound,
        } => json!({
            "error": "Resource not found",
            "timestamp": timestamp,
        }),
        other => json!({
            "error": other.to_string(),
            "timestamp": timestamp,
        }),
    };

    (status, Json(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FieldErrors, OrderStatus, OrderTab, ReviewTab};

    #[test]
    fn test_not_found_maps_to_404() {
        let (status, Json(body)) = service_error_to_response(ServiceError::OrderNotFound {
            id: "order-9".to_string(),
        });

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Order not found: order-9");
        assert!(body["timestamp"].is_string());
    }

    #[test]
    fn test_field_errors_map_to_422_with_fields() {
        let mut fields = FieldErrors::new();
        fields.insert("email", "Email is invalid");

        let (status, Json(body)) = service_error_to_response(ServiceError::InvalidFields { fields });

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["fields"]["email"], "Email is invalid");
    }

    #[test]
    fn test_conflicts_and_outages() {
        let (status, _) = service_error_to_response(ServiceError::InvalidStatusTransition {
            order_id: "order-120".to_string(),
            from: OrderStatus::Completed,
            to: OrderStatus::Cancelled,
        });
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = service_error_to_response(ServiceError::Load {
            message: "catalog offline".to_string(),
        });
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_parse_param() {
        assert_eq!(parse_param::<OrderTab>(None).unwrap(), OrderTab::Active);
        assert_eq!(parse_param::<OrderTab>(Some("")).unwrap(), OrderTab::Active);
        assert_eq!(
            parse_param::<ReviewTab>(Some("Pending")).unwrap(),
            ReviewTab::Pending
        );

        let (status, _) = parse_param::<OrderTab>(Some("archived")).unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
