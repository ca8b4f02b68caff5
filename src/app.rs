use axum::{extract::DefaultBodyLimit, middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::timeout::TimeoutLayer;

use crate::config::{MockConfig, ServerConfig};
use crate::handlers::{
    api::{create_api_router, ApiState},
    cors_middleware, health_check, metrics_handler, request_validation_middleware,
    security_headers_middleware, RequestLimits,
};
use crate::observability::{observability_middleware, Metrics};
use crate::repositories::{
    InMemoryAccountRepository, InMemoryConversationRepository, InMemoryOrderRepository,
    InMemoryProfileRepository, InMemoryReviewRepository, InMemoryServiceRepository,
    SimulatedLatency,
};
use crate::services::{
    AccountService, CatalogService, MessageService, OrderService, ReviewService,
};

/// Every service the HTTP layer dispatches to
#[derive(Clone)]
pub struct AppServices {
    pub catalog: Arc<CatalogService>,
    pub orders: Arc<OrderService>,
    pub messages: Arc<MessageService>,
    pub reviews: Arc<ReviewService>,
    pub accounts: Arc<AccountService>,
}

impl AppServices {
    /// Services over seeded in-memory repositories, each delayed per `mock`
    pub fn in_memory(mock: &MockConfig) -> Self {
        let submit = mock.submit_latency();
        let catalog_latency = SimulatedLatency::new(mock.catalog_latency(), submit);
        let detail_latency = SimulatedLatency::new(mock.detail_latency(), submit);
        let messages_latency = SimulatedLatency::new(mock.messages_latency(), submit);
        let profile_latency = SimulatedLatency::new(mock.detail_latency(), mock.settings_latency());

        let services = Arc::new(InMemoryServiceRepository::new(catalog_latency));
        let orders = Arc::new(InMemoryOrderRepository::new(detail_latency));
        let conversations = Arc::new(InMemoryConversationRepository::new(messages_latency));
        let reviews = Arc::new(InMemoryReviewRepository::new(detail_latency));
        let accounts = Arc::new(InMemoryAccountRepository::new(detail_latency));
        let profiles = Arc::new(InMemoryProfileRepository::new(profile_latency));

        Self {
            catalog: Arc::new(CatalogService::new(services)),
            orders: Arc::new(OrderService::new(orders)),
            messages: Arc::new(MessageService::new(conversations)),
            reviews: Arc::new(ReviewService::new(reviews)),
            accounts: Arc::new(AccountService::new(accounts, profiles)),
        }
    }
}

/// Build the full router: health, metrics and the marketplace API behind the middleware stack
pub fn create_app(metrics: Arc<Metrics>, services: AppServices, server: &ServerConfig) -> Router {
    let metrics_for_middleware = metrics.clone();

    let api_state = ApiState::new(
        services.catalog,
        services.orders,
        services.messages,
        services.reviews,
        services.accounts,
        metrics.clone(),
    );

    let limits = RequestLimits {
        max_request_size: server.max_request_size,
    };

    Router::new()
        .route("/health/status", get(health_check))
        .with_state(api_state.clone())
        .route("/metrics", get(metrics_handler))
        .with_state(metrics)
        .merge(create_api_router(api_state))
        // The last layer added sees the request first
        .layer(DefaultBodyLimit::max(server.max_request_size))
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(middleware::from_fn_with_state(
            limits,
            request_validation_middleware,
        ))
        .layer(middleware::from_fn(cors_middleware))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(move |req, next| {
            observability_middleware(metrics_for_middleware.clone(), req, next)
        }))
}
