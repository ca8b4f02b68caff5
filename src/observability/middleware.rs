use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use opentelemetry::trace::TraceContextExt;
use std::{sync::Arc, time::Instant};
use tracing::{error, info, instrument, warn, Instrument};
use tracing_opentelemetry::OpenTelemetrySpanExt;

use super::Metrics;

/// Middleware for automatic request tracing and metrics collection
pub async fn observability_middleware(
    metrics: Arc<Metrics>,
    request: Request,
    next: Next,
) -> Response {
    let start_time = Instant::now();
    let method = request.method().to_string();
    let uri = request.uri().to_string();

    let user_agent = request
        .headers()
        .get("user-agent")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    // First hop of X-Forwarded-For, then X-Real-IP
    let client_ip = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .or_else(|| {
            request
                .headers()
                .get("x-real-ip")
                .and_then(|value| value.to_str().ok())
        })
        .unwrap_or("unknown")
        .trim()
        .to_string();

    // Route template keeps metric label cardinality bounded
    let endpoint = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched_path| matched_path.as_str().to_string())
        .unwrap_or_else(|| uri.clone());

    let span_name = format!("{} {}", method, endpoint);

    let span = tracing::info_span!(
        target: "marketplace_rs::http",
        "{}", span_name,
        otel.name = %span_name,
        otel.kind = "server",
        http.method = %method,
        http.route = %endpoint,
        http.url = %uri,
        http.user_agent = %user_agent,
        http.client_ip = %client_ip,
        client.address = %client_ip,
        http.status_code = tracing::field::Empty,
        http.response.status_code = tracing::field::Empty,
        http.response_time_ms = tracing::field::Empty,
    );

    async {
        metrics.increment_in_flight(&method, &endpoint);

        let trace_id = super::tracing::get_current_trace_id().unwrap_or_default();
        info!(trace_id = %trace_id, method = %method, path = %endpoint, client_ip = %client_ip, "Processing request");

        let response = next.run(request).await;

        let duration = start_time.elapsed();
        let duration_ms = duration.as_millis();
        let status_code = response.status().as_u16();

        let current_span = tracing::Span::current();
        current_span.record("http.status_code", status_code);
        current_span.record("http.response.status_code", status_code);
        current_span.record("http.response_time_ms", duration_ms);

        let otel_context = current_span.context();
        if status_code >= 500 {
            otel_context
                .span()
                .set_status(opentelemetry::trace::Status::error("HTTP server error"));
        } else {
            otel_context.span().set_status(opentelemetry::trace::Status::Ok);
        }

        metrics.record_http_request(&method, &endpoint, status_code, duration.as_secs_f64());
        metrics.decrement_in_flight(&method, &endpoint);

        // Client errors are expected traffic (validation, unknown ids)
        if status_code >= 500 {
            error!(
                trace_id = %trace_id,
                method = %method,
                path = %endpoint,
                status_code,
                duration_ms,
                "Request failed"
            );
        } else if status_code >= 400 {
            warn!(
                trace_id = %trace_id,
                method = %method,
                path = %endpoint,
                status_code,
                duration_ms,
                "Request rejected"
            );
        } else {
            info!(
                trace_id = %trace_id,
                method = %method,
                path = %endpoint,
                status_code,
                duration_ms,
                user_agent = %user_agent,
                "Request completed"
            );
        }

        response
    }
    .instrument(span)
    .await
}

/// Wraps service calls to time them, log the outcome and count them per operation
#[derive(Clone)]
pub struct OperationTracer {
    metrics: Arc<Metrics>,
}

impl OperationTracer {
    pub fn new(metrics: Arc<Metrics>) -> Self {
        Self { metrics }
    }

    #[instrument(skip_all, fields(operation = %operation))]
    pub async fn trace_operation<F, T, E>(&self, operation: &str, future: F) -> Result<T, E>
    where
        F: std::future::Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let start_time = Instant::now();

        let result = future.await;
        let duration = start_time.elapsed();
        self.metrics
            .record_operation(operation, result.is_ok(), duration.as_secs_f64());

        match &result {
            Ok(_) => info!(
                duration_ms = duration.as_millis(),
                "Operation completed successfully"
            ),
            Err(error) => warn!(
                error = %error,
                duration_ms = duration.as_millis(),
                "Operation failed"
            ),
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode},
        middleware,
        routing::get,
        Router,
    };
    use tower::ServiceExt;

    async fn list_handler() -> &'static str {
        "[]"
    }

    async fn failing_handler() -> StatusCode {
        StatusCode::SERVICE_UNAVAILABLE
    }

    fn traced_app(metrics: Arc<Metrics>) -> Router {
        Router::new()
            .route("/api/orders/:id", get(list_handler))
            .route("/api/catalog/refresh", get(failing_handler))
            .layer(middleware::from_fn(move |req, next| {
                observability_middleware(metrics.clone(), req, next)
            }))
    }

    #[tokio::test]
    async fn test_requests_are_labelled_by_route_template() {
        let metrics = Arc::new(Metrics::new().unwrap());
        let app = traced_app(metrics.clone());

        let request = Request::builder()
            .method(Method::GET)
            .uri("/api/orders/order-123")
            .header("user-agent", "marketplace-test/1.0")
            .header("x-forwarded-for", "10.0.0.1, 10.0.0.2")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let encoded = metrics.encode().unwrap();
        assert!(encoded.contains("endpoint=\"/api/orders/:id\""));
        assert!(!encoded.contains("order-123"));
        assert_eq!(
            metrics
                .http_requests_in_flight
                .with_label_values(&["GET", "/api/orders/:id"])
                .get(),
            0.0
        );
    }

    #[tokio::test]
    async fn test_server_errors_are_counted() {
        let metrics = Arc::new(Metrics::new().unwrap());
        let app = traced_app(metrics.clone());

        let request = Request::builder()
            .method(Method::GET)
            .uri("/api/catalog/refresh")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let count = metrics
            .http_requests_total
            .with_label_values(&["GET", "/api/catalog/refresh", "503"])
            .get();
        assert_eq!(count, 1.0);
    }

    #[tokio::test]
    async fn test_operation_tracer_counts_outcomes() {
        let metrics = Arc::new(Metrics::new().unwrap());
        let tracer = OperationTracer::new(metrics.clone());

        let result = tracer
            .trace_operation("list_orders", async { Ok::<_, String>(3) })
            .await;
        assert_eq!(result, Ok(3));

        let result = tracer
            .trace_operation("list_orders", async { Err::<u32, _>("order store offline") })
            .await;
        assert!(result.is_err());

        let encoded = metrics.encode().unwrap();
        assert!(encoded.contains(
            "marketplace_operations_total{operation=\"list_orders\",status=\"success\"} 1"
        ));
        assert!(encoded.contains(
            "marketplace_operations_total{operation=\"list_orders\",status=\"error\"} 1"
        ));
    }
}
