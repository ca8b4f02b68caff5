use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{Json, Response},
};
use serde_json::{json, Value};
use tracing::warn;

/// Limits enforced on incoming requests before they reach a handler
#[derive(Debug, Clone, Copy)]
pub struct RequestLimits {
    pub max_request_size: usize,
}

/// Request validation middleware
pub async fn request_validation_middleware(
    State(limits): State<RequestLimits>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<Value>)> {
    validate_content_type(&request)?;
    validate_request_size(&request, limits.max_request_size)?;

    Ok(next.run(request).await)
}

/// Bodies must be JSON; a body-less POST needs no content type
fn validate_content_type(request: &Request<Body>) -> Result<(), (StatusCode, Json<Value>)> {
    let method = request.method();
    if method != Method::POST && method != Method::PUT && method != Method::PATCH {
        return Ok(());
    }

    match request.headers().get(header::CONTENT_TYPE) {
        Some(content_type) => {
            let content_type = content_type.to_str().unwrap_or("");
            if !content_type.starts_with("application/json") {
                warn!("Invalid content type: {}", content_type);
                return Err(reject(
                    StatusCode::UNSUPPORTED_MEDIA_TYPE,
                    "Unsupported media type",
                    "Content-Type must be application/json".to_string(),
                ));
            }
        }
        None if declared_length(request).unwrap_or(0) > 0 => {
            warn!("Missing content type header");
            return Err(reject(
                StatusCode::BAD_REQUEST,
                "Missing content type",
                "Content-Type header is required for requests with body".to_string(),
            ));
        }
        None => {}
    }

    Ok(())
}

fn validate_request_size(
    request: &Request<Body>,
    max_request_size: usize,
) -> Result<(), (StatusCode, Json<Value>)> {
    if let Some(length) = declared_length(request) {
        if length > max_request_size as u64 {
            warn!("Request too large: {} bytes", length);
            return Err(reject(
                StatusCode::PAYLOAD_TOO_LARGE,
                "Request too large",
                format!(
                    "Request size {} bytes exceeds maximum of {} bytes",
                    length, max_request_size
                ),
            ));
        }
    }

    Ok(())
}

fn declared_length(request: &Request<Body>) -> Option<u64> {
    request
        .headers()
        .get(header::CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

fn reject(status: StatusCode, error: &str, message: String) -> (StatusCode, Json<Value>) {
    (
        status,
        Json(json!({
            "error": error,
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}

/// CORS middleware for handling cross-origin requests
pub async fn cors_middleware(request: Request<Body>, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, PUT, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type, Authorization"),
    );
    headers.insert(
        header::ACCESS_CONTROL_MAX_AGE,
        HeaderValue::from_static("86400"),
    );

    response
}

/// Security headers middleware
pub async fn security_headers_middleware(request: Request<Body>, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static("default-src 'self'"),
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{middleware, routing::post, Router};
    use tower::ServiceExt;

    fn app(max_request_size: usize) -> Router {
        Router::new()
            .route("/echo", post(|| async { "ok" }).get(|| async { "ok" }))
            .layer(middleware::from_fn_with_state(
                RequestLimits { max_request_size },
                request_validation_middleware,
            ))
            .layer(middleware::from_fn(security_headers_middleware))
            .layer(middleware::from_fn(cors_middleware))
    }

    fn post_request(content_type: Option<&str>, body: &'static str) -> Request<Body> {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri("/echo")
            .header(header::CONTENT_LENGTH, body.len());
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        builder.body(Body::from(body)).unwrap()
    }

    #[tokio::test]
    async fn test_json_post_passes() {
        let response = app(1024)
            .oneshot(post_request(Some("application/json"), "{}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
        assert_eq!(
            response.headers().get(header::X_FRAME_OPTIONS).unwrap(),
            "DENY"
        );
    }

    #[tokio::test]
    async fn test_non_json_post_rejected() {
        let response = app(1024)
            .oneshot(post_request(Some("text/plain"), "hello"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn test_body_without_content_type_rejected() {
        let response = app(1024)
            .oneshot(post_request(None, "{}"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app(1024).oneshot(post_request(None, "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_oversized_body_rejected() {
        let response = app(4)
            .oneshot(post_request(Some("application/json"), "{\"a\":1}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_get_skips_content_checks() {
        let request = Request::builder()
            .uri("/echo")
            .body(Body::empty())
            .unwrap();

        let response = app(1).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
