use prometheus::{
    CounterVec, Encoder, GaugeVec, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("Failed to register metric: {0}")]
    Registration(#[from] prometheus::Error),
    #[error("Failed to encode metrics: {0}")]
    Encoding(String),
}

/// Prometheus metrics for the marketplace service
#[derive(Clone)]
pub struct Metrics {
    registry: Registry,

    // HTTP metrics
    pub http_requests_total: CounterVec,
    pub http_request_duration_seconds: HistogramVec,
    pub http_requests_in_flight: GaugeVec,

    // Business metrics
    pub marketplace_operations_total: CounterVec,
    pub marketplace_operation_duration_seconds: HistogramVec,
    pub validation_failures_total: CounterVec,
}

impl Metrics {
    /// Create a fresh registry with every metric registered
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let http_requests_total = CounterVec::new(
            Opts::new(
                "http_requests_total",
                "Total number of HTTP requests processed",
            ),
            &["method", "endpoint", "status_code"],
        )?;

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request duration in seconds",
            )
            .buckets(vec![
                0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
            ]),
            &["method", "endpoint"],
        )?;

        let http_requests_in_flight = GaugeVec::new(
            Opts::new(
                "http_requests_in_flight",
                "Number of HTTP requests currently being processed",
            ),
            &["method", "endpoint"],
        )?;

        let marketplace_operations_total = CounterVec::new(
            Opts::new(
                "marketplace_operations_total",
                "Total number of marketplace operations by outcome",
            ),
            &["operation", "status"],
        )?;

        // Mock latencies sit between 0.5s and 1.5s, so the buckets stretch further than the HTTP ones
        let marketplace_operation_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "marketplace_operation_duration_seconds",
                "Marketplace operation duration in seconds",
            )
            .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 0.75, 1.0, 1.5, 2.0, 3.0, 5.0]),
            &["operation"],
        )?;

        let validation_failures_total = CounterVec::new(
            Opts::new(
                "validation_failures_total",
                "Total number of rejected form submissions",
            ),
            &["form"],
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(marketplace_operations_total.clone()))?;
        registry.register(Box::new(marketplace_operation_duration_seconds.clone()))?;
        registry.register(Box::new(validation_failures_total.clone()))?;

        info!("Prometheus metrics initialized");

        Ok(Metrics {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            http_requests_in_flight,
            marketplace_operations_total,
            marketplace_operation_duration_seconds,
            validation_failures_total,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Encode all metrics in Prometheus text format
    pub fn encode(&self) -> Result<String, MetricsError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();

        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|e| MetricsError::Encoding(e.to_string()))?;

        String::from_utf8(buffer).map_err(|e| MetricsError::Encoding(e.to_string()))
    }

    pub fn record_http_request(
        &self,
        method: &str,
        endpoint: &str,
        status_code: u16,
        duration_seconds: f64,
    ) {
        let status_str = status_code.to_string();

        self.http_requests_total
            .with_label_values(&[method, endpoint, &status_str])
            .inc();

        self.http_request_duration_seconds
            .with_label_values(&[method, endpoint])
            .observe(duration_seconds);
    }

    pub fn increment_in_flight(&self, method: &str, endpoint: &str) {
        self.http_requests_in_flight
            .with_label_values(&[method, endpoint])
            .inc();
    }

    pub fn decrement_in_flight(&self, method: &str, endpoint: &str) {
        self.http_requests_in_flight
            .with_label_values(&[method, endpoint])
            .dec();
    }

    pub fn record_operation(&self, operation: &str, success: bool, duration_seconds: f64) {
        let status = if success { "success" } else { "error" };

        self.marketplace_operations_total
            .with_label_values(&[operation, status])
            .inc();

        self.marketplace_operation_duration_seconds
            .with_label_values(&[operation])
            .observe(duration_seconds);
    }

    /// Count a form submission rejected with field errors
    pub fn record_validation_failure(&self, form: &str) {
        self.validation_failures_total
            .with_label_values(&[form])
            .inc();
    }
}
