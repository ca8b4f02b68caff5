use std::sync::Arc;
use std::time::Duration;

use marketplace_rs::{create_app, AppServices, Metrics, MockConfig, ServerConfig};
use reqwest::Client;
use tokio::net::TcpListener;

pub struct TestEnvironment {
    pub client: Client,
    pub base_url: String,
}

impl TestEnvironment {
    /// Serve the real application on an ephemeral port, with no simulated latency
    pub async fn new() -> Self {
        Self::with_mock(MockConfig::instant()).await
    }

    pub async fn with_mock(mock: MockConfig) -> Self {
        let server = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            request_timeout_seconds: 10,
            max_request_size: 64 * 1024,
        };

        let metrics = Arc::new(Metrics::new().expect("metrics registry"));
        let services = AppServices::in_memory(&mock);
        let app = create_app(metrics, services, &server);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("listener address");

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Test server failed");
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: format!("http://{}", addr),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get_json(&self, path: &str) -> (u16, serde_json::Value) {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send request");
        let status = response.status().as_u16();
        (status, response.json().await.expect("Failed to parse response"))
    }

    pub async fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> (u16, serde_json::Value) {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send request");
        let status = response.status().as_u16();
        (status, response.json().await.expect("Failed to parse response"))
    }

    pub async fn put_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> (u16, serde_json::Value) {
        let response = self
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send request");
        let status = response.status().as_u16();
        (status, response.json().await.expect("Failed to parse response"))
    }
}
