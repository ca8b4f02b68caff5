use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use marketplace_rs::{
    create_app, init_observability, shutdown_observability, AppServices, Config, Metrics,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration first (basic logging only)
    let config = Config::from_environment()?;
    println!("Configuration loaded successfully");

    init_observability(
        &config.observability.service_name,
        &config.observability.service_version,
        config.observability.otlp_endpoint.as_deref(),
        &config.observability.log_level,
        config.observability.enable_json_logging,
    )?;

    info!("Starting marketplace-rs service");
    info!(
        "Service: {} v{}",
        config.observability.service_name, config.observability.service_version
    );
    info!(
        catalog_ms = config.mock.catalog_latency_ms,
        detail_ms = config.mock.detail_latency_ms,
        messages_ms = config.mock.messages_latency_ms,
        submit_ms = config.mock.submit_latency_ms,
        "Simulated backend latency"
    );

    let metrics = Arc::new(Metrics::new()?);
    info!("Metrics initialized successfully");

    let services = AppServices::in_memory(&config.mock);
    info!("Services initialized successfully");

    // Warm the catalogue snapshot without holding up the listener
    let catalog = services.catalog.clone();
    tokio::spawn(async move {
        match catalog.refresh().await {
            Ok(services) => info!("Catalogue warmed with {} services", services.len()),
            Err(e) => warn!("Catalogue warm-up failed: {}", e),
        }
    });

    let app = create_app(metrics, services, &config.server);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    info!("Server listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install CTRL+C signal handler: {}", e);
        }
        info!("Shutdown signal received");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    shutdown_observability().await;
    info!("Server shutdown complete");
    Ok(())
}
