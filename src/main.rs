//! Statusboard - monitoring status dashboard backend.

use statusboard::config::ServerConfig;
use statusboard::orchestrator::{spawn_auto_refresh, Orchestrator};
use statusboard::source::{HttpSource, MockSource, StatusSource};
use statusboard::web::Server;

use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("statusboard=info".parse()?))
        .init();

    // Load configuration
    let cfg = ServerConfig::load();
    tracing::info!("Starting Statusboard on port {}...", cfg.http_port);

    // Pick the data source
    let source: Arc<dyn StatusSource> = if cfg.use_mock {
        tracing::info!("Using generated mock data");
        Arc::new(MockSource::new(Duration::from_millis(600), cfg.degraded_weight))
    } else {
        tracing::info!("Using status API at {}", cfg.api_base_url);
        Arc::new(HttpSource::new(&cfg.api_base_url, cfg.fetch_timeout)?)
    };

    // Initial load runs in the background
    let orchestrator = Arc::new(Orchestrator::new(source, cfg.period));
    orchestrator.mount().await;

    if let Some(every) = cfg.refresh_interval {
        tracing::info!("Auto refresh every {}s", every.as_secs());
        spawn_auto_refresh(orchestrator.clone(), every);
    }

    // Start web server
    let server = Server::new(cfg, orchestrator);
    server.start().await?;

    Ok(())
}
