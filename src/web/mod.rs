//! Web server module.

mod handlers;

pub use handlers::*;

use crate::config::ServerConfig;
use crate::orchestrator::Orchestrator;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: ServerConfig,
    pub orchestrator: Arc<Orchestrator>,
}

/// Serves the presentation model over HTTP.
pub struct Server {
    state: AppState,
}

impl Server {
    pub fn new(config: ServerConfig, orchestrator: Arc<Orchestrator>) -> Self {
        Self {
            state: AppState {
                config,
                orchestrator,
            },
        }
    }

    /// Build the router with all routes.
    fn routes(&self) -> Router {
        let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);

        Router::new()
            // Presentation model
            .route("/api/dashboard", get(handlers::handle_dashboard))
            .route("/api/entities/{id}", get(handlers::handle_get_entity))
            // Refresh control
            .route("/api/refresh", post(handlers::handle_refresh))
            .route("/api/period", put(handlers::handle_set_period))
            .route("/healthz", get(handlers::handle_health))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .layer(DefaultBodyLimit::max(1024 * 1024)) // 1MB
            .with_state(self.state.clone())
    }

    /// Start the server on the configured port.
    pub async fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.state.config.http_port));
        let router = self.routes();

        tracing::info!("Web server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, router).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Period;
    use crate::source::MockSource;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::Value;
    use std::time::Duration;
    use tokio_test::assert_ok;
    use tower::ServiceExt;

    async fn mounted_server() -> Server {
        let source = Arc::new(MockSource::new(Duration::ZERO, 0.7).with_seed(11));
        let orchestrator = Arc::new(Orchestrator::new(source, Period::Day));
        let handle = orchestrator.mount().await.unwrap();
        assert_ok!(handle.await);
        Server::new(ServerConfig::default(), orchestrator)
    }

    async fn send(server: &Server, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = server.routes().oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    async fn get_json(server: &Server, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let (status, body) = send(server, request).await;
        let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    fn put_period(period: &str) -> Request<Body> {
        Request::builder()
            .method(Method::PUT)
            .uri("/api/period")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(format!(r#"{{"period":"{}"}}"#, period)))
            .unwrap()
    }

    #[tokio::test]
    async fn test_dashboard_full_view() {
        let server = mounted_server().await;
        let (status, json) = get_json(&server, "/api/dashboard").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["state"]["phase"], "ready");
        assert_eq!(json["state"]["period"], "24h");
        assert_eq!(json["state"]["data_period"], "24h");
        assert_eq!(json["state"]["version"], 1);
        assert_eq!(json["stats"]["total"], 6);
        assert_eq!(json["data"].as_array().unwrap().len(), 6);
        assert_eq!(json["facets"]["providers"].as_array().unwrap().len(), 4);
        assert!(json["state"].get("entities").is_none());

        // Default order is uptime, highest first
        let uptimes: Vec<f64> = json["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["uptime"].as_f64().unwrap())
            .collect();
        assert!(uptimes.windows(2).all(|w| w[0] >= w[1]));
    }

    #[tokio::test]
    async fn test_dashboard_filters_keep_facets() {
        let server = mounted_server().await;
        let (status, json) = get_json(&server, "/api/dashboard?provider=88code&service=cx").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["stats"]["total"], 1);
        assert_eq!(json["data"][0]["id"], "88code-cx-vip-channel");
        assert_eq!(json["facets"]["providers"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_dashboard_sort_ascending() {
        let server = mounted_server().await;
        let (_, json) = get_json(&server, "/api/dashboard?sort=uptime&direction=asc").await;

        let uptimes: Vec<f64> = json["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["uptime"].as_f64().unwrap())
            .collect();
        assert!(uptimes.windows(2).all(|w| w[0] <= w[1]));
    }

    #[tokio::test]
    async fn test_dashboard_unsorted_keeps_canonical_order() {
        let server = mounted_server().await;
        let (_, json) = get_json(&server, "/api/dashboard?sort=none").await;
        assert_eq!(json["data"][0]["id"], "88code-cc-vip-channel");
    }

    #[tokio::test]
    async fn test_dashboard_rejects_bad_sort() {
        let server = mounted_server().await;
        let (status, _) = get_json(&server, "/api/dashboard?sort=colour").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = get_json(&server, "/api/dashboard?direction=up").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_entity() {
        let server = mounted_server().await;

        let (status, json) = get_json(&server, "/api/entities/duckcoding-cx-test-channel").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["provider"], "duckcoding");
        assert_eq!(json["history"].as_array().unwrap().len(), 24);

        let (status, _) = get_json(&server, "/api/entities/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_set_period() {
        let server = mounted_server().await;
        let mut updates = server.state.orchestrator.subscribe();

        let (status, body) = send(&server, put_period("7d")).await;
        assert_eq!(status, StatusCode::ACCEPTED);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["period"], "7d");
        assert_eq!(json["refetching"], true);

        let settled = tokio::time::timeout(
            Duration::from_secs(5),
            updates.wait_for(|s| s.period == Period::Week && !s.loading),
        )
        .await
        .unwrap()
        .unwrap()
        .clone();
        assert_eq!(settled.entities[0].history.len(), 7);

        // Selecting the same range again does not refetch
        let (status, body) = send(&server, put_period("7d")).await;
        assert_eq!(status, StatusCode::ACCEPTED);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["refetching"], false);
    }

    #[tokio::test]
    async fn test_set_period_rejects_unknown() {
        let server = mounted_server().await;
        let (status, _) = send(&server, put_period("1y")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(server.state.orchestrator.snapshot().period, Period::Day);
    }

    #[tokio::test]
    async fn test_refresh_and_health() {
        let server = mounted_server().await;
        let mut updates = server.state.orchestrator.subscribe();

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/refresh")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&server, request).await;
        assert_eq!(status, StatusCode::ACCEPTED);

        let settled = tokio::time::timeout(Duration::from_secs(5), updates.wait_for(|s| s.version >= 2))
            .await
            .unwrap()
            .unwrap()
            .clone();
        assert_eq!(settled.phase, crate::orchestrator::Phase::Ready);

        let (status, body) = send(
            &server,
            Request::builder().uri("/healthz").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"ok");
    }
}
