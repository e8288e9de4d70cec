//! Health check endpoint.

use crate::server::DevServer;
use axum::{Extension, Json};
use serde::Serialize;
use std::sync::Arc;

/// Health status response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    /// Overall status.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Serve mode.
    pub mode: String,
    /// Active forwarding rules as `prefix -> origin`; empty in production.
    pub routes: Vec<String>,
}

/// Health check handler.
pub async fn health_handler(Extension(server): Extension<Arc<DevServer>>) -> Json<HealthStatus> {
    let routes = server
        .active_routes()
        .map(|table| {
            table
                .rules()
                .iter()
                .map(|rule| format!("{} -> {}", rule.prefix(), rule.target()))
                .collect()
        })
        .unwrap_or_default();

    Json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        mode: server.mode().to_string(),
        routes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, ServeMode};

    #[test]
    fn health_status_serializes() {
        let status = HealthStatus {
            status: "ok".to_string(),
            version: "0.1.0".to_string(),
            mode: "development".to_string(),
            routes: vec!["/auth -> http://localhost:8000".to_string()],
        };

        let json = serde_json::to_string(&status).unwrap();
        assert!(json.contains("\"status\":\"ok\""));
        assert!(json.contains("\"routes\":[\"/auth -> http://localhost:8000\"]"));
    }

    #[tokio::test]
    async fn production_reports_no_routes() {
        let mut config = Config::default();
        config.server.mode = ServeMode::Production;
        let server = Arc::new(DevServer::new(config).unwrap());

        let Json(status) = health_handler(Extension(server)).await;
        assert_eq!(status.mode, "production");
        assert!(status.routes.is_empty());
    }

    #[tokio::test]
    async fn development_lists_routes() {
        let server = Arc::new(DevServer::new(Config::default()).unwrap());
        let Json(status) = health_handler(Extension(server)).await;
        assert_eq!(status.routes.len(), 6);
        assert_eq!(status.routes[0], "/auth -> http://localhost:8000");
    }
}
