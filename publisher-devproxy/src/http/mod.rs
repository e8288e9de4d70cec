//! HTTP surface of the dev server.
//!
//! One health route; everything else goes through [`dispatch`], which either
//! forwards to the backend or serves the frontend build.

pub mod health;

use crate::proxy;
use crate::server::DevServer;
use crate::statics;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::{routing::get, Extension, Router};
use std::sync::Arc;

pub use health::HealthStatus;

/// Path of the health endpoint; never forwarded.
pub const HEALTH_PATH: &str = "/__devproxy/health";

/// Paths too chatty to log on every request.
const QUIET_PATHS: [&str; 2] = ["/", "/logs/stream"];

/// Build the HTTP router with all endpoints.
pub fn build_router(server: Arc<DevServer>) -> Router {
    Router::new()
        .route(HEALTH_PATH, get(health::health_handler))
        .fallback(dispatch)
        .layer(middleware::from_fn(log_requests))
        .layer(Extension(server))
}

/// Forward routed paths in development, serve the build otherwise.
async fn dispatch(Extension(server): Extension<Arc<DevServer>>, req: Request) -> Response {
    let rule = server
        .active_routes()
        .and_then(|routes| routes.route(req.uri().path()))
        .cloned();

    match rule {
        Some(rule) => {
            let max_body = server.config().backend.max_body_bytes;
            proxy::forward(server.client(), &rule, req, max_body).await
        }
        None => statics::serve(server.static_dir(), req.method(), req.uri().path()).await,
    }
}

async fn log_requests(req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    if QUIET_PATHS.contains(&path.as_str()) {
        return next.run(req).await;
    }

    let method = req.method().clone();
    tracing::info!("{} {}", method, path);
    let response = next.run(req).await;
    if response.status().is_server_error() {
        tracing::error!("{} {} -> {}", method, path, response.status());
    } else {
        tracing::debug!("{} {} -> {}", method, path, response.status());
    }
    response
}
