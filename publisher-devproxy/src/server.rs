//! DevServer: owns the config, routing table and upstream client.

use crate::config::{Config, ServeMode};
use crate::error::{DevProxyError, Result};
use crate::http::build_router;
use publisher_types::RouteTable;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Shared state behind every request.
#[derive(Debug)]
pub struct DevServer {
    config: Config,
    routes: RouteTable,
    client: reqwest::Client,
}

impl DevServer {
    /// Validate the config and build the upstream client.
    pub fn new(config: Config) -> Result<Self> {
        let routes = config.route_table()?;
        // The backend's redirects belong to the browser, not to us.
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self {
            config,
            routes,
            client,
        })
    }

    /// The server configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Serve mode.
    pub fn mode(&self) -> ServeMode {
        self.config.server.mode
    }

    /// Frontend build directory.
    pub fn static_dir(&self) -> &Path {
        &self.config.server.static_dir
    }

    /// The routing table, or `None` outside development.
    pub fn active_routes(&self) -> Option<&RouteTable> {
        match self.mode() {
            ServeMode::Development => Some(&self.routes),
            ServeMode::Production => None,
        }
    }

    /// The configured routing table, regardless of mode.
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Upstream HTTP client.
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Bind the configured address.
    pub async fn bind(&self) -> Result<TcpListener> {
        let address = self.config.server.bind_address.clone();
        TcpListener::bind(&address)
            .await
            .map_err(|source| DevProxyError::Bind { address, source })
    }

    /// Serve on an already bound listener until the future is dropped.
    pub async fn serve_on(self: Arc<Self>, listener: TcpListener) -> Result<()> {
        let local: SocketAddr = listener.local_addr()?;
        match self.active_routes() {
            Some(routes) => {
                for rule in routes.rules() {
                    tracing::info!("Forwarding {} -> {}", rule.prefix(), rule.target());
                }
            }
            None => tracing::info!("Production mode: routing table disabled"),
        }
        tracing::info!(
            "Dev server listening on http://{} (static: {})",
            local,
            self.static_dir().display()
        );
        if !self.static_dir().is_dir() {
            tracing::warn!(
                "Static directory {} does not exist; local paths will 404",
                self.static_dir().display()
            );
        }

        axum::serve(listener, build_router(self)).await?;
        Ok(())
    }

    /// Bind and serve.
    pub async fn run(self) -> Result<()> {
        let listener = self.bind().await?;
        Arc::new(self).serve_on(listener).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_inactive_in_production() {
        let mut config = Config::default();
        let server = DevServer::new(config.clone()).unwrap();
        assert!(server.active_routes().is_some());

        config.server.mode = ServeMode::Production;
        let server = DevServer::new(config).unwrap();
        assert!(server.active_routes().is_none());
        assert_eq!(server.routes().len(), 6);
    }

    #[test]
    fn invalid_routes_rejected() {
        let mut config = Config::default();
        config.backend.origin = "localhost:8000".to_string();
        assert!(matches!(
            DevServer::new(config),
            Err(DevProxyError::Config(_))
        ));
    }

    #[tokio::test]
    async fn bind_failure_names_address() {
        let mut config = Config::default();
        config.server.bind_address = "not-an-address".to_string();
        let server = DevServer::new(config).unwrap();
        let err = server.bind().await.unwrap_err();
        assert!(err.to_string().contains("not-an-address"));
    }
}
