//! HTTP server

use std::net::{SocketAddr, ToSocketAddrs};
use std::time::Duration;

use axum::{serve, Router};
use lineage_config::{AppConfig, ConfigError};
use tokio::net::TcpListener;
use tracing::{debug, info};

use crate::{
    error::{ApiError, ApiResult},
    routes,
    state::AppState,
};

/// How often idle sessions are swept
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// The Lineage HTTP server
pub struct ApiServer {
    state: AppState,
    addr: SocketAddr,
}

impl ApiServer {
    /// Build the server and all its services from configuration
    pub fn new(config: AppConfig) -> ApiResult<Self> {
        let addr = listen_addr(&config.server.host, config.server.port)?;

        Ok(Self {
            state: AppState::from_config(config)?,
            addr,
        })
    }

    /// Address the server listens on
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Shared application state
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// The application router
    pub fn router(&self) -> Router {
        routes::app(self.state.clone())
    }

    /// Serve until Ctrl-C
    pub async fn run(self) -> ApiResult<()> {
        let listener = TcpListener::bind(self.addr)
            .await
            .map_err(|e| ApiError::Internal(format!("Cannot bind {}: {}", self.addr, e)))?;
        info!("Listening on http://{}", self.addr);

        let sweeper = tokio::spawn(sweep_sessions(self.state.clone()));

        let result = serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ApiError::Internal(e.to_string()));

        sweeper.abort();
        info!("Server stopped");
        result
    }
}

fn listen_addr(host: &str, port: u16) -> ApiResult<SocketAddr> {
    let invalid = |reason: String| {
        ConfigError::Validation(format!("Invalid listen address {}:{}: {}", host, port, reason))
    };

    (host, port)
        .to_socket_addrs()
        .map_err(|e| invalid(e.to_string()))?
        .next()
        .ok_or_else(|| invalid("no address found".to_string()).into())
}

async fn sweep_sessions(state: AppState) {
    let mut interval = tokio::time::interval(SESSION_SWEEP_INTERVAL);
    loop {
        interval.tick().await;
        let purged = state.sessions.purge_expired();
        if purged > 0 {
            debug!("Purged {} idle sessions", purged);
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Cannot listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listen_address() {
        let mut config = AppConfig::default();
        config.server.port = 9090;

        let server = ApiServer::new(config).unwrap();
        assert_eq!(server.addr().to_string(), "127.0.0.1:9090");
        assert_eq!(server.state().trees.count(), 0);
    }

    #[test]
    fn test_invalid_host_is_rejected() {
        let mut config = AppConfig::default();
        config.server.host = "not a host".to_string();

        assert!(matches!(
            ApiServer::new(config),
            Err(ApiError::Config(ConfigError::Validation(_)))
        ));
    }
}
