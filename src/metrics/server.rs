//! HTTP exporter for the scan and playback metrics.
//!
//! The scan and playback loops are synchronous, so the server owns a
//! small tokio runtime of its own; [`MetricsHandle`] is how the loops
//! publish snapshots to it.

use super::{MetricsRegistry, MetricsSnapshot};
use crate::capture::OutputConfig;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::runtime::Runtime;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind metrics listener: {0}")]
    Bind(#[from] std::io::Error),

    #[error("metrics server failed: {0}")]
    Server(String),
}

#[derive(Debug, Clone)]
pub struct MetricsServerConfig {
    pub bind_addr: SocketAddr,
}

impl MetricsServerConfig {
    /// Binds on all interfaces at `port`.
    pub fn with_port(port: u16) -> Self {
        Self {
            bind_addr: ([0, 0, 0, 0], port).into(),
        }
    }

    /// Exporter settings from the output section; `None` when port is 0.
    pub fn from_output(output: &OutputConfig) -> Option<Self> {
        (output.metrics_port != 0).then(|| Self::with_port(output.metrics_port))
    }
}

/// Registry shared between the pipeline and the HTTP handlers.
type SharedState = Arc<RwLock<MetricsRegistry>>;

pub struct MetricsServer {
    config: MetricsServerConfig,
    state: SharedState,
}

impl MetricsServer {
    pub fn new(config: MetricsServerConfig, registry: MetricsRegistry) -> Self {
        Self {
            config,
            state: Arc::new(RwLock::new(registry)),
        }
    }

    /// Binds the listener and serves `/metrics` and `/health` on a
    /// background runtime.
    ///
    /// The server stops when the returned handle is dropped.
    pub fn spawn(self) -> Result<MetricsHandle, ServerError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;
        let listener = runtime.block_on(TcpListener::bind(self.config.bind_addr))?;
        let local_addr = listener.local_addr()?;
        tracing::info!(addr = %local_addr, "Metrics server listening");

        let state = Arc::clone(&self.state);
        runtime.spawn(async move {
            if let Err(e) = serve(listener, state).await {
                tracing::error!(error = %e, "Metrics server stopped");
            }
        });

        Ok(MetricsHandle {
            state: self.state,
            local_addr,
            _runtime: runtime,
        })
    }
}

/// A running exporter, fed from synchronous code.
pub struct MetricsHandle {
    state: SharedState,
    local_addr: SocketAddr,
    _runtime: Runtime,
}

impl MetricsHandle {
    /// Address actually bound (resolves port 0).
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Pushes a snapshot. Must not be called from async code.
    pub fn publish(&self, snapshot: &MetricsSnapshot) {
        self.state.blocking_read().update(snapshot);
    }
}

async fn serve(listener: TcpListener, state: SharedState) -> Result<(), ServerError> {
    let app = Router::new()
        .route("/metrics", get(metrics_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .with_state(state);

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))
}

async fn metrics_handler(State(state): State<SharedState>) -> impl IntoResponse {
    let registry = state.read().await;

    match registry.encode() {
        Ok(output) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            output,
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            [("content-type", "text/plain; charset=utf-8")],
            format!("Failed to encode metrics: {}", e),
        ),
    }
}

async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpStream;

    fn get(addr: SocketAddr, path: &str) -> String {
        let mut stream = TcpStream::connect(addr).unwrap();
        write!(
            stream,
            "GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n"
        )
        .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).unwrap();
        response
    }

    fn loopback() -> MetricsServerConfig {
        MetricsServerConfig {
            bind_addr: ([127, 0, 0, 1], 0).into(),
        }
    }

    #[test]
    fn test_port_zero_disables_exporter() {
        let output = OutputConfig {
            metrics_port: 0,
            ..Default::default()
        };
        assert!(MetricsServerConfig::from_output(&output).is_none());

        let output = OutputConfig {
            metrics_port: 9100,
            ..Default::default()
        };
        let config = MetricsServerConfig::from_output(&output).unwrap();
        assert_eq!(config.bind_addr.port(), 9100);
    }

    #[test]
    fn test_spawned_server_serves_published_snapshot() {
        let handle = MetricsServer::new(loopback(), MetricsRegistry::new().unwrap())
            .spawn()
            .unwrap();
        handle.publish(&MetricsSnapshot {
            faces_captured: 3,
            moves_played: 7,
            ..Default::default()
        });

        let metrics = get(handle.local_addr(), "/metrics");
        assert!(metrics.starts_with("HTTP/1.1 200"));
        assert!(metrics.contains("cube_scan_faces_captured_total 3"));
        assert!(metrics.contains("cube_scan_moves_played_total 7"));

        let health = get(handle.local_addr(), "/health");
        assert!(health.ends_with("OK"));
    }
}
