//! HTTP 服务器启动和管理

use axum::{Router, middleware};
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;

use crate::core::{Config, Result, ServerError, ServerState};

/// HTTP 请求日志中间件
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = std::time::Instant::now();

    let response = next.run(request).await;

    tracing::info!(
        target: "http_access",
        elapsed_ms = started.elapsed().as_millis() as u64,
        "{} {} {}",
        method,
        uri,
        response.status()
    );

    response
}

/// Resolves on ctrl-c; never resolves if the handler cannot be installed
async fn wait_for_ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for ctrl-c, graceful shutdown disabled");
        std::future::pending::<()>().await;
    }
}

/// All API routes, state not yet bound
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(crate::api::health::router())
        .merge(crate::api::patrons::router())
        .merge(crate::api::waiters::router())
        .merge(crate::api::tables::router())
        .merge(crate::api::orders::router())
}

/// Complete service: routes, state and middleware
pub fn build_router(state: ServerState) -> Router {
    build_app()
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn(log_request))
}

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    /// Serve until ctrl-c, then drain in-flight requests for at most `shutdown_timeout_ms`
    pub async fn run(&self) -> Result<()> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config),
        };
        let app = build_router(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Floor server listening on {}", addr);

        let shutdown = Arc::new(Notify::new());
        let notified = shutdown.clone();
        let serve = axum::serve(listener, app)
            .with_graceful_shutdown(async move { notified.notified().await })
            .into_future();

        let timeout_ms = self.config.shutdown_timeout_ms;
        let deadline = async {
            wait_for_ctrl_c().await;
            tracing::info!("Shutting down...");
            shutdown.notify_one();
            tokio::time::sleep(Duration::from_millis(timeout_ms)).await;
        };

        tokio::select! {
            result = serve => result?,
            _ = deadline => return Err(ServerError::ShutdownTimeout(timeout_ms)),
        }

        tracing::info!("Server stopped");
        Ok(())
    }
}
