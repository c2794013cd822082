//! Index API HTTP server.
//!
//! Exposes the query layer as a read-only JSON API. Every route except the
//! health check requires the configured bearer token.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::auth::require_bearer;
use super::handlers;
use crate::domain::models::ServerConfig;
use crate::services::IndexService;

/// Configuration for the index HTTP server.
#[derive(Debug, Clone)]
pub struct IndexHttpConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Whether to enable CORS.
    pub enable_cors: bool,
}

impl Default for IndexHttpConfig {
    fn default() -> Self {
        Self::from(&ServerConfig::default())
    }
}

impl From<&ServerConfig> for IndexHttpConfig {
    fn from(config: &ServerConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            enable_cors: config.enable_cors,
        }
    }
}

/// Shared state for the index HTTP server.
#[derive(Clone)]
pub struct AppState {
    pub service: IndexService,
    pub api_key: Option<Arc<str>>,
}

impl AppState {
    pub fn new(service: IndexService, api_key: Option<String>) -> Self {
        Self {
            service,
            api_key: api_key.map(Arc::from),
        }
    }
}

/// Build the router with auth, tracing and optional CORS layers.
pub fn build_router(state: AppState, enable_cors: bool) -> Router {
    let api = Router::new()
        .route("/industries", get(handlers::list_industries))
        .route("/industry/{industry}/companies", get(handlers::industry_companies))
        .route("/industry/{industry}/rank/{rank}", get(handlers::nth_rank))
        .route("/industry/{industry}/rankings", get(handlers::rankings))
        .route("/industry/{industry}/overview", get(handlers::industry_overview))
        .route("/industry/{industry}/top-companies", get(handlers::top_companies))
        .route("/company", get(handlers::company))
        .route("/companies", post(handlers::companies))
        .route("/search/companies", get(handlers::search_companies))
        .route("/periods", get(handlers::periods))
        .route("/discover", get(handlers::discover))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer));

    let app = Router::new()
        .route("/", get(handlers::health))
        .merge(api)
        .with_state(state);

    if enable_cors {
        app.layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
            .layer(TraceLayer::new_for_http())
    } else {
        app.layer(TraceLayer::new_for_http())
    }
}

/// Index HTTP server.
pub struct IndexHttpServer {
    config: IndexHttpConfig,
    state: AppState,
}

impl IndexHttpServer {
    pub const fn new(state: AppState, config: IndexHttpConfig) -> Self {
        Self { config, state }
    }

    fn addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.config.host, self.config.port).parse()?)
    }

    /// Start the server.
    pub async fn serve(self) -> anyhow::Result<()> {
        self.serve_with_shutdown(std::future::pending()).await
    }

    /// Start the server with a shutdown signal.
    pub async fn serve_with_shutdown<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr = self.addr()?;
        if self.state.api_key.is_none() {
            tracing::warn!("no API key configured; every API route will answer 401");
        }
        let router = build_router(self.state, self.config.enable_cors);

        let listener = TcpListener::bind(addr).await?;
        tracing::info!(%addr, "index HTTP server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok(())
    }
}
