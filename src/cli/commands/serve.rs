//! `serve`: run the HTTP API until interrupted.

use anyhow::{Context, Result};
use tracing::{info, warn};

use super::build_service;
use crate::adapters::http::{AppState, IndexHttpConfig, IndexHttpServer};
use crate::cli::types::ServeArgs;
use crate::domain::models::Config;

pub async fn execute(args: ServeArgs, config: &Config) -> Result<()> {
    let mut http_config = IndexHttpConfig::from(&config.server);
    if let Some(host) = args.host {
        http_config.host = host;
    }
    if let Some(port) = args.port {
        http_config.port = port;
    }

    let service = build_service(config)?;
    let state = AppState::new(service, config.auth.resolve_api_key());

    info!(
        upstream = %config.upstream.url,
        cache_ttl_secs = config.upstream.cache_ttl_secs,
        "starting index API"
    );

    IndexHttpServer::new(state, http_config)
        .serve_with_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(err) => {
            warn!(error = %err, "cannot listen for ctrl-c; running until killed");
            std::future::pending::<()>().await;
        }
    }
}
