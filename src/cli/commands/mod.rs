//! CLI command handlers.

pub mod query;
pub mod serve;

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

use crate::adapters::upstream::HttpIndexSource;
use crate::domain::models::Config;
use crate::services::IndexService;

/// Build the index service for `config`'s upstream endpoint.
pub fn build_service(config: &Config) -> Result<IndexService> {
    let source = HttpIndexSource::from_config(&config.upstream)?;
    Ok(IndexService::with_source(
        Arc::new(source),
        Duration::from_secs(config.upstream.cache_ttl_secs),
    ))
}
