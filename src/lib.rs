//! Industry Index - ranking index API
//!
//! Republishes an upstream industry/company ranking index as a read-only
//! JSON API with period filtering, rank lookups and company search.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): index document model, errors and ports
//! - **Service Layer** (`services`): the query layer and its async facade
//! - **Adapters** (`adapters`): upstream sources, the TTL cache and the HTTP API
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use industry_index::adapters::upstream::HttpIndexSource;
//! use industry_index::IndexService;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let source = HttpIndexSource::new("http://localhost:8080/index", Duration::from_secs(15))?;
//! let service = IndexService::with_source(Arc::new(source), Duration::from_secs(600));
//! for industry in service.list_industries().await? {
//!     println!("{industry}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use adapters::cache::DocumentCache;
pub use domain::models::{
    CompanyLookup, Config, DiscoverySchema, Document, Period, PeriodFilter, RankedEntry,
    RankingEntry, SearchHit,
};
pub use domain::ports::{Clock, IndexSource};
pub use domain::{DomainError, DomainResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::IndexService;
