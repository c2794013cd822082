//! Domain models for the industry index.

pub mod config;
pub mod document;
pub mod entry;
pub mod period;
pub mod results;

pub use config::{
    AuthConfig, Config, LogFormat, LoggingConfig, RotationPolicy, ServerConfig, UpstreamConfig,
};
pub use document::{Document, DocumentShapeError, IndustryScores};
pub use entry::{normalize_company, value_int, value_text, RankedEntry, RankingEntry};
pub use period::{Period, PeriodFilter};
pub use results::{CompanyLookup, DiscoveryExamples, DiscoverySchema, SearchHit};
