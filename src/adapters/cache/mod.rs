//! In-memory caching of the upstream index document.
//!
//! One document, one TTL, one lock around check-fetch-store. The clock and
//! the source are injected so expiry and fetch counts are testable.

pub mod document_cache;

pub use document_cache::{DocumentCache, DEFAULT_CACHE_TTL_SECS};
