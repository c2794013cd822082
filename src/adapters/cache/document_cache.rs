//! TTL cache in front of the upstream index source.
//!
//! Holds at most one document. A single async mutex covers the whole
//! check-fetch-store sequence, so concurrent callers that find the cache
//! stale wait for one fetch instead of issuing their own.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::errors::DomainResult;
use crate::domain::models::Document;
use crate::domain::ports::{Clock, IndexSource, SystemClock};

/// Default time a fetched document is served before refetching.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 600;

struct CachedDocument {
    document: Arc<Document>,
    fetched_at: DateTime<Utc>,
}

/// Loader for the shared index document.
pub struct DocumentCache {
    source: Arc<dyn IndexSource>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    state: Mutex<Option<CachedDocument>>,
}

impl DocumentCache {
    /// Create a cache with the default TTL.
    pub fn new(source: Arc<dyn IndexSource>) -> Self {
        Self::with_ttl(source, Duration::from_secs(DEFAULT_CACHE_TTL_SECS))
    }

    /// Create with custom TTL.
    pub fn with_ttl(source: Arc<dyn IndexSource>, ttl: Duration) -> Self {
        Self::with_clock(source, ttl, Arc::new(SystemClock))
    }

    /// Create with custom TTL and time source.
    pub fn with_clock(source: Arc<dyn IndexSource>, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            source,
            clock,
            ttl,
            state: Mutex::new(None),
        }
    }

    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the cached document, fetching a new one if absent or expired.
    ///
    /// A failed fetch is returned to the caller and leaves the cached state
    /// as it was; the next call tries again.
    pub async fn load(&self) -> DomainResult<Arc<Document>> {
        let mut state = self.state.lock().await;
        let now = self.clock.now();

        if let Some(cached) = state.as_ref() {
            if self.is_fresh(cached.fetched_at, now) {
                debug!(fetched_at = %cached.fetched_at, "index cache hit");
                return Ok(Arc::clone(&cached.document));
            }
            debug!(fetched_at = %cached.fetched_at, "index cache expired");
        }

        let started = Instant::now();
        match self.source.fetch().await {
            Ok(document) => {
                let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
                info!(
                    source = self.source.name(),
                    industries = document.industries().len(),
                    entries = document.entry_count(),
                    elapsed_ms,
                    "index document refreshed"
                );
                let document = Arc::new(document);
                *state = Some(CachedDocument {
                    document: Arc::clone(&document),
                    fetched_at: now,
                });
                Ok(document)
            }
            Err(err) => {
                warn!(source = self.source.name(), error = %err, "index fetch failed");
                Err(err)
            }
        }
    }

    /// When the cached document was fetched, if there is one.
    pub async fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.state.lock().await.as_ref().map(|c| c.fetched_at)
    }

    fn is_fresh(&self, fetched_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        // A clock that moved backwards counts as zero elapsed time.
        match (now - fetched_at).to_std() {
            Ok(elapsed) => elapsed < self.ttl,
            Err(_) => true,
        }
    }
}
