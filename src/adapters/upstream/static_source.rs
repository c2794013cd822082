//! In-memory index source for tests, benchmarks and offline use.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Document, DocumentShapeError};
use crate::domain::ports::IndexSource;

/// Serves a fixed document and counts fetches.
///
/// Can be switched into a failing mode to simulate an unavailable upstream.
pub struct StaticIndexSource {
    document: RwLock<Document>,
    failing: AtomicBool,
    fetches: AtomicUsize,
}

impl StaticIndexSource {
    pub fn new(document: Document) -> Self {
        Self {
            document: RwLock::new(document),
            failing: AtomicBool::new(false),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Build from a raw upstream payload.
    pub fn from_value(value: Value) -> Result<Self, DocumentShapeError> {
        Document::from_value(value).map(Self::new)
    }

    /// Replace the document served by subsequent fetches.
    pub async fn set_document(&self, document: Document) {
        *self.document.write().await = document;
    }

    /// When set, fetches fail with `UpstreamUnavailable`.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of fetch attempts made so far, failed ones included.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IndexSource for StaticIndexSource {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn fetch(&self) -> DomainResult<Document> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::UpstreamUnavailable(
                "static source is set to fail".to_string(),
            ));
        }
        Ok(self.document.read().await.clone())
    }
}
