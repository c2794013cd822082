//! Upstream index source port.
//!
//! The loader only knows how to ask for a fresh document; where it comes
//! from (HTTP endpoint, fixture, test double) is an adapter concern.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::Document;

/// Source of index documents.
#[async_trait]
pub trait IndexSource: Send + Sync {
    /// Source name used in logs (e.g., "http", "static").
    fn name(&self) -> &'static str;

    /// Fetch a fresh document. At most one upstream round trip per call.
    ///
    /// # Returns
    /// * `Ok(Document)` - a well-formed document
    /// * `Err(DomainError::UpstreamUnavailable)` - transport failure, non-2xx
    ///   status, or a body that is not an index document
    async fn fetch(&self) -> DomainResult<Document>;
}
