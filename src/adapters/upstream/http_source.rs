//! reqwest-backed index source.
//!
//! Issues a single empty-bodied POST to the configured endpoint per fetch.
//! No retries: a failed call is reported to the loader as-is.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Document, UpstreamConfig};
use crate::domain::ports::IndexSource;

/// Longest slice of an error body kept in error messages.
const BODY_EXCERPT_CHARS: usize = 200;

/// HTTP index source.
pub struct HttpIndexSource {
    http_client: ReqwestClient,
    url: String,
    timeout: Duration,
}

impl HttpIndexSource {
    /// Create a source for `url` with the given request timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http_client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http_client,
            url: url.into(),
            timeout,
        })
    }

    pub fn from_config(config: &UpstreamConfig) -> Result<Self> {
        Self::new(config.url.clone(), Duration::from_secs(config.timeout_secs))
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn transport_error(&self, err: &reqwest::Error) -> DomainError {
        if err.is_timeout() {
            DomainError::UpstreamUnavailable(format!(
                "request to {} timed out after {:?}",
                self.url, self.timeout
            ))
        } else {
            DomainError::UpstreamUnavailable(format!("request to {} failed: {err}", self.url))
        }
    }
}

#[async_trait]
impl IndexSource for HttpIndexSource {
    fn name(&self) -> &'static str {
        "http"
    }

    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> DomainResult<Document> {
        let started = Instant::now();

        let response = self
            .http_client
            .post(&self.url)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read response body".to_string());
            let excerpt: String = body.chars().take(BODY_EXCERPT_CHARS).collect();
            return Err(DomainError::UpstreamUnavailable(format!(
                "upstream returned {status}: {excerpt}"
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(&e))?;
        let value: serde_json::Value = serde_json::from_slice(&body)?;
        let document = Document::from_value(value)?;

        debug!(
            status = %status,
            bytes = body.len(),
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "upstream document received"
        );

        Ok(document)
    }
}
