//! Index service: the query layer's entry point for callers.
//!
//! Every operation loads the current document through the shared
//! [`DocumentCache`] (refetching only when it has expired) and then runs the
//! matching pure query from [`ranking_queries`](super::ranking_queries).

use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;

use super::ranking_queries as queries;
use crate::adapters::cache::DocumentCache;
use crate::domain::errors::DomainResult;
use crate::domain::models::{
    CompanyLookup, DiscoverySchema, Document, Period, PeriodFilter, RankedEntry, SearchHit,
};
use crate::domain::ports::IndexSource;

#[derive(Clone)]
pub struct IndexService {
    cache: Arc<DocumentCache>,
}

impl IndexService {
    pub const fn new(cache: Arc<DocumentCache>) -> Self {
        Self { cache }
    }

    /// Build a service with its own cache over `source`.
    pub fn with_source(source: Arc<dyn IndexSource>, ttl: Duration) -> Self {
        Self::new(Arc::new(DocumentCache::with_ttl(source, ttl)))
    }

    /// The current document, as the cache sees it.
    pub async fn document(&self) -> DomainResult<Arc<Document>> {
        self.cache.load().await
    }

    pub async fn list_industries(&self) -> DomainResult<Vec<String>> {
        let doc = self.cache.load().await?;
        Ok(queries::list_industries(&doc))
    }

    pub async fn industry_overview(&self, industry: &str) -> DomainResult<Option<Map<String, Value>>> {
        let doc = self.cache.load().await?;
        Ok(queries::industry_overview(&doc, industry))
    }

    pub async fn top_companies(&self, industry: &str) -> DomainResult<Vec<Value>> {
        let doc = self.cache.load().await?;
        Ok(queries::top_companies(&doc, industry))
    }

    pub async fn industry_companies(
        &self,
        industry: &str,
        filter: PeriodFilter,
    ) -> DomainResult<Vec<String>> {
        let doc = self.cache.load().await?;
        Ok(queries::industry_companies(&doc, industry, filter))
    }

    pub async fn company_by_name(
        &self,
        company: &str,
        filter: PeriodFilter,
    ) -> DomainResult<Option<RankedEntry>> {
        let doc = self.cache.load().await?;
        Ok(queries::company_by_name(&doc, company, filter))
    }

    pub async fn company_entries(
        &self,
        company: &str,
        filter: PeriodFilter,
    ) -> DomainResult<Vec<RankedEntry>> {
        let doc = self.cache.load().await?;
        Ok(queries::company_entries(&doc, company, &filter))
    }

    pub async fn companies_by_names(
        &self,
        names: &[String],
        industry: Option<&str>,
        filter: PeriodFilter,
    ) -> DomainResult<CompanyLookup> {
        let doc = self.cache.load().await?;
        Ok(queries::companies_by_names(&doc, names, industry, filter))
    }

    pub async fn nth_rank(
        &self,
        rank: i64,
        industry: &str,
        filter: PeriodFilter,
    ) -> DomainResult<Option<RankedEntry>> {
        let doc = self.cache.load().await?;
        Ok(queries::nth_rank(&doc, rank, industry, filter))
    }

    pub async fn rankings(
        &self,
        industry: &str,
        limit: Option<i64>,
        offset: i64,
        filter: PeriodFilter,
    ) -> DomainResult<Vec<RankedEntry>> {
        let doc = self.cache.load().await?;
        Ok(queries::rankings(&doc, industry, limit, offset, filter))
    }

    pub async fn search_companies(
        &self,
        query: &str,
        limit: usize,
        filter: PeriodFilter,
    ) -> DomainResult<Vec<SearchHit>> {
        let doc = self.cache.load().await?;
        Ok(queries::search_companies(&doc, query, limit, &filter))
    }

    pub async fn available_periods(&self, industry: Option<&str>) -> DomainResult<Vec<Period>> {
        let doc = self.cache.load().await?;
        Ok(queries::available_periods(&doc, industry))
    }

    pub async fn discovery_schema(&self) -> DomainResult<DiscoverySchema> {
        let doc = self.cache.load().await?;
        Ok(queries::discovery_schema(&doc))
    }
}
