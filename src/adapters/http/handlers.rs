//! Route handlers for the index API.

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::response::Json;
use serde::Serialize;
use serde_json::{Map, Value};

use super::error::ApiError;
use super::params::{
    parse_int, CompaniesRequest, CompanyQuery, PeriodQuery, PeriodsQuery, RankingsQuery,
    SearchQuery,
};
use super::server::AppState;
use crate::domain::models::{
    CompanyLookup, DiscoverySchema, Period, PeriodFilter, RankedEntry, SearchHit,
};

type ApiResult<T> = Result<Json<T>, ApiError>;

#[derive(Debug, Serialize)]
pub struct IndustriesResponse {
    pub industries: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct IndustryCompaniesResponse {
    pub industry: String,
    pub year: Option<String>,
    pub month: Option<i64>,
    pub companies: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CompanyHistoryResponse {
    pub company: String,
    pub results: Vec<RankedEntry>,
}

/// `GET /company` answers with the whole history or a single period's entry.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CompanyResponse {
    History(CompanyHistoryResponse),
    Entry(RankedEntry),
}

#[derive(Debug, Serialize)]
pub struct CompaniesResponse {
    pub industry: Option<String>,
    pub year: Option<String>,
    pub month: Option<i64>,
    pub results: CompanyLookup,
}

#[derive(Debug, Serialize)]
pub struct RankingsResponse {
    pub industry: String,
    pub year: Option<String>,
    pub month: Option<i64>,
    pub limit: Option<i64>,
    pub offset: i64,
    pub results: Vec<RankedEntry>,
}

#[derive(Debug, Serialize)]
pub struct TopCompaniesResponse {
    pub industry: String,
    pub top_companies: Vec<Value>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub company: String,
    pub year: Option<String>,
    pub month: Option<i64>,
    pub limit: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Debug, Serialize)]
pub struct PeriodsResponse {
    pub industry: Option<String>,
    pub periods: Vec<Period>,
}

fn upper_or_none(industry: Option<&str>) -> Option<String> {
    industry.filter(|s| !s.is_empty()).map(str::to_uppercase)
}

pub async fn health() -> &'static str {
    "Healthy."
}

pub async fn list_industries(State(state): State<AppState>) -> ApiResult<IndustriesResponse> {
    let industries = state.service.list_industries().await?;
    Ok(Json(IndustriesResponse { industries }))
}

pub async fn industry_companies(
    State(state): State<AppState>,
    Path(industry): Path<String>,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<IndustryCompaniesResponse> {
    let filter = query.filter()?;
    let companies = state
        .service
        .industry_companies(&industry, filter.clone())
        .await?;
    Ok(Json(IndustryCompaniesResponse {
        industry: industry.to_uppercase(),
        year: filter.year,
        month: filter.month,
        companies,
    }))
}

pub async fn company(
    State(state): State<AppState>,
    Query(query): Query<CompanyQuery>,
) -> ApiResult<CompanyResponse> {
    let name = query
        .name
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ApiError::bad_request("Query parameter 'name' is required"))?;
    let month = parse_int("month", query.month.as_deref())?;
    let filter = PeriodFilter::new(query.year, month);

    if filter.is_unset() {
        let results = state.service.company_entries(&name, filter).await?;
        if results.is_empty() {
            return Err(ApiError::not_found(format!("Company not found: {name}")));
        }
        return Ok(Json(CompanyResponse::History(CompanyHistoryResponse {
            company: name,
            results,
        })));
    }

    state
        .service
        .company_by_name(&name, filter)
        .await?
        .map(|entry| Json(CompanyResponse::Entry(entry)))
        .ok_or_else(|| ApiError::not_found(format!("Company not found: {name}")))
}

pub async fn companies(State(state): State<AppState>, body: Bytes) -> ApiResult<CompaniesResponse> {
    let request = CompaniesRequest::from_body(&body)?;
    let results = state
        .service
        .companies_by_names(
            &request.companies,
            request.industry.as_deref(),
            request.filter.clone(),
        )
        .await?;
    Ok(Json(CompaniesResponse {
        industry: upper_or_none(request.industry.as_deref()),
        year: request.filter.year,
        month: request.filter.month,
        results,
    }))
}

pub async fn nth_rank(
    State(state): State<AppState>,
    Path((industry, rank)): Path<(String, String)>,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<RankedEntry> {
    let rank = parse_int("rank", Some(rank.as_str()))?
        .ok_or_else(|| ApiError::bad_request("'rank' must be an integer"))?;
    let filter = query.filter()?;
    state
        .service
        .nth_rank(rank, &industry, filter)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Not found"))
}

pub async fn rankings(
    State(state): State<AppState>,
    Path(industry): Path<String>,
    Query(query): Query<RankingsQuery>,
) -> ApiResult<RankingsResponse> {
    let page = query.pagination()?;
    let month = parse_int("month", query.month.as_deref())?;
    let filter = PeriodFilter::new(query.year, month);
    let results = state
        .service
        .rankings(&industry, page.limit, page.offset, filter.clone())
        .await?;
    Ok(Json(RankingsResponse {
        industry: industry.to_uppercase(),
        year: filter.year,
        month: filter.month,
        limit: page.limit,
        offset: page.offset,
        results,
    }))
}

pub async fn industry_overview(
    State(state): State<AppState>,
    Path(industry): Path<String>,
) -> ApiResult<Map<String, Value>> {
    state
        .service
        .industry_overview(&industry)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Industry not found"))
}

pub async fn top_companies(
    State(state): State<AppState>,
    Path(industry): Path<String>,
) -> ApiResult<TopCompaniesResponse> {
    let top_companies = state.service.top_companies(&industry).await?;
    Ok(Json(TopCompaniesResponse {
        industry: industry.to_uppercase(),
        top_companies,
    }))
}

pub async fn search_companies(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<SearchResponse> {
    let limit = query.limit()?;
    let month = parse_int("month", query.month.as_deref())?;
    let company = query
        .company
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ApiError::bad_request("Query parameter 'company' is required"))?;
    let filter = PeriodFilter::new(query.year, month);
    let results = state
        .service
        .search_companies(&company, limit, filter.clone())
        .await?;
    Ok(Json(SearchResponse {
        company,
        year: filter.year,
        month: filter.month,
        limit,
        results,
    }))
}

pub async fn periods(
    State(state): State<AppState>,
    Query(query): Query<PeriodsQuery>,
) -> ApiResult<PeriodsResponse> {
    let periods = state
        .service
        .available_periods(query.industry.as_deref())
        .await?;
    Ok(Json(PeriodsResponse {
        industry: upper_or_none(query.industry.as_deref()),
        periods,
    }))
}

pub async fn discover(State(state): State<AppState>) -> ApiResult<DiscoverySchema> {
    Ok(Json(state.service.discovery_schema().await?))
}
