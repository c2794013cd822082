//! Request parameter parsing and validation.
//!
//! Query strings are taken as text and parsed here so malformed numbers
//! produce the API's own 400 body instead of an extractor rejection.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{value_int, PeriodFilter};
use crate::services::DEFAULT_SEARCH_LIMIT;

/// `?year=&month=`
#[derive(Debug, Default, Deserialize)]
pub struct PeriodQuery {
    pub year: Option<String>,
    pub month: Option<String>,
}

impl PeriodQuery {
    pub fn filter(&self) -> DomainResult<PeriodFilter> {
        Ok(PeriodFilter::new(
            self.year.clone(),
            parse_int("month", self.month.as_deref())?,
        ))
    }
}

/// `GET /company`
#[derive(Debug, Default, Deserialize)]
pub struct CompanyQuery {
    pub name: Option<String>,
    pub year: Option<String>,
    pub month: Option<String>,
}

/// `GET /industry/{industry}/rankings`
#[derive(Debug, Default, Deserialize)]
pub struct RankingsQuery {
    pub limit: Option<String>,
    pub offset: Option<String>,
    pub year: Option<String>,
    pub month: Option<String>,
}

/// Validated pagination for rankings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: Option<i64>,
    pub offset: i64,
}

impl RankingsQuery {
    pub fn pagination(&self) -> DomainResult<Pagination> {
        let limit = parse_int("limit", self.limit.as_deref())?;
        if limit.is_some_and(|l| l < 0) {
            return Err(invalid("'limit' must be >= 0"));
        }
        let offset = parse_int("offset", self.offset.as_deref())?.unwrap_or(0);
        if offset < 0 {
            return Err(invalid("'offset' must be >= 0"));
        }
        Ok(Pagination { limit, offset })
    }
}

/// `GET /search/companies`
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub company: Option<String>,
    pub limit: Option<String>,
    pub year: Option<String>,
    pub month: Option<String>,
}

impl SearchQuery {
    pub fn limit(&self) -> DomainResult<usize> {
        match parse_int("limit", self.limit.as_deref())? {
            None => Ok(DEFAULT_SEARCH_LIMIT),
            Some(limit) if limit > 0 => {
                Ok(usize::try_from(limit).unwrap_or(usize::MAX))
            }
            Some(_) => Err(invalid("'limit' must be > 0")),
        }
    }
}

/// `GET /periods`
#[derive(Debug, Default, Deserialize)]
pub struct PeriodsQuery {
    pub industry: Option<String>,
}

/// Validated body of `POST /companies`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompaniesRequest {
    pub companies: Vec<String>,
    pub industry: Option<String>,
    pub filter: PeriodFilter,
}

impl CompaniesRequest {
    /// Validate a raw request body. An unparsable body is treated as `{}`.
    pub fn from_body(body: &[u8]) -> DomainResult<Self> {
        let root = match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        };

        let companies = match root.get("companies") {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>(),
            _ => None,
        }
        .ok_or_else(|| {
            invalid("Request JSON must include 'companies': [string, ...]")
        })?;

        let industry = match root.get("industry") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                return Err(invalid(
                    "'industry' must be a string if provided",
                ))
            }
        };

        let year = match root.get("year") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(_) => {
                return Err(invalid(
                    "'year' must be a string or number if provided",
                ))
            }
        };

        let month = match root.get("month") {
            None | Some(Value::Null) => None,
            Some(value) => Some(value_int(value).ok_or_else(|| {
                invalid("'month' must be an integer if provided")
            })?),
        };

        Ok(Self {
            companies,
            industry,
            filter: PeriodFilter::new(year, month),
        })
    }
}

fn invalid(message: impl Into<String>) -> DomainError {
    DomainError::InvalidArgument(message.into())
}

/// Parse an optional integer parameter; blank counts as absent.
pub fn parse_int(name: &str, raw: Option<&str>) -> DomainResult<Option<i64>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text
            .parse()
            .map(Some)
            .map_err(|_| invalid(format!("'{name}' must be an integer"))),
    }
}
