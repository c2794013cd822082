//! Ranking entries as held in the cached document and as exposed externally.
//!
//! Upstream entries are open JSON objects. Only a handful of fields carry
//! meaning for the query layer (`company`, `ranking`, `year`, `period`); the
//! rest is passed through untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Sort key used for entries whose `ranking` is missing or not an integer.
pub const UNRANKED_SORT_KEY: i64 = 1_000_000_000;

/// Render a JSON value as text the way the upstream data is compared.
///
/// Strings are returned as-is, numbers in their JSON rendering and booleans
/// as `True`/`False`. Null, arrays and objects have no text form.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("True".to_string()),
        Value::Bool(false) => Some("False".to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Coerce a JSON value to an integer.
///
/// Accepts integer numbers, floats with no fractional part, and decimal
/// strings (surrounding whitespace ignored).
pub fn value_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.is_finite())
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// One company's ranking record for one industry and period, as stored upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RankingEntry(Map<String, Value>);

impl RankingEntry {
    pub const fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Raw company name, untrimmed. Empty when the field is absent.
    pub fn company(&self) -> String {
        self.0.get("company").and_then(value_text).unwrap_or_default()
    }

    /// Company name in the form used for matching: trimmed and lower-cased.
    pub fn company_key(&self) -> String {
        normalize_company(&self.company())
    }

    /// Whether the entry carries a non-empty company value.
    pub fn has_company(&self) -> bool {
        match self.0.get("company") {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
            Some(Value::Array(a)) => !a.is_empty(),
            Some(Value::Object(o)) => !o.is_empty(),
        }
    }

    pub fn ranking(&self) -> Option<i64> {
        self.0.get("ranking").and_then(value_int)
    }

    pub fn rank_sort_key(&self) -> i64 {
        self.ranking().unwrap_or(UNRANKED_SORT_KEY)
    }

    pub fn year_text(&self) -> Option<String> {
        self.0.get("year").and_then(value_text)
    }

    pub fn month(&self) -> Option<i64> {
        self.0.get("period").and_then(value_int)
    }

    /// Copy into the external shape: `period` renamed to `month`, optionally
    /// tagged with the owning industry. The stored entry is left untouched.
    pub fn to_external(&self, industry: Option<&str>) -> RankedEntry {
        let mut out: Map<String, Value> = self
            .0
            .iter()
            .filter(|(key, _)| key.as_str() != "period")
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        if let Some(period) = self.0.get("period") {
            out.insert("month".to_string(), period.clone());
        }
        if let Some(industry) = industry {
            out.insert("industry".to_string(), Value::String(industry.to_string()));
        }
        RankedEntry(out)
    }
}

/// A ranking entry in the shape returned across the API boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RankedEntry(Map<String, Value>);

impl RankedEntry {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn company(&self) -> String {
        self.0.get("company").and_then(value_text).unwrap_or_default()
    }

    pub fn ranking(&self) -> Option<i64> {
        self.0.get("ranking").and_then(value_int)
    }

    pub fn industry(&self) -> Option<&str> {
        self.0.get("industry").and_then(Value::as_str)
    }
}

/// Trim and lower-case a company name for comparison.
pub fn normalize_company(name: &str) -> String {
    name.trim().to_lowercase()
}
