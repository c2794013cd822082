//! The cached upstream index document.

use serde_json::{Map, Value};
use thiserror::Error;

use super::entry::RankingEntry;

/// Reasons an upstream body is rejected as not being an index document.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentShapeError {
    #[error("expected a JSON object at the top level")]
    NotAnObject,

    #[error("field `{field}` must be {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("scoresData entry for `{0}` must be a list")]
    ScoresNotAList(String),
}

/// Ranking entries for one industry, in upstream order.
#[derive(Debug, Clone, PartialEq)]
pub struct IndustryScores {
    pub industry: String,
    pub entries: Vec<RankingEntry>,
}

/// Immutable snapshot of the upstream payload.
///
/// Built once per successful fetch and shared behind an `Arc`; every query
/// works on borrowed data and copies what it returns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    industries: Vec<String>,
    data: Vec<Map<String, Value>>,
    scores: Vec<IndustryScores>,
}

impl Document {
    pub const fn new(
        industries: Vec<String>,
        data: Vec<Map<String, Value>>,
        scores: Vec<IndustryScores>,
    ) -> Self {
        Self {
            industries,
            data,
            scores,
        }
    }

    /// Parse an upstream body, coercing leniently where the data allows it.
    ///
    /// Missing or null sections become empty. Sections of the wrong JSON type
    /// are rejected; items of the wrong type inside a section are dropped.
    pub fn from_value(value: Value) -> Result<Self, DocumentShapeError> {
        let Value::Object(mut root) = value else {
            return Err(DocumentShapeError::NotAnObject);
        };

        let industries = match root.remove("industries") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .collect(),
            Some(_) => {
                return Err(DocumentShapeError::WrongType {
                    field: "industries",
                    expected: "a list",
                })
            }
        };

        let data = match root.remove("data") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::Object(obj) => Some(obj),
                    _ => None,
                })
                .collect(),
            Some(_) => {
                return Err(DocumentShapeError::WrongType {
                    field: "data",
                    expected: "a list",
                })
            }
        };

        let scores = match root.remove("scoresData") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Object(by_industry)) => {
                let mut scores = Vec::with_capacity(by_industry.len());
                for (industry, entries) in by_industry {
                    let entries = match entries {
                        Value::Null => Vec::new(),
                        Value::Array(items) => items
                            .into_iter()
                            .filter_map(|item| match item {
                                Value::Object(obj) => Some(RankingEntry::new(obj)),
                                _ => None,
                            })
                            .collect(),
                        _ => return Err(DocumentShapeError::ScoresNotAList(industry)),
                    };
                    scores.push(IndustryScores { industry, entries });
                }
                scores
            }
            Some(_) => {
                return Err(DocumentShapeError::WrongType {
                    field: "scoresData",
                    expected: "an object keyed by industry",
                })
            }
        };

        Ok(Self {
            industries,
            data,
            scores,
        })
    }

    pub fn industries(&self) -> &[String] {
        &self.industries
    }

    /// Per-industry overview objects from `data`.
    pub fn overviews(&self) -> &[Map<String, Value>] {
        &self.data
    }

    /// All score lists in upstream key order.
    pub fn scores(&self) -> &[IndustryScores] {
        &self.scores
    }

    /// Entries for an industry code, matched against the upper-cased code.
    pub fn scores_for(&self, industry: &str) -> &[RankingEntry] {
        let key = industry.to_uppercase();
        self.scores
            .iter()
            .find(|s| s.industry == key)
            .map_or(&[], |s| s.entries.as_slice())
    }

    /// Overview whose `name` equals the industry code, ignoring case.
    pub fn overview(&self, industry: &str) -> Option<&Map<String, Value>> {
        let key = industry.to_uppercase();
        self.data.iter().find(|item| {
            let name = item
                .get("name")
                .and_then(super::entry::value_text)
                .unwrap_or_default();
            name.to_uppercase() == key
        })
    }

    pub fn entry_count(&self) -> usize {
        self.scores.iter().map(|s| s.entries.len()).sum()
    }
}
