//! Result shapes returned by the query layer, ready for JSON serialization.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use super::entry::RankedEntry;
use super::period::Period;

/// One substring-search match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub company: String,
    pub industry: String,
    pub ranking: Value,
}

/// Name → entry mapping for batch company lookups, in request order.
///
/// Serializes as a JSON object; a name requested twice keeps its first
/// position and the last value written for it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyLookup {
    items: Vec<(String, Option<RankedEntry>)>,
}

impl CompanyLookup {
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn insert(&mut self, name: String, entry: Option<RankedEntry>) {
        if let Some(slot) = self.items.iter_mut().find(|(existing, _)| *existing == name) {
            slot.1 = entry;
        } else {
            self.items.push((name, entry));
        }
    }

    pub fn get(&self, name: &str) -> Option<&Option<RankedEntry>> {
        self.items
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, entry)| entry)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&RankedEntry>)> {
        self.items
            .iter()
            .map(|(name, entry)| (name.as_str(), entry.as_ref()))
    }
}

impl Serialize for CompanyLookup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.items.len()))?;
        for (name, entry) in &self.items {
            map.serialize_entry(name, entry)?;
        }
        map.end()
    }
}

/// Self-describing payload built from live data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscoverySchema {
    pub industries: Vec<String>,
    pub examples: DiscoveryExamples,
}

/// Live examples embedded in the discovery payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscoveryExamples {
    pub overview: Option<Map<String, Value>>,
    pub company_ranking: Option<RankedEntry>,
    pub top_companies: Vec<Value>,
    pub periods: Vec<Period>,
    #[serde(serialize_with = "serialize_ordered")]
    pub periods_by_industry: Vec<(String, Vec<Period>)>,
}

fn serialize_ordered<S: Serializer>(
    items: &[(String, Vec<Period>)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(items.len()))?;
    for (industry, periods) in items {
        map.serialize_entry(industry, periods)?;
    }
    map.end()
}
