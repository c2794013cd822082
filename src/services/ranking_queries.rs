//! Query functions over an index document.
//!
//! Everything here is pure: the caller supplies the document, nothing is
//! cached, and returned entries are copies in the external shape
//! (`period` renamed to `month`, tagged with `industry`).
//!
//! # Latest period defaulting
//!
//! When a query takes a period filter and both year and month are unset,
//! the filter is replaced by the latest available period for the query's
//! scope before filtering: the industry's for industry-scoped queries, the
//! company's for single-company lookups, and each industry's own latest
//! period while searching. If no period is known the filter stays unset and
//! matches everything.

use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};

use crate::domain::models::{
    normalize_company, value_int, value_text, CompanyLookup, DiscoveryExamples, DiscoverySchema,
    Document, Period, PeriodFilter, RankedEntry, RankingEntry, SearchHit,
};

/// Default cap on substring search results.
pub const DEFAULT_SEARCH_LIMIT: usize = 25;

/// Industry codes in upstream order.
pub fn list_industries(doc: &Document) -> Vec<String> {
    doc.industries().to_vec()
}

/// Overview object for an industry (matched case-insensitively on `name`).
pub fn industry_overview(doc: &Document, industry: &str) -> Option<Map<String, Value>> {
    doc.overview(industry).cloned()
}

/// The overview's `top_companies` list; empty when the industry or the list is absent.
pub fn top_companies(doc: &Document, industry: &str) -> Vec<Value> {
    doc.overview(industry)
        .and_then(|overview| overview.get("top_companies"))
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

/// Distinct (year, month) pairs, oldest first.
///
/// Scoped to one industry when `industry` is non-empty, otherwise across all
/// industries. Entries without a year or an integer period are skipped.
pub fn available_periods(doc: &Document, industry: Option<&str>) -> Vec<Period> {
    let mut seen = HashSet::new();
    let mut periods = Vec::new();

    let mut collect = |entries: &[RankingEntry]| {
        for entry in entries {
            let (Some(year), Some(month)) = (entry.year_text(), entry.month()) else {
                continue;
            };
            let period = Period::new(year, month);
            if seen.insert(period.clone()) {
                periods.push(period);
            }
        }
    };

    match industry.filter(|i| !i.is_empty()) {
        Some(industry) => collect(doc.scores_for(industry)),
        None => {
            for scores in doc.scores() {
                collect(scores.entries.as_slice());
            }
        }
    }

    periods.sort_by(Period::chronological_cmp);
    periods
}

/// Latest period with entries for an industry.
pub fn latest_period_for_industry(doc: &Document, industry: &str) -> Option<Period> {
    available_periods(doc, Some(industry)).pop()
}

/// Latest period in which a company appears in any industry.
///
/// Only entries whose year and period both read as integers take part.
pub fn latest_period_for_company(doc: &Document, company: &str) -> Option<Period> {
    let needle = normalize_company(company);
    let mut latest: Option<(i64, i64)> = None;

    for scores in doc.scores() {
        for entry in &scores.entries {
            if entry.company_key() != needle {
                continue;
            }
            let year = entry
                .get("year")
                .and_then(value_text)
                .and_then(|y| y.trim().parse::<i64>().ok());
            let month = entry.get("period").and_then(value_int);
            let (Some(year), Some(month)) = (year, month) else {
                continue;
            };
            if latest.is_none_or(|current| (year, month) > current) {
                latest = Some((year, month));
            }
        }
    }

    latest.map(|(year, month)| Period::new(year.to_string(), month))
}

/// Company names for an industry in rank order, trimmed.
pub fn industry_companies(doc: &Document, industry: &str, filter: PeriodFilter) -> Vec<String> {
    let filter = filter.or_latest(latest_period_for_industry(doc, industry));
    rank_ordered(doc.scores_for(industry), &filter)
        .into_iter()
        .filter(|entry| entry.has_company())
        .map(|entry| entry.company().trim().to_string())
        .collect()
}

/// First entry for a company across all industries that satisfies the filter.
///
/// With no period given, the company's own latest period is used.
pub fn company_by_name(doc: &Document, company: &str, filter: PeriodFilter) -> Option<RankedEntry> {
    let filter = filter.or_latest(latest_period_for_company(doc, company));
    let needle = normalize_company(company);

    doc.scores().iter().find_map(|scores| {
        scores
            .entries
            .iter()
            .find(|entry| entry.company_key() == needle && filter.matches(entry))
            .map(|entry| entry.to_external(Some(&scores.industry)))
    })
}

/// Every entry for a company across industries and periods that satisfies the filter.
///
/// No latest-period default: an unset filter returns the full history.
pub fn company_entries(doc: &Document, company: &str, filter: &PeriodFilter) -> Vec<RankedEntry> {
    let needle = normalize_company(company);

    doc.scores()
        .iter()
        .flat_map(|scores| {
            scores
                .entries
                .iter()
                .filter(|entry| entry.company_key() == needle && filter.matches(entry))
                .map(|entry| entry.to_external(Some(&scores.industry)))
        })
        .collect()
}

/// Look up several companies at once.
///
/// With an industry, names are resolved against that industry's entries for
/// one period (its latest unless given). Without one, each name goes through
/// [`company_by_name`].
pub fn companies_by_names(
    doc: &Document,
    names: &[String],
    industry: Option<&str>,
    filter: PeriodFilter,
) -> CompanyLookup {
    let mut lookup = CompanyLookup::new();
    if names.is_empty() {
        return lookup;
    }

    match industry.filter(|i| !i.is_empty()) {
        Some(industry) => {
            let filter = filter.or_latest(latest_period_for_industry(doc, industry));
            let code = industry.to_uppercase();
            let index: HashMap<String, &RankingEntry> = doc
                .scores_for(industry)
                .iter()
                .filter(|entry| filter.matches(entry))
                .map(|entry| (entry.company_key(), entry))
                .collect();

            for name in names {
                let entry = index
                    .get(&normalize_company(name))
                    .map(|entry| entry.to_external(Some(&code)));
                lookup.insert(name.clone(), entry);
            }
        }
        None => {
            for name in names {
                lookup.insert(name.clone(), company_by_name(doc, name, filter.clone()));
            }
        }
    }

    lookup
}

/// Entry at 1-based position `rank` in an industry's rank order.
pub fn nth_rank(doc: &Document, rank: i64, industry: &str, filter: PeriodFilter) -> Option<RankedEntry> {
    let index = usize::try_from(rank).ok()?.checked_sub(1)?;
    let filter = filter.or_latest(latest_period_for_industry(doc, industry));
    let code = industry.to_uppercase();

    rank_ordered(doc.scores_for(industry), &filter)
        .get(index)
        .map(|entry| entry.to_external(Some(&code)))
}

/// An industry's entries in rank order, sliced by `offset` and `limit`.
///
/// Negative offsets are treated as 0, negative limits as 0.
pub fn rankings(
    doc: &Document,
    industry: &str,
    limit: Option<i64>,
    offset: i64,
    filter: PeriodFilter,
) -> Vec<RankedEntry> {
    let filter = filter.or_latest(latest_period_for_industry(doc, industry));
    let code = industry.to_uppercase();
    let ordered = rank_ordered(doc.scores_for(industry), &filter);

    let start = to_index(offset).min(ordered.len());
    let end = limit.map_or(ordered.len(), |limit| {
        start.saturating_add(to_index(limit)).min(ordered.len())
    });

    ordered[start..end]
        .iter()
        .map(|entry| entry.to_external(Some(&code)))
        .collect()
}

/// Case-insensitive substring search over company names.
///
/// Industries are scanned in upstream order and entries in stored order;
/// scanning stops once `limit` hits are collected. Without a period, each
/// industry listed in `industries` is restricted to its own latest period.
pub fn search_companies(doc: &Document, query: &str, limit: usize, filter: &PeriodFilter) -> Vec<SearchHit> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() || limit == 0 {
        return Vec::new();
    }

    let latest_by_industry: HashMap<&str, Option<Period>> = if filter.is_unset() {
        doc.industries()
            .iter()
            .map(|industry| (industry.as_str(), latest_period_for_industry(doc, industry)))
            .collect()
    } else {
        HashMap::new()
    };

    let mut hits = Vec::new();
    for scores in doc.scores() {
        let effective = if filter.is_unset() {
            latest_by_industry
                .get(scores.industry.as_str())
                .cloned()
                .flatten()
                .map_or_else(PeriodFilter::any, |period| period.as_filter())
        } else {
            filter.clone()
        };

        for entry in &scores.entries {
            let name = entry.company();
            if !name.to_lowercase().contains(&needle) || !effective.matches(entry) {
                continue;
            }
            hits.push(SearchHit {
                company: name,
                industry: scores.industry.clone(),
                ranking: entry.get("ranking").cloned().unwrap_or(Value::Null),
            });
            if hits.len() >= limit {
                return hits;
            }
        }
    }

    hits
}

/// Discovery payload: industry list plus live examples taken from the data.
pub fn discovery_schema(doc: &Document) -> DiscoverySchema {
    let industries = list_industries(doc);
    let representative = industries.first().map(String::as_str);

    let overview = representative.and_then(|industry| industry_overview(doc, industry));

    let company_ranking = doc.scores().iter().find_map(|scores| {
        scores
            .entries
            .first()
            .map(|entry| entry.to_external(Some(&scores.industry)))
    });

    let mut top = representative.map_or_else(Vec::new, |industry| top_companies(doc, industry));
    if top.is_empty() {
        if let Some(Value::Array(items)) = overview.as_ref().and_then(|o| o.get("top_companies")) {
            top.clone_from(items);
        }
    }

    let periods_by_industry = industries
        .iter()
        .map(|industry| (industry.clone(), available_periods(doc, Some(industry))))
        .collect();

    DiscoverySchema {
        examples: DiscoveryExamples {
            overview,
            company_ranking,
            top_companies: top,
            periods: available_periods(doc, None),
            periods_by_industry,
        },
        industries,
    }
}

/// Entries passing the filter, stably sorted by ascending ranking.
fn rank_ordered<'a>(entries: &'a [RankingEntry], filter: &PeriodFilter) -> Vec<&'a RankingEntry> {
    let mut selected: Vec<&RankingEntry> = entries.iter().filter(|e| filter.matches(e)).collect();
    selected.sort_by_key(|entry| entry.rank_sort_key());
    selected
}

fn to_index(value: i64) -> usize {
    usize::try_from(value.max(0)).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// CPG has two periods with the order of A and B flipped between them.
    fn sample() -> Document {
        Document::from_value(json!({
            "industries": ["CPG", "BANKING"],
            "data": [
                {"name": "cpg", "score": 71, "top_companies": [{"company": "A"}, {"company": "B"}]},
                {"name": "BANKING", "score": 64}
            ],
            "scoresData": {
                "CPG": [
                    {"company": "B", "ranking": 1, "year": "2023", "period": 1},
                    {"company": "A", "ranking": 2, "year": "2023", "period": 1},
                    {"company": " A ", "ranking": 1, "year": "2023", "period": 2},
                    {"company": "B", "ranking": 2, "year": "2023", "period": 2}
                ],
                "BANKING": [
                    {"company": "Alpha Bank", "ranking": 2, "year": "2022", "period": 12},
                    {"company": "Beta Bank", "ranking": 1, "year": "2022", "period": 12},
                    {"company": "A", "ranking": 3, "year": "2024", "period": 3}
                ]
            }
        }))
        .unwrap()
    }

    fn companies(entries: &[RankedEntry]) -> Vec<String> {
        entries.iter().map(RankedEntry::company).collect()
    }

    #[test]
    fn test_list_industries_passthrough() {
        assert_eq!(list_industries(&sample()), ["CPG", "BANKING"]);
    }

    #[test]
    fn test_industry_overview_and_top_companies() {
        let doc = sample();
        assert_eq!(industry_overview(&doc, "CPG").unwrap()["score"], json!(71));
        assert!(industry_overview(&doc, "RETAIL").is_none());

        assert_eq!(top_companies(&doc, "cpg").len(), 2);
        assert!(top_companies(&doc, "banking").is_empty());
        assert!(top_companies(&doc, "retail").is_empty());
    }

    #[test]
    fn test_available_periods_sorted_and_distinct() {
        let doc = sample();
        assert_eq!(
            available_periods(&doc, Some("cpg")),
            vec![Period::new("2023", 1), Period::new("2023", 2)]
        );
        assert_eq!(
            available_periods(&doc, None),
            vec![
                Period::new("2022", 12),
                Period::new("2023", 1),
                Period::new("2023", 2),
                Period::new("2024", 3),
            ]
        );
        assert!(available_periods(&doc, Some("retail")).is_empty());
        assert_eq!(available_periods(&doc, Some("")).len(), 4);
    }

    #[test]
    fn test_available_periods_skip_incomplete_entries() {
        let doc = Document::from_value(json!({
            "scoresData": {"X": [
                {"company": "a", "year": "2023"},
                {"company": "b", "period": 4},
                {"company": "c", "year": "2023", "period": "april"},
                {"company": "d", "year": 2023, "period": "4"}
            ]}
        }))
        .unwrap();
        assert_eq!(available_periods(&doc, Some("x")), vec![Period::new("2023", 4)]);
    }

    #[test]
    fn test_industry_companies_defaults_to_latest_period() {
        assert_eq!(industry_companies(&sample(), "cpg", PeriodFilter::any()), ["A", "B"]);
    }

    #[test]
    fn test_industry_companies_explicit_period() {
        let filter = PeriodFilter::new(Some("2023".to_string()), Some(1));
        assert_eq!(industry_companies(&sample(), "CPG", filter), ["B", "A"]);
    }

    #[test]
    fn test_industry_companies_unmatched_period_is_empty() {
        let filter = PeriodFilter::new(Some("1999".to_string()), Some(1));
        assert!(industry_companies(&sample(), "CPG", filter).is_empty());
        assert!(industry_companies(&sample(), "RETAIL", PeriodFilter::any()).is_empty());
    }

    #[test]
    fn test_latest_period_for_company_spans_industries() {
        let doc = sample();
        assert_eq!(latest_period_for_company(&doc, "a"), Some(Period::new("2024", 3)));
        assert_eq!(latest_period_for_company(&doc, "Beta Bank"), Some(Period::new("2022", 12)));
        assert_eq!(latest_period_for_company(&doc, "nobody"), None);
    }

    #[test]
    fn test_company_by_name_uses_company_latest_period() {
        let entry = company_by_name(&sample(), "  a ", PeriodFilter::any()).unwrap();
        assert_eq!(entry.industry(), Some("BANKING"));
        assert_eq!(entry.get("month"), Some(&json!(3)));
        assert!(entry.get("period").is_none());
    }

    #[test]
    fn test_company_by_name_with_period() {
        let filter = PeriodFilter::new(Some("2023".to_string()), Some(1));
        let entry = company_by_name(&sample(), "A", filter).unwrap();
        assert_eq!(entry.industry(), Some("CPG"));
        assert_eq!(entry.ranking(), Some(2));

        let filter = PeriodFilter::new(Some("2030".to_string()), None);
        assert!(company_by_name(&sample(), "A", filter).is_none());
        assert!(company_by_name(&sample(), "Zed", PeriodFilter::any()).is_none());
    }

    #[test]
    fn test_company_entries_returns_full_history() {
        let doc = sample();
        let all = company_entries(&doc, "a", &PeriodFilter::any());
        assert_eq!(all.len(), 3);
        assert!(all.iter().all(|e| e.get("month").is_some() && e.get("period").is_none()));

        let only_2023 = company_entries(&doc, "a", &PeriodFilter::new(Some("2023".to_string()), None));
        assert_eq!(only_2023.len(), 2);
        assert!(company_entries(&doc, "zed", &PeriodFilter::any()).is_empty());
    }

    #[test]
    fn test_companies_by_names_with_industry() {
        let names = vec!["a".to_string(), "Nobody".to_string(), "B ".to_string()];
        let lookup = companies_by_names(&sample(), &names, Some("cpg"), PeriodFilter::any());

        assert_eq!(lookup.len(), 3);
        let a = lookup.get("a").unwrap().as_ref().unwrap();
        assert_eq!(a.ranking(), Some(1));
        assert_eq!(a.industry(), Some("CPG"));
        assert!(lookup.get("Nobody").unwrap().is_none());
        assert_eq!(lookup.get("B ").unwrap().as_ref().unwrap().ranking(), Some(2));
    }

    #[test]
    fn test_companies_by_names_global() {
        let names = vec!["Beta Bank".to_string(), "A".to_string()];
        let lookup = companies_by_names(&sample(), &names, None, PeriodFilter::any());

        assert_eq!(
            lookup.get("Beta Bank").unwrap().as_ref().unwrap().industry(),
            Some("BANKING")
        );
        assert_eq!(lookup.get("A").unwrap().as_ref().unwrap().get("year"), Some(&json!("2024")));
        assert!(companies_by_names(&sample(), &[], None, PeriodFilter::any()).is_empty());
    }

    #[test]
    fn test_nth_rank_bounds() {
        let doc = sample();
        assert_eq!(nth_rank(&doc, 1, "cpg", PeriodFilter::any()).unwrap().company(), " A ");
        assert_eq!(nth_rank(&doc, 2, "cpg", PeriodFilter::any()).unwrap().company(), "B");
        assert!(nth_rank(&doc, 0, "cpg", PeriodFilter::any()).is_none());
        assert!(nth_rank(&doc, -1, "cpg", PeriodFilter::any()).is_none());
        assert!(nth_rank(&doc, 3, "cpg", PeriodFilter::any()).is_none());
        assert!(nth_rank(&doc, 1, "retail", PeriodFilter::any()).is_none());
    }

    #[test]
    fn test_rankings_pagination() {
        let doc = sample();
        let filter = PeriodFilter::new(Some("2022".to_string()), Some(12));

        let all = rankings(&doc, "banking", None, 0, filter.clone());
        assert_eq!(companies(&all), ["Beta Bank", "Alpha Bank"]);
        assert!(all.iter().all(|e| e.industry() == Some("BANKING")));

        assert_eq!(companies(&rankings(&doc, "banking", None, 1, filter.clone())), ["Alpha Bank"]);
        assert_eq!(companies(&rankings(&doc, "banking", Some(1), 0, filter.clone())), ["Beta Bank"]);
        assert!(rankings(&doc, "banking", Some(0), 0, filter.clone()).is_empty());
        assert!(rankings(&doc, "banking", Some(5), 10, filter.clone()).is_empty());
        assert_eq!(rankings(&doc, "banking", None, -4, filter).len(), 2);
    }

    #[test]
    fn test_rankings_default_period_for_industry() {
        // Latest BANKING period is 2024-03 with a single entry.
        let latest = rankings(&sample(), "BANKING", None, 0, PeriodFilter::any());
        assert_eq!(companies(&latest), ["A"]);
    }

    #[test]
    fn test_rankings_unranked_entries_sort_last() {
        let doc = Document::from_value(json!({
            "scoresData": {"X": [
                {"company": "none"},
                {"company": "two", "ranking": 2},
                {"company": "one", "ranking": 1}
            ]}
        }))
        .unwrap();
        let ordered = rankings(&doc, "x", None, 0, PeriodFilter::any());
        assert_eq!(companies(&ordered), ["one", "two", "none"]);
    }

    #[test]
    fn test_search_uses_each_industry_latest_period() {
        let hits = search_companies(&sample(), "a", 25, &PeriodFilter::any());
        let found: Vec<(&str, &str)> = hits
            .iter()
            .map(|h| (h.company.as_str(), h.industry.as_str()))
            .collect();
        // CPG restricted to 2023-02, BANKING to 2024-03.
        assert_eq!(found, [(" A ", "CPG"), ("A", "BANKING")]);
    }

    #[test]
    fn test_search_with_explicit_period_applies_everywhere() {
        let filter = PeriodFilter::new(Some("2022".to_string()), None);
        let hits = search_companies(&sample(), "BANK", 25, &filter);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].company, "Alpha Bank");
        assert_eq!(hits[0].ranking, json!(2));
    }

    #[test]
    fn test_search_stops_at_limit() {
        let hits = search_companies(&sample(), "a", 1, &PeriodFilter::any());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].industry, "CPG");
    }

    #[test]
    fn test_search_blank_query_or_zero_limit() {
        assert!(search_companies(&sample(), "   ", 10, &PeriodFilter::any()).is_empty());
        assert!(search_companies(&sample(), "a", 0, &PeriodFilter::any()).is_empty());
    }

    #[test]
    fn test_search_unlisted_industry_is_unfiltered() {
        let doc = Document::from_value(json!({
            "industries": [],
            "scoresData": {"HIDDEN": [
                {"company": "Acme", "ranking": 1, "year": "2020", "period": 1},
                {"company": "Acme", "ranking": 1, "year": "2021", "period": 1}
            ]}
        }))
        .unwrap();
        assert_eq!(search_companies(&doc, "acme", 10, &PeriodFilter::any()).len(), 2);
    }

    #[test]
    fn test_discovery_schema() {
        let schema = discovery_schema(&sample());
        assert_eq!(schema.industries, ["CPG", "BANKING"]);
        assert_eq!(schema.examples.overview.as_ref().unwrap()["name"], json!("cpg"));
        let ranking = schema.examples.company_ranking.as_ref().unwrap();
        assert_eq!(ranking.company(), "B");
        assert_eq!(ranking.industry(), Some("CPG"));
        assert_eq!(schema.examples.top_companies.len(), 2);
        assert_eq!(schema.examples.periods.len(), 4);
        assert_eq!(schema.examples.periods_by_industry.len(), 2);
        assert_eq!(schema.examples.periods_by_industry[1].0, "BANKING");
    }

    #[test]
    fn test_discovery_schema_empty_document() {
        let schema = discovery_schema(&Document::default());
        assert!(schema.industries.is_empty());
        assert!(schema.examples.overview.is_none());
        assert!(schema.examples.company_ranking.is_none());
        assert!(schema.examples.top_companies.is_empty());
        assert!(schema.examples.periods_by_industry.is_empty());
    }
}
