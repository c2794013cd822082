//! Benchmarks for the hot query paths over a synthetic index.
//!
//! Run with: cargo bench --bench query_layer

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use industry_index::domain::models::{Document, PeriodFilter};
use industry_index::services::ranking_queries;
use serde_json::{json, Value};

const INDUSTRIES: [&str; 6] = ["CPG", "BANKING", "RETAIL", "ENERGY", "TELECOM", "AUTO"];

/// Build a document with `companies` entries per industry spread over 24 months.
fn build_document(companies: usize) -> Document {
    let mut scores = serde_json::Map::new();
    for industry in INDUSTRIES {
        let rows: Vec<Value> = (0..companies)
            .map(|i| {
                json!({
                    "company": format!("{industry} Company {i}"),
                    "ranking": (i % 100) + 1,
                    "year": (2023 + (i % 24) / 12).to_string(),
                    "period": (i % 12) + 1,
                })
            })
            .collect();
        scores.insert(industry.to_string(), Value::Array(rows));
    }
    Document::from_value(json!({
        "industries": INDUSTRIES,
        "data": INDUSTRIES.iter().map(|name| json!({"name": name})).collect::<Vec<_>>(),
        "scoresData": scores,
    }))
    .expect("synthetic document is well formed")
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_layer");

    for companies in [100, 1_000, 10_000] {
        let doc = build_document(companies);

        group.bench_with_input(
            BenchmarkId::new("rankings_latest", companies),
            &companies,
            |b, _| {
                b.iter(|| {
                    ranking_queries::rankings(
                        black_box(&doc),
                        "retail",
                        Some(25),
                        0,
                        PeriodFilter::any(),
                    )
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("search_per_industry_latest", companies),
            &companies,
            |b, _| {
                b.iter(|| {
                    ranking_queries::search_companies(
                        black_box(&doc),
                        "company 9",
                        25,
                        &PeriodFilter::any(),
                    )
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("available_periods", companies),
            &companies,
            |b, _| b.iter(|| ranking_queries::available_periods(black_box(&doc), None)),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_queries);
criterion_main!(benches);
