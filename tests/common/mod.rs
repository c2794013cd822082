//! Common test utilities for integration tests
//!
//! Provides the shared index fixture and helpers for building services and
//! routers over an in-memory source.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};

use industry_index::adapters::upstream::StaticIndexSource;
use industry_index::IndexService;

/// Key accepted by routers built with [`router`].
pub const API_KEY: &str = "test-key";

/// Two industries; CPG has periods (2023,1) and (2023,2) with A and B
/// swapping places, BANKING has a company whose name also contains "a".
pub fn fixture() -> Value {
    json!({
        "industries": ["CPG", "BANKING"],
        "data": [
            {
                "name": "CPG",
                "score": 71.5,
                "top_companies": [{"company": "A", "score": 90}, {"company": "B", "score": 80}]
            },
            {"name": "BANKING", "score": 64.0}
        ],
        "scoresData": {
            "CPG": [
                {"company": "B", "ranking": 1, "year": "2023", "period": 1, "score": 88},
                {"company": "A", "ranking": 2, "year": "2023", "period": 1, "score": 85},
                {"company": "A", "ranking": 1, "year": "2023", "period": 2, "score": 91},
                {"company": "B", "ranking": 2, "year": "2023", "period": 2, "score": 84}
            ],
            "BANKING": [
                {"company": "Alpha Bank", "ranking": 1, "year": "2023", "period": 2, "score": 77},
                {"company": "Bolt Credit", "ranking": 2, "year": "2023", "period": 2, "score": 70}
            ]
        }
    })
}

/// A static source serving [`fixture`].
pub fn source() -> Arc<StaticIndexSource> {
    Arc::new(StaticIndexSource::from_value(fixture()).expect("fixture is a valid document"))
}

/// A service over `source` with a long TTL.
pub fn service(source: Arc<StaticIndexSource>) -> IndexService {
    IndexService::with_source(source, Duration::from_secs(600))
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
pub fn setup_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
