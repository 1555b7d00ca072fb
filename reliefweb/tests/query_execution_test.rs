//! End-to-end query execution tests through a stub transport.
//!
//! These exercise the full path from builder state to wire call to
//! accessor reads, without touching the network.

use async_trait::async_trait;
use reliefweb::{Facet, Filter, Method, Query, Transport};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

// ---------------------------------------------------------------------------
// Stub transport
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
struct RecordedCall {
    path: String,
    payload: Value,
    method: Method,
}

struct StubTransport {
    response: Option<Value>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl StubTransport {
    fn returning(response: Value) -> Arc<Self> {
        Arc::new(Self {
            response: Some(response),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Simulates any transport-level failure (network error, HTTP 500,
    /// undecodable body) — they all collapse to an absent response.
    fn failing() -> Arc<Self> {
        Arc::new(Self {
            response: None,
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn call(&self, path: &str, payload: &Value, method: Method) -> Option<Value> {
        self.calls.lock().unwrap().push(RecordedCall {
            path: path.to_string(),
            payload: payload.clone(),
            method,
        });
        self.response.clone()
    }
}

fn sample_response() -> Value {
    json!({
        "totalCount": 42,
        "count": 2,
        "data": [{"id": 1}, {"id": 2}],
    })
}

// ---------------------------------------------------------------------------
// Degraded execution (no call attempted)
// ---------------------------------------------------------------------------

#[tokio::test]
async fn execute_without_client_degrades_to_error() {
    let results = Query::new("reports").limit(5).execute().await;
    assert!(results.error());
    assert_eq!(results.total(), 0);
    assert_eq!(results.count(), 0);
    assert!(results.items().is_empty());
    assert!(results.facets().is_empty());
    assert!(results.raw().is_none());
}

#[tokio::test]
async fn execute_with_empty_resource_makes_no_call() {
    let stub = StubTransport::returning(sample_response());
    let results = Query::new("").client(stub.clone()).execute().await;
    assert!(results.error());
    assert!(stub.calls().is_empty());
}

// ---------------------------------------------------------------------------
// Collection queries
// ---------------------------------------------------------------------------

#[tokio::test]
async fn collection_query_posts_full_payload() {
    let stub = StubTransport::returning(sample_response());
    let query = Query::new("reports")
        .client(stub.clone())
        .search("earthquake")
        .sort("date", "desc")
        .limit(10);

    let results = query.execute().await;

    assert!(!results.error());
    assert_eq!(results.total(), 42);
    assert_eq!(results.count(), 2);
    assert_eq!(results.item(), Some(&json!({"id": 1})));

    let calls = stub.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].path, "reports");
    assert_eq!(calls[0].method, Method::Post);
    assert_eq!(
        calls[0].payload,
        json!({
            "query": {"value": "earthquake"},
            "sort": ["date:desc"],
            "limit": 10,
        })
    );
}

#[tokio::test]
async fn transport_failure_reads_as_defaults() {
    let stub = StubTransport::failing();
    let results = Query::new("reports")
        .client(stub.clone())
        .execute()
        .await;

    assert!(results.error());
    assert_eq!(results.total(), 0);
    assert_eq!(results.count(), 0);
    assert!(results.items().is_empty());
    assert!(results.facets().is_empty());
    assert_eq!(stub.calls().len(), 1);
}

// ---------------------------------------------------------------------------
// Single-item queries
// ---------------------------------------------------------------------------

#[tokio::test]
async fn single_item_query_gets_restricted_payload() {
    let stub = StubTransport::returning(json!({
        "totalCount": 1,
        "count": 1,
        "data": [{"id": 12345, "fields": {"title": "Flood update"}}],
    }));
    let query = Query::new("reports")
        .client(stub.clone())
        .id(12345)
        .fields(&["title"], &[])
        .profile("full")
        // List-query parameters: dropped from the wire for item lookups.
        .sort("date", "desc")
        .limit(10)
        .filter(&Filter::value("status", "current"))
        .facet(&Facet::new("country"));

    let results = query.execute().await;
    assert_eq!(results.item(), Some(&json!({
        "id": 12345,
        "fields": {"title": "Flood update"},
    })));

    let calls = stub.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].path, "reports/12345");
    assert_eq!(calls[0].method, Method::Get);
    assert_eq!(
        calls[0].payload,
        json!({
            "fields": {"include": ["title"]},
            "profile": "full",
        })
    );
}

// ---------------------------------------------------------------------------
// Facets through execution
// ---------------------------------------------------------------------------

#[tokio::test]
async fn facet_reads_with_and_without_entries() {
    let stub = StubTransport::returning(json!({
        "totalCount": 9,
        "count": 0,
        "data": [],
        "embedded": {
            "facets": {
                "theme": {
                    "data": [{"value": "Health", "count": 9}],
                    "type": "term",
                }
            }
        }
    }));
    let results = Query::new("reports")
        .client(stub)
        .facet(&Facet::new("theme"))
        .execute()
        .await;

    let theme = results.facet("theme");
    assert_eq!(theme.data.len(), 1);
    assert_eq!(theme.kind, "term");
    assert_eq!(theme.missing, 0);
    assert!(!theme.more);

    // Absent facet: every property defaults.
    let country = results.facet("country");
    assert!(country.data.is_empty());
    assert_eq!(country.missing, 0);
    assert_eq!(country.kind, "");
    assert!(!country.more);
}

// ---------------------------------------------------------------------------
// Raw execution
// ---------------------------------------------------------------------------

#[tokio::test]
async fn execute_raw_returns_payload_unwrapped() {
    let stub = StubTransport::returning(sample_response());
    let raw = Query::new("reports").client(stub).execute_raw().await;
    assert_eq!(raw, Some(sample_response()));
}

#[tokio::test]
async fn execute_raw_returns_none_on_failure() {
    let stub = StubTransport::failing();
    let raw = Query::new("reports").client(stub).execute_raw().await;
    assert_eq!(raw, None);
}

// ---------------------------------------------------------------------------
// Repeated execution
// ---------------------------------------------------------------------------

#[tokio::test]
async fn query_is_reusable_across_executions() {
    let stub = StubTransport::returning(sample_response());
    let query = Query::new("reports").client(stub.clone()).limit(10);

    let first = query.execute().await;
    let second = query.execute().await;

    assert_eq!(first, second);
    let calls = stub.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], calls[1]);
}
