//! Defensive read access over an API response.
//!
//! A [`Results`] wraps the decoded payload of one query execution, or the
//! absence of one when the transport failed. Every accessor is total: a
//! missing key, a mistyped value, or a failed request all read as zero or
//! empty instead of panicking.

use serde_json::Value;
use std::collections::HashMap;

/// Response wrapper with defaulted accessors.
///
/// Immutable after construction; reads are cheap and repeatable.
#[derive(Debug, Clone, PartialEq)]
pub struct Results {
    data: Option<Value>,
}

impl Results {
    /// Wrap a decoded response payload, or `None` when the call failed.
    pub fn new(data: Option<Value>) -> Self {
        Self { data }
    }

    /// True when the transport or HTTP layer signaled failure.
    ///
    /// This is the only error signal exposed at this layer; network errors,
    /// non-200 statuses and undecodable bodies are indistinguishable here.
    pub fn error(&self) -> bool {
        self.data.is_none()
    }

    /// Total number of items matching the query server-side.
    pub fn total(&self) -> u64 {
        self.read_u64("totalCount")
    }

    /// Number of items actually returned by this query.
    pub fn count(&self) -> u64 {
        self.read_u64("count")
    }

    /// Items returned by the query, in response order.
    pub fn items(&self) -> &[Value] {
        self.data
            .as_ref()
            .and_then(|data| data.get("data"))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// First returned item. Intended for single-item queries.
    pub fn item(&self) -> Option<&Value> {
        self.items().first()
    }

    /// All facets keyed by name.
    pub fn facets(&self) -> HashMap<String, FacetResult> {
        match self.facets_object() {
            Some(facets) => facets
                .iter()
                .map(|(name, facet)| (name.clone(), FacetResult::from_value(facet)))
                .collect(),
            None => HashMap::new(),
        }
    }

    /// One named facet, defaulted field by field when missing or partial.
    pub fn facet(&self, name: &str) -> FacetResult {
        self.facets_object()
            .and_then(|facets| facets.get(name))
            .map(FacetResult::from_value)
            .unwrap_or_default()
    }

    /// The underlying payload, `None` in case of query error.
    pub fn raw(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// Consume the wrapper and return the underlying payload.
    pub fn into_raw(self) -> Option<Value> {
        self.data
    }

    fn read_u64(&self, key: &str) -> u64 {
        self.data
            .as_ref()
            .and_then(|data| data.get(key))
            .and_then(Value::as_u64)
            .unwrap_or(0)
    }

    fn facets_object(&self) -> Option<&serde_json::Map<String, Value>> {
        self.data
            .as_ref()?
            .get("embedded")?
            .get("facets")?
            .as_object()
    }
}

/// One facet aggregation as returned by the API.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FacetResult {
    /// Facet buckets (value/count pairs), in response order.
    pub data: Vec<Value>,
    /// Number of documents not covered by this facet.
    pub missing: u64,
    /// Facet type as reported by the API (wire key `type`).
    pub kind: String,
    /// Whether more values exist beyond the returned buckets.
    pub more: bool,
}

impl FacetResult {
    /// Build from a raw facet object, defaulting each field independently.
    pub fn from_value(value: &Value) -> Self {
        Self {
            data: value
                .get("data")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default(),
            missing: value
                .get("missing")
                .and_then(Value::as_u64)
                .unwrap_or(0),
            kind: value
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string(),
            more: value
                .get("more")
                .and_then(Value::as_bool)
                .unwrap_or(false),
        }
    }
}
