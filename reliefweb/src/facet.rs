//! Facet request descriptors.

use crate::filter::Filter;
use serde::Serialize;
use serde_json::Value;

/// Builder for one facet to compute alongside query results.
///
/// Only `field` is required; everything else narrows or renames the
/// aggregation. [`Facet::build`] emits the opaque wire payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Facet {
    field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    interval: Option<String>,
}

impl Facet {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            name: None,
            limit: None,
            sort: None,
            filter: None,
            interval: None,
        }
    }

    /// Name under which the facet appears in the response (defaults to the
    /// field name server-side).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Maximum number of facet values to return.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sort order as a `"<key>:<direction>"` token, e.g. `count:desc`.
    pub fn sort(mut self, key: &str, direction: &str) -> Self {
        self.sort = Some(format!("{}:{}", key, direction));
        self
    }

    /// Restrict the facet to items matching a filter.
    pub fn filter(mut self, filter: &Filter) -> Self {
        self.filter = Some(Value::from(filter));
        self
    }

    /// Bucket interval for date facets (`day`, `week`, `month`, `year`).
    pub fn interval(mut self, interval: impl Into<String>) -> Self {
        self.interval = Some(interval.into());
        self
    }

    /// Emit the wire payload for this facet request.
    pub fn build(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_facet() {
        assert_eq!(Facet::new("country").build(), json!({"field": "country"}));
    }

    #[test]
    fn test_full_facet() {
        let facet = Facet::new("date.created")
            .name("by-year")
            .limit(20)
            .sort("value", "desc")
            .interval("year")
            .filter(&Filter::value("status", "current"));
        assert_eq!(
            facet.build(),
            json!({
                "field": "date.created",
                "name": "by-year",
                "limit": 20,
                "sort": "value:desc",
                "filter": {"field": "status", "value": "current"},
                "interval": "year",
            })
        );
    }

    #[test]
    fn test_sort_token_format() {
        let facet = Facet::new("theme").sort("count", "asc");
        assert_eq!(facet.build()["sort"], json!("count:asc"));
    }
}
