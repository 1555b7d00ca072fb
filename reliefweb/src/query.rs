//! Query builder: accumulates request intent and executes it.
//!
//! A [`Query`] is a single-owner fluent builder. Setters consume and return
//! the builder; [`Query::build`] emits the canonical wire payload without
//! mutating accumulated state, and [`Query::execute`] performs one round
//! trip through the attached [`Transport`].

use crate::facet::Facet;
use crate::filter::Filter;
use crate::results::Results;
use crate::transport::{Method, Transport};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Field selection carried on the `fields` wire key.
#[derive(Debug, Clone, Default, PartialEq)]
struct FieldSelection {
    include: Vec<String>,
    exclude: Vec<String>,
}

impl FieldSelection {
    /// Wire form; empty sides are omitted entirely.
    fn to_value(&self) -> Value {
        let mut map = Map::new();
        if !self.include.is_empty() {
            map.insert("include".to_string(), string_list(&self.include));
        }
        if !self.exclude.is_empty() {
            map.insert("exclude".to_string(), string_list(&self.exclude));
        }
        Value::Object(map)
    }
}

/// Full-text search parameters carried on the `query` wire key.
#[derive(Debug, Clone, Default, PartialEq)]
struct SearchParams {
    value: Option<String>,
    fields: Option<Vec<String>>,
    operator: Option<String>,
}

impl SearchParams {
    fn to_value(&self) -> Value {
        let mut map = Map::new();
        if let Some(value) = &self.value {
            map.insert("value".to_string(), Value::String(value.clone()));
        }
        if let Some(fields) = &self.fields {
            map.insert("fields".to_string(), string_list(fields));
        }
        if let Some(operator) = &self.operator {
            map.insert("operator".to_string(), Value::String(operator.clone()));
        }
        Value::Object(map)
    }
}

fn string_list(items: &[String]) -> Value {
    Value::Array(items.iter().cloned().map(Value::String).collect())
}

/// Query against one API resource collection.
#[derive(Clone, Default)]
pub struct Query {
    resource: String,
    id: Option<String>,
    client: Option<Arc<dyn Transport>>,
    fields: Option<FieldSelection>,
    preset: Option<String>,
    profile: Option<String>,
    sort: Vec<String>,
    limit: Option<usize>,
    offset: Option<usize>,
    search: Option<SearchParams>,
    filter: Option<Value>,
    facets: Vec<Value>,
}

impl Query {
    /// Create a query for a resource collection, e.g. `"reports"`.
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            ..Self::default()
        }
    }

    /// Set the resource. An empty name is ignored.
    pub fn resource(mut self, resource: impl Into<String>) -> Self {
        let resource = resource.into();
        if !resource.is_empty() {
            self.resource = resource;
        }
        self
    }

    pub fn get_resource(&self) -> &str {
        &self.resource
    }

    /// Attach the transport this query executes against.
    pub fn client<T: Transport + 'static>(mut self, client: T) -> Self {
        self.client = Some(Arc::new(client));
        self
    }

    pub fn get_client(&self) -> Option<Arc<dyn Transport>> {
        self.client.clone()
    }

    /// Target a single resource item. Switches execution to a GET on
    /// `<resource>/<id>` and narrows the payload; see [`Query::build`].
    /// An empty id is ignored.
    pub fn id(mut self, id: impl ToString) -> Self {
        let id = id.to_string();
        if !id.is_empty() {
            self.id = Some(id);
        }
        self
    }

    pub fn get_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Named server-side query preset. Last write wins.
    pub fn preset(mut self, preset: impl Into<String>) -> Self {
        self.preset = Some(preset.into());
        self
    }

    /// Named server-side response profile. Last write wins.
    pub fn profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Add fields to include or exclude from returned items.
    ///
    /// Repeated calls merge: each side becomes the deduplicated union of
    /// everything passed so far, in first-seen order. Empty slices add
    /// nothing and never clear previous selections.
    pub fn fields<S: AsRef<str>>(mut self, include: &[S], exclude: &[S]) -> Self {
        if include.is_empty() && exclude.is_empty() {
            return self;
        }
        let selection = self.fields.get_or_insert_with(FieldSelection::default);
        merge_unique(&mut selection.include, include);
        merge_unique(&mut selection.exclude, exclude);
        self
    }

    /// Append one sort token. Directions are passed through unvalidated.
    pub fn sort(mut self, field: &str, direction: &str) -> Self {
        self.sort.push(format!("{}:{}", field, direction));
        self
    }

    /// Set both window parameters in one call.
    ///
    /// Known quirk, kept for wire compatibility with existing consumers:
    /// the first argument lands on the `limit` wire key and the second on
    /// `offset` — swapped relative to the parameter names. Use
    /// [`Query::offset`] and [`Query::limit`] for the unswapped forms.
    pub fn range(mut self, offset: usize, limit: usize) -> Self {
        self.limit = Some(offset);
        self.offset = Some(limit);
        self
    }

    /// Offset from which to start returning items.
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Maximum number of items to return.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the full-text search value. Overwrites a previous value; never
    /// touches search fields or operator.
    pub fn search(mut self, value: impl Into<String>) -> Self {
        self.search_params().value = Some(value.into());
        self
    }

    /// Set the fields the search runs against. Unconditional overwrite.
    pub fn search_fields<S: AsRef<str>>(mut self, fields: &[S]) -> Self {
        self.search_params().fields =
            Some(fields.iter().map(|f| f.as_ref().to_string()).collect());
        self
    }

    /// Set the default search operator (`AND` or `OR`).
    pub fn search_operator(mut self, operator: impl Into<String>) -> Self {
        self.search_params().operator = Some(operator.into());
        self
    }

    /// Set the filter, replacing any previous one.
    pub fn filter(mut self, filter: &Filter) -> Self {
        self.filter = Some(filter.build());
        self
    }

    /// Append one facet request.
    pub fn facet(mut self, facet: &Facet) -> Self {
        self.facets.push(facet.build());
        self
    }

    /// Emit the canonical wire payload for the accumulated state.
    ///
    /// Pure and repeatable. When an id is set, only `fields`, `preset` and
    /// `profile` are emitted — the single-item endpoint rejects list-query
    /// parameters — but the accumulated state itself is left intact.
    pub fn build(&self) -> Value {
        let mut payload = Map::new();
        if let Some(fields) = &self.fields {
            payload.insert("fields".to_string(), fields.to_value());
        }
        if let Some(preset) = &self.preset {
            payload.insert("preset".to_string(), Value::String(preset.clone()));
        }
        if let Some(profile) = &self.profile {
            payload.insert("profile".to_string(), Value::String(profile.clone()));
        }
        if self.id.is_none() {
            if !self.sort.is_empty() {
                payload.insert("sort".to_string(), string_list(&self.sort));
            }
            if let Some(limit) = self.limit {
                payload.insert("limit".to_string(), Value::from(limit));
            }
            if let Some(offset) = self.offset {
                payload.insert("offset".to_string(), Value::from(offset));
            }
            if let Some(search) = &self.search {
                payload.insert("query".to_string(), search.to_value());
            }
            if let Some(filter) = &self.filter {
                payload.insert("filter".to_string(), filter.clone());
            }
            if !self.facets.is_empty() {
                payload.insert("facets".to_string(), Value::Array(self.facets.clone()));
            }
        }
        Value::Object(payload)
    }

    /// Execute the query and wrap the outcome.
    ///
    /// Without an attached client or with an empty resource no call is
    /// attempted and the returned [`Results`] reads as an error. Transport
    /// failures surface the same way; this method never fails loudly.
    pub async fn execute(&self) -> Results {
        let data = match &self.client {
            Some(client) if !self.resource.is_empty() => {
                let (path, method) = match &self.id {
                    Some(id) => (format!("{}/{}", self.resource, id), Method::Get),
                    None => (self.resource.clone(), Method::Post),
                };
                client.call(&path, &self.build(), method).await
            }
            _ => None,
        };
        Results::new(data)
    }

    /// Execute and return the decoded payload directly, bypassing the
    /// accessor layer. `None` signals failure.
    pub async fn execute_raw(&self) -> Option<Value> {
        self.execute().await.into_raw()
    }

    fn search_params(&mut self) -> &mut SearchParams {
        self.search.get_or_insert_with(SearchParams::default)
    }
}

fn merge_unique<S: AsRef<str>>(existing: &mut Vec<String>, additions: &[S]) {
    for addition in additions {
        let addition = addition.as_ref();
        if !existing.iter().any(|field| field == addition) {
            existing.push(addition.to_string());
        }
    }
}
