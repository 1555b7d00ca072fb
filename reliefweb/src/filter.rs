//! Boolean filter expressions for queries.
//!
//! A filter is either a single condition on a field or an AND/OR group of
//! nested filters, with optional negation at any node. [`Filter::build`]
//! produces the opaque wire payload a [`Query`](crate::Query) copies
//! verbatim into the request.

use serde::Serialize;
use serde_json::{json, Value};

/// A filter expression node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Filter {
    node: Node,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
enum Node {
    Condition {
        field: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<Value>,
        #[serde(skip_serializing_if = "is_false")]
        negate: bool,
    },
    Group {
        operator: Operator,
        conditions: Vec<Filter>,
        #[serde(skip_serializing_if = "is_false")]
        negate: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
enum Operator {
    And,
    Or,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Filter {
    /// Condition on field presence: matches items where `field` exists.
    pub fn field(field: impl Into<String>) -> Self {
        Self::condition(field, None)
    }

    /// Condition on a field value. Accepts scalars and lists.
    pub fn value(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::condition(field, Some(value.into()))
    }

    /// Condition on a `{from, to}` range (dates or numbers).
    pub fn range(
        field: impl Into<String>,
        from: impl Into<Value>,
        to: impl Into<Value>,
    ) -> Self {
        let from: Value = from.into();
        let to: Value = to.into();
        Self::condition(field, Some(json!({"from": from, "to": to})))
    }

    /// Open-ended range with only a lower bound.
    pub fn range_from(field: impl Into<String>, from: impl Into<Value>) -> Self {
        let from: Value = from.into();
        Self::condition(field, Some(json!({"from": from})))
    }

    /// Open-ended range with only an upper bound.
    pub fn range_to(field: impl Into<String>, to: impl Into<Value>) -> Self {
        let to: Value = to.into();
        Self::condition(field, Some(json!({"to": to})))
    }

    /// Group of filters that must all match.
    pub fn all(conditions: Vec<Filter>) -> Self {
        Self::group(Operator::And, conditions)
    }

    /// Group of filters of which at least one must match.
    pub fn any(conditions: Vec<Filter>) -> Self {
        Self::group(Operator::Or, conditions)
    }

    /// Negate this node (condition or whole group).
    pub fn negate(mut self) -> Self {
        match &mut self.node {
            Node::Condition { negate, .. } | Node::Group { negate, .. } => *negate = true,
        }
        self
    }

    /// Emit the wire payload for this filter tree.
    pub fn build(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    fn condition(field: impl Into<String>, value: Option<Value>) -> Self {
        Self {
            node: Node::Condition {
                field: field.into(),
                value,
                negate: false,
            },
        }
    }

    fn group(operator: Operator, conditions: Vec<Filter>) -> Self {
        Self {
            node: Node::Group {
                operator,
                conditions,
                negate: false,
            },
        }
    }
}

impl From<&Filter> for Value {
    fn from(filter: &Filter) -> Self {
        filter.build()
    }
}
