//! Transport seam between the query builder and the HTTP client.

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// HTTP method used for an API call.
///
/// Collection queries go out as POST with a JSON body; single-item queries
/// go out as GET with the payload folded into the query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One API round trip.
///
/// Implementations collapse every failure mode — connection errors, non-200
/// statuses, malformed response bodies — into `None`. Callers cannot
/// distinguish them at this layer; the only error signal downstream is
/// [`Results::error`](crate::Results::error).
#[async_trait]
pub trait Transport: Send + Sync {
    async fn call(&self, path: &str, payload: &Value, method: Method) -> Option<Value>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn call(&self, path: &str, payload: &Value, method: Method) -> Option<Value> {
        (**self).call(path, payload, method).await
    }
}
