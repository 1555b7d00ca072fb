//! HTTP client for the ReliefWeb API.
//!
//! The client owns the reqwest connection pool, the base URL and the
//! `appname` identification parameter the API asks every consumer to send.
//! It implements [`Transport`], collapsing every failure mode into an
//! absent response as queries expect.

use crate::error::Result;
use crate::query::Query;
use crate::transport::{Method, Transport};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.reliefweb.int/v1";

const DEFAULT_APPNAME: &str = "rw-api-rust-client";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// ReliefWeb API client.
///
/// Cheap to clone; clones share the underlying connection pool and are safe
/// to use from concurrent tasks.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
    appname: String,
}

/// Builder for [`Client`].
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    base_url: String,
    appname: String,
    timeout: Duration,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            appname: DEFAULT_APPNAME.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientBuilder {
    /// API base URL, e.g. `https://api.reliefweb.int/v1`.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Name of the application or website using the API, sent as the
    /// `appname` query parameter on every call.
    pub fn appname(mut self, appname: impl Into<String>) -> Self {
        self.appname = appname.into();
        self
    }

    /// Connect and read timeout for each call.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<Client> {
        let base_url = Url::parse(self.base_url.trim_end_matches('/'))?;
        let http = reqwest::Client::builder()
            .connect_timeout(self.timeout)
            .timeout(self.timeout)
            .build()?;
        Ok(Client {
            http,
            base_url,
            appname: self.appname,
        })
    }
}

impl Client {
    /// Client against the production API with default settings.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub fn appname(&self) -> &str {
        &self.appname
    }

    /// Start a query against an arbitrary resource, bound to this client.
    pub fn query(&self, resource: impl Into<String>) -> Query {
        Query::new(resource).client(self.clone())
    }

    /// Query reports.
    pub fn reports(&self) -> Query {
        self.query("reports")
    }

    /// Query jobs.
    pub fn jobs(&self) -> Query {
        self.query("jobs")
    }

    /// Query training opportunities.
    pub fn training(&self) -> Query {
        self.query("training")
    }

    /// Query sources.
    pub fn sources(&self) -> Query {
        self.query("sources")
    }

    /// Query countries.
    pub fn countries(&self) -> Query {
        self.query("countries")
    }

    /// Query disasters.
    pub fn disasters(&self) -> Query {
        self.query("disasters")
    }

    fn call_url(&self, path: &str) -> Option<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut().ok()?.extend(path.split('/'));
        url.query_pairs_mut().append_pair("appname", &self.appname);
        Some(url)
    }
}

#[async_trait]
impl Transport for Client {
    async fn call(&self, path: &str, payload: &Value, method: Method) -> Option<Value> {
        let mut url = match self.call_url(path) {
            Some(url) => url,
            None => {
                tracing::warn!("cannot build request URL for path {}", path);
                return None;
            }
        };
        if method == Method::Get {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query_params(payload) {
                pairs.append_pair(&key, &value);
            }
            drop(pairs);
        }
        tracing::debug!("{} {}", method, url);

        let request = match method {
            Method::Get => self.http.get(url.clone()),
            Method::Post => self.http.post(url.clone()).json(payload),
        };
        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!("request to {} failed: {}", url, err);
                return None;
            }
        };
        let status = response.status();
        if status != reqwest::StatusCode::OK {
            tracing::warn!("request to {} returned status {}", url, status);
            return None;
        }
        match response.json::<Value>().await {
            Ok(data) => Some(data),
            Err(err) => {
                tracing::warn!("response from {} is not valid JSON: {}", url, err);
                None
            }
        }
    }
}

/// Flatten a JSON payload into bracketed query pairs for GET requests,
/// e.g. `{"fields":{"include":["title"]}}` → `fields[include][0]=title`.
fn query_params(payload: &Value) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    if let Value::Object(map) = payload {
        for (key, value) in map {
            collect_pairs(key.clone(), value, &mut pairs);
        }
    }
    pairs
}

fn collect_pairs(key: String, value: &Value, pairs: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (nested_key, nested) in map {
                collect_pairs(format!("{}[{}]", key, nested_key), nested, pairs);
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                collect_pairs(format!("{}[{}]", key, index), item, pairs);
            }
        }
        Value::String(s) => pairs.push((key, s.clone())),
        Value::Number(n) => pairs.push((key, n.to_string())),
        Value::Bool(b) => pairs.push((key, if *b { "1" } else { "0" }.to_string())),
        Value::Null => {}
    }
}
