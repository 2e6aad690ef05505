//! Request and response shapes shared by every generated operation.
//!
//! A generated operation describes itself with [`RequestOptions`] (what to
//! call and which status codes count as success), hands it to
//! [`ArmClient::execute`](super::client::ArmClient::execute) and decodes the
//! resulting [`RawResponse`] into a [`Response`].

use crate::error::{Error, Result};
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::time::Duration;

/// Identifies a generated operation in errors and logs, e.g.
/// `apidefinitions.ApiDefinitionsClient#Get`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Operation {
    pub service: &'static str,
    pub client: &'static str,
    pub name: &'static str,
}

impl Operation {
    pub const fn new(service: &'static str, client: &'static str, name: &'static str) -> Self {
        Self {
            service,
            client,
            name,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}#{}", self.service, self.client, self.name)
    }
}

/// Everything needed to build one ARM request.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub operation: Operation,
    pub method: Method,
    /// Either a path relative to the endpoint (usually a resource ID plus a
    /// suffix) or an absolute URL handed back by the service (`nextLink`,
    /// `Azure-AsyncOperation`, `Location`).
    pub path: String,
    pub api_version: &'static str,
    pub expected_status: Vec<StatusCode>,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<Value>,
}

impl RequestOptions {
    pub fn new(
        operation: Operation,
        method: Method,
        path: impl Into<String>,
        api_version: &'static str,
    ) -> Self {
        Self {
            operation,
            method,
            path: path.into(),
            api_version,
            expected_status: vec![StatusCode::OK],
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Replace the accepted status codes.
    pub fn expect(mut self, codes: &[u16]) -> Self {
        self.expected_status = codes
            .iter()
            .filter_map(|code| StatusCode::from_u16(*code).ok())
            .collect();
        self
    }

    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    pub fn optional_query<V: fmt::Display>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query(key, value.to_string()),
            None => self,
        }
    }

    pub fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    pub fn optional_header(self, name: &'static str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.header(name, value),
            None => self,
        }
    }

    /// Attach a JSON body.
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        let value = serde_json::to_value(body)
            .map_err(|e| Error::prepare(self.operation, format!("serializing body: {}", e)))?;
        self.body = Some(value);
        Ok(self)
    }

    pub fn is_absolute(&self) -> bool {
        self.path.starts_with("https://") || self.path.starts_with("http://")
    }
}

/// The raw HTTP exchange behind every operation response.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl RawResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }

    /// `Retry-After` in seconds. HTTP-date values are ignored.
    pub fn retry_after(&self) -> Option<Duration> {
        self.header("retry-after")?
            .trim()
            .parse::<u64>()
            .ok()
            .map(Duration::from_secs)
    }

    pub fn etag(&self) -> Option<&str> {
        self.header("etag")
    }

    /// Decode the body, `None` when it's empty.
    pub fn json<T: DeserializeOwned>(&self, operation: Operation) -> Result<Option<T>> {
        if self.is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&self.body)
            .map(Some)
            .map_err(|e| Error::decode(operation, e, self))
    }

    /// Decode the body as untyped JSON, `Value::Null` when empty.
    pub fn value(&self, operation: Operation) -> Result<Value> {
        Ok(self.json::<Value>(operation)?.unwrap_or(Value::Null))
    }
}

/// A decoded operation response: the raw exchange plus the model, which is
/// absent for empty bodies.
#[derive(Debug, Clone)]
pub struct Response<T> {
    pub http_response: RawResponse,
    pub model: Option<T>,
}

impl<T> Response<T> {
    /// A response whose body carries no model
    pub fn empty(http_response: RawResponse) -> Self {
        Self {
            http_response,
            model: None,
        }
    }
}

impl<T: DeserializeOwned> Response<T> {
    pub fn from_raw(operation: Operation, raw: RawResponse) -> Result<Self> {
        let model = raw.json(operation)?;
        Ok(Self {
            http_response: raw,
            model,
        })
    }
}
