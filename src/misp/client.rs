//! MISP connection and search execution
//!
//! Wraps a blocking HTTP client. Searches are POSTs against the MISP
//! restSearch endpoints with the API key in the `Authorization` header;
//! responses are decoded into an iterator of opaque JSON records.

use crate::error::MispError;
use crate::misp::config::MispConfig;
use crate::misp::query::Query;
use crate::misp::traits::MispSearch;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde_json::Value;
use std::time::Duration;

/// A connection handle to a MISP instance
pub struct Connection {
    client: Client,
    base_url: String,
    api_key: String,
}

impl Connection {
    /// Create a connection from individual parameters
    pub fn new(proto: &str, host: &str, api_key: &str, api_url: &str) -> Result<Self, MispError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("mispq/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(MispError::Client)?;

        Ok(Self {
            client,
            base_url: format!("{}://{}{}", proto, host, api_url),
            api_key: api_key.to_string(),
        })
    }

    /// Create a connection from a loaded configuration
    pub fn from_config(config: &MispConfig) -> Result<Self, MispError> {
        Self::new(&config.proto, &config.host, &config.api_key, &config.api_url)
    }

    /// Base URL this connection targets
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl MispSearch for Connection {
    fn search(&self, query: &Query) -> Result<Matches, MispError> {
        let url = format!("{}{}", self.base_url, query.endpoint());
        let body = serde_json::json!({ "request": query.parameters() });

        log::debug!("{} search against {}", query.kind(), url);
        log::debug!("request body: {}", body);

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, &self.api_key)
            .header(ACCEPT, "application/json")
            .json(&body)
            .send()
            .map_err(|e| MispError::Request {
                url: url.clone(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(MispError::Status { status, url });
        }

        let payload: Value = response.json().map_err(|e| MispError::Request {
            url: url.clone(),
            source: e,
        })?;

        let records = decode_response(query, &url, payload)?;
        log::debug!("{} matching {} record(s)", records.len(), query.kind());

        Ok(Matches::new(records))
    }
}

/// Decode a restSearch response body into individual match records
///
/// Attribute responses carry matches in `response.Attribute`; event
/// responses carry an array of `{"Event": {...}}` wrappers. An absent or
/// null `response` means zero matches, not an error.
fn decode_response(query: &Query, url: &str, payload: Value) -> Result<Vec<Value>, MispError> {
    let response = match payload.get("response") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(r) => r,
    };

    match query {
        Query::Attribute(_) => match response.get("Attribute") {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => Ok(items.clone()),
            Some(other) => Err(MispError::Response {
                url: url.to_string(),
                message: format!("expected Attribute array, got {}", json_kind(other)),
            }),
        },
        Query::Event(_) => match response {
            Value::Array(items) => Ok(items
                .iter()
                .map(|item| item.get("Event").unwrap_or(item).clone())
                .collect()),
            other => Err(MispError::Response {
                url: url.to_string(),
                message: format!("expected event array, got {}", json_kind(other)),
            }),
        },
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Finite, forward-only sequence of search matches
///
/// Yields records in server order; a consumed sequence cannot be
/// restarted.
#[derive(Debug)]
pub struct Matches {
    inner: std::vec::IntoIter<Value>,
}

impl Matches {
    pub(crate) fn new(records: Vec<Value>) -> Self {
        Self {
            inner: records.into_iter(),
        }
    }

    /// Build a match sequence from pre-decoded records
    ///
    /// Used by mock search implementations in tests.
    #[cfg(test)]
    pub fn from_records(records: Vec<Value>) -> Self {
        Self::new(records)
    }
}

impl Iterator for Matches {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
