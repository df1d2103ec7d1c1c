// HTTP transport - JSON requests against the Testomat.io reporter API

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// HTTP verbs used by the reporter API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Post,
    Put,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
        }
    }
}

/// Every way a single request can fail
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    #[error("failed to build HTTP client: {0}")]
    Client(String),

    #[error("{method} {url} failed: {message}")]
    Connection {
        method: HttpMethod,
        url: String,
        message: String,
    },

    #[error("{method} {url} returned HTTP {status}: {body}")]
    Status {
        method: HttpMethod,
        url: String,
        status: u16,
        body: String,
    },
}

/// Request/response primitive the session talks through
pub trait Transport: Send + Sync {
    /// Send `body` as JSON and return the decoded response (`Null` when empty)
    fn send(
        &self,
        method: HttpMethod,
        url: &Url,
        body: Option<&Value>,
    ) -> Result<Value, TransportError>;
}

/// Blocking `reqwest` transport
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("testomatio-reporter/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn send(
        &self,
        method: HttpMethod,
        url: &Url,
        body: Option<&Value>,
    ) -> Result<Value, TransportError> {
        let request = match method {
            HttpMethod::Post => self.client.post(url.clone()),
            HttpMethod::Put => self.client.put(url.clone()),
        };

        let request = match body {
            Some(body) => request.json(body),
            None => request.header(CONTENT_TYPE, "application/json"),
        }
        .header(ACCEPT, "application/json");

        debug!("{} {}", method, redact(url));

        let response = request.send().map_err(|e| TransportError::Connection {
            method,
            url: redact(url),
            message: e.to_string(),
        })?;

        let status = response.status();
        let text = response.text().unwrap_or_default();

        if !status.is_success() {
            return Err(TransportError::Status {
                method,
                url: redact(url),
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(parse_body(&text))
    }
}

/// Decode a response body; empty or non-JSON bodies become `Null`
pub fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|e| {
        debug!("Response is not JSON: {}", e);
        Value::Null
    })
}

/// URL with the `api_key` query value hidden, for logs and errors
pub fn redact(url: &Url) -> String {
    if url.query().is_none() {
        return url.to_string();
    }

    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let value = if k == "api_key" {
                "****".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), value)
        })
        .collect();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}
