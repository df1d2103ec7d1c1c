// Shared test helpers - a transport that records requests instead of sending them

#![allow(dead_code)]

use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use url::Url;

use testomatio_reporter::config::ReporterConfig;
use testomatio_reporter::session::RunSession;
use testomatio_reporter::transport::{HttpMethod, Transport, TransportError};

pub const API_KEY: &str = "tstmt_test_key";
pub const CREATED_RUN_ID: &str = "run-1";

/// One recorded request
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: HttpMethod,
    pub url: String,
    pub body: Option<Value>,
}

impl Request {
    pub fn path(&self) -> String {
        Url::parse(&self.url)
            .map(|u| u.path().to_string())
            .unwrap_or_default()
    }

    pub fn is_create_run(&self) -> bool {
        self.method == HttpMethod::Post && self.path() == "/api/reporter"
    }

    pub fn is_testrun(&self) -> bool {
        self.method == HttpMethod::Post && self.path().ends_with("/testrun")
    }

    pub fn is_finish(&self) -> bool {
        self.method == HttpMethod::Put
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.body.as_ref().and_then(|b| b.get(name))
    }
}

type Responder = dyn Fn(&Request) -> Result<Value, TransportError> + Send + Sync;

/// Records requests and answers them with `responder`
#[derive(Clone)]
pub struct RecordingTransport {
    requests: Arc<Mutex<Vec<Request>>>,
    responder: Arc<Responder>,
}

impl Default for RecordingTransport {
    fn default() -> Self {
        Self::with_responder(|request| {
            if request.is_create_run() {
                Ok(json!({ "uid": CREATED_RUN_ID }))
            } else {
                Ok(Value::Null)
            }
        })
    }
}

impl RecordingTransport {
    pub fn with_responder<F>(responder: F) -> Self
    where
        F: Fn(&Request) -> Result<Value, TransportError> + Send + Sync + 'static,
    {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            responder: Arc::new(responder),
        }
    }

    /// Creating runs works, every other call gets `status`
    pub fn rejecting_after_create(status: u16) -> Self {
        Self::with_responder(move |request| {
            if request.is_create_run() {
                Ok(json!({ "uid": CREATED_RUN_ID }))
            } else {
                Err(http_error(request, status))
            }
        })
    }

    /// Nothing answers
    pub fn unreachable() -> Self {
        Self::with_responder(|request| {
            Err(TransportError::Connection {
                method: request.method,
                url: request.url.clone(),
                message: "connection refused".into(),
            })
        })
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, predicate: impl Fn(&Request) -> bool) -> usize {
        self.requests().iter().filter(|r| predicate(r)).count()
    }
}

impl Transport for RecordingTransport {
    fn send(
        &self,
        method: HttpMethod,
        url: &Url,
        body: Option<&Value>,
    ) -> Result<Value, TransportError> {
        let request = Request {
            method,
            url: url.to_string(),
            body: body.cloned(),
        };
        self.requests.lock().unwrap().push(request.clone());
        (self.responder)(&request)
    }
}

pub fn http_error(request: &Request, status: u16) -> TransportError {
    TransportError::Status {
        method: request.method,
        url: request.url.clone(),
        status,
        body: String::new(),
    }
}

pub fn enabled_config() -> ReporterConfig {
    ReporterConfig::default().with_api_key(Some(API_KEY.to_string()))
}

pub fn session(config: ReporterConfig, transport: &RecordingTransport) -> Arc<RunSession> {
    Arc::new(RunSession::new(config, Box::new(transport.clone())))
}
