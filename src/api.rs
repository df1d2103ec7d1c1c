// Wire types of the reporter API

use crate::config::ReporterConfig;
use crate::state::{RunStatus, TestOutcome, TestStatus};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `POST /api/reporter?api_key=..`
#[derive(Debug, Default, Serialize, PartialEq)]
pub struct CreateRunRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_run: Option<&'a str>,
}

impl<'a> CreateRunRequest<'a> {
    pub fn from_config(config: &'a ReporterConfig) -> Self {
        Self {
            group_title: config.run_group_title.as_deref(),
            env: config.env.as_deref(),
            title: config.title.as_deref(),
            shared_run: config.shared_run.as_deref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateRunResponse {
    pub uid: String,
}

/// `POST /api/reporter/{run}/testrun`
#[derive(Debug, Serialize)]
pub struct TestRunRequest<'a> {
    pub api_key: &'a str,
    pub status: TestStatus,
    pub message: &'a str,
    pub run_time: u64,
    pub title: &'a str,
    pub suite_title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<&'a Map<String, Value>>,
}

impl<'a> TestRunRequest<'a> {
    pub fn new(api_key: &'a str, outcome: &'a TestOutcome, create_tests: bool) -> Self {
        Self {
            api_key,
            status: outcome.status,
            message: &outcome.message,
            run_time: outcome.duration_ms,
            title: &outcome.title,
            suite_title: &outcome.suite_title,
            test_id: outcome.external_id.as_deref(),
            create: create_tests.then_some(true),
            stack: outcome.stack_trace.as_deref(),
            example: outcome.examples.as_ref(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TestRunResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// `PUT /api/reporter/{run}`
#[derive(Debug, Serialize)]
pub struct FinishRunRequest<'a> {
    pub api_key: &'a str,
    pub status_event: RunStatus,
}
