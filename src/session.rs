// Run session - the one remote run this process reports into

use once_cell::sync::OnceCell;
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use crate::api::{
    CreateRunRequest, CreateRunResponse, FinishRunRequest, TestRunRequest, TestRunResponse,
};
use crate::config::ReporterConfig;
use crate::error::ReporterError;
use crate::state::RunStatus;
use crate::transport::{HttpMethod, Transport, TransportError};

/// Process-scoped run context, shared by every reporter through an `Arc`.
///
/// The run id goes from absent to present at most once: either adopted from
/// configuration at construction or created on first use.
pub struct RunSession {
    config: ReporterConfig,
    transport: Box<dyn Transport>,
    id: OnceCell<String>,
}

impl RunSession {
    pub fn new(config: ReporterConfig, transport: Box<dyn Transport>) -> Self {
        let id = match &config.run_id {
            Some(run_id) => OnceCell::with_value(run_id.clone()),
            None => OnceCell::new(),
        };

        Self {
            config,
            transport,
            id,
        }
    }

    pub fn config(&self) -> &ReporterConfig {
        &self.config
    }

    /// Current run id, if the run exists
    pub fn id(&self) -> Option<&str> {
        self.id.get().map(String::as_str)
    }

    /// Return the run id, creating the run on first call
    pub fn ensure_created(&self) -> Result<&str, ReporterError> {
        if let Some(id) = self.id.get() {
            return Ok(id.as_str());
        }

        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(ReporterError::MissingApiKey)?;
        let uid = self.create_run(api_key)?;
        info!("Started Testomatio run {}", uid);

        Ok(self.id.get_or_init(|| uid).as_str())
    }

    fn create_run(&self, api_key: &str) -> Result<String, ReporterError> {
        let mut url = self.endpoint(&[])?;
        url.query_pairs_mut().append_pair("api_key", api_key);

        let request = CreateRunRequest::from_config(&self.config);
        let body = if request.is_empty() {
            None
        } else {
            Some(serde_json::to_value(&request).unwrap_or(Value::Null))
        };

        let response = self.transport.send(HttpMethod::Post, &url, body.as_ref())?;
        let created: CreateRunResponse =
            serde_json::from_value(response).map_err(|_| ReporterError::MissingRunId)?;

        if created.uid.trim().is_empty() {
            return Err(ReporterError::MissingRunId);
        }
        Ok(created.uid)
    }

    /// Submit one test result to `run_id`
    pub fn submit_test(
        &self,
        run_id: &str,
        request: &TestRunRequest<'_>,
    ) -> Result<TestRunResponse, TransportError> {
        let url = self.endpoint(&[run_id, "testrun"])?;
        let body = serde_json::to_value(request).unwrap_or(Value::Null);
        let response = self.transport.send(HttpMethod::Post, &url, Some(&body))?;

        Ok(serde_json::from_value(response).unwrap_or_default())
    }

    /// Close the run. `Ok(false)` when there is nothing to close.
    pub fn finish(&self, status: RunStatus) -> Result<bool, TransportError> {
        let (Some(api_key), Some(run_id)) = (self.config.api_key.as_deref(), self.id()) else {
            debug!("No run to finish");
            return Ok(false);
        };

        let url = self.endpoint(&[run_id])?;
        let request = FinishRunRequest {
            api_key,
            status_event: status,
        };
        let body = serde_json::to_value(&request).unwrap_or(Value::Null);
        self.transport.send(HttpMethod::Put, &url, Some(&body))?;

        Ok(true)
    }

    /// `{base}/api/reporter/{segments..}`
    fn endpoint(&self, segments: &[&str]) -> Result<Url, TransportError> {
        let invalid = |message: &str| TransportError::InvalidUrl {
            url: self.config.base_url.clone(),
            message: message.to_string(),
        };

        let mut url = Url::parse(&self.config.base_url).map_err(|e| invalid(&e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("URL cannot be a base"))?
            .pop_if_empty()
            .extend(["api", "reporter"])
            .extend(segments);

        Ok(url)
    }
}
