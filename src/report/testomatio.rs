// Testomat.io reporter - submits each test outcome to the current run

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

use crate::api::TestRunRequest;
use crate::error::ReporterError;
use crate::session::RunSession;
use crate::state::{RunStatus, TestOutcome, TestStatus};

/// Submits each outcome to the shared run and remembers whether any test failed
pub struct TestReporter {
    session: Arc<RunSession>,
    saw_failure: AtomicBool,
}

impl TestReporter {
    pub fn new(session: Arc<RunSession>) -> Self {
        Self {
            session,
            saw_failure: AtomicBool::new(false),
        }
    }

    pub fn session(&self) -> &Arc<RunSession> {
        &self.session
    }

    /// Submit one outcome.
    ///
    /// Only a failure to create the run is returned; a rejected or lost
    /// submission is logged and reporting goes on.
    pub fn report(&self, outcome: &TestOutcome) -> Result<(), ReporterError> {
        if outcome.status == TestStatus::Failed {
            self.saw_failure.store(true, Ordering::SeqCst);
        }

        let Some(api_key) = self.session.config().api_key.as_deref() else {
            return Ok(());
        };

        let run_id = self.session.ensure_created()?;
        let request = TestRunRequest::new(api_key, outcome, self.session.config().create_tests);

        match self.session.submit_test(run_id, &request) {
            Ok(response) => {
                if let Some(message) = response.message {
                    debug!("{}: {}", outcome.title, message);
                }
            }
            Err(e) => {
                warn!(
                    "Test {}-{} was not reported to Testomat.io, skipping...",
                    outcome.external_id.as_deref().unwrap_or(""),
                    outcome.title
                );
                debug!("{}", e);
            }
        }

        Ok(())
    }

    /// Whether any failed outcome has been seen
    pub fn saw_failure(&self) -> bool {
        self.saw_failure.load(Ordering::SeqCst)
    }

    pub fn status(&self) -> RunStatus {
        RunStatus::from_failure(self.saw_failure())
    }
}
