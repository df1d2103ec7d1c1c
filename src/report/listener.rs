// Listener that relays framework events to Testomat.io

use std::sync::Arc;

use super::{RunFinalizer, TestListener, TestReporter};
use crate::error::ReporterError;
use crate::session::RunSession;
use crate::state::outcome::suite_title_from_name;
use crate::state::{TestDescriptor, TestOutcome, TestStatus};

/// Reports every outcome and finalizes the run on `on_suite_finished`
pub struct ReportingListener {
    reporter: TestReporter,
    finalizer: Option<RunFinalizer>,
    current_suite: Option<String>,
}

impl ReportingListener {
    pub fn new(session: Arc<RunSession>) -> Self {
        Self {
            finalizer: Some(RunFinalizer::new(session.clone())),
            reporter: TestReporter::new(session),
            current_suite: None,
        }
    }

    pub fn reporter(&self) -> &TestReporter {
        &self.reporter
    }

    pub fn is_finalized(&self) -> bool {
        self.finalizer.is_none()
    }

    /// Close the run unless that already happened
    pub fn finish(&mut self) -> bool {
        match self.finalizer.take() {
            Some(finalizer) => finalizer.finalize(self.reporter.status()),
            None => false,
        }
    }

    fn suite_title(&self, test: &TestDescriptor) -> String {
        test.suite
            .clone()
            .or_else(|| test.suite_hint())
            .or_else(|| self.current_suite.as_deref().map(suite_title_from_name))
            .unwrap_or_default()
    }

    fn report(
        &self,
        test: &TestDescriptor,
        status: TestStatus,
        message: &str,
        trace: Option<&str>,
    ) -> Result<(), ReporterError> {
        let outcome = TestOutcome::from_descriptor(test, self.suite_title(test), status)
            .with_message(message)
            .with_stack_trace(trace);
        self.reporter.report(&outcome)
    }
}

impl TestListener for ReportingListener {
    fn on_suite_started(&mut self, name: &str) {
        let name = name.trim();
        self.current_suite = (!name.is_empty()).then(|| name.to_string());
    }

    fn on_passed(&mut self, test: &TestDescriptor) -> Result<(), ReporterError> {
        self.report(test, TestStatus::Passed, "", None)
    }

    fn on_failed(
        &mut self,
        test: &TestDescriptor,
        message: &str,
        trace: Option<&str>,
    ) -> Result<(), ReporterError> {
        self.report(test, TestStatus::Failed, message, trace)
    }

    fn on_skipped(&mut self, test: &TestDescriptor, message: &str) -> Result<(), ReporterError> {
        self.report(test, TestStatus::Skipped, message, None)
    }

    fn on_suite_finished(&mut self) {
        self.finish();
    }
}

/// Run `f` against the listener, then close the run whatever `f` returned
pub fn scoped<T, E, F>(listener: &mut ReportingListener, f: F) -> Result<T, E>
where
    F: FnOnce(&mut ReportingListener) -> Result<T, E>,
{
    let result = f(listener);
    listener.finish();
    result
}
