// Report module - listener interface and the Testomat.io reporting client

pub mod finalizer;
pub mod listener;
pub mod testomatio;

use crate::error::ReporterError;
use crate::state::TestDescriptor;

pub use finalizer::RunFinalizer;
pub use listener::{ReportingListener, scoped};
pub use testomatio::TestReporter;

/// Test framework lifecycle events.
///
/// Adapters translate framework-native outcomes into these calls: errors are
/// failures, incomplete and risky tests are skips. Only a fatal reporting
/// error is returned.
pub trait TestListener {
    /// Called when a suite (test class, file, ...) starts
    fn on_suite_started(&mut self, _name: &str) {}

    /// Called when a test starts
    fn on_test_started(&mut self, _test: &TestDescriptor) {}

    fn on_passed(&mut self, test: &TestDescriptor) -> Result<(), ReporterError>;

    fn on_failed(
        &mut self,
        test: &TestDescriptor,
        message: &str,
        trace: Option<&str>,
    ) -> Result<(), ReporterError>;

    fn on_skipped(&mut self, test: &TestDescriptor, message: &str) -> Result<(), ReporterError>;

    /// Warnings are not reported
    fn on_warning(&mut self, _test: &TestDescriptor, _message: &str) {}

    /// Called once when the whole run is over
    fn on_suite_finished(&mut self);
}
