pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod report;
pub mod session;
pub mod state;
pub mod transport;

pub use config::ReporterConfig;
pub use error::ReporterError;
pub use report::{ReportingListener, RunFinalizer, TestListener, TestReporter};
pub use session::RunSession;
pub use state::{RunStatus, TestDescriptor, TestOutcome, TestStatus};
