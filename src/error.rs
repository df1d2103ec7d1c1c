// Reporter errors

use crate::transport::TransportError;
use thiserror::Error;

/// Errors that stop reporting altogether.
///
/// Everything else (a rejected test result, a failed finish call) is logged
/// and swallowed where it happens.
#[derive(Debug, Error)]
pub enum ReporterError {
    #[error("Couldn't start run at Testomatio: {0}")]
    RunCreation(#[from] TransportError),

    #[error("Couldn't start run at Testomatio: response has no run id")]
    MissingRunId,

    #[error("No API key configured (set TESTOMATIO)")]
    MissingApiKey,
}
