// State module - test outcomes and the run's aggregate status

pub mod outcome;

pub use outcome::{TestDescriptor, TestOutcome};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a single test as sent to the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Passed,
    Failed,
    Skipped,
}

impl TestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final status of a run (`status_event` on the wire)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Pass,
    Fail,
}

impl RunStatus {
    pub fn from_failure(saw_failure: bool) -> Self {
        if saw_failure { Self::Fail } else { Self::Pass }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RunStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pass" | "passed" => Ok(Self::Pass),
            "fail" | "failed" => Ok(Self::Fail),
            other => Err(format!("unknown run status '{}' (expected pass or fail)", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serialization() {
        assert_eq!(serde_json::to_string(&TestStatus::Passed).unwrap(), "\"passed\"");
        assert_eq!(serde_json::to_string(&TestStatus::Failed).unwrap(), "\"failed\"");
        assert_eq!(serde_json::to_string(&TestStatus::Skipped).unwrap(), "\"skipped\"");
        assert_eq!(serde_json::to_string(&RunStatus::Fail).unwrap(), "\"fail\"");
    }

    #[test]
    fn test_run_status_from_failure() {
        assert_eq!(RunStatus::from_failure(true), RunStatus::Fail);
        assert_eq!(RunStatus::from_failure(false), RunStatus::Pass);
    }

    #[test]
    fn test_run_status_from_str() {
        assert_eq!("pass".parse::<RunStatus>(), Ok(RunStatus::Pass));
        assert_eq!(" FAILED ".parse::<RunStatus>(), Ok(RunStatus::Fail));
        assert!("finished".parse::<RunStatus>().is_err());
    }
}
