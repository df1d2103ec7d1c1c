// Event stream adapter - newline-delimited JSON framework events
//
// Each line is one object tagged by `event`:
//   {"event":"suite_started","name":"App\\LoginTest"}
//   {"event":"test_failed","test":{"name":"testLogin","time":0.4},"message":"..."}
//   {"event":"all_tests_finished"}

use serde::{Deserialize, Serialize};
use std::io::BufRead;
use thiserror::Error;
use tracing::{debug, warn};

use crate::error::ReporterError;
use crate::report::TestListener;
use crate::state::TestDescriptor;

/// One framework lifecycle event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FrameworkEvent {
    SuiteStarted {
        name: String,
    },
    TestStarted {
        test: TestDescriptor,
    },
    TestPassed {
        test: TestDescriptor,
    },
    TestFailed {
        test: TestDescriptor,
        #[serde(default)]
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace: Option<String>,
    },
    TestErrored {
        test: TestDescriptor,
        #[serde(default)]
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace: Option<String>,
    },
    TestSkipped {
        test: TestDescriptor,
        #[serde(default)]
        message: String,
    },
    TestIncomplete {
        test: TestDescriptor,
        #[serde(default)]
        message: String,
    },
    TestRisky {
        test: TestDescriptor,
        #[serde(default)]
        message: String,
    },
    TestWarning {
        test: TestDescriptor,
        #[serde(default)]
        message: String,
    },
    AllTestsFinished,
}

#[derive(Debug, Error)]
pub enum StreamError {
    #[error("failed to read events: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Reporter(#[from] ReporterError),
}

/// What happened while consuming a stream
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StreamSummary {
    pub events: usize,
    pub invalid_lines: usize,
    pub finished: bool,
}

/// Parse one line; `None` for blank lines
pub fn parse_line(line: &str) -> Option<Result<FrameworkEvent, serde_json::Error>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    Some(serde_json::from_str(line))
}

/// Deliver one event to the listener
pub fn dispatch<L>(listener: &mut L, event: &FrameworkEvent) -> Result<(), ReporterError>
where
    L: TestListener + ?Sized,
{
    match event {
        FrameworkEvent::SuiteStarted { name } => listener.on_suite_started(name),
        FrameworkEvent::TestStarted { test } => listener.on_test_started(test),
        FrameworkEvent::TestPassed { test } => listener.on_passed(test)?,
        FrameworkEvent::TestFailed {
            test,
            message,
            trace,
        }
        | FrameworkEvent::TestErrored {
            test,
            message,
            trace,
        } => listener.on_failed(test, message, trace.as_deref())?,
        FrameworkEvent::TestSkipped { test, message }
        | FrameworkEvent::TestIncomplete { test, message }
        | FrameworkEvent::TestRisky { test, message } => listener.on_skipped(test, message)?,
        FrameworkEvent::TestWarning { test, message } => listener.on_warning(test, message),
        FrameworkEvent::AllTestsFinished => listener.on_suite_finished(),
    }
    Ok(())
}

/// Read events line by line until EOF. Malformed lines are skipped.
pub fn consume<R, L>(reader: R, listener: &mut L) -> Result<StreamSummary, StreamError>
where
    R: BufRead,
    L: TestListener + ?Sized,
{
    let mut summary = StreamSummary::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let event = match parse_line(&line) {
            None => continue,
            Some(Ok(event)) => event,
            Some(Err(e)) => {
                warn!("Skipping malformed event on line {}: {}", index + 1, e);
                summary.invalid_lines += 1;
                continue;
            }
        };

        debug!("Event: {:?}", event);
        if event == FrameworkEvent::AllTestsFinished {
            summary.finished = true;
        }
        dispatch(listener, &event)?;
        summary.events += 1;
    }

    Ok(summary)
}
