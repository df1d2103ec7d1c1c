// Report command - relay an event stream to Testomat.io

use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use tracing::{debug, info, warn};

use super::build_session;
use crate::cli::args::ReportArgs;
use crate::config::{ENV_API_KEY, ReporterConfig};
use crate::events::{self, StreamSummary};
use crate::report::{self, ReportingListener};

pub fn handle_report(config: ReporterConfig, args: &ReportArgs) -> Result<()> {
    if !config.is_enabled() {
        info!("{} is not set, test results will not be reported", ENV_API_KEY);
    }

    let session = build_session(config)?;
    let mut listener = ReportingListener::new(session);

    let summary = report::scoped(&mut listener, |listener| -> Result<StreamSummary> {
        match &args.input {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("Failed to open event file: {}", path.display()))?;
                Ok(events::consume(BufReader::new(file), listener)?)
            }
            None => Ok(events::consume(std::io::stdin().lock(), listener)?),
        }
    })?;

    if !summary.finished {
        debug!("Event stream ended without all_tests_finished, run closed at end of input");
    }
    if summary.invalid_lines > 0 {
        warn!("{} malformed event line(s) skipped", summary.invalid_lines);
    }
    debug!("Processed {} event(s)", summary.events);

    Ok(())
}
