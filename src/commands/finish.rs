// Finish command - close a run created by `start`

use anyhow::Result;
use tracing::warn;

use super::build_session;
use crate::cli::args::FinishArgs;
use crate::config::ReporterConfig;
use crate::error::ReporterError;
use crate::report::RunFinalizer;

pub fn handle_finish(config: ReporterConfig, args: &FinishArgs) -> Result<()> {
    let config = config.with_run_id(args.run_id.clone());
    if !config.is_enabled() {
        return Err(ReporterError::MissingApiKey.into());
    }
    if config.run_id.is_none() {
        anyhow::bail!("No run to finish: pass --run-id or set runId");
    }

    let session = build_session(config)?;
    if !RunFinalizer::new(session).finalize(args.status) {
        warn!("Run status was not updated");
    }

    Ok(())
}
