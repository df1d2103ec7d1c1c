// Start command - create a run up front for parallel workers

use anyhow::Result;

use super::build_session;
use crate::config::ReporterConfig;
use crate::error::ReporterError;

pub fn handle_start(config: ReporterConfig) -> Result<()> {
    if !config.is_enabled() {
        return Err(ReporterError::MissingApiKey.into());
    }

    let session = build_session(config)?;
    let run_id = session.ensure_created()?;
    println!("{}", run_id);

    Ok(())
}
