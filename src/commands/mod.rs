// Commands module - handles CLI command execution

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::Shell;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use crate::cli::Cli;
use crate::config::ReporterConfig;
use crate::session::RunSession;
use crate::transport::HttpTransport;

pub mod config;
pub mod finish;
pub mod report;
pub mod start;

pub use config::{handle_config, handle_init_config};
pub use finish::handle_finish;
pub use report::handle_report;
pub use start::handle_start;

/// Build the process-wide run session over HTTP
pub fn build_session(config: ReporterConfig) -> Result<Arc<RunSession>> {
    let transport = HttpTransport::new(Duration::from_secs(config.timeout_secs))
        .context("Failed to set up HTTP transport")?;
    Ok(Arc::new(RunSession::new(config, Box::new(transport))))
}

/// Write the completion script for `shell`, named after the binary
pub fn handle_completion(shell: Shell, out: &mut dyn Write) -> Result<()> {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, bin_name, out);
    out.flush().context("Failed to write completion script")
}
