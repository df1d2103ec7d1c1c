// CLI argument definitions using Clap

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::{Config, ReporterConfig};
use crate::state::RunStatus;

/// Relay test results to Testomat.io
#[derive(Parser, Debug)]
#[command(name = "testomatio-reporter")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Relay test framework events to Testomat.io", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    // Flattened so that `testomatio-reporter --input events.ndjson` works without `report`.
    #[command(flatten)]
    pub report_args: ReportArgs,

    /// Enable verbose debug output
    #[arg(short = 'v', long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// API key (overrides TESTOMATIO)
    #[arg(long, global = true, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Service URL (overrides TESTOMATIO_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report an NDJSON event stream (default)
    Report(ReportArgs),

    /// Create a run and print its id (share it with workers via runId)
    Start,

    /// Close a run with a final status
    Finish(FinishArgs),

    /// Show the effective configuration
    Config,

    /// Create a default configuration file
    InitConfig(InitConfigArgs),

    /// Print shell completion script
    Completion(CompletionArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ReportArgs {
    /// File with NDJSON events (stdin when omitted)
    #[arg(short = 'i', long, value_name = "FILE")]
    pub input: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct FinishArgs {
    /// Final run status (pass, fail)
    #[arg(long, default_value = "pass")]
    pub status: RunStatus,

    /// Run to finish (overrides runId)
    #[arg(long, value_name = "RUN_ID")]
    pub run_id: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct InitConfigArgs {
    /// Where to write the file
    #[arg(default_value = crate::config::CONFIG_FILE_NAME)]
    pub path: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

impl Cli {
    /// Effective report arguments
    pub fn get_report_args(&self) -> &ReportArgs {
        match &self.command {
            Some(Commands::Report(args)) => args,
            _ => &self.report_args,
        }
    }

    /// Environment and file configuration with command-line overrides applied
    pub fn reporter_config(&self, file: Option<&Config>) -> ReporterConfig {
        ReporterConfig::from_env(file)
            .with_api_key(self.api_key.clone())
            .with_base_url(self.url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_implicit_report() {
        let cli = Cli::try_parse_from(["testomatio-reporter", "--input", "events.ndjson"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(
            cli.get_report_args().input,
            Some(PathBuf::from("events.ndjson"))
        );
    }

    #[test]
    fn test_finish_args() {
        let cli = Cli::try_parse_from([
            "testomatio-reporter",
            "finish",
            "--status",
            "fail",
            "--run-id",
            "r1",
        ])
        .unwrap();
        let Some(Commands::Finish(args)) = cli.command else {
            panic!("expected finish");
        };
        assert_eq!(args.status, RunStatus::Fail);
        assert_eq!(args.run_id.as_deref(), Some("r1"));
    }

    #[test]
    fn test_finish_rejects_unknown_status() {
        assert!(
            Cli::try_parse_from(["testomatio-reporter", "finish", "--status", "done"]).is_err()
        );
    }

    #[test]
    fn test_completion_shell() {
        let cli = Cli::try_parse_from(["testomatio-reporter", "completion", "zsh"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Completion(CompletionArgs { shell: Shell::Zsh }))
        ));
        assert!(Cli::try_parse_from(["testomatio-reporter", "completion", "tcsh"]).is_err());
    }
}
