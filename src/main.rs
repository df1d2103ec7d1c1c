// Main entry point for testomatio-reporter

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use testomatio_reporter::cli::{Cli, Commands};
use testomatio_reporter::commands::{
    handle_completion, handle_config, handle_finish, handle_init_config, handle_report,
    handle_start,
};
use testomatio_reporter::config::Config;
use testomatio_reporter::logging;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if cli.verbose {
        info!("Starting testomatio-reporter v{}", env!("CARGO_PKG_VERSION"));
    }

    if let Err(err) = run(&cli) {
        error!("{:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    // Load configuration from file (if exists)
    let file_config = Config::load();
    let config = cli.reporter_config(file_config.as_ref());

    match &cli.command {
        Some(Commands::Start) => handle_start(config),
        Some(Commands::Finish(args)) => handle_finish(config, args),
        Some(Commands::Config) => handle_config(&config, file_config.is_some()),
        Some(Commands::InitConfig(args)) => handle_init_config(&args.path),
        Some(Commands::Completion(args)) => handle_completion(args.shell, &mut std::io::stdout()),
        Some(Commands::Report(_)) | None => handle_report(config, cli.get_report_args()),
    }
}
