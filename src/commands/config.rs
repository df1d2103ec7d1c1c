// Config commands - show effective settings, write a default file

use anyhow::{Context, Result};
use std::path::Path;

use crate::config::{self, Config, ReporterConfig};

pub fn handle_config(config: &ReporterConfig, file_loaded: bool) -> Result<()> {
    let show = |value: &Option<String>| value.clone().unwrap_or_else(|| "not set".to_string());

    println!("Current configuration:");
    println!("  API key: {}", config.masked_api_key());
    println!("  URL: {}", config.base_url);
    println!("  Run id: {}", show(&config.run_id));
    println!("  Run group: {}", show(&config.run_group_title));
    println!("  Environment: {}", show(&config.env));
    println!("  Title: {}", show(&config.title));
    println!("  Shared run: {}", show(&config.shared_run));
    println!(
        "  Create missing tests: {}",
        if config.create_tests { "yes" } else { "no" }
    );
    println!("  Timeout: {}s", config.timeout_secs);

    if file_loaded {
        println!("\n  Configuration file loaded");
    } else {
        println!("\n  No configuration file loaded");
        println!(
            "  Create one with: testomatio-reporter init-config {}",
            config::CONFIG_FILE_NAME
        );
    }

    println!("\nConfiguration precedence:");
    println!("  1. Command-line arguments (highest)");
    println!("  2. Environment variables");
    println!("  3. Configuration file");
    println!("  4. Built-in defaults (lowest)");

    Ok(())
}

pub fn handle_init_config(path: &Path) -> Result<()> {
    let toml_content = Config::default().to_toml();
    std::fs::write(path, toml_content)
        .with_context(|| format!("Failed to write configuration file: {}", path.display()))?;

    println!("Configuration file created: {}", path.display());
    println!("\nYou can now edit the file to customize your settings.");

    Ok(())
}
