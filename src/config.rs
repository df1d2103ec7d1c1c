// Configuration resolution - environment variables layered over an optional TOML file

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

// Environment variables
pub const ENV_API_KEY: &str = "TESTOMATIO";
pub const ENV_URL: &str = "TESTOMATIO_URL";
pub const ENV_RUN_ID: &str = "runId";
pub const ENV_RUN_ID_ALT: &str = "TESTOMATIO_RUN";
pub const ENV_RUNGROUP_TITLE: &str = "TESTOMATIO_RUNGROUP_TITLE";
pub const ENV_ENV: &str = "TESTOMATIO_ENV";
pub const ENV_TITLE: &str = "TESTOMATIO_TITLE";
pub const ENV_SHARED_RUN: &str = "TESTOMATIO_SHARED_RUN";
pub const ENV_CREATE: &str = "TESTOMATIO_CREATE";

pub const CONFIG_FILE_NAME: &str = ".testomatiorc.toml";

pub fn default_url() -> String {
    String::from("https://app.testomat.io")
}

pub fn default_timeout() -> u64 {
    30
}

/// Contents of `.testomatiorc.toml`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub reporter: ReporterSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReporterSection {
    /// Project API key
    #[serde(default)]
    pub api_key: Option<String>,

    /// Service base URL
    #[serde(default = "default_url")]
    pub url: String,

    /// Pre-created run to report into
    #[serde(default)]
    pub run_id: Option<String>,

    /// Run group the new run is attached to
    #[serde(default)]
    pub run_group_title: Option<String>,

    /// Environment tag of the run
    #[serde(default)]
    pub env: Option<String>,

    /// Custom run title
    #[serde(default)]
    pub title: Option<String>,

    /// Shared run marker
    #[serde(default)]
    pub shared_run: Option<String>,

    /// Ask the service to create tests it does not know yet
    #[serde(default)]
    pub create_tests: bool,

    /// HTTP timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for ReporterSection {
    fn default() -> Self {
        Self {
            api_key: None,
            url: default_url(),
            run_id: None,
            run_group_title: None,
            env: None,
            title: None,
            shared_run: None,
            create_tests: false,
            timeout: default_timeout(),
        }
    }
}

impl Config {
    /// Load configuration from default locations
    pub fn load() -> Option<Self> {
        // 1. ./.testomatiorc.toml
        // 2. ~/.testomatiorc.toml
        let mut paths = Vec::new();
        if let Ok(cwd) = std::env::current_dir() {
            paths.push(cwd.join(CONFIG_FILE_NAME));
        }
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(CONFIG_FILE_NAME));
        }

        paths
            .iter()
            .find(|path| path.exists())
            .and_then(|path| Self::load_from_file(path))
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        let config = Self::parse(&content);
        match &config {
            Some(_) => debug!("Loaded configuration from {}", path.display()),
            None => warn!("Ignoring malformed configuration file {}", path.display()),
        }
        config
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Option<Self> {
        toml::from_str(content).ok()
    }

    /// Generate default configuration as TOML
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }
}

/// Effective reporter settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReporterConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub run_id: Option<String>,
    pub run_group_title: Option<String>,
    pub env: Option<String>,
    pub title: Option<String>,
    pub shared_run: Option<String>,
    pub create_tests: bool,
    pub timeout_secs: u64,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self::resolve(None, |_| None)
    }
}

impl ReporterConfig {
    /// Resolve from the process environment and the config file, if any
    pub fn from_env(file: Option<&Config>) -> Self {
        Self::resolve(file, |name| std::env::var(name).ok())
    }

    /// Resolve from an arbitrary variable lookup. Environment wins over the file.
    pub fn resolve<F>(file: Option<&Config>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ReporterSection::default();
        let section = file.map(|c| &c.reporter).unwrap_or(&defaults);
        let var = |name: &str| non_empty(lookup(name));

        let base_url = var(ENV_URL)
            .or_else(|| non_empty(Some(section.url.clone())))
            .unwrap_or_else(default_url);

        Self {
            api_key: var(ENV_API_KEY).or_else(|| non_empty(section.api_key.clone())),
            base_url: base_url.trim_end_matches('/').to_string(),
            run_id: var(ENV_RUN_ID)
                .or_else(|| var(ENV_RUN_ID_ALT))
                .or_else(|| non_empty(section.run_id.clone())),
            run_group_title: var(ENV_RUNGROUP_TITLE)
                .or_else(|| non_empty(section.run_group_title.clone())),
            env: var(ENV_ENV).or_else(|| non_empty(section.env.clone())),
            title: var(ENV_TITLE).or_else(|| non_empty(section.title.clone())),
            shared_run: var(ENV_SHARED_RUN).or_else(|| non_empty(section.shared_run.clone())),
            create_tests: var(ENV_CREATE).is_some_and(|v| is_truthy(&v)) || section.create_tests,
            timeout_secs: if section.timeout == 0 {
                default_timeout()
            } else {
                section.timeout
            },
        }
    }

    /// Reporting happens only with an API key
    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    /// Override the API key (command line)
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        if let Some(key) = non_empty(api_key) {
            self.api_key = Some(key);
        }
        self
    }

    /// Override the base URL (command line)
    pub fn with_base_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = non_empty(url) {
            self.base_url = url.trim_end_matches('/').to_string();
        }
        self
    }

    /// Override the run id (command line)
    pub fn with_run_id(mut self, run_id: Option<String>) -> Self {
        if let Some(id) = non_empty(run_id) {
            self.run_id = Some(id);
        }
        self
    }

    /// API key safe for display
    pub fn masked_api_key(&self) -> String {
        match &self.api_key {
            Some(key) if key.chars().count() > 4 => {
                let tail: String = key.chars().skip(key.chars().count() - 4).collect();
                format!("****{}", tail)
            }
            Some(_) => "****".to_string(),
            None => "not set".to_string(),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Flag value: `0` and `false` count as unset
fn is_truthy(value: &str) -> bool {
    !(value == "0" || value.eq_ignore_ascii_case("false"))
}
