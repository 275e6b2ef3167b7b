use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::errors::ConfigError;

/// Step configuration module
/// This module holds every input the pipeline reads. The binary builds it
/// from command line flags and `INPUT_*` environment variables; nothing in
/// the library reads the process environment.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Bearer token for the validation API. Never serialized.
    #[serde(default, skip_serializing)]
    pub api_key: String,

    /// Organization the compose file is validated for
    pub organization: String,

    /// Path of the compose file, relative to `workspace`
    pub compose_file: String,

    /// Workspace root the compose path is resolved against
    #[serde(default = "default_workspace")]
    pub workspace: PathBuf,

    /// API root URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Optional image suffix passed to the translator
    #[serde(default)]
    pub image_suffix: Option<String>,

    /// Optional JSON object of container name to image tag
    #[serde(default)]
    pub image_tag_updates: Option<String>,

    /// Fail the step when the translator returns warnings
    #[serde(default)]
    pub warnings_are_fatal: bool,

    /// Pretty-print the translated output
    #[serde(default)]
    pub pretty_output: bool,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Public production endpoint of the validation API
pub const DEFAULT_BASE_URL: &str = "https://dashboard.quantcdn.io/api/v3";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_workspace() -> PathBuf {
    PathBuf::from(".")
}

fn default_timeout_secs() -> u64 {
    120
}

/// Treat CI-style empty inputs as absent
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Config {
    /// Create a configuration with the required inputs and defaults elsewhere
    pub fn new(
        api_key: impl Into<String>,
        organization: impl Into<String>,
        compose_file: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            organization: organization.into(),
            compose_file: compose_file.into(),
            workspace: default_workspace(),
            base_url: default_base_url(),
            image_suffix: None,
            image_tag_updates: None,
            warnings_are_fatal: false,
            pretty_output: false,
            timeout_secs: default_timeout_secs(),
            log_level: LogLevel::default(),
        }
    }

    /// Override the API root. Empty values keep the default.
    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        if let Some(base_url) = non_empty(base_url) {
            self.base_url = base_url;
        }
        self
    }

    pub fn with_workspace(mut self, workspace: impl Into<PathBuf>) -> Self {
        self.workspace = workspace.into();
        self
    }

    pub fn with_image_suffix(mut self, image_suffix: Option<String>) -> Self {
        self.image_suffix = non_empty(image_suffix);
        self
    }

    pub fn with_image_tag_updates(mut self, image_tag_updates: Option<String>) -> Self {
        self.image_tag_updates = non_empty(image_tag_updates);
        self
    }

    pub fn with_warnings_are_fatal(mut self, fatal: bool) -> Self {
        self.warnings_are_fatal = fatal;
        self
    }

    pub fn with_pretty_output(mut self, pretty: bool) -> Self {
        self.pretty_output = pretty;
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_log_level(mut self, log_level: LogLevel) -> Self {
        self.log_level = log_level;
        self
    }

    /// Validate the configuration for required values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingInput("api_key"));
        }
        if self.organization.trim().is_empty() {
            return Err(ConfigError::MissingInput("organization"));
        }
        if self.compose_file.trim().is_empty() {
            return Err(ConfigError::MissingInput("compose_file"));
        }
        Ok(())
    }

    /// Absolute or workspace-relative path of the compose file
    pub fn compose_path(&self) -> PathBuf {
        self.workspace.join(&self.compose_file)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// API key shortened for log output
    pub fn redacted_api_key(&self) -> String {
        let prefix: String = self.api_key.chars().take(10).collect();
        format!("{}...", prefix)
    }

    /// Multi-line summary of the configuration, safe to log
    pub fn summary(&self) -> String {
        format!(
            "Configuration:\n  API Key: {}\n  Organization: {}\n  Compose File: {}\n  Base URL: {}\n  Image Suffix: {}\n  Warnings Are Fatal: {}",
            self.redacted_api_key(),
            self.organization,
            self.compose_path().display(),
            self.base_url,
            self.image_suffix.as_deref().unwrap_or("(none)"),
            self.warnings_are_fatal,
        )
    }
}
