use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::debug;
use std::path::PathBuf;
use std::process::ExitCode;

use compose_validate::app_config::{Config, LogLevel};
use compose_validate::logging::{LogStyle, StepLogger};
use compose_validate::pipeline::Pipeline;
use compose_validate::step::{self, StepOutputs};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for compose-validate
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// compose-validate - validate and translate a docker-compose file
///
/// Every option can also be supplied through the matching INPUT_* environment
/// variable, which is how CI runners pass step inputs.
#[derive(Parser, Debug)]
#[command(name = "compose-validate")]
#[command(version)]
#[command(about = "Validate a compose file and emit the translated container definition")]
#[command(long_about = "Submits a docker-compose file to the compose validation API and emits the translated
container definition as the `translated_compose` step output.

EXAMPLES:
    compose-validate --api-key $KEY --organization acme --compose-file docker-compose.yml
    compose-validate ... --image-suffix pr-42
    compose-validate ... --image-tag-updates '{\"web\": \"myrepo/web:v2\"}'
    compose-validate completions bash > compose-validate.bash")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// API key sent as a bearer token
    #[arg(long, env = "INPUT_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Organization the compose file is validated for
    #[arg(long, env = "INPUT_ORGANIZATION")]
    organization: Option<String>,

    /// Compose file path, relative to the workspace
    #[arg(long, env = "INPUT_COMPOSE_FILE")]
    compose_file: Option<String>,

    /// API root URL
    #[arg(long, env = "INPUT_BASE_URL")]
    base_url: Option<String>,

    /// Image suffix hint passed to the translator
    #[arg(long, env = "INPUT_IMAGE_SUFFIX")]
    image_suffix: Option<String>,

    /// JSON object of container name to image tag
    #[arg(long, env = "INPUT_IMAGE_TAG_UPDATES")]
    image_tag_updates: Option<String>,

    /// Fail when the translator returns warnings
    #[arg(
        long,
        env = "INPUT_WARNINGS_ARE_FATAL",
        action = clap::ArgAction::Set,
        default_value = "false",
        value_parser = clap::builder::FalseyValueParser::new(),
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    warnings_are_fatal: bool,

    /// Pretty-print the translated output
    #[arg(long)]
    pretty: bool,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 120)]
    timeout_secs: u64,

    /// Workspace root the compose path is resolved against
    #[arg(long, env = "GITHUB_WORKSPACE", default_value = ".")]
    workspace: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

impl CommandLineOptions {
    fn into_config(self) -> Config {
        let log_level = self.log_level.map(LogLevel::from).unwrap_or_default();
        Config::new(
            self.api_key.unwrap_or_default(),
            self.organization.unwrap_or_default(),
            self.compose_file.unwrap_or_default(),
        )
        .with_workspace(self.workspace)
        .with_base_url(self.base_url)
        .with_image_suffix(self.image_suffix)
        .with_image_tag_updates(self.image_tag_updates)
        .with_warnings_are_fatal(self.warnings_are_fatal)
        .with_pretty_output(self.pretty)
        .with_timeout_secs(self.timeout_secs)
        .with_log_level(log_level)
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "compose-validate", &mut std::io::stdout());
        return Ok(ExitCode::SUCCESS);
    }

    let config = cli.into_config();
    StepLogger::init(config.log_level.to_level_filter(), LogStyle::detect())?;
    debug!("{}", config.summary());

    let pipeline = match Pipeline::from_config(config) {
        Ok(pipeline) => pipeline,
        Err(error) => {
            step::set_failed(&error);
            return Ok(ExitCode::FAILURE);
        }
    };

    match pipeline.run().await {
        Ok(output) => {
            StepOutputs::from_env().set_output("translated_compose", &output.translated_compose)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(failure) => {
            debug!("Pipeline {}", failure);
            step::set_failed(&failure.error);
            Ok(ExitCode::FAILURE)
        }
    }
}
