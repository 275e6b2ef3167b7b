use log::{error, info};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::errors::AppError;

// @module: CI step outputs and failure signalling

/// Destination for step outputs.
///
/// On a CI runner outputs are appended to the file named by `GITHUB_OUTPUT`;
/// elsewhere they are printed to stdout.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutputs {
    File(PathBuf),
    Stdout,
}

impl StepOutputs {
    /// Pick the destination from the `GITHUB_OUTPUT` variable
    pub fn from_env() -> Self {
        match std::env::var_os("GITHUB_OUTPUT") {
            Some(path) if !path.is_empty() => Self::File(PathBuf::from(path)),
            _ => Self::Stdout,
        }
    }

    /// Publish a named output value
    pub fn set_output(&self, name: &str, value: &str) -> io::Result<()> {
        match self {
            Self::File(path) => {
                let mut file = OpenOptions::new().create(true).append(true).open(path)?;
                file.write_all(format_output_entry(name, value, &new_delimiter()).as_bytes())?;
                info!("Wrote output '{}' ({} bytes)", name, value.len());
                Ok(())
            }
            Self::Stdout => {
                let mut stdout = io::stdout().lock();
                writeln!(stdout, "{}", value)
            }
        }
    }
}

fn new_delimiter() -> String {
    format!("ghadelimiter_{}", uuid::Uuid::new_v4())
}

/// Multi-line safe `name<<DELIM` entry for an output file
pub fn format_output_entry(name: &str, value: &str, delimiter: &str) -> String {
    format!("{name}<<{delimiter}\n{value}\n{delimiter}\n")
}

/// Report a terminal failure: diagnostics first, then the short failure message
pub fn set_failed(failure: &AppError) -> String {
    for line in failure.diagnostics() {
        error!("{}", line);
    }
    let message = failure.failure_message();
    error!("{}", message);
    message
}
