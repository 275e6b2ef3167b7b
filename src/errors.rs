/*!
 * Error types for the compose-validate step.
 *
 * Each pipeline component has its own error enum, built with the thiserror
 * crate. `AppError` wraps all of them so the orchestrator can match on the
 * kind of failure and decide what to surface.
 */

use thiserror::Error;

/// Errors raised while loading the compose manifest
#[derive(Error, Debug)]
pub enum ManifestError {
    /// The manifest path could not be read
    #[error("Compose file not found at {path}: {reason}")]
    NotFound {
        /// Path that was requested
        path: String,
        /// Underlying I/O failure
        reason: String,
    },

    /// The manifest is not valid YAML or is an empty document
    #[error("Compose file is not valid YAML: {0}")]
    ParseError(String),

    /// The parsed manifest could not be written back as YAML
    #[error("Compose file could not be serialized: {0}")]
    SerializeError(String),
}

/// Errors returned by the validation API client
#[derive(Error, Debug)]
pub enum ClientError {
    /// No usable response was received
    #[error("Request to validation service failed: {0}")]
    Transport(String),

    /// The service answered with a non-success status
    #[error("Validation service responded with error: {status_code}")]
    RemoteRejection {
        /// HTTP status code
        status_code: u16,
        /// Raw response body
        body: String,
    },

    /// The configured base URL cannot be used to build a request
    #[error("Invalid API endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Why a translated definition was rejected.
///
/// All reasons are reported to the user identically; they are kept apart so
/// the debug log shows which part of the response contract was broken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidReason {
    /// `translatedComposeDefinition` is absent or null
    MissingDefinition,
    /// The definition has no `containers` property
    MissingContainers,
    /// `containers` is present but not a sequence
    ContainersNotSequence,
    /// `containers` is an empty sequence
    EmptyContainers,
}

impl std::fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingDefinition => write!(f, "translatedComposeDefinition is missing"),
            Self::MissingContainers => write!(f, "translated definition has no containers property"),
            Self::ContainersNotSequence => write!(f, "containers is not a sequence"),
            Self::EmptyContainers => write!(f, "containers is empty"),
        }
    }
}

/// Errors raised while interpreting the validation response
#[derive(Error, Debug)]
pub enum TranslationError {
    /// The response did not carry a usable translated definition
    #[error("Compose file is invalid")]
    InvalidTranslation(InvalidReason),

    /// Warnings were returned and the step treats them as fatal
    #[error("Compose file has {0} translation warning(s)")]
    WarningsFatal(usize),
}

/// Errors raised while parsing the image override map
#[derive(Error, Debug)]
pub enum OverrideError {
    /// The override input is not a flat string to string mapping
    #[error("Failed to parse image tag updates: {0}")]
    Parse(String),
}

/// Errors raised while assembling the step configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required input was empty or missing
    #[error("Input required and not supplied: {0}")]
    MissingInput(&'static str),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from manifest loading
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    /// Error from the API client
    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    /// Error from response interpretation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),
}

impl AppError {
    /// Short message used as the step-level failure signal
    pub fn failure_message(&self) -> String {
        match self {
            Self::Config(e) => e.to_string(),
            Self::Manifest(ManifestError::NotFound { path, .. }) => {
                format!("Compose file not found at {}", path)
            }
            Self::Manifest(ManifestError::ParseError(_)) => "Compose file is not valid YAML".to_string(),
            Self::Manifest(ManifestError::SerializeError(_)) => "Compose file could not be serialized".to_string(),
            Self::Client(ClientError::InvalidEndpoint(detail)) => {
                format!("Invalid base URL: {}", detail)
            }
            Self::Client(ClientError::RemoteRejection { .. }) => "Compose file is invalid".to_string(),
            Self::Client(ClientError::Transport(_)) => {
                "Compose file validation request failed".to_string()
            }
            Self::Translation(TranslationError::InvalidTranslation(_)) => {
                "Compose file is invalid".to_string()
            }
            Self::Translation(e @ TranslationError::WarningsFatal(_)) => e.to_string(),
        }
    }

    /// Detailed diagnostic lines, logged separately from the failure message
    pub fn diagnostics(&self) -> Vec<String> {
        match self {
            Self::Manifest(ManifestError::NotFound { reason, .. }) => vec![format!("Error Message: {}", reason)],
            Self::Manifest(ManifestError::ParseError(detail) | ManifestError::SerializeError(detail)) => {
                vec![format!("Error Message: {}", detail)]
            }
            Self::Client(ClientError::RemoteRejection { status_code, body }) => {
                let mut lines = vec![format!("Status Code: {}", status_code)];
                if !body.is_empty() {
                    lines.push(format!("Response Body: {}", body));
                }
                lines
            }
            Self::Client(ClientError::Transport(message)) => {
                vec![format!("Error Message: {}", message)]
            }
            Self::Translation(TranslationError::InvalidTranslation(reason)) => {
                vec![format!("Reason: {}", reason)]
            }
            _ => Vec::new(),
        }
    }
}
