use log::{debug, warn};
use serde_json::Value;

use crate::errors::{InvalidReason, TranslationError};
use crate::model::{TranslatedDefinition, ValidationResponse};

// @module: Validation response interpretation

/// Usable result of a validation response
#[derive(Debug, Clone, PartialEq)]
pub struct Interpretation {
    /// Definition ready for override application
    pub definition: TranslatedDefinition,
    /// Translation warnings, in response order
    pub warnings: Vec<String>,
}

/// Decides whether a validation response can be used.
///
/// Warnings are always surfaced, one log line each. Whether they also fail
/// the step is controlled by `warnings_are_fatal`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseInterpreter {
    warnings_are_fatal: bool,
}

impl ResponseInterpreter {
    pub fn new(warnings_are_fatal: bool) -> Self {
        Self { warnings_are_fatal }
    }

    pub fn warnings_are_fatal(&self) -> bool {
        self.warnings_are_fatal
    }

    /// Check warnings, then extract the translated definition
    pub fn interpret(&self, response: ValidationResponse) -> Result<Interpretation, TranslationError> {
        let warnings = response.translation_warnings.unwrap_or_default();

        if !warnings.is_empty() {
            warn!("Compose file has translation warnings");
            for warning in &warnings {
                warn!("{}", warning);
            }
            if self.warnings_are_fatal {
                return Err(TranslationError::WarningsFatal(warnings.len()));
            }
        }

        let definition = extract_definition(response.translated_compose_definition)
            .map_err(|reason| {
                debug!("Rejecting translated definition: {}", reason);
                TranslationError::InvalidTranslation(reason)
            })?;

        Ok(Interpretation { definition, warnings })
    }
}

/// Apply the structural checks; the definition itself stays raw
fn extract_definition(raw: Option<Value>) -> Result<TranslatedDefinition, InvalidReason> {
    raw.map_or(Err(InvalidReason::MissingDefinition), TranslatedDefinition::try_from)
}
