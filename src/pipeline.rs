/*!
 * Pipeline orchestrator for the compose validation step.
 *
 * The orchestrator runs the stages in a fixed order:
 * 1. Load: Read and parse the compose manifest
 * 2. Build: Create the validation request
 * 3. Validate: Submit the request to the validation service
 * 4. Interpret: Check warnings and extract the translated definition
 * 5. Override: Apply image tag updates
 * 6. Emit: Serialise the final definition
 *
 * Any stage may fail; a failure stops the pipeline and no output is produced.
 */

use log::{debug, info};
use std::fmt;

use crate::api::{ComposeClient, ComposeValidator};
use crate::app_config::Config;
use crate::errors::AppError;
use crate::interpreter::ResponseInterpreter;
use crate::manifest::Manifest;
use crate::model::TranslatedDefinition;
use crate::overrides::{apply_image_overrides, OverrideReport};
use crate::request::ValidationRequest;

/// States of a pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Start,
    Loaded,
    RequestBuilt,
    ResponseReceived,
    Interpreted,
    OverridesApplied,
    Done,
    /// Absorbing failure state
    Failed,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::Loaded => "loaded",
            Self::RequestBuilt => "request built",
            Self::ResponseReceived => "response received",
            Self::Interpreted => "interpreted",
            Self::OverridesApplied => "overrides applied",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}

/// Result of a successful pipeline run
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Serialised definition for the `translated_compose` output
    pub translated_compose: String,

    /// Final definition after overrides
    pub definition: TranslatedDefinition,

    /// Translation warnings, in response order
    pub warnings: Vec<String>,

    /// What the override step did
    pub overrides: OverrideReport,
}

/// A terminal pipeline failure
#[derive(Debug)]
pub struct PipelineFailure {
    /// Last stage reached before the failure
    pub stage: PipelineStage,

    /// Classified cause
    pub error: AppError,
}

impl fmt::Display for PipelineFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed after stage '{}': {}", self.stage, self.error)
    }
}

impl std::error::Error for PipelineFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Sequential, single-use pipeline
#[derive(Debug)]
pub struct Pipeline<V: ComposeValidator> {
    config: Config,
    validator: V,
    stage: PipelineStage,
}

impl Pipeline<ComposeClient> {
    /// Create a pipeline talking to the configured validation service
    pub fn from_config(config: Config) -> Result<Self, AppError> {
        let client = ComposeClient::new(&config.api_key, &config.base_url, config.timeout())?;
        Ok(Self::new(config, client))
    }
}

impl<V: ComposeValidator> Pipeline<V> {
    pub fn new(config: Config, validator: V) -> Self {
        Self {
            config,
            validator,
            stage: PipelineStage::Start,
        }
    }

    /// Current stage
    pub fn stage(&self) -> PipelineStage {
        self.stage
    }

    /// Run every stage. Consumes the pipeline; it ends in `Done` or `Failed`.
    pub async fn run(mut self) -> Result<PipelineOutput, PipelineFailure> {
        match self.execute().await {
            Ok(output) => {
                self.advance(PipelineStage::Done);
                Ok(output)
            }
            Err(error) => Err(self.fail(error)),
        }
    }

    async fn execute(&mut self) -> Result<PipelineOutput, AppError> {
        self.config.validate()?;

        let manifest = Manifest::load(self.config.compose_path())?;
        self.advance(PipelineStage::Loaded);

        let request = ValidationRequest::new(&manifest)?
            .with_image_suffix(self.config.image_suffix.as_deref());
        if let Some(suffix) = request.image_suffix() {
            info!("Using image suffix: {}", suffix);
        }
        self.advance(PipelineStage::RequestBuilt);

        info!("Validating compose file...");
        let response = self.validator
            .validate_compose(&self.config.organization, &request)
            .await?;
        self.advance(PipelineStage::ResponseReceived);

        let interpretation = ResponseInterpreter::new(self.config.warnings_are_fatal)
            .interpret(response)?;
        self.advance(PipelineStage::Interpreted);

        let mut definition = interpretation.definition;
        let overrides = apply_image_overrides(&mut definition, self.config.image_tag_updates.as_deref());
        self.advance(PipelineStage::OverridesApplied);

        let translated_compose = definition.to_output_text(self.config.pretty_output);

        info!("Successfully translated compose file");
        Ok(PipelineOutput {
            translated_compose,
            definition,
            warnings: interpretation.warnings,
            overrides,
        })
    }

    fn advance(&mut self, next: PipelineStage) {
        debug!("Pipeline stage: {} -> {}", self.stage, next);
        self.stage = next;
    }

    fn fail(&mut self, error: AppError) -> PipelineFailure {
        let stage = self.stage;
        self.advance(PipelineStage::Failed);
        PipelineFailure { stage, error }
    }
}
