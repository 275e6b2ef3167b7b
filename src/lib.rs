/*!
 * # compose-validate - Compose validation step for CI pipelines
 *
 * Submits a docker-compose manifest to the compose validation API and emits
 * the translated container definition, with optional per-container image
 * overrides applied.
 *
 * ## Features
 *
 * - Load and canonicalise compose manifests
 * - Validate and translate them through the remote API, with an optional
 *   image suffix hint
 * - Surface translation warnings, optionally failing on them
 * - Override container images after translation
 * - Publish the result as a CI step output
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Step inputs
 * - `manifest`: Manifest loading and canonicalisation
 * - `request`: Validation request construction
 * - `api`: Validation API client and mock
 * - `model`: Response and translated definition types
 * - `interpreter`: Response interpretation
 * - `overrides`: Image override application
 * - `pipeline`: Orchestration of the stages above
 * - `step`: Step outputs and failure reporting
 * - `logging`: Terminal and CI runner logger
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod api;
pub mod app_config;
pub mod errors;
pub mod interpreter;
pub mod logging;
pub mod manifest;
pub mod model;
pub mod overrides;
pub mod pipeline;
pub mod request;
pub mod step;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, ClientError, ManifestError, OverrideError, TranslationError};
pub use manifest::Manifest;
pub use model::{ImageKind, ImageReference, TranslatedDefinition, ValidationResponse};
pub use pipeline::{Pipeline, PipelineFailure, PipelineOutput, PipelineStage};
pub use request::ValidationRequest;
