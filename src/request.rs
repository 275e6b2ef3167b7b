use serde::Serialize;

use crate::errors::ManifestError;
use crate::manifest::Manifest;

/// Request body for the compose validation endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRequest {
    /// Canonical YAML text of the manifest
    compose: String,

    /// Suffix hint applied to translated image names
    #[serde(skip_serializing_if = "Option::is_none")]
    image_suffix: Option<String>,
}

impl ValidationRequest {
    /// Create a request from a parsed manifest
    pub fn new(manifest: &Manifest) -> Result<Self, ManifestError> {
        Ok(Self {
            compose: manifest.to_canonical_text()?,
            image_suffix: None,
        })
    }

    /// Set the image suffix hint. Empty suffixes are ignored so the service
    /// keeps its default behaviour.
    pub fn with_image_suffix(mut self, suffix: Option<&str>) -> Self {
        self.image_suffix = suffix
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        self
    }

    pub fn compose(&self) -> &str {
        &self.compose
    }

    pub fn image_suffix(&self) -> Option<&str> {
        self.image_suffix.as_deref()
    }
}
