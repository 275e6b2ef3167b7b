/*!
 * Post-translation image overrides.
 *
 * Callers can pin individual containers to a specific image by passing a
 * JSON object mapping container names to tags, for example
 * `{"web": "myrepo/web:v2", "worker": "abc123"}`. A tag containing `:` is
 * treated as an external tagged image, anything else as an internal image.
 */

use log::{debug, info, warn};
use std::collections::HashMap;

use crate::errors::OverrideError;
use crate::model::{container_name, set_image_reference, ImageReference, TranslatedDefinition};

/// Parsed container name to image tag mapping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageOverrideMap {
    entries: HashMap<String, String>,
}

/// One override that was applied to a container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedOverride {
    pub container: String,
    pub reference: ImageReference,
}

/// What the override step did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverrideReport {
    /// Overrides applied, in container order
    pub applied: Vec<AppliedOverride>,
    /// Set when the input could not be parsed and was ignored
    pub parse_error: Option<String>,
}

impl ImageOverrideMap {
    /// Parse raw override input. Blank input yields `None`.
    pub fn parse(raw: Option<&str>) -> Result<Option<Self>, OverrideError> {
        let raw = match raw.map(str::trim) {
            None | Some("") => return Ok(None),
            Some(raw) => raw,
        };

        let entries: HashMap<String, String> =
            serde_json::from_str(raw).map_err(|e| OverrideError::Parse(e.to_string()))?;

        Ok(Some(Self { entries }))
    }

    pub fn get(&self, container: &str) -> Option<&str> {
        self.entries.get(container).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace the image reference of every container with a matching entry.
    /// Nothing else in the definition is touched.
    pub fn apply(&self, definition: &mut TranslatedDefinition) -> Vec<AppliedOverride> {
        let mut applied = Vec::new();

        for container in definition.containers_mut() {
            let Some((name, tag)) = container_name(container)
                .and_then(|name| self.get(name).map(|tag| (name.to_string(), tag)))
            else {
                continue;
            };

            let reference = classify_image_tag(tag);
            info!("Updating image tag for container {} to {}", name, tag);
            set_image_reference(container, &reference);
            applied.push(AppliedOverride {
                container: name,
                reference,
            });
        }

        applied
    }
}

impl FromIterator<(String, String)> for ImageOverrideMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Classify an override tag. Any `:` makes it external.
pub fn classify_image_tag(tag: &str) -> ImageReference {
    if tag.contains(':') {
        ImageReference::external(tag)
    } else {
        ImageReference::internal(tag)
    }
}

/// Apply raw override input to a definition.
///
/// Never fails: malformed input is logged and the definition is
/// left as it was.
pub fn apply_image_overrides(definition: &mut TranslatedDefinition, raw: Option<&str>) -> OverrideReport {
    match ImageOverrideMap::parse(raw) {
        Ok(None) => {
            debug!("No image tag updates supplied");
            OverrideReport::default()
        }
        Ok(Some(overrides)) => {
            let applied = overrides.apply(definition);
            if applied.len() < overrides.len() {
                debug!(
                    "{} image tag update(s) did not match any container",
                    overrides.len() - applied.len()
                );
            }
            OverrideReport {
                applied,
                parse_error: None,
            }
        }
        Err(e) => {
            warn!("{}", e);
            OverrideReport {
                applied: Vec::new(),
                parse_error: Some(e.to_string()),
            }
        }
    }
}
