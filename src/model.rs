/*!
 * Wire types for the validation response and the translated definition.
 *
 * The translated definition is held as raw JSON. Only the container `name`
 * is read, and only `imageReference` is ever written; every other key,
 * including unknown fields and nulls, is emitted as received and in its
 * original position.
 */

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::errors::InvalidReason;

/// Response body of the compose validation endpoint.
///
/// Decoded leniently: both fields may be absent, and the definition is held
/// as raw JSON until the interpreter has checked its shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResponse {
    /// Advisory messages produced during translation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation_warnings: Option<Vec<String>>,

    /// The translated container definition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translated_compose_definition: Option<Value>,
}

/// Translated definition with a non-empty `containers` sequence.
///
/// Only constructible through `TryFrom<Value>`, which applies the
/// structural checks.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TranslatedDefinition {
    raw: Map<String, Value>,
}

const CONTAINERS: &str = "containers";
const NAME: &str = "name";
const IMAGE_REFERENCE: &str = "imageReference";

impl TryFrom<Value> for TranslatedDefinition {
    type Error = InvalidReason;

    fn try_from(raw: Value) -> Result<Self, Self::Error> {
        let raw = match raw {
            Value::Null => return Err(InvalidReason::MissingDefinition),
            Value::Object(raw) => raw,
            _ => return Err(InvalidReason::MissingContainers),
        };

        match raw.get(CONTAINERS) {
            None => Err(InvalidReason::MissingContainers),
            Some(Value::Array(containers)) if containers.is_empty() => Err(InvalidReason::EmptyContainers),
            Some(Value::Array(_)) => Ok(Self { raw }),
            Some(_) => Err(InvalidReason::ContainersNotSequence),
        }
    }
}

impl TranslatedDefinition {
    /// Raw container entries, in definition order
    pub fn containers(&self) -> &[Value] {
        match self.raw.get(CONTAINERS) {
            Some(Value::Array(containers)) => containers.as_slice(),
            _ => &[],
        }
    }

    pub fn containers_mut(&mut self) -> impl Iterator<Item = &mut Value> {
        self.raw
            .get_mut(CONTAINERS)
            .and_then(Value::as_array_mut)
            .into_iter()
            .flatten()
    }

    /// Container names; entries without a string `name` are skipped
    pub fn container_names(&self) -> Vec<&str> {
        self.containers().iter().filter_map(container_name).collect()
    }

    /// Decoded image reference of the first container with this name
    pub fn image_reference(&self, container: &str) -> Option<ImageReference> {
        self.containers()
            .iter()
            .find(|c| container_name(c) == Some(container))
            .and_then(|c| c.get(IMAGE_REFERENCE))
            .and_then(|r| serde_json::from_value(r.clone()).ok())
    }

    /// Serialise for the step output, compact or pretty
    pub fn to_output_text(&self, pretty: bool) -> String {
        let value = Value::Object(self.raw.clone());
        if pretty {
            format!("{:#}", value)
        } else {
            value.to_string()
        }
    }
}

/// The `name` of a raw container entry, if it is a string
pub fn container_name(container: &Value) -> Option<&str> {
    container.get(NAME).and_then(Value::as_str)
}

/// Replace the `imageReference` of a raw container entry in place.
///
/// An existing key keeps its position; a missing one is appended. Entries
/// that are not objects are left alone.
pub fn set_image_reference(container: &mut Value, reference: &ImageReference) {
    if let Value::Object(fields) = container {
        fields.insert(IMAGE_REFERENCE.to_string(), reference.to_value());
    }
}

/// Where a container image comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    /// Resolved from the platform's internal registry
    Internal,
    /// A tagged image from an external registry
    External,
}

impl ImageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::External => "external",
        }
    }
}

/// Image reference written by an override
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageReference {
    #[serde(rename = "type")]
    pub kind: ImageKind,

    pub identifier: String,
}

impl ImageReference {
    pub fn internal(identifier: impl Into<String>) -> Self {
        Self {
            kind: ImageKind::Internal,
            identifier: identifier.into(),
        }
    }

    pub fn external(identifier: impl Into<String>) -> Self {
        Self {
            kind: ImageKind::External,
            identifier: identifier.into(),
        }
    }

    pub fn to_value(&self) -> Value {
        json!({"type": self.kind.as_str(), "identifier": self.identifier})
    }
}
