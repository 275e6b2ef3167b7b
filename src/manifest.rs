use log::debug;
use serde_yaml::Value;
use std::fs;
use std::path::Path;

use crate::errors::ManifestError;

// @module: Compose manifest loading and canonicalisation

/// A parsed compose manifest.
///
/// No schema is enforced here; the validation service owns compose
/// semantics. The only local guarantee is that the document is not null.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    document: Value,
}

impl Manifest {
    /// Read and parse the manifest at `path`
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ManifestError::NotFound {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        debug!("Read {} bytes from {:?}", content.len(), path);
        Self::parse(&content)
    }

    /// Parse manifest text. Empty documents are rejected like syntax errors.
    pub fn parse(content: &str) -> Result<Self, ManifestError> {
        let document: Value = serde_yaml::from_str(content)
            .map_err(|e| ManifestError::ParseError(e.to_string()))?;

        if document.is_null() {
            return Err(ManifestError::ParseError("document is empty".to_string()));
        }

        Ok(Self { document })
    }

    /// Re-serialise the document into the canonical text the API expects
    pub fn to_canonical_text(&self) -> Result<String, ManifestError> {
        serde_yaml::to_string(&self.document).map_err(|e| ManifestError::SerializeError(e.to_string()))
    }

    /// Keys of the top-level mapping, in document order
    pub fn top_level_keys(&self) -> Vec<String> {
        match &self.document {
            Value::Mapping(map) => map
                .keys()
                .filter_map(|k| match k {
                    Value::String(s) => Some(s.clone()),
                    other => serde_yaml::to_string(other)
                        .ok()
                        .map(|s| s.trim_end().to_string()),
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Names of the services declared under `services`, if any
    pub fn service_names(&self) -> Vec<String> {
        self.document
            .get("services")
            .and_then(Value::as_mapping)
            .map(|services| {
                services
                    .keys()
                    .filter_map(|k| k.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Borrow the parsed document
    pub fn document(&self) -> &Value {
        &self.document
    }
}
