//! Processor settings
//!
//! Settings for one generation run: where the schema goes, which namespace
//! it declares and which declared types count as plain scalars.

use crate::error::{Error, Result};
use crate::types::{TypeClassifier, DEFAULT_PLAIN_TYPES};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Target namespace used when none is configured
pub const DEFAULT_TARGET_NAMESPACE: &str = "http://example.com/configuration";

/// Output file used when none is configured
pub const DEFAULT_OUTPUT: &str = "schema.xsd";

/// Settings for a generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProcessorConfig {
    /// Namespace URI declared as the schema's target namespace
    pub target_namespace: String,
    /// Path of the generated schema
    pub output: PathBuf,
    /// Declared types treated as plain scalars
    pub plain_types: Vec<String>,
    /// Indentation width of the generated document (0 disables indentation)
    pub indent: usize,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            target_namespace: DEFAULT_TARGET_NAMESPACE.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            plain_types: DEFAULT_PLAIN_TYPES.iter().map(|t| t.to_string()).collect(),
            indent: 2,
        }
    }
}

impl ProcessorConfig {
    /// Create settings for a target namespace
    pub fn new(target_namespace: impl Into<String>) -> Self {
        Self {
            target_namespace: target_namespace.into(),
            ..Default::default()
        }
    }

    /// Parse settings from JSON; missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Other(format!("failed to read settings '{}': {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    /// Set the output path
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// Set the target namespace
    pub fn with_target_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.target_namespace = namespace.into();
        self
    }

    /// Add a declared type to the plain types
    pub fn with_plain_type(mut self, type_name: impl Into<String>) -> Self {
        let type_name = type_name.into();
        if !self.plain_types.contains(&type_name) {
            self.plain_types.push(type_name);
        }
        self
    }

    /// Set the indentation width
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Classifier for the configured plain types
    pub fn classifier(&self) -> TypeClassifier {
        TypeClassifier::new(self.plain_types.iter().cloned())
    }
}
