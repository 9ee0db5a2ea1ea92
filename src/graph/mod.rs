//! Type graph access
//!
//! The extraction engine never inspects source code itself. Everything it
//! needs to know about declared types comes through the [`TypeGraph`] trait:
//! the annotated fields of a type, its superclass, enum constants and
//! assignability to the standard container types.

mod document;

pub use document::{TypeDecl, TypeGraphDocument};

use crate::model::EnumValue;
use crate::types::TypeRef;
use serde::{Deserialize, Serialize};

/// Kind of a declared type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclKind {
    /// Regular class
    #[default]
    Class,
    /// Enumeration
    Enum,
    /// Interface
    Interface,
}

/// Generic container families recognized by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Container {
    /// One type argument (`Collection<E>`)
    Collection,
    /// Two type arguments (`Map<K, V>`)
    Map,
}

/// A field declared on a type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldInfo {
    /// External name of the field
    pub name: String,
    /// Declared type
    #[serde(rename = "type")]
    pub ty: TypeRef,
    /// Raw documentation comment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    /// Default value as written in the annotation
    #[serde(default, rename = "default", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    /// Whether the field carries the configuration annotation
    #[serde(default = "default_annotated")]
    pub annotated: bool,
    /// Whether the field is explicitly excluded
    #[serde(default)]
    pub ignored: bool,
    /// Explicit name for the items of a list field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,
}

fn default_annotated() -> bool {
    true
}

impl FieldInfo {
    /// Create an annotated field
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            documentation: None,
            default_value: None,
            annotated: true,
            ignored: false,
            item_name: None,
        }
    }

    /// Set the documentation
    pub fn with_documentation(mut self, doc: impl Into<String>) -> Self {
        self.documentation = Some(doc.into());
        self
    }

    /// Set the default value
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Set the list item name override
    pub fn with_item_name(mut self, name: impl Into<String>) -> Self {
        self.item_name = Some(name.into());
        self
    }

    /// Mark the field as ignored
    pub fn ignored(mut self) -> Self {
        self.ignored = true;
        self
    }

    /// Mark the field as not annotated
    pub fn unannotated(mut self) -> Self {
        self.annotated = false;
        self
    }

    /// Whether the walker should model this field
    pub fn is_configurable(&self) -> bool {
        self.annotated && !self.ignored
    }
}

/// A root type whose fields seed the extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPoint {
    /// Human-readable label recorded as owning context
    pub label: String,
    /// Fully qualified name of the type
    #[serde(rename = "type")]
    pub type_name: String,
}

impl EntryPoint {
    /// Create a new entry point
    pub fn new(label: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            type_name: type_name.into(),
        }
    }
}

/// Read-only view of a graph of declared types
pub trait TypeGraph {
    /// Kind of a declared type, `None` if the type is unknown
    fn kind(&self, type_name: &str) -> Option<DeclKind>;

    /// Fields declared directly on a type, in declaration order
    fn fields(&self, type_name: &str) -> Vec<FieldInfo>;

    /// Superclass of a type
    fn superclass(&self, type_name: &str) -> Option<String>;

    /// Constants of an enum type, in declaration order
    fn enum_constants(&self, type_name: &str) -> Vec<EnumValue>;

    /// Whether a type is assignable to the generic container family
    fn is_assignable(&self, type_name: &str, container: Container) -> bool;
}
