//! Configuration elements
//!
//! A [`ConfigElement`] is one configuration knob or one nested group of
//! knobs. Elements refer to their parent and children by [`ElementId`]; the
//! owning [`Configuration`](super::Configuration) holds the elements
//! themselves.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Structural identity of an element
///
/// Derived from the parent's identity, the element name and its type tag,
/// so re-deriving the same triple always yields the same identity.
/// Structural tags carry a `#` prefix, which no type name can start with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(String);

impl ElementId {
    /// Derive the identity of an element
    pub fn derive(parent: Option<&ElementId>, name: &str, element_type: &ElementType) -> Self {
        let parent = parent.map(|p| p.0.as_str()).unwrap_or("");
        let tag = match element_type {
            ElementType::Named(type_name) => type_name.clone(),
            structural => format!("#{}", structural.tag()),
        };
        ElementId(format!("{}/{}:{}", parent, name, tag))
    }

    /// Identity as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Type tag of an element
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// Scalar, enum or complex type by name
    Named(String),
    /// Key/value mapping
    Map,
    /// Array of items
    Array,
    /// Collection of items
    List,
}

impl ElementType {
    /// Tag used in identities and dumps
    pub fn tag(&self) -> &str {
        match self {
            ElementType::Named(name) => name,
            ElementType::Map => "map",
            ElementType::Array => "array",
            ElementType::List => "list",
        }
    }

    /// Whether the element holds a list of items
    pub fn is_list_like(&self) -> bool {
        matches!(self, ElementType::Array | ElementType::List)
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// One constant of an enumeration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValue {
    /// Literal value
    pub value: String,
    /// Documentation of the constant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
}

impl EnumValue {
    /// Create an undocumented constant
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            documentation: None,
        }
    }

    /// Set the documentation
    pub fn with_documentation(mut self, doc: impl Into<String>) -> Self {
        self.documentation = Some(doc.into());
        self
    }
}

/// Values of a new element, as handed to the registry
#[derive(Debug, Clone, PartialEq)]
pub struct ElementSpec {
    /// External name
    pub name: String,
    /// Type tag
    pub element_type: ElementType,
    /// Default value
    pub default_value: Option<String>,
    /// Raw documentation
    pub documentation: Option<String>,
}

impl ElementSpec {
    /// Create a spec without default or documentation
    pub fn new(name: impl Into<String>, element_type: ElementType) -> Self {
        Self {
            name: name.into(),
            element_type,
            default_value: None,
            documentation: None,
        }
    }

    /// Set the default value
    pub fn with_default(mut self, value: Option<impl Into<String>>) -> Self {
        self.default_value = value.map(Into::into);
        self
    }

    /// Set the documentation
    pub fn with_documentation(mut self, doc: Option<impl Into<String>>) -> Self {
        self.documentation = doc.map(Into::into);
        self
    }
}

/// A configuration element
#[derive(Debug, Clone)]
pub struct ConfigElement {
    id: ElementId,
    name: String,
    element_type: ElementType,
    default_value: Option<String>,
    documentation: Option<String>,
    enum_values: Option<Vec<EnumValue>>,
    contexts: IndexSet<String>,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

impl ConfigElement {
    pub(crate) fn new(parent: Option<ElementId>, context: &str, spec: ElementSpec) -> Self {
        let id = ElementId::derive(parent.as_ref(), &spec.name, &spec.element_type);
        let mut contexts = IndexSet::new();
        contexts.insert(context.to_string());
        Self {
            id,
            name: spec.name,
            element_type: spec.element_type,
            default_value: spec.default_value,
            documentation: spec.documentation,
            enum_values: None,
            contexts,
            parent,
            children: Vec::new(),
        }
    }

    pub(crate) fn add_context(&mut self, context: &str) {
        if !self.contexts.contains(context) {
            self.contexts.insert(context.to_string());
        }
    }

    pub(crate) fn add_child(&mut self, child: ElementId) {
        if !self.children.contains(&child) {
            self.children.push(child);
        }
    }

    pub(crate) fn set_enum_values(&mut self, values: Vec<EnumValue>) {
        self.enum_values = Some(values);
    }

    /// Identity of this element
    pub fn id(&self) -> &ElementId {
        &self.id
    }

    /// External name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type tag
    pub fn element_type(&self) -> &ElementType {
        &self.element_type
    }

    /// Default value
    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    /// Raw documentation
    pub fn documentation(&self) -> Option<&str> {
        self.documentation.as_deref()
    }

    /// Enum constants, if this element is an enumeration
    pub fn enum_values(&self) -> Option<&[EnumValue]> {
        self.enum_values.as_deref()
    }

    /// Labels of the entry points this element was reached from
    pub fn contexts(&self) -> impl Iterator<Item = &str> {
        self.contexts.iter().map(String::as_str)
    }

    /// Whether this element was reached from the given entry point
    pub fn has_context(&self, context: &str) -> bool {
        self.contexts.contains(context)
    }

    /// Parent identity
    pub fn parent(&self) -> Option<&ElementId> {
        self.parent.as_ref()
    }

    /// Child identities in discovery order
    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    /// Whether the element has children
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Map elements are rendered opaquely
    pub fn is_map(&self) -> bool {
        self.element_type == ElementType::Map
    }

    /// Whether this element is an enumeration
    pub fn is_enum(&self) -> bool {
        self.enum_values.is_some()
    }

    /// Elements with children are complex
    pub fn is_complex(&self) -> bool {
        self.has_children()
    }

    /// Whether the element is an array or collection
    pub fn is_list_like(&self) -> bool {
        self.element_type.is_list_like()
    }
}
