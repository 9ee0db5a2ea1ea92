//! JSON type graph documents
//!
//! A [`TypeGraphDocument`] is a serialized description of the types an
//! introspection front end discovered:
//!
//! ```json
//! {
//!   "entryPoints": [{ "label": "build", "type": "com.example.BuildMojo" }],
//!   "types": {
//!     "com.example.BuildMojo": {
//!       "superclass": "com.example.BaseMojo",
//!       "fields": [
//!         { "name": "images", "type": "java.util.List<com.example.Image>" }
//!       ]
//!     }
//!   }
//! }
//! ```

use super::{Container, DeclKind, EntryPoint, FieldInfo, TypeGraph};
use crate::error::{Error, Result};
use crate::model::EnumValue;
use crate::types::TypeRef;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Standard library types assignable to `java.util.Collection`
const COLLECTION_TYPES: &[&str] = &[
    "java.util.Collection",
    "java.util.List",
    "java.util.Set",
    "java.util.SortedSet",
    "java.util.NavigableSet",
    "java.util.Queue",
    "java.util.Deque",
    "java.util.ArrayList",
    "java.util.LinkedList",
    "java.util.Vector",
    "java.util.Stack",
    "java.util.HashSet",
    "java.util.LinkedHashSet",
    "java.util.TreeSet",
    "java.util.EnumSet",
    "java.util.ArrayDeque",
    "java.util.PriorityQueue",
    "java.util.concurrent.CopyOnWriteArrayList",
];

/// Standard library types assignable to `java.util.Map`
const MAP_TYPES: &[&str] = &[
    "java.util.Map",
    "java.util.SortedMap",
    "java.util.NavigableMap",
    "java.util.HashMap",
    "java.util.LinkedHashMap",
    "java.util.TreeMap",
    "java.util.EnumMap",
    "java.util.Hashtable",
    "java.util.Properties",
    "java.util.concurrent.ConcurrentMap",
    "java.util.concurrent.ConcurrentHashMap",
];

/// Declaration of a single type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDecl {
    /// Kind of the declaration
    #[serde(default)]
    pub kind: DeclKind,
    /// Direct superclass
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superclass: Option<TypeRef>,
    /// Directly implemented interfaces
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<TypeRef>,
    /// Declared fields in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldInfo>,
    /// Enum constants in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constants: Vec<EnumValue>,
}

impl TypeDecl {
    /// Create a class declaration
    pub fn class() -> Self {
        Self::default()
    }

    /// Create an enum declaration with the given constants
    pub fn enumeration(constants: Vec<EnumValue>) -> Self {
        Self {
            kind: DeclKind::Enum,
            constants,
            ..Self::default()
        }
    }

    /// Set the superclass
    pub fn with_superclass(mut self, superclass: impl Into<String>) -> Self {
        self.superclass = Some(TypeRef::declared(superclass));
        self
    }

    /// Add an implemented interface
    pub fn with_interface(mut self, interface: TypeRef) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// Add a field
    pub fn with_field(mut self, field: FieldInfo) -> Self {
        self.fields.push(field);
        self
    }
}

/// Type graph loaded from (or built like) a JSON document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeGraphDocument {
    /// Root types to extract
    #[serde(default)]
    pub entry_points: Vec<EntryPoint>,
    /// Declared types by fully qualified name
    #[serde(default)]
    pub types: IndexMap<String, TypeDecl>,
}

impl TypeGraphDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a document from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Graph(format!("invalid type graph: {}", e)))
    }

    /// Load a document from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Graph(format!("failed to read '{}': {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    /// Add a type declaration
    pub fn with_type(mut self, name: impl Into<String>, decl: TypeDecl) -> Self {
        self.types.insert(name.into(), decl);
        self
    }

    /// Add an entry point
    pub fn with_entry_point(mut self, entry_point: EntryPoint) -> Self {
        self.entry_points.push(entry_point);
        self
    }

    /// Look up a declaration
    pub fn get(&self, type_name: &str) -> Option<&TypeDecl> {
        self.types.get(type_name)
    }

    fn builtin_container(type_name: &str) -> Option<Container> {
        if COLLECTION_TYPES.contains(&type_name) {
            Some(Container::Collection)
        } else if MAP_TYPES.contains(&type_name) {
            Some(Container::Map)
        } else {
            None
        }
    }

    fn assignable(&self, type_name: &str, container: Container, seen: &mut HashSet<String>) -> bool {
        if !seen.insert(type_name.to_string()) {
            return false;
        }
        if let Some(builtin) = Self::builtin_container(type_name) {
            return builtin == container;
        }
        let Some(decl) = self.get(type_name) else {
            return false;
        };
        decl.superclass
            .iter()
            .chain(decl.interfaces.iter())
            .filter_map(TypeRef::declared_name)
            .any(|parent| self.assignable(parent, container, seen))
    }
}

impl TypeGraph for TypeGraphDocument {
    fn kind(&self, type_name: &str) -> Option<DeclKind> {
        if let Some(decl) = self.get(type_name) {
            Some(decl.kind)
        } else if Self::builtin_container(type_name).is_some() {
            Some(DeclKind::Interface)
        } else {
            None
        }
    }

    fn fields(&self, type_name: &str) -> Vec<FieldInfo> {
        self.get(type_name)
            .map(|decl| decl.fields.clone())
            .unwrap_or_default()
    }

    fn superclass(&self, type_name: &str) -> Option<String> {
        self.get(type_name)?
            .superclass
            .as_ref()?
            .declared_name()
            .map(str::to_string)
    }

    fn enum_constants(&self, type_name: &str) -> Vec<EnumValue> {
        self.get(type_name)
            .filter(|decl| decl.kind == DeclKind::Enum)
            .map(|decl| decl.constants.clone())
            .unwrap_or_default()
    }

    fn is_assignable(&self, type_name: &str, container: Container) -> bool {
        self.assignable(type_name, container, &mut HashSet::new())
    }
}
