//! Configuration extraction
//!
//! The [`Extractor`] walks an entry-point type, its superclass chain and
//! every nested type reachable through configuration fields, registering
//! one [`ConfigElement`](crate::model::ConfigElement) per field.
//!
//! The walk keeps its position explicitly in a [`WalkPath`]: the stack of
//! parent elements new elements attach to, and the set of types currently
//! open on that path. A field whose type is already open would start the
//! same walk again one level deeper, so such fields are registered but not
//! descended into.

use crate::error::Result;
use crate::graph::{FieldInfo, TypeGraph};
use crate::model::{Configuration, ElementId, ElementSpec, ElementType, EnumValue};
use crate::names;
use crate::types::{TypeClassifier, TypeKind, TypeRef};
use log::{debug, warn};
use std::collections::HashSet;

/// Current position of a walk
#[derive(Debug, Default)]
pub struct WalkPath {
    parents: Vec<ElementId>,
    open_types: HashSet<String>,
}

impl WalkPath {
    /// Create an empty path (elements attach to the roots)
    pub fn new() -> Self {
        Self::default()
    }

    /// Element new fields attach to
    pub fn current(&self) -> Option<&ElementId> {
        self.parents.last()
    }

    /// Number of parents on the path
    pub fn depth(&self) -> usize {
        self.parents.len()
    }

    /// Whether a type is being walked further up this path
    pub fn is_open(&self, type_name: &str) -> bool {
        self.open_types.contains(type_name)
    }
}

/// Type tag for a field of the given kind
fn element_type(kind: &TypeKind, ty: &TypeRef) -> ElementType {
    match kind {
        TypeKind::Map => ElementType::Map,
        TypeKind::Array(_) => ElementType::Array,
        TypeKind::Collection(_) => ElementType::List,
        TypeKind::Plain | TypeKind::Enum | TypeKind::Complex => ElementType::Named(ty.to_string()),
    }
}

/// Walks a type graph and fills a [`Configuration`]
pub struct Extractor<'a, G: TypeGraph + ?Sized> {
    graph: &'a G,
    classifier: &'a TypeClassifier,
}

impl<'a, G: TypeGraph + ?Sized> Extractor<'a, G> {
    /// Create an extractor over a type graph
    pub fn new(graph: &'a G, classifier: &'a TypeClassifier) -> Self {
        Self { graph, classifier }
    }

    /// Extract the configuration of an entry-point type
    ///
    /// Every element touched records `context` as owning context.
    pub fn extract(&self, config: &mut Configuration, context: &str, entry_type: &str) -> Result<()> {
        let mut path = WalkPath::new();
        self.walk_type(config, context, &mut path, entry_type)
    }

    /// Walk a type and its superclasses at the current path position
    ///
    /// Only `type_name` itself is open while its chain is walked; a field
    /// typed with one of its supertypes is still descended into.
    fn walk_type(
        &self,
        config: &mut Configuration,
        context: &str,
        path: &mut WalkPath,
        type_name: &str,
    ) -> Result<()> {
        let opened = path.open_types.insert(type_name.to_string());

        let result = self
            .hierarchy(type_name)
            .iter()
            .try_for_each(|ty| self.walk_fields(config, context, path, ty));

        if opened {
            path.open_types.remove(type_name);
        }
        result
    }

    /// The type followed by its superclasses
    fn hierarchy(&self, type_name: &str) -> Vec<String> {
        let mut chain: Vec<String> = Vec::new();
        let mut current = Some(type_name.to_string());
        while let Some(ty) = current {
            if chain.contains(&ty) {
                warn!("superclass chain of {} loops back to {}", type_name, ty);
                break;
            }
            current = self.graph.superclass(&ty);
            chain.push(ty);
        }
        chain
    }

    fn walk_fields(
        &self,
        config: &mut Configuration,
        context: &str,
        path: &mut WalkPath,
        type_name: &str,
    ) -> Result<()> {
        for field in self.graph.fields(type_name) {
            if field.is_configurable() {
                self.extract_field(config, context, path, &field)?;
            }
        }
        Ok(())
    }

    fn extract_field(
        &self,
        config: &mut Configuration,
        context: &str,
        path: &mut WalkPath,
        field: &FieldInfo,
    ) -> Result<()> {
        if !names::is_valid_ncname(&field.name) {
            warn!("field name '{}' is not a valid XML element name", field.name);
        }

        let kind = self.classifier.classify(self.graph, &field.ty);
        let parent = path.current().cloned();
        let spec = ElementSpec::new(field.name.as_str(), element_type(&kind, &field.ty))
            .with_default(field.default_value.as_deref())
            .with_documentation(field.documentation.as_deref());

        match kind {
            TypeKind::Enum => {
                let values = self.enum_values(&field.ty);
                config.upsert_enum(parent.as_ref(), context, spec, values)?;
                Ok(())
            }
            TypeKind::Plain | TypeKind::Map => {
                config.upsert(parent.as_ref(), context, spec)?;
                Ok(())
            }
            TypeKind::Complex => {
                let id = config.upsert(parent.as_ref(), context, spec)?;
                self.descend(config, context, path, id, &field.ty)
            }
            TypeKind::Array(item) | TypeKind::Collection(item) => {
                let id = config.upsert(parent.as_ref(), context, spec)?;
                self.insert_list_item(config, context, path, field, id, item)
            }
        }
    }

    /// Register the synthetic item element of a list field
    fn insert_list_item(
        &self,
        config: &mut Configuration,
        context: &str,
        path: &mut WalkPath,
        field: &FieldInfo,
        list: ElementId,
        item: Option<TypeRef>,
    ) -> Result<()> {
        let item_type = item.unwrap_or_else(|| {
            debug!("element type of '{}' is unknown, items are strings", field.name);
            TypeRef::string()
        });
        let item_kind = self.classifier.classify(self.graph, &item_type);
        let name = match &field.item_name {
            Some(name) => name.clone(),
            None => names::item_name(&field.name, &item_type, item_kind == TypeKind::Complex),
        };
        let spec = ElementSpec::new(name, element_type(&item_kind, &item_type));

        match item_kind {
            TypeKind::Enum => {
                let values = self.enum_values(&item_type);
                config.upsert_enum(Some(&list), context, spec, values)?;
                Ok(())
            }
            TypeKind::Complex => {
                let id = config.upsert(Some(&list), context, spec)?;
                self.descend(config, context, path, id, &item_type)
            }
            _ => {
                config.upsert(Some(&list), context, spec)?;
                Ok(())
            }
        }
    }

    /// Walk a nested type below `holder`, unless it is already open
    fn descend(
        &self,
        config: &mut Configuration,
        context: &str,
        path: &mut WalkPath,
        holder: ElementId,
        ty: &TypeRef,
    ) -> Result<()> {
        let Some(type_name) = ty.declared_name() else {
            return Ok(());
        };
        if path.is_open(type_name) {
            warn!(
                "{} refers back to {}, not descending into it at {}",
                context, type_name, holder
            );
            return Ok(());
        }

        path.parents.push(holder);
        debug!("descending into {} at depth {}", type_name, path.depth());
        let result = self.walk_type(config, context, path, type_name);
        path.parents.pop();
        result
    }

    fn enum_values(&self, ty: &TypeRef) -> Vec<EnumValue> {
        ty.declared_name()
            .map(|name| self.graph.enum_constants(name))
            .unwrap_or_default()
    }
}
