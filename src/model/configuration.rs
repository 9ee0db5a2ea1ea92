//! The element registry
//!
//! [`Configuration`] owns every element discovered during one run, indexed
//! by identity, plus the ordered list of root elements.

use super::element::{ConfigElement, ElementId, ElementSpec, EnumValue};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::debug;

/// Registry of configuration elements for one generation run
#[derive(Debug, Clone, Default)]
pub struct Configuration {
    /// All elements, nested ones included
    elements: IndexMap<ElementId, ConfigElement>,
    /// Top-level elements in discovery order
    roots: Vec<ElementId>,
}

impl Configuration {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create an element
    ///
    /// An existing element only gains the context label; its documentation
    /// and default value stay as first recorded.
    pub fn upsert(
        &mut self,
        parent: Option<&ElementId>,
        context: &str,
        spec: ElementSpec,
    ) -> Result<ElementId> {
        let id = ElementId::derive(parent, &spec.name, &spec.element_type);
        if let Some(existing) = self.elements.get_mut(&id) {
            existing.add_context(context);
            return Ok(id);
        }
        self.create(parent, context, spec).map(|element| element.id().clone())
    }

    /// Get or create an enum element
    ///
    /// Constants are only attached when the element is created.
    pub fn upsert_enum(
        &mut self,
        parent: Option<&ElementId>,
        context: &str,
        spec: ElementSpec,
        values: Vec<EnumValue>,
    ) -> Result<ElementId> {
        let id = ElementId::derive(parent, &spec.name, &spec.element_type);
        if let Some(existing) = self.elements.get_mut(&id) {
            existing.add_context(context);
            return Ok(id);
        }
        let element = self.create(parent, context, spec)?;
        element.set_enum_values(values);
        Ok(element.id().clone())
    }

    fn create(
        &mut self,
        parent: Option<&ElementId>,
        context: &str,
        spec: ElementSpec,
    ) -> Result<&mut ConfigElement> {
        let element = ConfigElement::new(parent.cloned(), context, spec);
        let id = element.id().clone();

        match parent {
            Some(parent_id) => self
                .elements
                .get_mut(parent_id)
                .ok_or_else(|| Error::UnknownElement(parent_id.to_string()))?
                .add_child(id.clone()),
            None => self.roots.push(id.clone()),
        }

        debug!("registered element {}", id);
        Ok(self.elements.entry(id).or_insert(element))
    }

    /// Look up an element by identity
    pub fn get(&self, id: &ElementId) -> Option<&ConfigElement> {
        self.elements.get(id)
    }

    /// Root elements in discovery order
    pub fn roots(&self) -> impl Iterator<Item = &ConfigElement> {
        self.roots.iter().filter_map(|id| self.elements.get(id))
    }

    /// Children of an element in discovery order
    pub fn children<'a>(&'a self, element: &'a ConfigElement) -> impl Iterator<Item = &'a ConfigElement> {
        element.children().iter().filter_map(|id| self.elements.get(id))
    }

    /// Look up a root element by name
    pub fn root(&self, name: &str) -> Option<&ConfigElement> {
        self.roots().find(|element| element.name() == name)
    }

    /// Look up a child element by name
    pub fn child<'a>(&'a self, element: &'a ConfigElement, name: &str) -> Option<&'a ConfigElement> {
        self.children(element).find(|child| child.name() == name)
    }

    /// All elements in discovery order
    pub fn iter(&self) -> impl Iterator<Item = &ConfigElement> {
        self.elements.values()
    }

    /// Number of elements, nested ones included
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if no element was registered
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of root elements
    pub fn root_count(&self) -> usize {
        self.roots.len()
    }
}
