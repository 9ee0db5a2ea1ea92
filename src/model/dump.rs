//! Serializable snapshot of the element tree
//!
//! Used by the `inspect` command and by tests that want to compare whole
//! trees at once.

use super::{ConfigElement, Configuration, EnumValue};
use serde::{Deserialize, Serialize};

/// One element of a dumped tree
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ElementDump {
    /// Element name
    pub name: String,

    /// Type tag
    #[serde(rename = "type")]
    pub element_type: String,

    /// Default value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    /// Raw documentation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,

    /// Enum constants
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<EnumValue>>,

    /// Entry points the element was reached from
    pub contexts: Vec<String>,

    /// Nested elements
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ElementDump>,
}

impl ElementDump {
    fn from_element(config: &Configuration, element: &ConfigElement) -> Self {
        Self {
            name: element.name().to_string(),
            element_type: element.element_type().tag().to_string(),
            default: element.default_value().map(str::to_string),
            documentation: element.documentation().map(str::to_string),
            enum_values: element.enum_values().map(<[EnumValue]>::to_vec),
            contexts: element.contexts().map(str::to_string).collect(),
            children: config
                .children(element)
                .map(|child| Self::from_element(config, child))
                .collect(),
        }
    }

    /// Write the tree as indented text, one element per line
    pub fn write_tree(&self, out: &mut String, depth: usize) {
        out.push_str(&"  ".repeat(depth));
        out.push_str(&self.name);
        out.push_str(" : ");
        out.push_str(&self.element_type);
        if let Some(default) = &self.default {
            out.push_str(&format!(" = {}", default));
        }
        if let Some(values) = &self.enum_values {
            let literals: Vec<&str> = values.iter().map(|v| v.value.as_str()).collect();
            out.push_str(&format!(" {{{}}}", literals.join(", ")));
        }
        out.push_str(&format!(" [{}]\n", self.contexts.join(", ")));
        for child in &self.children {
            child.write_tree(out, depth + 1);
        }
    }
}

impl Configuration {
    /// Snapshot the element tree, starting at the roots
    pub fn dump(&self) -> Vec<ElementDump> {
        self.roots()
            .map(|root| ElementDump::from_element(self, root))
            .collect()
    }

    /// Render the element tree as indented text
    pub fn tree_string(&self) -> String {
        let mut out = String::new();
        for root in self.dump() {
            root.write_tree(&mut out, 0);
        }
        out
    }
}
