//! XSD generation
//!
//! Renders a finished [`Configuration`] as a nested XML Schema. Every
//! element becomes an anonymous `xs:element` declaration:
//!
//! - maps accept any content (`xs:any`)
//! - enums restrict `xs:string` to their literals
//! - lists wrap their item in an optional `xs:sequence`
//! - other complex elements wrap their children in an unbounded
//!   `xs:choice`, so fields may appear in any order and repeat
//! - plain elements reference an XSD primitive type

use crate::documentation::{escape_text, is_well_formed_fragment, DocNormalizer, InlineMarkup};
use crate::error::Result;
use crate::model::{ConfigElement, Configuration};
use crate::{XHTML_NAMESPACE, XSD_NAMESPACE};
use log::warn;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::fmt;
use std::io::Write;

/// Primitive used for types missing from [`SIMPLE_TYPES`]
pub const DEFAULT_PRIMITIVE: &str = "xs:string";

/// Scalar type names and the XSD primitives they map to
pub const SIMPLE_TYPES: &[(&str, &str)] = &[
    ("java.lang.String", "xs:string"),
    ("java.lang.Integer", "xs:integer"),
    ("int", "xs:integer"),
    ("java.lang.Long", "xs:long"),
    ("long", "xs:long"),
    ("java.lang.Float", "xs:float"),
    ("float", "xs:float"),
    ("java.lang.Double", "xs:double"),
    ("double", "xs:double"),
    ("java.lang.Boolean", "xs:boolean"),
    ("boolean", "xs:boolean"),
    ("java.util.Date", "xs:date"),
];

/// XSD primitive for a scalar type name
///
/// Names are matched exactly, so a user type that happens to be called
/// `Date` stays `xs:string`.
pub fn xsd_primitive(type_name: &str) -> &'static str {
    SIMPLE_TYPES
        .iter()
        .find(|(name, _)| *name == type_name)
        .map(|(_, primitive)| *primitive)
        .unwrap_or(DEFAULT_PRIMITIVE)
}

/// Renders configurations as XML Schema documents
pub struct XsdGenerator {
    target_namespace: String,
    indent: usize,
    normalizer: Box<dyn DocNormalizer>,
}

impl fmt::Debug for XsdGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XsdGenerator")
            .field("target_namespace", &self.target_namespace)
            .field("indent", &self.indent)
            .finish_non_exhaustive()
    }
}

impl XsdGenerator {
    /// Create a generator for a target namespace
    pub fn new(target_namespace: impl Into<String>) -> Self {
        Self {
            target_namespace: target_namespace.into(),
            indent: 2,
            normalizer: Box::new(InlineMarkup),
        }
    }

    /// Set the indentation width (0 writes everything on one line)
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Use a different documentation normalizer
    pub fn with_normalizer(mut self, normalizer: impl DocNormalizer + 'static) -> Self {
        self.normalizer = Box::new(normalizer);
        self
    }

    /// Target namespace of generated documents
    pub fn target_namespace(&self) -> &str {
        &self.target_namespace
    }

    /// Render a configuration to a string
    pub fn generate(&self, config: &Configuration) -> Result<String> {
        let mut buffer = Vec::new();
        self.write(config, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| crate::Error::Xml(e.to_string()))
    }

    /// Render a configuration into a writer
    pub fn write<W: Write>(&self, config: &Configuration, out: W) -> Result<()> {
        let mut writer = if self.indent > 0 {
            Writer::new_with_indent(out, b' ', self.indent)
        } else {
            Writer::new(out)
        };

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let schema = BytesStart::new("xs:schema").with_attributes([
            ("xmlns:xs", XSD_NAMESPACE),
            ("targetNamespace", self.target_namespace.as_str()),
            ("xmlns", self.target_namespace.as_str()),
            ("xmlns:html", XHTML_NAMESPACE),
            ("elementFormDefault", "qualified"),
        ]);
        writer.write_event(Event::Start(schema))?;
        for root in config.roots() {
            self.write_element(&mut writer, config, root)?;
        }
        writer.write_event(Event::End(BytesEnd::new("xs:schema")))?;
        writer.get_mut().write_all(b"\n")?;
        Ok(())
    }

    fn write_element<W: Write>(
        &self,
        writer: &mut Writer<W>,
        config: &Configuration,
        element: &ConfigElement,
    ) -> Result<()> {
        let documentation = self.documentation(element.documentation());
        let is_plain = !element.is_map() && !element.is_enum() && !element.is_complex();

        let mut start = BytesStart::new("xs:element");
        start.push_attribute(("name", element.name()));
        if is_plain {
            start.push_attribute(("type", xsd_primitive(element.element_type().tag())));
            if documentation.is_none() {
                writer.write_event(Event::Empty(start))?;
                return Ok(());
            }
        }

        writer.write_event(Event::Start(start))?;
        if let Some(doc) = &documentation {
            Self::write_annotation(writer, doc)?;
        }

        if element.is_map() {
            Self::write_map(writer)?;
        } else if element.is_enum() {
            self.write_enum(writer, element)?;
        } else if element.is_complex() {
            self.write_complex(writer, config, element)?;
        }

        writer.write_event(Event::End(BytesEnd::new("xs:element")))?;
        Ok(())
    }

    fn write_complex<W: Write>(
        &self,
        writer: &mut Writer<W>,
        config: &Configuration,
        element: &ConfigElement,
    ) -> Result<()> {
        let group = if element.is_list_like() {
            BytesStart::new("xs:sequence").with_attributes([("minOccurs", "0")])
        } else {
            BytesStart::new("xs:choice").with_attributes([("maxOccurs", "unbounded")])
        };
        let group_end = group.to_end().into_owned();

        writer.write_event(Event::Start(BytesStart::new("xs:complexType")))?;
        writer.write_event(Event::Start(group))?;
        for child in config.children(element) {
            self.write_element(writer, config, child)?;
        }
        writer.write_event(Event::End(group_end))?;
        writer.write_event(Event::End(BytesEnd::new("xs:complexType")))?;
        Ok(())
    }

    fn write_enum<W: Write>(&self, writer: &mut Writer<W>, element: &ConfigElement) -> Result<()> {
        writer.write_event(Event::Start(BytesStart::new("xs:simpleType")))?;
        writer.write_event(Event::Start(
            BytesStart::new("xs:restriction").with_attributes([("base", "xs:string")]),
        ))?;

        for value in element.enum_values().unwrap_or_default() {
            let facet =
                BytesStart::new("xs:enumeration").with_attributes([("value", value.value.as_str())]);
            match self.documentation(value.documentation.as_deref()) {
                Some(doc) => {
                    writer.write_event(Event::Start(facet))?;
                    Self::write_annotation(writer, &doc)?;
                    writer.write_event(Event::End(BytesEnd::new("xs:enumeration")))?;
                }
                None => writer.write_event(Event::Empty(facet))?,
            }
        }

        writer.write_event(Event::End(BytesEnd::new("xs:restriction")))?;
        writer.write_event(Event::End(BytesEnd::new("xs:simpleType")))?;
        Ok(())
    }

    fn write_map<W: Write>(writer: &mut Writer<W>) -> Result<()> {
        writer.write_event(Event::Start(BytesStart::new("xs:complexType")))?;
        writer.write_event(Event::Start(BytesStart::new("xs:sequence")))?;
        writer.write_event(Event::Empty(
            BytesStart::new("xs:any").with_attributes([("minOccurs", "0"), ("maxOccurs", "unbounded")]),
        ))?;
        writer.write_event(Event::End(BytesEnd::new("xs:sequence")))?;
        writer.write_event(Event::End(BytesEnd::new("xs:complexType")))?;
        Ok(())
    }

    fn write_annotation<W: Write>(writer: &mut Writer<W>, markup: &str) -> Result<()> {
        writer.write_event(Event::Start(BytesStart::new("xs:annotation")))?;
        writer.write_event(Event::Start(BytesStart::new("xs:documentation")))?;
        writer.write_event(Event::Start(
            BytesStart::new("div").with_attributes([("xmlns", XHTML_NAMESPACE)]),
        ))?;
        writer.write_event(Event::Text(BytesText::from_escaped(markup)))?;
        writer.write_event(Event::End(BytesEnd::new("div")))?;
        writer.write_event(Event::End(BytesEnd::new("xs:documentation")))?;
        writer.write_event(Event::End(BytesEnd::new("xs:annotation")))?;
        Ok(())
    }

    /// Normalized markup for non-blank documentation
    fn documentation(&self, raw: Option<&str>) -> Option<String> {
        let raw = raw.map(str::trim).filter(|doc| !doc.is_empty())?;
        let markup = self.normalizer.normalize(raw);
        if is_well_formed_fragment(&markup) {
            Some(markup)
        } else {
            warn!("documentation is not well-formed markup, embedding it as text: {}", raw);
            Some(escape_text(raw))
        }
    }
}
