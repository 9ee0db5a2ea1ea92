//! XSD generation integration tests
//!
//! Generated schemas are parsed back with roxmltree and checked structurally.

use confschema::generator::{xsd_primitive, SIMPLE_TYPES};
use confschema::graph::{EntryPoint, FieldInfo, TypeDecl, TypeGraphDocument};
use confschema::model::{Configuration, ElementSpec, ElementType, EnumValue};
use confschema::{Generation, ProcessorConfig, SchemaProcessor, XsdGenerator, XHTML_NAMESPACE, XSD_NAMESPACE};
use pretty_assertions::assert_eq;
use roxmltree::{Document, Node};

const NS: &str = "http://example.com/test";

fn xs_children<'a, 'i>(node: Node<'a, 'i>, local_name: &str) -> Vec<Node<'a, 'i>> {
    node.children()
        .filter(|n| n.is_element())
        .filter(|n| n.tag_name().namespace() == Some(XSD_NAMESPACE) && n.tag_name().name() == local_name)
        .collect()
}

fn xs_child<'a, 'i>(node: Node<'a, 'i>, local_name: &str) -> Node<'a, 'i> {
    let mut found = xs_children(node, local_name);
    assert_eq!(found.len(), 1, "expected exactly one xs:{}", local_name);
    found.remove(0)
}

fn element<'a, 'i>(parent: Node<'a, 'i>, name: &str) -> Node<'a, 'i> {
    xs_children(parent, "element")
        .into_iter()
        .find(|n| n.attribute("name") == Some(name))
        .unwrap_or_else(|| panic!("no xs:element named {}", name))
}

fn documentation_text(node: Node<'_, '_>) -> String {
    let doc = xs_child(xs_child(node, "annotation"), "documentation");
    let div = doc.children().find(|n| n.is_element()).unwrap();
    assert_eq!(div.tag_name().namespace(), Some(XHTML_NAMESPACE));
    div.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

fn render(graph: &TypeGraphDocument) -> String {
    let mut processor = SchemaProcessor::new(graph, ProcessorConfig::new(NS));
    processor.process(&graph.entry_points).unwrap();
    processor.render().unwrap()
}

fn scenario_graph() -> TypeGraphDocument {
    TypeGraphDocument::new()
        .with_type(
            "app.Settings",
            TypeDecl::class()
                .with_field(
                    FieldInfo::new("name", "java.lang.String".parse().unwrap())
                        .with_documentation("the name"),
                )
                .with_field(FieldInfo::new("count", "int".parse().unwrap()))
                .with_field(FieldInfo::new(
                    "tags",
                    "java.util.Collection<java.lang.String>".parse().unwrap(),
                )),
        )
        .with_entry_point(EntryPoint::new("settings", "app.Settings"))
}

// ============================================================================
// End-to-end
// ============================================================================

#[test]
fn test_end_to_end_model() {
    let graph = scenario_graph();
    let mut processor = SchemaProcessor::new(&graph, ProcessorConfig::new(NS));
    processor.process(&graph.entry_points).unwrap();
    let config = processor.configuration();

    let roots: Vec<&str> = config.roots().map(|e| e.name()).collect();
    assert_eq!(roots, vec!["name", "count", "tags"]);

    let tags = config.root("tags").unwrap();
    let items: Vec<_> = config.children(tags).collect();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name(), "tag");
    assert_eq!(items[0].element_type(), &ElementType::Named("java.lang.String".into()));
}

#[test]
fn test_end_to_end_schema() {
    let xsd = render(&scenario_graph());
    let doc = Document::parse(&xsd).unwrap();
    let schema = doc.root_element();

    assert_eq!(schema.tag_name().name(), "schema");
    assert_eq!(schema.attribute("targetNamespace"), Some(NS));
    assert_eq!(schema.attribute("elementFormDefault"), Some("qualified"));
    assert_eq!(xs_children(schema, "element").len(), 3);

    let name = element(schema, "name");
    assert_eq!(name.attribute("type"), Some("xs:string"));
    assert_eq!(documentation_text(name), "the name");

    let count = element(schema, "count");
    assert_eq!(count.attribute("type"), Some("xs:integer"));
    assert!(xs_children(count, "annotation").is_empty());

    let tags = element(schema, "tags");
    assert_eq!(tags.attribute("type"), None);
    let sequence = xs_child(xs_child(tags, "complexType"), "sequence");
    assert_eq!(sequence.attribute("minOccurs"), Some("0"));
    let tag = element(sequence, "tag");
    assert_eq!(tag.attribute("type"), Some("xs:string"));
}

#[test]
fn test_end_to_end_document_text() {
    let expected = r#"<?xml version="1.0" encoding="UTF-8"?>
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema" targetNamespace="http://example.com/test" xmlns="http://example.com/test" xmlns:html="http://www.w3.org/1999/xhtml" elementFormDefault="qualified">
  <xs:element name="name" type="xs:string">
    <xs:annotation>
      <xs:documentation>
        <div xmlns="http://www.w3.org/1999/xhtml">the name</div>
      </xs:documentation>
    </xs:annotation>
  </xs:element>
  <xs:element name="count" type="xs:integer"/>
  <xs:element name="tags">
    <xs:complexType>
      <xs:sequence minOccurs="0">
        <xs:element name="tag" type="xs:string"/>
      </xs:sequence>
    </xs:complexType>
  </xs:element>
</xs:schema>
"#;
    assert_eq!(render(&scenario_graph()), expected);
}

// ============================================================================
// Element kinds
// ============================================================================

#[test]
fn test_enum_rendering() {
    let mut config = Configuration::new();
    config
        .upsert_enum(
            None,
            "ctx",
            ElementSpec::new("color", ElementType::Named("pkg.Color".into())),
            vec![
                EnumValue::new("RED"),
                EnumValue::new("GREEN").with_documentation("The green one"),
                EnumValue::new("BLUE"),
            ],
        )
        .unwrap();

    let xsd = XsdGenerator::new(NS).generate(&config).unwrap();
    let doc = Document::parse(&xsd).unwrap();
    let color = element(doc.root_element(), "color");
    let restriction = xs_child(xs_child(color, "simpleType"), "restriction");
    assert_eq!(restriction.attribute("base"), Some("xs:string"));

    let facets = xs_children(restriction, "enumeration");
    let values: Vec<_> = facets.iter().filter_map(|f| f.attribute("value")).collect();
    assert_eq!(values, vec!["RED", "GREEN", "BLUE"]);

    assert!(xs_children(facets[0], "annotation").is_empty());
    assert_eq!(documentation_text(facets[1]), "The green one");
    assert!(xs_children(facets[2], "annotation").is_empty());
}

#[test]
fn test_map_rendering() {
    let mut config = Configuration::new();
    config
        .upsert(
            None,
            "ctx",
            ElementSpec::new("env", ElementType::Map).with_documentation(Some("Environment")),
        )
        .unwrap();

    let xsd = XsdGenerator::new(NS).generate(&config).unwrap();
    let doc = Document::parse(&xsd).unwrap();
    let env = element(doc.root_element(), "env");
    assert_eq!(documentation_text(env), "Environment");

    let any = xs_child(xs_child(xs_child(env, "complexType"), "sequence"), "any");
    assert_eq!(any.attribute("minOccurs"), Some("0"));
    assert_eq!(any.attribute("maxOccurs"), Some("unbounded"));
}

#[test]
fn test_complex_object_uses_unbounded_choice() {
    let graph = TypeGraphDocument::new()
        .with_type(
            "app.Mojo",
            TypeDecl::class().with_field(FieldInfo::new("server", "app.Server".parse().unwrap())),
        )
        .with_type(
            "app.Server",
            TypeDecl::class()
                .with_field(FieldInfo::new("host", "java.lang.String".parse().unwrap()))
                .with_field(FieldInfo::new("port", "java.lang.Integer".parse().unwrap()))
                .with_field(FieldInfo::new("secure", "boolean".parse().unwrap())),
        )
        .with_entry_point(EntryPoint::new("app", "app.Mojo"));

    let xsd = render(&graph);
    let doc = Document::parse(&xsd).unwrap();
    let server = element(doc.root_element(), "server");
    let choice = xs_child(xs_child(server, "complexType"), "choice");
    assert_eq!(choice.attribute("maxOccurs"), Some("unbounded"));

    let children: Vec<_> = xs_children(choice, "element")
        .iter()
        .map(|e| (e.attribute("name").unwrap(), e.attribute("type").unwrap()))
        .collect();
    assert_eq!(
        children,
        vec![("host", "xs:string"), ("port", "xs:integer"), ("secure", "xs:boolean")]
    );
}

#[test]
fn test_fixture_schema_is_well_formed() {
    let graph =
        TypeGraphDocument::from_file(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/mojo.json"))
            .unwrap();
    let xsd = render(&graph);
    let doc = Document::parse(&xsd).unwrap();
    let schema = doc.root_element();

    let nested = element(schema, "nested");
    let text = documentation_text(nested);
    assert!(text.contains("A nested bean"));
    assert!(text.contains("<li>Wrong item"));

    let created = element(xs_child(xs_child(nested, "complexType"), "choice"), "created");
    assert_eq!(created.attribute("type"), Some("xs:date"));

    let mode = element(schema, "mode");
    let facets = xs_children(xs_child(xs_child(mode, "simpleType"), "restriction"), "enumeration");
    assert_eq!(facets.len(), 2);

    let roots: Vec<_> = xs_children(schema, "element")
        .iter()
        .filter_map(|e| e.attribute("name"))
        .collect();
    assert_eq!(roots.len(), 10);
}

// ============================================================================
// Scalar mapping
// ============================================================================

#[test]
fn test_scalar_mapping_table() {
    for (type_name, primitive) in SIMPLE_TYPES {
        assert_eq!(xsd_primitive(type_name), *primitive);
    }
    assert_eq!(xsd_primitive("java.lang.Long"), "xs:long");
    assert_eq!(xsd_primitive("java.lang.Double"), "xs:double");
    assert_eq!(xsd_primitive("java.math.BigDecimal"), "xs:string");
    assert_eq!(xsd_primitive("char"), "xs:string");
    assert_eq!(xsd_primitive("com.acme.Date"), "xs:string");
}

#[test]
fn test_leaf_user_type_named_like_a_scalar_renders_as_string() {
    let graph = TypeGraphDocument::new()
        .with_type(
            "app.Mojo",
            TypeDecl::class().with_field(FieldInfo::new("since", "com.acme.Date".parse().unwrap())),
        )
        .with_type("com.acme.Date", TypeDecl::class())
        .with_entry_point(EntryPoint::new("app", "app.Mojo"));

    let xsd = render(&graph);
    let doc = Document::parse(&xsd).unwrap();
    assert_eq!(element(doc.root_element(), "since").attribute("type"), Some("xs:string"));
}

#[test]
fn test_unknown_scalar_renders_as_string() {
    let mut config = Configuration::new();
    config
        .upsert(None, "ctx", ElementSpec::new("file", ElementType::Named("java.io.File".into())))
        .unwrap();
    let xsd = XsdGenerator::new(NS).generate(&config).unwrap();
    let doc = Document::parse(&xsd).unwrap();
    assert_eq!(element(doc.root_element(), "file").attribute("type"), Some("xs:string"));
}

// ============================================================================
// Output
// ============================================================================

#[test]
fn test_processor_writes_schema_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out").join("settings.xsd");
    let graph = scenario_graph();

    let mut processor =
        SchemaProcessor::new(&graph, ProcessorConfig::new(NS).with_output(&output));
    processor.process(&graph.entry_points).unwrap();

    assert_eq!(processor.finish().unwrap(), Generation::Written(output.clone()));
    let written = std::fs::read_to_string(&output).unwrap();
    assert_eq!(written, processor.render().unwrap());
}

#[test]
fn test_rendering_is_deterministic() {
    let graph = scenario_graph();
    assert_eq!(render(&graph), render(&graph));
}
