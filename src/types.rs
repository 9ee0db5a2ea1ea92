//! Type descriptors and classification
//!
//! A [`TypeRef`] describes the declared type of a configuration field using
//! Java-style signatures (`java.util.List<com.example.Item>`, `int[]`, `?`).
//! The [`TypeClassifier`] decides how a field of that type is modeled.

use crate::error::TypeParseError;
use crate::graph::{Container, DeclKind, TypeGraph};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Fully qualified name of the string type used for unresolved list items
pub const STRING_TYPE: &str = "java.lang.String";

/// Types treated as plain scalar configuration values by default
pub const DEFAULT_PLAIN_TYPES: &[&str] = &[
    "java.lang.String",
    "java.lang.Integer",
    "java.lang.Long",
    "java.lang.Float",
    "java.lang.Double",
    "java.lang.Boolean",
];

/// Primitive (non-declared) type keywords
const PRIMITIVES: &[&str] = &[
    "boolean", "byte", "short", "int", "long", "char", "float", "double",
];

/// Declared type of a field
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeRef {
    /// Primitive type such as `int` or `boolean`
    Primitive(String),
    /// Declared (class, interface or enum) type with optional type arguments
    Declared {
        /// Fully qualified type name
        name: String,
        /// Type arguments in declaration order
        args: Vec<TypeRef>,
    },
    /// Array of the component type
    Array(Box<TypeRef>),
    /// Wildcard type argument (`?`, `? extends T`, `? super T`)
    Wildcard,
}

impl TypeRef {
    /// Create a declared type without type arguments
    pub fn declared(name: impl Into<String>) -> Self {
        TypeRef::Declared {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Create a parameterized declared type
    pub fn generic(name: impl Into<String>, args: Vec<TypeRef>) -> Self {
        TypeRef::Declared {
            name: name.into(),
            args,
        }
    }

    /// Create an array type
    pub fn array(component: TypeRef) -> Self {
        TypeRef::Array(Box::new(component))
    }

    /// The string type
    pub fn string() -> Self {
        Self::declared(STRING_TYPE)
    }

    /// Name of the declared type, if this is one
    pub fn declared_name(&self) -> Option<&str> {
        match self {
            TypeRef::Declared { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Unqualified name (the part after the last `.`)
    pub fn simple_name(&self) -> String {
        match self {
            TypeRef::Primitive(name) => name.clone(),
            TypeRef::Declared { name, .. } => match name.rfind('.') {
                Some(idx) => name[idx + 1..].to_string(),
                None => name.clone(),
            },
            TypeRef::Array(component) => format!("{}[]", component.simple_name()),
            TypeRef::Wildcard => "?".to_string(),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Primitive(name) => write!(f, "{}", name),
            TypeRef::Declared { name, args } => {
                write!(f, "{}", name)?;
                if !args.is_empty() {
                    write!(f, "<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ",")?;
                        }
                        write!(f, "{}", arg)?;
                    }
                    write!(f, ">")?;
                }
                Ok(())
            }
            TypeRef::Array(component) => write!(f, "{}[]", component),
            TypeRef::Wildcard => write!(f, "?"),
        }
    }
}

impl FromStr for TypeRef {
    type Err = TypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = SignatureParser::new(s);
        let ty = parser.parse_type()?;
        parser.skip_whitespace();
        if !parser.at_end() {
            return Err(parser.error("unexpected trailing input"));
        }
        Ok(ty)
    }
}

impl TryFrom<String> for TypeRef {
    type Error = TypeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TypeRef> for String {
    fn from(value: TypeRef) -> Self {
        value.to_string()
    }
}

/// Recursive descent parser for type signatures
struct SignatureParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> SignatureParser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn error(&self, message: &str) -> TypeParseError {
        TypeParseError::new(message)
            .with_signature(self.input)
            .with_position(self.pos)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        self.skip_whitespace();
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn identifier(&mut self) -> Result<&'a str, TypeParseError> {
        self.skip_whitespace();
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' || c == '$' || c == '.' {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
        if start == self.pos {
            return Err(self.error("expected a type name"));
        }
        Ok(&self.input[start..self.pos])
    }

    fn parse_type(&mut self) -> Result<TypeRef, TypeParseError> {
        if self.eat('?') {
            // Bounds do not help to resolve an element type
            self.skip_whitespace();
            let rest = &self.input[self.pos..];
            if rest.starts_with("extends") || rest.starts_with("super") {
                self.identifier()?;
                self.parse_type()?;
            }
            return Ok(TypeRef::Wildcard);
        }

        let name = self.identifier()?;
        let mut ty = if PRIMITIVES.contains(&name) {
            TypeRef::Primitive(name.to_string())
        } else {
            let mut args = Vec::new();
            if self.eat('<') {
                loop {
                    args.push(self.parse_type()?);
                    if self.eat(',') {
                        continue;
                    }
                    if self.eat('>') {
                        break;
                    }
                    return Err(self.error("expected ',' or '>'"));
                }
            }
            TypeRef::generic(name, args)
        };

        while self.eat('[') {
            if !self.eat(']') {
                return Err(self.error("expected ']'"));
            }
            ty = TypeRef::array(ty);
        }

        Ok(ty)
    }
}

/// How a field type is modeled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    /// Scalar value
    Plain,
    /// Enumeration with a fixed set of constants
    Enum,
    /// Array with its component type
    Array(Option<TypeRef>),
    /// Collection with its element type, if it could be resolved
    Collection(Option<TypeRef>),
    /// Key/value mapping, rendered opaquely
    Map,
    /// Nested type with its own fields
    Complex,
}

impl TypeKind {
    /// Whether values of this kind are lists of items
    pub fn is_list_like(&self) -> bool {
        matches!(self, TypeKind::Array(_) | TypeKind::Collection(_))
    }

    /// Element type of a list-like kind
    pub fn element_type(&self) -> Option<&TypeRef> {
        match self {
            TypeKind::Array(item) | TypeKind::Collection(item) => item.as_ref(),
            _ => None,
        }
    }
}

/// Classifies field types against a type graph
#[derive(Debug, Clone)]
pub struct TypeClassifier {
    plain_types: HashSet<String>,
}

impl TypeClassifier {
    /// Create a classifier with the given plain type names
    pub fn new<I, S>(plain_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            plain_types: plain_types.into_iter().map(Into::into).collect(),
        }
    }

    /// Check if a declared type name is a plain scalar type
    pub fn is_plain(&self, type_name: &str) -> bool {
        self.plain_types.contains(type_name)
    }

    /// Classify a type
    pub fn classify<G: TypeGraph + ?Sized>(&self, graph: &G, ty: &TypeRef) -> TypeKind {
        match ty {
            TypeRef::Primitive(_) | TypeRef::Wildcard => TypeKind::Plain,
            TypeRef::Array(component) => match component.as_ref() {
                TypeRef::Wildcard => TypeKind::Array(None),
                other => TypeKind::Array(Some(other.clone())),
            },
            TypeRef::Declared { name, args } => {
                if self.is_plain(name) {
                    TypeKind::Plain
                } else if graph.kind(name) == Some(DeclKind::Enum) {
                    TypeKind::Enum
                } else if graph.is_assignable(name, Container::Map) {
                    TypeKind::Map
                } else if graph.is_assignable(name, Container::Collection) {
                    let item = match args.as_slice() {
                        [TypeRef::Wildcard] => None,
                        [single] => Some(single.clone()),
                        _ => None,
                    };
                    TypeKind::Collection(item)
                } else {
                    TypeKind::Complex
                }
            }
        }
    }
}

impl Default for TypeClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_PLAIN_TYPES.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::TypeGraphDocument;

    fn parse(s: &str) -> TypeRef {
        s.parse().expect("valid signature")
    }

    #[test]
    fn test_parse_primitive_and_declared() {
        assert_eq!(parse("int"), TypeRef::Primitive("int".to_string()));
        assert_eq!(parse("java.lang.String"), TypeRef::string());
    }

    #[test]
    fn test_parse_generic_and_array() {
        assert_eq!(
            parse("java.util.Map<java.lang.String, java.util.List<com.example.Item>>"),
            TypeRef::generic(
                "java.util.Map",
                vec![
                    TypeRef::string(),
                    TypeRef::generic(
                        "java.util.List",
                        vec![TypeRef::declared("com.example.Item")]
                    ),
                ]
            )
        );
        assert_eq!(parse("int[][]"), TypeRef::array(TypeRef::array(parse("int"))));
    }

    #[test]
    fn test_parse_wildcards() {
        assert_eq!(
            parse("java.util.List<? extends com.example.Item>"),
            TypeRef::generic("java.util.List", vec![TypeRef::Wildcard])
        );
        assert_eq!(
            parse("java.util.List<?>"),
            TypeRef::generic("java.util.List", vec![TypeRef::Wildcard])
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!("java.util.List<String".parse::<TypeRef>().is_err());
        assert!("".parse::<TypeRef>().is_err());
        assert!("int[".parse::<TypeRef>().is_err());
        assert!("a b".parse::<TypeRef>().is_err());
    }

    #[test]
    fn test_display_matches_signature() {
        for sig in ["java.util.List<com.example.Item>", "java.lang.String[]", "int", "java.util.Map<K,V>"] {
            assert_eq!(parse(sig).to_string(), sig);
        }
    }

    #[test]
    fn test_simple_name() {
        assert_eq!(TypeRef::declared("pkg.Widget").simple_name(), "Widget");
        assert_eq!(TypeRef::declared("Widget").simple_name(), "Widget");
    }

    #[test]
    fn test_classify() {
        let graph = TypeGraphDocument::from_json(
            r#"{
                "types": {
                    "pkg.Color": { "kind": "enum", "constants": [{ "value": "RED" }] },
                    "pkg.Nested": { "fields": [] },
                    "pkg.Names": { "interfaces": ["java.util.List<java.lang.String>"] }
                }
            }"#,
        )
        .expect("valid graph");
        let classifier = TypeClassifier::default();

        assert_eq!(classifier.classify(&graph, &parse("java.lang.Integer")), TypeKind::Plain);
        assert_eq!(classifier.classify(&graph, &parse("int")), TypeKind::Plain);
        assert_eq!(classifier.classify(&graph, &parse("pkg.Color")), TypeKind::Enum);
        assert_eq!(classifier.classify(&graph, &parse("pkg.Nested")), TypeKind::Complex);
        assert_eq!(
            classifier.classify(&graph, &parse("java.util.HashMap<java.lang.String,pkg.Nested>")),
            TypeKind::Map
        );
        assert_eq!(
            classifier.classify(&graph, &parse("java.util.List<pkg.Nested>")),
            TypeKind::Collection(Some(parse("pkg.Nested")))
        );
        assert_eq!(
            classifier.classify(&graph, &parse("java.util.List")),
            TypeKind::Collection(None)
        );
        assert_eq!(classifier.classify(&graph, &parse("pkg.Names")), TypeKind::Collection(None));
        assert_eq!(
            classifier.classify(&graph, &parse("java.lang.String[]")),
            TypeKind::Array(Some(TypeRef::string()))
        );
    }

    #[test]
    fn test_configurable_plain_types() {
        let graph = TypeGraphDocument::default();
        let classifier = TypeClassifier::new(["java.io.File"]);
        assert_eq!(classifier.classify(&graph, &parse("java.io.File")), TypeKind::Plain);
        assert_eq!(classifier.classify(&graph, &parse("java.lang.String")), TypeKind::Complex);
    }
}
