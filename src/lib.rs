//! # confschema
//!
//! Derives a configuration model and an XML Schema (XSD) from a graph of
//! annotated type declarations.
//!
//! Entry-point types are walked field by field, through their superclass
//! chains and into nested types. Every configuration field becomes a
//! [`ConfigElement`](model::ConfigElement) in a deduplicated
//! [`Configuration`](model::Configuration); the finished model is rendered
//! as a nested schema by the [`XsdGenerator`](generator::XsdGenerator).
//!
//! ## Example
//!
//! ```rust,ignore
//! use confschema::graph::TypeGraphDocument;
//! use confschema::{ProcessorConfig, SchemaProcessor};
//!
//! let graph = TypeGraphDocument::from_file("types.json")?;
//! let settings = ProcessorConfig::new("http://example.com/plugin").with_output("plugin.xsd");
//!
//! let mut processor = SchemaProcessor::new(&graph, settings);
//! processor.process(&graph.entry_points)?;
//! processor.finish()?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Foundation
pub mod error;
pub mod config;

// Type graph input
pub mod types;
pub mod graph;

// Model and extraction
pub mod model;
pub mod names;
pub mod extractor;

// Rendering and output
pub mod documentation;
pub mod generator;
pub mod exports;
pub mod processor;

// Re-exports for convenience
pub use config::ProcessorConfig;
pub use error::{Error, Result};
pub use extractor::Extractor;
pub use generator::XsdGenerator;
pub use processor::{Generation, SchemaProcessor};

/// Version of the confschema library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// XSD 1.0 namespace
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// XHTML namespace used inside documentation blocks
pub const XHTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";
