//! Generation runs
//!
//! A [`SchemaProcessor`] drives one run: entry points are processed in one
//! or more rounds, then [`SchemaProcessor::finish`] renders and writes the
//! schema. Generation happens at most once per processor; rounds and finish
//! calls after that are skipped, so a host that keeps calling back into the
//! processor never renders a stale or half-rebuilt model again.

use std::path::PathBuf;

use log::{debug, info};

use crate::config::ProcessorConfig;
use crate::documentation::DocNormalizer;
use crate::error::Result;
use crate::exports::export_schema;
use crate::extractor::Extractor;
use crate::generator::XsdGenerator;
use crate::graph::{EntryPoint, TypeGraph};
use crate::model::Configuration;
use crate::types::TypeClassifier;

/// Outcome of [`SchemaProcessor::finish`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generation {
    /// The schema was written to the path
    Written(PathBuf),
    /// The schema had already been generated by this processor
    Skipped,
}

/// Drives extraction and generation for one run
#[derive(Debug)]
pub struct SchemaProcessor<'g, G: TypeGraph + ?Sized> {
    graph: &'g G,
    settings: ProcessorConfig,
    classifier: TypeClassifier,
    generator: XsdGenerator,
    configuration: Configuration,
    generated: bool,
}

impl<'g, G: TypeGraph + ?Sized> SchemaProcessor<'g, G> {
    /// Create a processor over a type graph
    pub fn new(graph: &'g G, settings: ProcessorConfig) -> Self {
        let classifier = settings.classifier();
        let generator =
            XsdGenerator::new(settings.target_namespace.clone()).with_indent(settings.indent);
        Self {
            graph,
            settings,
            classifier,
            generator,
            configuration: Configuration::new(),
            generated: false,
        }
    }

    /// Use a different documentation normalizer
    pub fn with_normalizer(mut self, normalizer: impl DocNormalizer + 'static) -> Self {
        self.generator = self.generator.with_normalizer(normalizer);
        self
    }

    /// Process one round of entry points
    pub fn process(&mut self, entry_points: &[EntryPoint]) -> Result<()> {
        if self.generated {
            debug!("schema already generated, ignoring {} entry points", entry_points.len());
            return Ok(());
        }

        let extractor = Extractor::new(self.graph, &self.classifier);
        for entry in entry_points {
            info!("{}: Processing ...", entry.label);
            extractor.extract(&mut self.configuration, &entry.label, &entry.type_name)?;
        }
        Ok(())
    }

    /// Render the current model without writing it
    pub fn render(&self) -> Result<String> {
        self.generator.generate(&self.configuration)
    }

    /// Render and write the schema, once
    pub fn finish(&mut self) -> Result<Generation> {
        if self.generated {
            return Ok(Generation::Skipped);
        }
        self.generated = true;

        let text = self.render()?;
        let result = export_schema(&self.settings.output, &text)?;
        info!(
            "wrote {} elements ({} bytes) to {}",
            self.configuration.len(),
            result.bytes,
            result.path.display()
        );
        Ok(Generation::Written(result.path))
    }

    /// The model built so far
    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Settings of this run
    pub fn settings(&self) -> &ProcessorConfig {
        &self.settings
    }

    /// Whether the schema has been generated
    pub fn is_generated(&self) -> bool {
        self.generated
    }
}
