//! Configuration model
//!
//! The normalized, deduplicated tree of configuration elements that the
//! extractor builds and the generator renders.

mod configuration;
mod dump;
mod element;

pub use configuration::Configuration;
pub use dump::ElementDump;
pub use element::{ConfigElement, ElementId, ElementSpec, ElementType, EnumValue};
