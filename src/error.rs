//! Error types for confschema
//!
//! This module defines all error types used throughout the library.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using confschema Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for confschema operations
#[derive(Error, Debug)]
pub enum Error {
    /// A type signature could not be parsed
    #[error("type error: {0}")]
    Type(#[from] TypeParseError),

    /// A type graph document could not be loaded
    #[error("graph error: {0}")]
    Graph(String),

    /// An element identity that the registry does not know
    #[error("unknown element: {0}")]
    UnknownElement(String),

    /// Writing the schema document failed
    #[error("XML error: {0}")]
    Xml(String),

    /// The generated document could not be written to its target
    #[error("failed to write '{}': {source}", .path.display())]
    Output {
        /// Target path of the document
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

/// Type signature parsing error with context
#[derive(Debug, Clone)]
pub struct TypeParseError {
    /// Error message
    pub message: String,
    /// The signature that failed to parse
    pub signature: Option<String>,
    /// Byte offset into the signature
    pub position: Option<usize>,
}

impl TypeParseError {
    /// Create a new type parse error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            signature: None,
            position: None,
        }
    }

    /// Set the signature being parsed
    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    /// Set the offset where parsing failed
    pub fn with_position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }
}

impl fmt::Display for TypeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(ref signature) = self.signature {
            write!(f, " in '{}'", signature)?;
        }

        if let Some(position) = self.position {
            write!(f, " at offset {}", position)?;
        }

        Ok(())
    }
}

impl std::error::Error for TypeParseError {}
