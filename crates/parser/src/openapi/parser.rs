//! OpenAPI spec file parser

use super::converter::normalize;
use super::loader::{load_file, load_str};
use super::version::detect_version;
use openapi_mcp_generator_common::{Document, NormalizedSpec, Result, SpecVersion};
use std::path::Path;

/// OpenAPI specification parser
///
/// Holds one loaded Swagger 2.0 or OpenAPI 3.x document, in JSON or YAML,
/// and normalizes it into operation descriptors.
pub struct OpenApiParser {
    /// Loaded document tree
    document: Document,
}

impl OpenApiParser {
    /// Load an OpenAPI spec from a file path
    ///
    /// # Example
    /// ```rust,ignore
    /// let parser = OpenApiParser::from_file("petstore.yaml")?;
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::from_document(load_file(path)?))
    }

    /// Parse an OpenAPI spec from literal JSON or YAML content
    pub fn from_content(content: &str) -> Result<Self> {
        Ok(Self::from_document(load_str(content)?))
    }

    /// Wrap an already decoded document
    pub fn from_document(document: Document) -> Self {
        Self { document }
    }

    /// Version family of the loaded document
    pub fn version(&self) -> SpecVersion {
        detect_version(&self.document)
    }

    /// Normalize the document into operation descriptors and a base URL
    pub fn parse(&self) -> Result<NormalizedSpec> {
        normalize(&self.document)
    }

    /// Get reference to the underlying document
    pub fn document(&self) -> &Document {
        &self.document
    }
}
