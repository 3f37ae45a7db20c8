//! Common types and utilities for the OpenAPI MCP Generator
//!
//! This crate contains shared data structures, error types, and configuration
//! used across the parser, generator, and CLI components.
//!
//! The central type is [`NormalizedSpec`]: the version-independent view of an
//! OpenAPI v2 or v3 document that the parser produces and the generator renders.

mod config;

pub use config::{GeneratorConfig, DEFAULT_OUTPUT_DIR, DEFAULT_SERVER_NAME};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// A parsed OpenAPI document (JSON or YAML decoded into a JSON tree)
pub type Document = Value;

/// Errors that can occur during spec normalization and server generation
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Duplicate operation id '{id}' issued for {first} and {second}")]
    DuplicateOperationId {
        id: String,
        first: String,
        second: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;

/// OpenAPI major version family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecVersion {
    /// Swagger 2.0 (or anything without an `openapi: 3.x` marker)
    V2,
    /// OpenAPI 3.x
    V3,
}

impl SpecVersion {
    pub fn is_v3(self) -> bool {
        self == SpecVersion::V3
    }
}

/// HTTP methods recognized as operations inside a path item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
}

impl HttpMethod {
    /// Every recognized method, in the order path items are conventionally written
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
        HttpMethod::Options,
        HttpMethod::Head,
    ];

    /// Match a path-item key against the recognized methods.
    ///
    /// Keys are matched exactly (lowercase), so `parameters`, `summary`,
    /// `servers`, `$ref` and `x-*` extensions all return `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == key)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
            HttpMethod::Patch => "patch",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a parameter is transmitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    /// Swagger 2.0 only
    Body,
}

impl ParameterLocation {
    /// Parse the `in` field of a parameter object.
    ///
    /// Unknown locations (e.g. `cookie`, `formData`) return `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "path" => Some(ParameterLocation::Path),
            "query" => Some(ParameterLocation::Query),
            "header" => Some(ParameterLocation::Header),
            "body" => Some(ParameterLocation::Body),
            _ => None,
        }
    }
}

/// A classified operation parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterEntry {
    pub name: String,

    #[serde(rename = "in")]
    pub location: ParameterLocation,

    /// Parameter schema, copied verbatim (may itself be a `$ref`)
    pub schema: Option<Value>,

    pub required: bool,

    /// Empty when the source has no description
    pub description: String,
}

/// Canonical, version-independent description of one operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationDescriptor {
    /// Declared `operationId` or a synthesized `methodResource` id
    pub id: String,

    pub path: String,

    pub method: HttpMethod,

    pub description: String,

    pub path_params: Vec<ParameterEntry>,

    pub query_params: Vec<ParameterEntry>,

    pub header_params: Vec<ParameterEntry>,

    pub request_body_schema: Option<Value>,

    pub response_schema: Option<Value>,

    pub security: Vec<Value>,

    /// Always an object schema with `type: "object"` and `properties`
    pub input_schema: Value,

    /// The response schema, or `{}` when the operation has none
    pub output_schema: Value,
}

impl OperationDescriptor {
    /// Compact JSON form of the input schema for embedding in generated code
    pub fn input_schema_json(&self) -> String {
        self.input_schema.to_string()
    }

    /// Compact JSON form of the output schema for embedding in generated code
    pub fn output_schema_json(&self) -> String {
        self.output_schema.to_string()
    }

    /// Human-readable locator, e.g. `GET /widgets/{id}`
    pub fn locator(&self) -> String {
        format!("{} {}", self.method.as_str().to_uppercase(), self.path)
    }

    /// Total number of path, query and header parameters
    pub fn parameter_count(&self) -> usize {
        self.path_params.len() + self.query_params.len() + self.header_params.len()
    }
}

/// Category of a non-fatal problem found while normalizing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A parameter `$ref` that is external, dangling, or cyclic
    UnresolvedParameterRef,
    /// A parameter entry that is not a mapping or has no `name`
    MalformedParameter,
    /// A method key whose value is not a mapping
    NonMappingOperation,
}

/// A non-fatal problem, reported alongside the descriptors instead of logged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub operation_id: Option<String>,
    pub path: String,
    pub method: HttpMethod,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {}",
            self.method.as_str().to_uppercase(),
            self.path,
            self.message
        )
    }
}

/// Output of normalizing one OpenAPI document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSpec {
    pub version: SpecVersion,

    /// Document-wide default target URL
    pub base_url: String,

    /// One descriptor per (path, method), in document order
    pub operations: Vec<OperationDescriptor>,

    /// Non-fatal problems, in the document order of the operations they concern
    pub diagnostics: Vec<Diagnostic>,
}

impl NormalizedSpec {
    /// Find an operation by id
    pub fn operation(&self, id: &str) -> Option<&OperationDescriptor> {
        self.operations.iter().find(|op| op.id == id)
    }
}
