//! OpenAPI version detection

use openapi_mcp_generator_common::{Document, SpecVersion};
use serde_json::Value;

/// Classify a document as v2 or v3
///
/// Only an `openapi` string starting with `3.` selects v3. A missing or
/// malformed field (including Swagger's `swagger: "2.0"`) falls back to v2.
pub fn detect_version(doc: &Document) -> SpecVersion {
    match doc.get("openapi").and_then(Value::as_str) {
        Some(version) if version.starts_with("3.") => SpecVersion::V3,
        _ => SpecVersion::V2,
    }
}
