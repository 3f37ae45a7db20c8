//! Operation id resolution and collision detection

use openapi_mcp_generator_common::{GeneratorError, HttpMethod, Result};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Declared `operationId`, or one synthesized from the method and path
///
/// Synthesized ids are `method + Resource`, where the resource is the last
/// path segment that is not a `{placeholder}` (or `root` when there is none):
/// `GET /repos/{repo}/branches` becomes `getBranches`.
pub fn resolve_operation_id(
    operation: &Map<String, Value>,
    path: &str,
    method: HttpMethod,
) -> String {
    match operation.get("operationId").and_then(Value::as_str) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => synthesize_operation_id(path, method),
    }
}

fn synthesize_operation_id(path: &str, method: HttpMethod) -> String {
    let resource = path
        .split('/')
        .rfind(|segment| !segment.is_empty() && !segment.starts_with('{'))
        .unwrap_or("root");

    format!("{}{}", method.as_str(), capitalize(resource))
}

/// Uppercase the first character and lowercase the rest
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Tracks issued operation ids so that two operations never share one
#[derive(Debug, Default)]
pub struct OperationIdRegistry {
    issued: HashMap<String, String>,
}

impl OperationIdRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `id` for the operation at `locator` (e.g. `GET /widgets`)
    ///
    /// Fails with [`GeneratorError::DuplicateOperationId`] when the id was
    /// already issued to another operation.
    pub fn register(&mut self, id: &str, locator: &str) -> Result<()> {
        if let Some(first) = self.issued.get(id) {
            return Err(GeneratorError::DuplicateOperationId {
                id: id.to_string(),
                first: first.clone(),
                second: locator.to_string(),
            });
        }

        self.issued.insert(id.to_string(), locator.to_string());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.issued.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issued.is_empty()
    }
}
