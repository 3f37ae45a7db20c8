//! Path item and operation traversal

use openapi_mcp_generator_common::{
    Diagnostic, DiagnosticKind, Document, GeneratorError, HttpMethod, Result,
};
use serde_json::{Map, Value};

/// One operation found while walking `paths`
#[derive(Debug, Clone)]
pub struct RawOperation<'a> {
    pub path: &'a str,
    pub method: HttpMethod,
    pub operation: &'a Map<String, Value>,
    /// Operation-level parameters followed by path-level ones
    pub parameters: Vec<&'a Value>,
}

/// Result of walking a document's `paths`
#[derive(Debug, Default)]
pub struct OperationWalk<'a> {
    pub operations: Vec<RawOperation<'a>>,
    /// Skipped operations, each paired with the index in `operations` of
    /// the next operation walked after it
    pub diagnostics: Vec<(usize, Diagnostic)>,
}

/// Collect every (path, method) operation in document order
///
/// A missing or null `paths` yields no operations. A `paths` value or path
/// item that is not a mapping means the input is not an OpenAPI document
/// and aborts with [`GeneratorError::MalformedInput`].
pub fn walk_operations(doc: &Document) -> Result<OperationWalk<'_>> {
    let mut walk = OperationWalk::default();

    let paths = match doc.get("paths") {
        None | Some(Value::Null) => return Ok(walk),
        Some(Value::Object(paths)) => paths,
        Some(other) => {
            return Err(GeneratorError::MalformedInput(format!(
                "`paths` must be a mapping, found {}",
                type_name(other)
            )))
        }
    };

    for (path, path_item) in paths {
        let path_item = path_item.as_object().ok_or_else(|| {
            GeneratorError::MalformedInput(format!(
                "Path item for '{}' must be a mapping, found {}",
                path,
                type_name(path_item)
            ))
        })?;

        let shared_params = parameter_list(path_item);

        for (key, operation) in path_item {
            // `parameters`, `summary`, `servers`, extensions etc. are not operations
            let Some(method) = HttpMethod::from_key(key) else {
                continue;
            };

            let Some(operation) = operation.as_object() else {
                let position = walk.operations.len();
                walk.diagnostics.push((position, Diagnostic {
                    kind: DiagnosticKind::NonMappingOperation,
                    operation_id: None,
                    path: path.clone(),
                    method,
                    message: format!(
                        "Operation must be a mapping, found {}; skipped",
                        type_name(operation)
                    ),
                }));
                continue;
            };

            let mut parameters = parameter_list(operation);
            parameters.extend(shared_params.iter().copied());

            walk.operations.push(RawOperation {
                path,
                method,
                operation,
                parameters,
            });
        }
    }

    Ok(walk)
}

/// `parameters` array of a path item or operation; anything else is empty
fn parameter_list(node: &Map<String, Value>) -> Vec<&Value> {
    node.get("parameters")
        .and_then(Value::as_array)
        .map(|params| params.iter().collect())
        .unwrap_or_default()
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
