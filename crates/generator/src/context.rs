//! Template context for generated server functions

use crate::templates::python_identifier;
use openapi_mcp_generator_common::{GeneratorError, OperationDescriptor, ParameterEntry, Result};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

/// One exposed function as seen by the templates
#[derive(Debug, Clone, Serialize)]
pub struct FunctionContext {
    /// Operation id, used as the MCP tool name
    pub name: String,
    /// Python function name of the handler
    pub handler_name: String,
    pub path: String,
    /// Lowercase HTTP method
    pub method: String,
    pub method_upper: String,
    pub locator: String,
    pub description: String,
    pub path_params: Vec<ParameterEntry>,
    pub query_params: Vec<ParameterEntry>,
    pub header_params: Vec<ParameterEntry>,
    pub has_body: bool,
    pub security: Vec<Value>,
    /// Compact JSON text of the input schema
    pub input_schema_json: String,
    /// Compact JSON text of the output schema
    pub output_schema_json: String,
}

impl FunctionContext {
    fn from_operation(operation: &OperationDescriptor, handler_name: String) -> Self {
        Self {
            name: operation.id.clone(),
            handler_name,
            path: operation.path.clone(),
            method: operation.method.as_str().to_string(),
            method_upper: operation.method.as_str().to_uppercase(),
            locator: operation.locator(),
            description: operation.description.clone(),
            path_params: operation.path_params.clone(),
            query_params: operation.query_params.clone(),
            header_params: operation.header_params.clone(),
            has_body: operation.request_body_schema.is_some(),
            security: operation.security.clone(),
            input_schema_json: operation.input_schema_json(),
            output_schema_json: operation.output_schema_json(),
        }
    }
}

/// Build the function contexts for all operations
///
/// Distinct operation ids can sanitize to the same Python name
/// (`get-pet` and `get_pet`); that is reported instead of letting one
/// handler shadow the other.
pub fn build_function_contexts(operations: &[OperationDescriptor]) -> Result<Vec<FunctionContext>> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    let mut functions = Vec::with_capacity(operations.len());

    for operation in operations {
        let handler_name = python_identifier(&operation.id);
        if let Some(previous) = seen.insert(handler_name.clone(), &operation.id) {
            return Err(GeneratorError::Generation(format!(
                "Operation ids '{}' and '{}' both map to handler '{}'",
                previous, operation.id, handler_name
            )));
        }
        functions.push(FunctionContext::from_operation(operation, handler_name));
    }

    Ok(functions)
}
