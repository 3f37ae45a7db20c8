//! Unified input schema assembly

use openapi_mcp_generator_common::ParameterEntry;
use serde_json::{json, Map, Value};

/// Build the object schema describing every input of an operation
///
/// Path, query and header parameters become properties in that order, using
/// `{"type": "string"}` when a parameter has no schema. Required parameters
/// are listed under `required`, which is omitted when empty. The request
/// body, when present, is the `body` property and is never marked required.
pub fn build_input_schema(
    path_params: &[ParameterEntry],
    query_params: &[ParameterEntry],
    header_params: &[ParameterEntry],
    request_body_schema: Option<&Value>,
) -> Value {
    let mut properties = Map::new();
    let mut required: Vec<Value> = Vec::new();

    for param in path_params.iter().chain(query_params).chain(header_params) {
        let schema = param
            .schema
            .clone()
            .unwrap_or_else(|| json!({"type": "string"}));
        properties.insert(param.name.clone(), schema);

        let name = Value::String(param.name.clone());
        if param.required && !required.contains(&name) {
            required.push(name);
        }
    }

    if let Some(body) = request_body_schema {
        properties.insert("body".to_string(), body.clone());
    }

    let mut schema = Map::new();
    schema.insert("type".to_string(), Value::String("object".to_string()));
    schema.insert("properties".to_string(), Value::Object(properties));
    if !required.is_empty() {
        schema.insert("required".to_string(), Value::Array(required));
    }

    Value::Object(schema)
}
