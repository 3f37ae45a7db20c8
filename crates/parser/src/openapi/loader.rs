//! Decoding of specification text into a document tree

use openapi_mcp_generator_common::{Document, GeneratorError, Result};
use serde_json::{Map, Number, Value};
use std::fs;
use std::path::Path;

/// Read a specification file (JSON or YAML)
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        GeneratorError::Parse(format!(
            "Failed to read OpenAPI file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_str(&content)
}

/// Decode specification text, trying JSON first and then YAML
///
/// Mapping order from the source text is kept, and non-string YAML keys
/// (such as unquoted `200:` status codes) become strings.
pub fn load_str(content: &str) -> Result<Document> {
    let json_err = match serde_json::from_str::<Value>(content) {
        Ok(doc) => return Ok(doc),
        Err(e) => e,
    };

    let mut yaml: serde_yaml::Value = serde_yaml::from_str(content).map_err(|yaml_err| {
        GeneratorError::Parse(format!(
            "Specification is neither valid JSON ({}) nor valid YAML ({})",
            json_err, yaml_err
        ))
    })?;

    // `<<: *anchor` merge keys are expanded before conversion
    yaml.apply_merge()
        .map_err(|e| GeneratorError::Parse(format!("Invalid YAML merge key: {}", e)))?;

    yaml_to_json(yaml)
}

fn yaml_to_json(value: serde_yaml::Value) -> Result<Value> {
    Ok(match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => yaml_number_to_json(&n),
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_json)
                .collect::<Result<Vec<_>>>()?,
        ),
        serde_yaml::Value::Mapping(mapping) => {
            let mut map = Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                map.insert(yaml_key_to_string(key)?, yaml_to_json(value)?);
            }
            Value::Object(map)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(tagged.value)?,
    })
}

fn yaml_number_to_json(n: &serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Number(i.into())
    } else if let Some(u) = n.as_u64() {
        Value::Number(u.into())
    } else {
        // NaN and infinities have no JSON form
        n.as_f64()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

fn yaml_key_to_string(key: serde_yaml::Value) -> Result<String> {
    match key {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Null => Ok("null".to_string()),
        serde_yaml::Value::Tagged(tagged) => yaml_key_to_string(tagged.value),
        other => Err(GeneratorError::Parse(format!(
            "Unsupported YAML mapping key: {:?}",
            other
        ))),
    }
}
