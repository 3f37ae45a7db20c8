//! Request body and success response schema extraction

use super::refs::ReferenceTable;
use openapi_mcp_generator_common::SpecVersion;
use serde_json::{Map, Value};

/// Schema of the operation's request body
///
/// v3 reads `requestBody.content` and takes the first media type (in document
/// order) that has a schema. v2 takes the schema of the first `in: body`
/// parameter in the merged, resolved parameter list.
pub fn extract_request_body_schema<'a>(
    version: SpecVersion,
    operation: &'a Map<String, Value>,
    parameters: &[&'a Value],
    refs: &ReferenceTable<'a>,
) -> Option<Value> {
    match version {
        SpecVersion::V3 => {
            let request_body = refs.deref(operation.get("requestBody")?).ok()?;
            first_content_schema(request_body)
        }
        SpecVersion::V2 => parameters
            .iter()
            .filter(|param| param.get("in").and_then(Value::as_str) == Some("body"))
            .find_map(|param| non_null(param.get("schema"))),
    }
}

/// Schema of the first 2xx response
///
/// Status codes are visited in document order and only the first one whose
/// code starts with `2` is inspected, even if it carries no schema.
pub fn extract_response_schema<'a>(
    version: SpecVersion,
    operation: &'a Map<String, Value>,
    refs: &ReferenceTable<'a>,
) -> Option<Value> {
    let responses = operation.get("responses")?.as_object()?;
    let (_, response) = responses
        .iter()
        .find(|(status, _)| status.starts_with('2'))?;
    let response = refs.deref(response).ok()?;

    match version {
        SpecVersion::V3 => first_content_schema(response),
        SpecVersion::V2 => non_null(response.get("schema")),
    }
}

/// `content.<media type>.schema` of the first media type that has a schema
fn first_content_schema(node: &Value) -> Option<Value> {
    node.get("content")?
        .as_object()?
        .values()
        .find_map(|media| non_null(media.get("schema")))
}

fn non_null(value: Option<&Value>) -> Option<Value> {
    value.filter(|v| !v.is_null()).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn op(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_v3_request_body_first_media_with_schema() {
        let doc = json!({});
        let refs = ReferenceTable::build(&doc);
        let operation = op(json!({
            "requestBody": {
                "content": {
                    "application/octet-stream": {},
                    "application/json": {"schema": {"$ref": "#/components/schemas/Pet"}},
                    "application/xml": {"schema": {"type": "string"}}
                }
            }
        }));

        assert_eq!(
            extract_request_body_schema(SpecVersion::V3, &operation, &[], &refs),
            Some(json!({"$ref": "#/components/schemas/Pet"}))
        );
    }

    #[test]
    fn test_v3_request_body_ref() {
        let doc = json!({
            "components": {
                "requestBodies": {
                    "PetBody": {"content": {"application/json": {"schema": {"type": "object"}}}}
                }
            }
        });
        let refs = ReferenceTable::build(&doc);
        let operation = op(json!({"requestBody": {"$ref": "#/components/requestBodies/PetBody"}}));

        assert_eq!(
            extract_request_body_schema(SpecVersion::V3, &operation, &[], &refs),
            Some(json!({"type": "object"}))
        );
    }

    #[test]
    fn test_v3_ignores_body_parameters() {
        let doc = json!({});
        let refs = ReferenceTable::build(&doc);
        let body_param = json!({"name": "b", "in": "body", "schema": {"type": "object"}});
        let operation = op(json!({}));

        assert_eq!(
            extract_request_body_schema(SpecVersion::V3, &operation, &[&body_param], &refs),
            None
        );
    }

    #[test]
    fn test_v2_body_parameter() {
        let doc = json!({});
        let refs = ReferenceTable::build(&doc);
        let query = json!({"name": "q", "in": "query"});
        let schemaless = json!({"name": "raw", "in": "body"});
        let body = json!({"name": "pet", "in": "body", "schema": {"type": "object"}});
        let operation = op(json!({
            "requestBody": {"content": {"application/json": {"schema": {"type": "string"}}}}
        }));

        assert_eq!(
            extract_request_body_schema(
                SpecVersion::V2,
                &operation,
                &[&query, &schemaless, &body],
                &refs
            ),
            Some(json!({"type": "object"}))
        );
    }

    #[test]
    fn test_response_first_2xx_only() {
        let doc = json!({});
        let refs = ReferenceTable::build(&doc);
        let operation = op(json!({
            "responses": {
                "404": {"content": {"application/json": {"schema": {"type": "null"}}}},
                "204": {"description": "No content"},
                "200": {"content": {"application/json": {"schema": {"type": "object"}}}}
            }
        }));

        assert_eq!(extract_response_schema(SpecVersion::V3, &operation, &refs), None);
    }

    #[test]
    fn test_response_v2_and_v3() {
        let doc = json!({});
        let refs = ReferenceTable::build(&doc);
        let v2 = op(json!({"responses": {"default": {}, "201": {"schema": {"type": "array"}}}}));
        let v3 = op(json!({
            "responses": {"200": {"content": {"text/plain": {"schema": {"type": "string"}}}}}
        }));

        assert_eq!(
            extract_response_schema(SpecVersion::V2, &v2, &refs),
            Some(json!({"type": "array"}))
        );
        assert_eq!(
            extract_response_schema(SpecVersion::V3, &v3, &refs),
            Some(json!({"type": "string"}))
        );
        assert_eq!(extract_response_schema(SpecVersion::V3, &v2, &refs), None);
    }

    #[test]
    fn test_response_ref() {
        let doc = json!({
            "components": {
                "responses": {
                    "PetResponse": {"content": {"application/json": {"schema": {"type": "object"}}}}
                }
            }
        });
        let refs = ReferenceTable::build(&doc);
        let operation = op(json!({
            "responses": {"200": {"$ref": "#/components/responses/PetResponse"}}
        }));

        assert_eq!(
            extract_response_schema(SpecVersion::V3, &operation, &refs),
            Some(json!({"type": "object"}))
        );
    }

    #[test]
    fn test_missing_responses() {
        let doc = json!({});
        let refs = ReferenceTable::build(&doc);
        assert_eq!(extract_response_schema(SpecVersion::V2, &op(json!({})), &refs), None);
    }
}
