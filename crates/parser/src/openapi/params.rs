//! Parameter classification into path, query and header groups

use super::refs::{ref_of, RefError, ReferenceTable};
use openapi_mcp_generator_common::{ParameterEntry, ParameterLocation, SpecVersion};
use serde_json::{Map, Value};

/// Keywords a Swagger 2.0 non-body parameter carries inline instead of a `schema`
const V2_INLINE_SCHEMA_KEYWORDS: &[&str] = &[
    "type",
    "format",
    "items",
    "enum",
    "default",
    "minimum",
    "maximum",
    "exclusiveMinimum",
    "exclusiveMaximum",
    "minLength",
    "maxLength",
    "pattern",
    "minItems",
    "maxItems",
    "uniqueItems",
    "multipleOf",
];

/// Problem found with a single parameter entry
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterIssue {
    /// A `$ref` that could not be followed
    UnresolvedRef { reference: String, error: RefError },
    /// An entry that cannot be classified
    Malformed { message: String },
}

/// Parameters of one operation, grouped by location
#[derive(Debug, Default)]
pub struct ClassifiedParameters<'a> {
    pub path: Vec<ParameterEntry>,
    pub query: Vec<ParameterEntry>,
    pub header: Vec<ParameterEntry>,
    /// Every resolved parameter node in merged order, body parameters included
    pub resolved: Vec<&'a Value>,
    pub issues: Vec<ParameterIssue>,
}

/// Partition a merged parameter list into path/query/header groups
///
/// References are resolved through `refs`; ones that cannot be resolved are
/// reported as issues. The first entry for a given (name, location) wins, so
/// operation-level parameters override inherited path-level ones. Entries
/// without a `name` are reported whatever their location. Locations other
/// than path, query and header are left for body extraction.
pub fn classify_parameters<'a>(
    params: &[&'a Value],
    refs: &ReferenceTable<'a>,
    version: SpecVersion,
) -> ClassifiedParameters<'a> {
    let mut classified = ClassifiedParameters::default();
    let mut seen: Vec<(&'a str, &'a str)> = Vec::new();

    for &param in params {
        let param = match refs.deref(param) {
            Ok(node) => node,
            Err(error) => {
                classified.issues.push(ParameterIssue::UnresolvedRef {
                    reference: ref_of(param).unwrap_or_default().to_string(),
                    error,
                });
                continue;
            }
        };

        let Some(fields) = param.as_object() else {
            classified.issues.push(ParameterIssue::Malformed {
                message: "parameter entry is not a mapping".to_string(),
            });
            continue;
        };

        let location_key = fields.get("in").and_then(Value::as_str).unwrap_or_default();

        let Some(name) = fields.get("name").and_then(Value::as_str) else {
            let message = match location_key {
                "" => "parameter has no name and no location".to_string(),
                "body" => "body parameter has no name".to_string(),
                other => format!("{} parameter has no name; skipped", other),
            };
            classified.issues.push(ParameterIssue::Malformed { message });
            // A nameless body still carries the request schema
            if location_key == "body" {
                classified.resolved.push(param);
            }
            continue;
        };

        if seen.contains(&(name, location_key)) {
            continue;
        }
        seen.push((name, location_key));
        classified.resolved.push(param);

        let location = match ParameterLocation::parse(location_key) {
            Some(ParameterLocation::Body) | None => continue,
            Some(location) => location,
        };

        let entry = ParameterEntry {
            name: name.to_string(),
            location,
            schema: parameter_schema(fields, version),
            required: is_required(fields, location),
            description: fields
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        };

        let bucket = match location {
            ParameterLocation::Path => &mut classified.path,
            ParameterLocation::Query => &mut classified.query,
            _ => &mut classified.header,
        };
        bucket.push(entry);
    }

    classified
}

/// Path parameters are required unless marked `required: false`;
/// everything else only when marked `required: true`
fn is_required(fields: &Map<String, Value>, location: ParameterLocation) -> bool {
    let declared = fields.get("required").and_then(Value::as_bool);
    match location {
        ParameterLocation::Path => declared.unwrap_or(true),
        _ => declared.unwrap_or(false),
    }
}

/// Schema of a parameter
///
/// Uses `schema` when present, then (v3) the first `content` media type with
/// a schema, then (v2) the inline type keywords. `None` when none apply.
fn parameter_schema(fields: &Map<String, Value>, version: SpecVersion) -> Option<Value> {
    if let Some(schema) = fields.get("schema").filter(|s| !s.is_null()) {
        return Some(schema.clone());
    }

    if version.is_v3() {
        return fields
            .get("content")
            .and_then(Value::as_object)
            .and_then(|content| content.values().find_map(|media| media.get("schema")))
            .filter(|s| !s.is_null())
            .cloned();
    }

    if !fields.contains_key("type") {
        return None;
    }

    let schema: Map<String, Value> = V2_INLINE_SCHEMA_KEYWORDS
        .iter()
        .filter_map(|key| fields.get(*key).map(|v| (key.to_string(), v.clone())))
        .collect();
    Some(Value::Object(schema))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    type Buckets = (
        Vec<ParameterEntry>,
        Vec<ParameterEntry>,
        Vec<ParameterEntry>,
        Vec<ParameterIssue>,
    );

    fn classify(params: &Value, doc: &Value, version: SpecVersion) -> Buckets {
        let refs = ReferenceTable::build(doc);
        let list: Vec<&Value> = params.as_array().unwrap().iter().collect();
        let classified = classify_parameters(&list, &refs, version);
        (
            classified.path,
            classified.query,
            classified.header,
            classified.issues,
        )
    }

    #[test]
    fn test_required_defaults() {
        let params = json!([
            {"name": "id", "in": "path"},
            {"name": "q", "in": "query"},
            {"name": "X-Trace", "in": "header"},
            {"name": "forced", "in": "query", "required": true},
            {"name": "opt", "in": "path", "required": false}
        ]);

        let (path, query, header, issues) = classify(&params, &json!({}), SpecVersion::V3);
        assert!(issues.is_empty());
        assert!(path[0].required);
        assert!(!path[1].required);
        assert!(!query[0].required);
        assert!(query[1].required);
        assert!(!header[0].required);
    }

    #[test]
    fn test_body_and_unknown_locations_not_bucketed() {
        let params = json!([
            {"name": "payload", "in": "body", "schema": {"type": "object"}},
            {"name": "session", "in": "cookie"},
            {"name": "file", "in": "formData", "type": "file"}
        ]);

        let doc = json!({});
        let refs = ReferenceTable::build(&doc);
        let list: Vec<&Value> = params.as_array().unwrap().iter().collect();
        let classified = classify_parameters(&list, &refs, SpecVersion::V2);

        assert!(classified.path.is_empty());
        assert!(classified.query.is_empty());
        assert!(classified.header.is_empty());
        assert_eq!(classified.resolved.len(), 3);
        assert!(classified.issues.is_empty());
    }

    #[test]
    fn test_refs_resolved_and_unresolved_reported() {
        let doc = json!({
            "components": {
                "parameters": {
                    "limit": {"name": "limit", "in": "query", "schema": {"type": "integer"}}
                }
            }
        });
        let params = json!([
            {"$ref": "#/components/parameters/limit"},
            {"$ref": "#/components/parameters/offset"}
        ]);

        let (_, query, _, issues) = classify(&params, &doc, SpecVersion::V3);
        assert_eq!(query.len(), 1);
        assert_eq!(query[0].name, "limit");
        assert_eq!(query[0].schema, Some(json!({"type": "integer"})));
        assert_eq!(
            issues,
            vec![ParameterIssue::UnresolvedRef {
                reference: "#/components/parameters/offset".to_string(),
                error: RefError::NotFound("#/components/parameters/offset".to_string()),
            }]
        );
    }

    #[test]
    fn test_first_occurrence_wins() {
        let params = json!([
            {"name": "q", "in": "query", "required": true},
            {"name": "q", "in": "query"},
            {"name": "q", "in": "header"}
        ]);

        let (_, query, header, _) = classify(&params, &json!({}), SpecVersion::V3);
        assert_eq!(query.len(), 1);
        assert!(query[0].required);
        assert_eq!(header.len(), 1);
    }

    #[test]
    fn test_malformed_entries() {
        let params = json!(["oops", {"in": "query"}]);

        let (_, query, _, issues) = classify(&params, &json!({}), SpecVersion::V3);
        assert!(query.is_empty());
        assert_eq!(issues.len(), 2);
        assert!(matches!(issues[0], ParameterIssue::Malformed { .. }));
    }

    #[test]
    fn test_nameless_entries_reported_for_any_location() {
        let params = json!([
            {"description": "x"},
            {"in": "cookie"},
            {"in": "path", "required": true}
        ]);

        let (path, _, _, issues) = classify(&params, &json!({}), SpecVersion::V3);
        assert!(path.is_empty());
        assert_eq!(issues.len(), 3);
        assert!(issues
            .iter()
            .all(|issue| matches!(issue, ParameterIssue::Malformed { .. })));
    }

    #[test]
    fn test_nameless_body_still_resolved() {
        let params = json!([{"in": "body", "schema": {"type": "object"}}]);

        let doc = json!({});
        let refs = ReferenceTable::build(&doc);
        let list: Vec<&Value> = params.as_array().unwrap().iter().collect();
        let classified = classify_parameters(&list, &refs, SpecVersion::V2);

        assert_eq!(classified.resolved.len(), 1);
        assert_eq!(classified.issues.len(), 1);
    }

    #[test]
    fn test_v2_inline_schema() {
        let params = json!([
            {"name": "limit", "in": "query", "type": "integer", "format": "int32", "description": "Max"},
            {"name": "tags", "in": "query", "type": "array", "items": {"type": "string"}},
            {"name": "bare", "in": "query"}
        ]);

        let (_, query, _, _) = classify(&params, &json!({}), SpecVersion::V2);
        assert_eq!(query[0].schema, Some(json!({"type": "integer", "format": "int32"})));
        assert_eq!(query[0].description, "Max");
        assert_eq!(
            query[1].schema,
            Some(json!({"type": "array", "items": {"type": "string"}}))
        );
        assert_eq!(query[2].schema, None);
        assert_eq!(query[2].description, "");
    }

    #[test]
    fn test_v3_content_schema() {
        let params = json!([
            {"name": "filter", "in": "query", "content": {"application/json": {"schema": {"type": "object"}}}}
        ]);

        let (_, query, _, _) = classify(&params, &json!({}), SpecVersion::V3);
        assert_eq!(query[0].schema, Some(json!({"type": "object"})));
    }
}
