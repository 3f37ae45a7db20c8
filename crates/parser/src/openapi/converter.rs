//! Converts an OpenAPI document into a NormalizedSpec

use super::base_url::resolve_base_url;
use super::input_schema::build_input_schema;
use super::operation_id::{resolve_operation_id, OperationIdRegistry};
use super::params::{classify_parameters, ParameterIssue};
use super::refs::ReferenceTable;
use super::schema::{extract_request_body_schema, extract_response_schema};
use super::version::detect_version;
use super::walker::{type_name, walk_operations, RawOperation};
use openapi_mcp_generator_common::{
    Diagnostic, DiagnosticKind, Document, GeneratorError, NormalizedSpec, OperationDescriptor,
    Result, SpecVersion,
};
use serde_json::{json, Map, Value};

/// Normalize a parsed OpenAPI v2 or v3 document
///
/// Missing sections resolve to empty defaults. Only input that is not
/// OpenAPI-shaped at all (a non-mapping root, `paths` or path item) and
/// operation id collisions are errors.
pub fn normalize(doc: &Document) -> Result<NormalizedSpec> {
    let root = doc.as_object().ok_or_else(|| {
        GeneratorError::MalformedInput(format!(
            "OpenAPI document must be a mapping, found {}",
            type_name(doc)
        ))
    })?;

    let version = detect_version(doc);
    let refs = ReferenceTable::build(doc);
    let walk = walk_operations(doc)?;

    let mut diagnostics = Vec::new();
    let mut skipped = walk.diagnostics.into_iter().peekable();
    let mut registry = OperationIdRegistry::new();
    let mut operations = Vec::with_capacity(walk.operations.len());

    for (index, raw) in walk.operations.iter().enumerate() {
        // Skipped operations are reported where they sit in the document
        while let Some((_, diagnostic)) = skipped.next_if(|(position, _)| *position <= index) {
            diagnostics.push(diagnostic);
        }

        let descriptor = convert_operation(raw, root, version, &refs, &mut diagnostics);
        registry.register(&descriptor.id, &descriptor.locator())?;
        operations.push(descriptor);
    }
    diagnostics.extend(skipped.map(|(_, diagnostic)| diagnostic));

    Ok(NormalizedSpec {
        version,
        base_url: resolve_base_url(doc, version),
        operations,
        diagnostics,
    })
}

/// Build the descriptor for a single operation
fn convert_operation<'a>(
    raw: &RawOperation<'a>,
    root: &'a Map<String, Value>,
    version: SpecVersion,
    refs: &ReferenceTable<'a>,
    diagnostics: &mut Vec<Diagnostic>,
) -> OperationDescriptor {
    let id = resolve_operation_id(raw.operation, raw.path, raw.method);

    let params = classify_parameters(&raw.parameters, refs, version);
    diagnostics.extend(params.issues.into_iter().map(|issue| {
        let (kind, message) = match issue {
            ParameterIssue::UnresolvedRef { error, .. } => {
                (DiagnosticKind::UnresolvedParameterRef, format!("{}; parameter skipped", error))
            }
            ParameterIssue::Malformed { message } => (DiagnosticKind::MalformedParameter, message),
        };
        Diagnostic {
            kind,
            operation_id: Some(id.clone()),
            path: raw.path.to_string(),
            method: raw.method,
            message,
        }
    }));

    let request_body_schema =
        extract_request_body_schema(version, raw.operation, &params.resolved, refs);
    let response_schema = extract_response_schema(version, raw.operation, refs);

    let input_schema = build_input_schema(
        &params.path,
        &params.query,
        &params.header,
        request_body_schema.as_ref(),
    );
    let output_schema = response_schema.clone().unwrap_or_else(|| json!({}));

    OperationDescriptor {
        id,
        path: raw.path.to_string(),
        method: raw.method,
        description: operation_description(raw.operation),
        path_params: params.path,
        query_params: params.query,
        header_params: params.header,
        request_body_schema,
        response_schema,
        security: security_requirements(raw.operation, root),
        input_schema,
        output_schema,
    }
}

/// `summary` when non-empty, otherwise `description`
fn operation_description(operation: &Map<String, Value>) -> String {
    ["summary", "description"]
        .iter()
        .filter_map(|key| operation.get(*key).and_then(Value::as_str))
        .find(|text| !text.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// Operation-level `security` when declared (an empty list opts out),
/// otherwise the document-level requirements
fn security_requirements(operation: &Map<String, Value>, root: &Map<String, Value>) -> Vec<Value> {
    operation
        .get("security")
        .or_else(|| root.get("security"))
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}
