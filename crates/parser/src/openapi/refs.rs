//! Local `$ref` resolution for reusable parameters, bodies and responses
//!
//! The table maps JSON-pointer references such as
//! `#/components/parameters/limit` (v3) or `#/parameters/limit` (v2) to the
//! node they point at. Only these component sections are indexed: schema
//! references are never followed and are carried through verbatim.

use openapi_mcp_generator_common::Document;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Longest `$ref` chain followed before giving up
const MAX_REF_DEPTH: usize = 32;

/// Component sections indexed by the table: (pointer prefix, path in document)
const INDEXED_SECTIONS: &[(&str, &[&str])] = &[
    ("#/components/parameters/", &["components", "parameters"]),
    ("#/components/requestBodies/", &["components", "requestBodies"]),
    ("#/components/responses/", &["components", "responses"]),
    ("#/parameters/", &["parameters"]),
    ("#/responses/", &["responses"]),
];

/// Why a reference could not be resolved
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RefError {
    #[error("reference '{0}' is not local to this document")]
    External(String),

    #[error("reference '{0}' does not point at a known component")]
    NotFound(String),

    #[error("reference '{0}' is part of a cycle")]
    Cycle(String),

    #[error("reference chain starting at '{0}' is too deep")]
    TooDeep(String),
}

/// Lookup table from local reference strings to their target nodes
#[derive(Debug, Default)]
pub struct ReferenceTable<'a> {
    targets: HashMap<String, &'a Value>,
}

impl<'a> ReferenceTable<'a> {
    /// Index the reusable component sections of a document
    pub fn build(doc: &'a Document) -> Self {
        let mut targets = HashMap::new();

        for (prefix, location) in INDEXED_SECTIONS {
            let section = location
                .iter()
                .try_fold(doc, |node, key| node.get(*key))
                .and_then(Value::as_object);

            if let Some(section) = section {
                for (name, node) in section {
                    targets.insert(format!("{}{}", prefix, escape_pointer_segment(name)), node);
                }
            }
        }

        Self { targets }
    }

    /// Number of indexed components
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Follow a reference (and any reference it points at) to a concrete node
    pub fn resolve(&self, reference: &str) -> Result<&'a Value, RefError> {
        let mut seen = HashSet::new();
        let mut current = reference;

        for _ in 0..MAX_REF_DEPTH {
            if !current.starts_with("#/") {
                return Err(RefError::External(current.to_string()));
            }
            if !seen.insert(current) {
                return Err(RefError::Cycle(reference.to_string()));
            }

            let target = self
                .targets
                .get(current)
                .copied()
                .ok_or_else(|| RefError::NotFound(current.to_string()))?;

            match ref_of(target) {
                Some(next) => current = next,
                None => return Ok(target),
            }
        }

        Err(RefError::TooDeep(reference.to_string()))
    }

    /// Resolve `node` if it is a `$ref`, otherwise return it unchanged
    pub fn deref(&self, node: &'a Value) -> Result<&'a Value, RefError> {
        match ref_of(node) {
            Some(reference) => self.resolve(reference),
            None => Ok(node),
        }
    }
}

/// The `$ref` string of a reference object
pub(crate) fn ref_of(node: &Value) -> Option<&str> {
    node.get("$ref").and_then(Value::as_str)
}

/// Escape a component name for use in a JSON pointer (`~` then `/`)
fn escape_pointer_segment(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_v3_parameter() {
        let doc = json!({
            "components": {
                "parameters": {
                    "limit": {"name": "limit", "in": "query"}
                }
            }
        });

        let table = ReferenceTable::build(&doc);
        let target = table.resolve("#/components/parameters/limit").unwrap();
        assert_eq!(target["name"], "limit");
    }

    #[test]
    fn test_resolve_v2_parameter_and_response() {
        let doc = json!({
            "parameters": {"id": {"name": "id", "in": "path"}},
            "responses": {"Ok": {"schema": {"type": "string"}}}
        });

        let table = ReferenceTable::build(&doc);
        assert_eq!(table.len(), 2);
        assert_eq!(table.resolve("#/parameters/id").unwrap()["in"], "path");
        assert_eq!(
            table.resolve("#/responses/Ok").unwrap()["schema"]["type"],
            "string"
        );
    }

    #[test]
    fn test_resolve_escaped_names() {
        let doc = json!({
            "components": {"parameters": {"a/b~c": {"name": "x", "in": "header"}}}
        });

        let table = ReferenceTable::build(&doc);
        assert!(table.resolve("#/components/parameters/a~1b~0c").is_ok());
    }

    #[test]
    fn test_resolve_chain() {
        let doc = json!({
            "components": {
                "parameters": {
                    "alias": {"$ref": "#/components/parameters/real"},
                    "real": {"name": "real", "in": "query"}
                }
            }
        });

        let table = ReferenceTable::build(&doc);
        assert_eq!(
            table.resolve("#/components/parameters/alias").unwrap()["name"],
            "real"
        );
    }

    #[test]
    fn test_resolve_errors() {
        let doc = json!({
            "components": {
                "parameters": {
                    "a": {"$ref": "#/components/parameters/b"},
                    "b": {"$ref": "#/components/parameters/a"}
                }
            }
        });

        let table = ReferenceTable::build(&doc);
        assert_eq!(
            table.resolve("#/components/parameters/a"),
            Err(RefError::Cycle("#/components/parameters/a".to_string()))
        );
        assert!(matches!(
            table.resolve("common.yaml#/components/parameters/a"),
            Err(RefError::External(_))
        ));
        assert!(matches!(
            table.resolve("#/components/parameters/missing"),
            Err(RefError::NotFound(_))
        ));
        assert!(matches!(
            table.resolve("#/components/schemas/Pet"),
            Err(RefError::NotFound(_))
        ));
    }

    #[test]
    fn test_deref_passes_inline_nodes_through() {
        let doc = json!({});
        let table = ReferenceTable::build(&doc);
        let inline = json!({"name": "q", "in": "query"});
        assert_eq!(table.deref(&inline).unwrap(), &inline);
        assert!(table.is_empty());
    }
}
