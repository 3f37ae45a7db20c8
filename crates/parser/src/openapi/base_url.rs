//! Document-wide base URL resolution
//!
//! Per-path and per-operation `servers` overrides are ignored; one generated
//! server targets one API root.

use openapi_mcp_generator_common::{Document, SpecVersion};
use serde_json::Value;

/// Returned when neither `servers` nor `host` yield a URL
pub const PLACEHOLDER_BASE_URL: &str = "http://replace.me.example.com";

/// Resolve the single default target URL of a document
///
/// The version's own construct is tried first (`servers` for v3, `host` for
/// v2) and the other one second, so mislabeled documents still resolve.
pub fn resolve_base_url(doc: &Document, version: SpecVersion) -> String {
    let resolved = match version {
        SpecVersion::V3 => from_servers(doc).or_else(|| from_host(doc)),
        SpecVersion::V2 => from_host(doc).or_else(|| from_servers(doc)),
    };

    resolved.unwrap_or_else(|| PLACEHOLDER_BASE_URL.to_string())
}

/// `url` of the first server that has one, with `{variables}` set to their defaults
fn from_servers(doc: &Document) -> Option<String> {
    doc.get("servers")?
        .as_array()?
        .iter()
        .find_map(|server| {
            let url = server.get("url")?.as_str()?;
            Some(substitute_server_variables(url, server.get("variables")))
        })
}

/// `{scheme}://{host}{basePath}`, with `https` when `schemes` is absent or empty
fn from_host(doc: &Document) -> Option<String> {
    let host = doc.get("host")?.as_str()?;
    let scheme = doc
        .get("schemes")
        .and_then(Value::as_array)
        .and_then(|schemes| schemes.first())
        .and_then(Value::as_str)
        .unwrap_or("https");
    let base_path = doc.get("basePath").and_then(Value::as_str).unwrap_or("");

    Some(format!("{}://{}{}", scheme, host, base_path))
}

fn substitute_server_variables(url: &str, variables: Option<&Value>) -> String {
    let Some(variables) = variables.and_then(Value::as_object) else {
        return url.to_string();
    };

    variables.iter().fold(url.to_string(), |url, (name, variable)| {
        match variable.get("default").and_then(Value::as_str) {
            Some(default) => url.replace(&format!("{{{}}}", name), default),
            None => url,
        }
    })
}
