//! Template loading and management

use openapi_mcp_generator_common::{GeneratorError, Result};
use std::collections::HashMap;
use tera::{Tera, Value};

/// Embedded templates: (template name, source)
const TEMPLATES: &[(&str, &str)] = &[
    ("main.py", include_str!("../templates/main.py.tera")),
    ("handlers.py", include_str!("../templates/handlers.py.tera")),
    ("config.py", include_str!("../templates/config.py.tera")),
    (
        "requirements.txt",
        include_str!("../templates/requirements.txt.tera"),
    ),
    ("README.md", include_str!("../templates/README.md.tera")),
    ("Dockerfile", include_str!("../templates/Dockerfile.tera")),
];

/// Load all templates
pub fn load_templates() -> Result<Tera> {
    let mut tera = Tera::default();

    // Register custom filters
    tera.register_filter("py_string", py_string_filter);
    tera.register_filter("py_comment", py_comment_filter);

    for (name, source) in TEMPLATES {
        tera.add_raw_template(name, source).map_err(|e| {
            GeneratorError::Generation(format!("Failed to load {} template: {}", name, e))
        })?;
    }

    Ok(tera)
}

/// Names of all embedded templates, in output order
pub fn template_names() -> impl Iterator<Item = &'static str> {
    TEMPLATES.iter().map(|(name, _)| *name)
}

/// Filter to render a value as a double-quoted Python string literal
///
/// Non-string values are rendered as their JSON text first.
fn py_string_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let text = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    Ok(Value::String(python_string_literal(&text)))
}

/// Filter to flatten text onto a single line for use in a `#` comment
fn py_comment_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("py_comment filter expects a string"))?;

    Ok(Value::String(
        s.split_whitespace().collect::<Vec<_>>().join(" "),
    ))
}

pub(crate) fn python_string_literal(text: &str) -> String {
    let mut literal = String::with_capacity(text.len() + 2);
    literal.push('"');
    for ch in text.chars() {
        match ch {
            '\\' => literal.push_str("\\\\"),
            '"' => literal.push_str("\\\""),
            '\n' => literal.push_str("\\n"),
            '\r' => literal.push_str("\\r"),
            '\t' => literal.push_str("\\t"),
            c if c.is_control() => literal.push_str(&format!("\\u{:04x}", c as u32)),
            c => literal.push(c),
        }
    }
    literal.push('"');
    literal
}

/// Python reserved words that cannot be used as function names
const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];

/// Module-level names of the generated `handlers.py` a handler must not rebind
const HANDLER_MODULE_NAMES: &[&str] = &[
    "FUNCTION_HANDLERS",
    "MappingProxyType",
    "ValueError",
    "_present",
    "_request",
    "config",
    "httpx",
    "str",
];

/// Turn an operation id into a valid Python identifier
///
/// Keywords and names the generated handler module already binds get a
/// trailing `_`.
pub(crate) fn python_identifier(id: &str) -> String {
    let mut ident: String = id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    let taken = |names: &[&str]| names.contains(&ident.as_str());
    if taken(PYTHON_KEYWORDS) || taken(HANDLER_MODULE_NAMES) {
        ident.push('_');
    }

    ident
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_templates() {
        let tera = load_templates().unwrap();
        let names: Vec<&str> = tera.get_template_names().collect();
        for name in template_names() {
            assert!(names.contains(&name), "missing template {}", name);
        }
    }

    #[test]
    fn test_python_string_literal() {
        assert_eq!(python_string_literal("plain"), r#""plain""#);
        assert_eq!(
            python_string_literal("say \"hi\"\nC:\\path"),
            r#""say \"hi\"\nC:\\path""#
        );
        assert_eq!(python_string_literal("\u{7}"), r#""\u0007""#);
        assert_eq!(python_string_literal("café"), "\"café\"");
    }

    #[test]
    fn test_py_string_filter_non_string() {
        let value = py_string_filter(&serde_json::json!({"a": true}), &HashMap::new()).unwrap();
        assert_eq!(value, Value::String(r#""{\"a\":true}""#.to_string()));
    }

    #[test]
    fn test_py_comment_filter() {
        let value =
            py_comment_filter(&Value::String("List\n  all\tpets ".to_string()), &HashMap::new())
                .unwrap();
        assert_eq!(value, Value::String("List all pets".to_string()));
    }

    #[test]
    fn test_python_identifier() {
        assert_eq!(python_identifier("getWidget"), "getWidget");
        assert_eq!(python_identifier("get-widget.v2"), "get_widget_v2");
        assert_eq!(python_identifier("2fa"), "_2fa");
        assert_eq!(python_identifier("import"), "import_");
        assert_eq!(python_identifier(""), "_");
    }

    #[test]
    fn test_python_identifier_avoids_module_names() {
        assert_eq!(python_identifier("config"), "config_");
        assert_eq!(python_identifier("httpx"), "httpx_");
        assert_eq!(python_identifier("_request"), "_request_");
        assert_eq!(python_identifier("FUNCTION_HANDLERS"), "FUNCTION_HANDLERS_");
        assert_eq!(python_identifier("configure"), "configure");
    }
}
