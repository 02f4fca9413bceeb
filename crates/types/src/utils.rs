//! Utility functions and helpers

use serde_json::Value;

/// Join a dotted key path, e.g. `theme.extend` + `colors`
pub fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

/// Human readable kind of a JSON value, for error messages
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

/// Short single-line rendering of a value for diagnostics
pub fn preview_value(value: &Value) -> String {
    let rendered = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    if rendered.chars().count() > 60 {
        let truncated: String = rendered.chars().take(57).collect();
        format!("{}...", truncated)
    } else {
        rendered
    }
}
