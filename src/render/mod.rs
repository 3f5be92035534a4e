//! Rendering
//!
//! Serializes projected documentation. YAML output of the generic shape is
//! key-sorted; the Ansible blocks keep the order the convention expects.

pub mod template;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, SpecDocError};

pub use template::{pretty_json, render_template};

/// Output format for generated documentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
    Template,
}

impl FromStr for OutputFormat {
    type Err = SpecDocError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "yaml" => Ok(OutputFormat::Yaml),
            "json" => Ok(OutputFormat::Json),
            "template" | "handlebars" => Ok(OutputFormat::Template),
            other => Err(SpecDocError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Yaml => f.write_str("yaml"),
            OutputFormat::Json => f.write_str("json"),
            OutputFormat::Template => f.write_str("template"),
        }
    }
}

/// Copy of `value` with object keys sorted at every level
pub fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key.clone(), sort_keys(value)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}

/// YAML with sorted keys
pub fn render_yaml(value: &Value) -> Result<String> {
    Ok(serde_yaml::to_string(&sort_keys(value))?)
}

/// YAML in the value's own key order. `null` renders as an empty document.
pub fn render_yaml_ordered(value: &Value) -> Result<String> {
    if value.is_null() {
        return Ok(String::new());
    }
    Ok(serde_yaml::to_string(value)?)
}

/// Compact JSON
pub fn render_json(value: &Value) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// Render `value` in the requested format
pub fn render(format: OutputFormat, value: &Value, template: Option<&str>) -> Result<String> {
    match format {
        OutputFormat::Yaml => render_yaml(value),
        OutputFormat::Json => render_json(value),
        OutputFormat::Template => render_template(template, value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_parsing() {
        assert_eq!("yaml".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("template".parse::<OutputFormat>().unwrap(), OutputFormat::Template);
        let err = "xml".parse::<OutputFormat>().unwrap_err();
        assert!(matches!(err, SpecDocError::UnsupportedFormat(ref f) if f == "xml"));
    }

    #[test]
    fn test_yaml_sorted() {
        let value = json!({"zeta": 1, "alpha": {"b": 2, "a": 1}});
        assert_eq!(render_yaml(&value).unwrap(), "alpha:\n  a: 1\n  b: 2\nzeta: 1\n");
    }

    #[test]
    fn test_yaml_ordered_keeps_order() {
        let value = json!({"zeta": 1, "alpha": 2});
        assert_eq!(render_yaml_ordered(&value).unwrap(), "zeta: 1\nalpha: 2\n");
        assert_eq!(render_yaml_ordered(&Value::Null).unwrap(), "");
    }

    #[test]
    fn test_json_round_trip() {
        let value = json!({"options": {"my-int": {"type": "int", "choices": null}}, "notes": []});
        let rendered = render_json(&value).unwrap();
        let parsed: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, value);
    }

    #[test]
    fn test_template_without_template() {
        let err = render(OutputFormat::Template, &json!({}), None).unwrap_err();
        assert!(matches!(err, SpecDocError::MissingTemplate));
    }
}
