//! Handlebars templates
//!
//! Output is plain text, so HTML escaping is off. Block tags that sit alone
//! on a line are dropped together with that line.

use handlebars::{handlebars_helper, no_escape, Handlebars};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;

use crate::error::{Result, SpecDocError};

use super::sort_keys;

/// Pretty JSON with a 4-space indent and sorted keys
pub fn pretty_json(value: &Value) -> Result<String> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    sort_keys(value).serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Strings holding JSON text are parsed first, so sample fragments print as values
fn format_json_value(value: &Value) -> String {
    let parsed = match value {
        Value::String(text) => serde_json::from_str(text).unwrap_or_else(|_| value.clone()),
        other => other.clone(),
    };
    pretty_json(&parsed).unwrap_or_else(|_| parsed.to_string())
}

handlebars_helper!(format_json: |value: Json| format_json_value(value));

fn registry() -> Handlebars<'static> {
    let mut registry = Handlebars::new();
    registry.register_escape_fn(no_escape);
    registry.register_helper("format_json", Box::new(format_json));
    registry
}

/// Render `template` with `context` as its data
pub fn render_template(template: Option<&str>, context: &Value) -> Result<String> {
    let template = template.ok_or(SpecDocError::MissingTemplate)?;
    Ok(registry().render_template(template, context)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pretty_json() {
        let value = json!({"b": [1, 2], "a": {"d": true, "c": null}});
        assert_eq!(
            pretty_json(&value).unwrap(),
            "{\n    \"a\": {\n        \"c\": null,\n        \"d\": true\n    },\n    \"b\": [\n        1,\n        2\n    ]\n}"
        );
    }

    #[test]
    fn test_format_json_helper() {
        let context = json!({"sample": ["{\"b\": 1, \"a\": 2}"], "value": {"z": 1, "y": 2}});
        let output = render_template(
            Some("{{format_json value}}|{{#each sample}}{{format_json this}}{{/each}}"),
            &context,
        )
        .unwrap();
        assert_eq!(
            output,
            "{\n    \"y\": 2,\n    \"z\": 1\n}|{\n    \"a\": 2,\n    \"b\": 1\n}"
        );
    }

    #[test]
    fn test_no_html_escaping() {
        let output = render_template(Some("{{text}}"), &json!({"text": "a < b & \"c\""})).unwrap();
        assert_eq!(output, "a < b & \"c\"");
    }

    #[test]
    fn test_standalone_block_lines_trimmed() {
        let template = "options:\n{{#each options}}\n  - {{@key}}\n{{/each}}\ndone\n";
        let output = render_template(Some(template), &json!({"options": {"a": 1, "b": 2}})).unwrap();
        assert_eq!(output, "options:\n  - a\n  - b\ndone\n");
    }
}
