//! Executable argument spec
//!
//! The shape `AnsibleModule(argument_spec=...)` consumes. Hidden options are
//! kept since they are still accepted at runtime.

use serde_json::{json, Map, Value};

use crate::schema::{SpecDocMeta, SpecField};

impl SpecField {
    /// Argument spec entry for this option.
    ///
    /// `additional_fields` are merged last and win over computed keys.
    pub fn to_spec(&self) -> Value {
        let mut spec = Map::new();
        spec.insert("type".into(), self.field_type.into());
        spec.insert("no_log".into(), json!(self.no_log));
        spec.insert("required".into(), json!(self.required));

        if let Some(default) = &self.default {
            spec.insert("default".into(), default.clone());
        }
        if let Some(choices) = &self.choices {
            spec.insert("choices".into(), json!(choices));
        }
        if let Some(aliases) = &self.aliases {
            spec.insert("aliases".into(), json!(aliases));
        }
        if let Some(suboptions) = &self.suboptions {
            spec.insert(
                "options".into(),
                Value::Object(
                    suboptions
                        .iter()
                        .map(|(name, field)| (name.clone(), field.to_spec()))
                        .collect(),
                ),
            );
        }
        if let Some(element_type) = self.element_type {
            spec.insert("elements".into(), element_type.into());
        }
        if let Some(additional_fields) = &self.additional_fields {
            for (key, value) in additional_fields {
                spec.insert(key.clone(), value.clone());
            }
        }

        Value::Object(spec)
    }
}

impl SpecDocMeta {
    /// Argument spec for the whole module, keyed by option name
    pub fn to_spec(&self) -> Value {
        Value::Object(
            self.options
                .iter()
                .map(|(name, field)| (name.clone(), field.to_spec()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldType;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_nested_spec() {
        let meta = SpecDocMeta::new(
            "module",
            [(
                "my-dict",
                SpecField::new(FieldType::Dict).with_suboptions([
                    ("my-int", SpecField::new(FieldType::Integer).with_required(true)),
                    (
                        "my-list",
                        SpecField::new(FieldType::List)
                            .with_element_type(FieldType::String)
                            .with_default(json!([])),
                    ),
                    ("my-hidden", SpecField::new(FieldType::Bool).with_doc_hide(true)),
                ]),
            )],
        );

        assert_eq!(
            meta.to_spec(),
            json!({
                "my-dict": {
                    "type": "dict",
                    "no_log": false,
                    "required": false,
                    "options": {
                        "my-int": {"type": "int", "no_log": false, "required": true},
                        "my-list": {
                            "type": "list",
                            "no_log": false,
                            "required": false,
                            "default": [],
                            "elements": "str",
                        },
                        "my-hidden": {"type": "bool", "no_log": false, "required": false},
                    },
                },
            })
        );
    }

    #[test]
    fn test_additional_fields_override() {
        let spec = SpecField::new(FieldType::String)
            .with_required(true)
            .with_additional_field("required", false)
            .with_additional_field("apply_defaults", true)
            .to_spec();

        assert_eq!(spec["required"], json!(false));
        assert_eq!(spec["apply_defaults"], json!(true));
        let keys: Vec<&str> = spec.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["type", "no_log", "required", "apply_defaults"]);
    }

    #[test]
    fn test_spec_ignores_documentation_only_keys() {
        let spec = SpecField::new(FieldType::String)
            .with_description("docs only")
            .with_editable(true)
            .with_conflicts_with(["other"])
            .to_spec();
        assert!(spec.get("description").is_none());
        assert!(spec.get("editable").is_none());
        assert!(spec.get("conflicts_with").is_none());
    }
}
