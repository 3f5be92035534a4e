//! Ansible documentation shape
//!
//! Optional keys are emitted only when set, `element_type` is renamed to
//! `elements`, samples are parsed from their JSON fragments and examples are
//! parsed as one YAML document.

use serde_json::{json, Map, Value};

use crate::error::{Result, SpecDocError};
use crate::schema::{DeprecationInfo, SpecDocMeta, SpecField, SpecReturnValue};

use super::{child_path, visible_options, AnsibleDoc};

impl SpecField {
    /// Ansible documentation for this option. Hidden suboptions are dropped.
    pub fn to_external_doc(&self) -> Value {
        let mut doc = Map::new();
        doc.insert("type".into(), self.field_type.into());
        doc.insert("required".into(), json!(self.required));
        doc.insert("description".into(), json!(self.description.lines()));

        if let Some(default) = &self.default {
            doc.insert("default".into(), default.clone());
        }
        if let Some(choices) = &self.choices {
            doc.insert("choices".into(), json!(choices));
        }
        if let Some(element_type) = self.element_type {
            doc.insert("elements".into(), element_type.into());
        }
        if let Some(aliases) = &self.aliases {
            doc.insert("aliases".into(), json!(aliases));
        }
        if let Some(version_added) = &self.version_added {
            doc.insert("version_added".into(), json!(version_added));
        }
        if let Some(suboptions) = &self.suboptions {
            doc.insert(
                "suboptions".into(),
                Value::Object(
                    visible_options(suboptions)
                        .map(|(name, field)| (name.clone(), field.to_external_doc()))
                        .collect(),
                ),
            );
        }

        Value::Object(doc)
    }
}

impl SpecReturnValue {
    /// Ansible documentation for this return value.
    ///
    /// The sample fragments are concatenated and parsed as JSON; an empty
    /// fragment list projects to a null `sample`.
    pub fn to_external_doc(&self) -> Result<Value> {
        self.external_doc_at("")
    }

    pub(crate) fn external_doc_at(&self, path: &str) -> Result<Value> {
        let mut doc = Map::new();
        doc.insert("description".into(), json!(self.description));
        doc.insert("type".into(), self.field_type.into());
        doc.insert("returned".into(), json!(self.returned));

        let sample = if self.sample.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&self.sample.concat()).map_err(|source| {
                SpecDocError::MalformedSample {
                    path: child_path(path, "sample"),
                    source,
                }
            })?
        };
        doc.insert("sample".into(), sample);
        if let Some(elements) = self.elements {
            doc.insert("elements".into(), elements.into());
        }
        if let Some(contains) = &self.contains {
            let mut projected = Map::new();
            for (name, value) in contains {
                let value_path = child_path(&child_path(path, "contains"), name);
                projected.insert(name.clone(), value.external_doc_at(&value_path)?);
            }
            doc.insert("contains".into(), Value::Object(projected));
        }
        if let Some(version_added) = &self.version_added {
            doc.insert("version_added".into(), json!(version_added));
        }

        Ok(Value::Object(doc))
    }
}

impl DeprecationInfo {
    /// All set deprecation fields. Fails when both removal markers are set.
    pub fn to_external_doc(&self) -> Result<Value> {
        if self.removed_in.is_some() && self.removed_by_date.is_some() {
            return Err(SpecDocError::ConflictingDeprecationFields {
                path: "deprecated".to_string(),
            });
        }

        let mut doc = Map::new();
        doc.insert("alternative".into(), json!(self.alternative));
        if let Some(removed_in) = &self.removed_in {
            doc.insert("removed_in".into(), json!(removed_in));
        }
        if let Some(removed_by_date) = &self.removed_by_date {
            doc.insert("removed_by_date".into(), json!(removed_by_date));
        }
        if let Some(why) = &self.why {
            doc.insert("why".into(), json!(why));
        }

        Ok(Value::Object(doc))
    }
}

impl SpecDocMeta {
    /// The `DOCUMENTATION`, `RETURN` and `EXAMPLES` blocks for this module
    pub fn to_external_doc(&self) -> Result<AnsibleDoc> {
        let description = self.description.lines();
        let short_description = self
            .short_description
            .clone()
            .unwrap_or_else(|| description.join(" "));

        let mut documentation = Map::new();
        documentation.insert("description".into(), json!(description));
        documentation.insert("short_description".into(), json!(short_description));
        documentation.insert("author".into(), json!(self.author));
        documentation.insert("requirements".into(), json!(self.requirements));
        documentation.insert("notes".into(), json!(self.notes));
        documentation.insert(
            "options".into(),
            Value::Object(
                visible_options(&self.options)
                    .map(|(name, field)| (name.clone(), field.to_external_doc()))
                    .collect(),
            ),
        );
        if let Some(version_added) = &self.version_added {
            documentation.insert("version_added".into(), json!(version_added));
        }
        if let Some(deprecated) = &self.deprecated {
            documentation.insert("deprecated".into(), deprecated.to_external_doc()?);
        }

        let mut return_values = Map::new();
        for (name, value) in &self.return_values {
            let path = child_path("return_values", name);
            return_values.insert(name.clone(), value.external_doc_at(&path)?);
        }

        Ok(AnsibleDoc {
            documentation: Value::Object(documentation),
            return_values: Value::Object(return_values),
            examples: parse_examples(&self.examples)?,
        })
    }
}

fn parse_examples(examples: &[String]) -> Result<Value> {
    let joined = examples.join("\n");
    if joined.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_yaml::from_str(&joined).map_err(|source| SpecDocError::MalformedExamples { source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldType;
    use pretty_assertions::assert_eq;

    fn no_options() -> Vec<(String, SpecField)> {
        Vec::new()
    }

    #[test]
    fn test_conflicting_deprecation() {
        let deprecation = DeprecationInfo::new("use something else")
            .with_removed_in("1.0.0")
            .with_removed_by_date("2024-06-01");
        let err = deprecation.to_external_doc().unwrap_err();
        assert!(matches!(err, SpecDocError::ConflictingDeprecationFields { .. }));
    }

    #[test]
    fn test_deprecation_skips_unset_fields() {
        let doc = DeprecationInfo::new("use something else")
            .with_why("cuz")
            .with_removed_in("1.0.0")
            .to_external_doc()
            .unwrap();
        assert_eq!(
            doc,
            json!({"alternative": "use something else", "removed_in": "1.0.0", "why": "cuz"})
        );
    }

    #[test]
    fn test_sample_parsed_as_json() {
        let value = SpecReturnValue::new("COOL", FieldType::List)
            .with_elements(FieldType::String)
            .with_sample(["[\"A\",", "\"B\"]"]);
        let doc = value.to_external_doc().unwrap();
        assert_eq!(doc["sample"], json!(["A", "B"]));
        assert_eq!(doc["elements"], json!("str"));
        assert_eq!(doc["type"], json!("list"));
    }

    #[test]
    fn test_empty_sample_keeps_key() {
        let doc = SpecReturnValue::new("COOL", FieldType::String)
            .to_external_doc()
            .unwrap();
        let keys: Vec<&str> = doc.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["description", "type", "returned", "sample"]);
        assert_eq!(doc["sample"], Value::Null);
    }

    #[test]
    fn test_malformed_nested_sample_names_path() {
        let meta = SpecDocMeta::new("module", no_options()).with_return_values([(
            "outer",
            SpecReturnValue::new("outer", FieldType::Dict).with_contains([(
                "inner",
                SpecReturnValue::new("inner", FieldType::String).with_sample(["{not json"]),
            )]),
        )]);

        match meta.to_external_doc().unwrap_err() {
            SpecDocError::MalformedSample { path, .. } => {
                assert_eq!(path, "return_values.outer.contains.inner.sample");
            }
            other => panic!("Expected MalformedSample, got {:?}", other),
        }
    }

    #[test]
    fn test_examples_parsed_as_yaml() {
        let meta = SpecDocMeta::new("module", no_options()).with_examples(["blah"]);
        assert_eq!(meta.to_external_doc().unwrap().examples, json!("blah"));

        let meta = SpecDocMeta::new("module", no_options()).with_examples([
            "- name: Create a thing",
            "  linode.cloud.thing:",
            "    label: cool",
        ]);
        let examples = meta.to_external_doc().unwrap().examples;
        assert_eq!(examples[0]["linode.cloud.thing"]["label"], json!("cool"));
    }

    #[test]
    fn test_malformed_examples() {
        let meta = SpecDocMeta::new("module", no_options()).with_examples(["key: [unclosed"]);
        let err = meta.to_external_doc().unwrap_err();
        assert!(matches!(err, SpecDocError::MalformedExamples { .. }));
    }

    #[test]
    fn test_short_description_falls_back_to_description() {
        let meta = SpecDocMeta::new(vec!["Line one.", "Line two."], no_options());
        let doc = meta.to_external_doc().unwrap().documentation;
        assert_eq!(doc["short_description"], json!("Line one. Line two."));
        assert_eq!(doc["description"], json!(["Line one.", "Line two."]));
        assert!(doc.get("version_added").is_none());
        assert!(doc.get("deprecated").is_none());
    }

    #[test]
    fn test_option_optional_keys() {
        let field = SpecField::new(FieldType::List)
            .with_description("A really cool list of strings")
            .with_element_type(FieldType::String)
            .with_editable(true)
            .with_additional_field("apply_defaults", true);
        let doc = field.to_external_doc();
        assert_eq!(
            doc,
            json!({
                "type": "list",
                "required": false,
                "description": ["A really cool list of strings"],
                "elements": "str",
            })
        );
    }

    #[test]
    fn test_list_without_element_type_omits_elements() {
        let doc = SpecField::new(FieldType::List).to_external_doc();
        assert!(doc.get("elements").is_none());
    }
}
