//! Generic documentation shape
//!
//! Every schema attribute is carried over, absent optionals as `null`, so the
//! output is stable regardless of which fields a module sets. Key order
//! follows declaration order of the options and return values.

use serde_json::{json, Map, Value};

use crate::error::Result;
use crate::schema::{SpecDocMeta, SpecField, SpecReturnValue};

use super::visible_options;

impl SpecField {
    /// Generic documentation for this option. Hidden suboptions are dropped.
    pub fn to_generic_doc(&self) -> Value {
        let mut doc = Map::new();
        doc.insert("type".into(), self.field_type.into());
        doc.insert("description".into(), json!(self.description.lines()));
        doc.insert("version_added".into(), json!(self.version_added));
        doc.insert("required".into(), json!(self.required));
        doc.insert("default".into(), self.default.clone().unwrap_or(Value::Null));
        doc.insert("editable".into(), json!(self.editable));
        doc.insert("conflicts_with".into(), json!(self.conflicts_with));
        doc.insert("no_log".into(), json!(self.no_log));
        doc.insert("choices".into(), json!(self.choices));
        doc.insert("doc_hide".into(), json!(self.doc_hide));
        doc.insert("aliases".into(), json!(self.aliases));
        doc.insert("element_type".into(), json!(self.element_type));

        let suboptions = match &self.suboptions {
            Some(suboptions) => Value::Object(
                visible_options(suboptions)
                    .map(|(name, field)| (name.clone(), field.to_generic_doc()))
                    .collect(),
            ),
            None => Value::Null,
        };
        doc.insert("suboptions".into(), suboptions);

        let additional_fields = match &self.additional_fields {
            Some(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect(),
            ),
            None => Value::Null,
        };
        doc.insert("additional_fields".into(), additional_fields);

        Value::Object(doc)
    }
}

impl SpecReturnValue {
    /// Generic documentation for this return value. Samples stay as raw fragments.
    pub fn to_generic_doc(&self) -> Value {
        let mut doc = Map::new();
        doc.insert("description".into(), json!(self.description));
        doc.insert("type".into(), self.field_type.into());
        doc.insert("returned".into(), json!(self.returned));
        doc.insert("version_added".into(), json!(self.version_added));
        doc.insert("sample".into(), json!(self.sample));

        let contains = match &self.contains {
            Some(contains) => Value::Object(
                contains
                    .iter()
                    .map(|(name, value)| (name.clone(), value.to_generic_doc()))
                    .collect(),
            ),
            None => Value::Null,
        };
        doc.insert("contains".into(), contains);
        doc.insert("docs_url".into(), json!(self.docs_url));
        doc.insert("elements".into(), json!(self.elements));

        Value::Object(doc)
    }
}

impl SpecDocMeta {
    /// Generic documentation for the whole module.
    ///
    /// Deprecation info has a single shape, shared with the Ansible
    /// projection, so this fails the same way when it is inconsistent.
    pub fn to_generic_doc(&self) -> Result<Value> {
        let mut doc = Map::new();
        doc.insert("description".into(), json!(self.description.lines()));
        doc.insert(
            "options".into(),
            Value::Object(
                visible_options(&self.options)
                    .map(|(name, field)| (name.clone(), field.to_generic_doc()))
                    .collect(),
            ),
        );

        let deprecated = match &self.deprecated {
            Some(deprecated) => deprecated.to_external_doc()?,
            None => Value::Null,
        };
        doc.insert("deprecated".into(), deprecated);
        doc.insert("version_added".into(), json!(self.version_added));
        doc.insert("short_description".into(), json!(self.short_description));
        doc.insert("requirements".into(), json!(self.requirements));
        doc.insert("author".into(), json!(self.author));
        doc.insert("examples".into(), json!(self.examples));
        doc.insert(
            "return_values".into(),
            Value::Object(
                self.return_values
                    .iter()
                    .map(|(name, value)| (name.clone(), value.to_generic_doc()))
                    .collect(),
            ),
        );
        doc.insert("notes".into(), json!(self.notes));

        Ok(Value::Object(doc))
    }
}
