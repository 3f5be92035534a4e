//! Module spec types
//!
//! A module spec is built once (in code, or by the loader from a module unit)
//! and then only read by the projections in [`crate::projection`].

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ansible-compatible type tag for options and return values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    #[serde(rename = "list")]
    List,
    #[serde(rename = "dict")]
    Dict,
    #[serde(rename = "bool")]
    Bool,
    #[serde(rename = "int", alias = "integer")]
    Integer,
    #[serde(rename = "str", alias = "string")]
    String,
    #[serde(rename = "float")]
    Float,
    #[serde(rename = "path")]
    Path,
    #[serde(rename = "raw")]
    Raw,
    #[serde(rename = "jsonarg", alias = "json_arg")]
    JsonArg,
    #[serde(rename = "json")]
    Json,
    #[serde(rename = "bytes")]
    Bytes,
    #[serde(rename = "bits")]
    Bits,
}

impl FieldType {
    /// The tag as Ansible spells it
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::List => "list",
            FieldType::Dict => "dict",
            FieldType::Bool => "bool",
            FieldType::Integer => "int",
            FieldType::String => "str",
            FieldType::Float => "float",
            FieldType::Path => "path",
            FieldType::Raw => "raw",
            FieldType::JsonArg => "jsonarg",
            FieldType::Json => "json",
            FieldType::Bytes => "bytes",
            FieldType::Bits => "bits",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<FieldType> for Value {
    fn from(field_type: FieldType) -> Self {
        Value::String(field_type.as_str().to_string())
    }
}

/// Description text, either a single string or a list of lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Description {
    Text(String),
    Lines(Vec<String>),
}

impl Default for Description {
    fn default() -> Self {
        Description::Text(String::new())
    }
}

impl Description {
    /// The description as a list of lines
    pub fn lines(&self) -> Vec<String> {
        match self {
            Description::Text(text) => vec![text.clone()],
            Description::Lines(lines) => lines.clone(),
        }
    }

    /// Lines form of this description. Normalizing twice is a no-op.
    pub fn normalized(&self) -> Description {
        Description::Lines(self.lines())
    }

    /// Lines joined with single spaces
    pub fn joined(&self) -> String {
        self.lines().join(" ")
    }
}

impl From<&str> for Description {
    fn from(text: &str) -> Self {
        Description::Text(text.to_string())
    }
}

impl From<String> for Description {
    fn from(text: String) -> Self {
        Description::Text(text)
    }
}

impl From<Vec<String>> for Description {
    fn from(lines: Vec<String>) -> Self {
        Description::Lines(lines)
    }
}

impl From<Vec<&str>> for Description {
    fn from(lines: Vec<&str>) -> Self {
        Description::Lines(lines.into_iter().map(str::to_string).collect())
    }
}

/// A single option of an Ansible module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpecField {
    #[serde(rename = "type")]
    pub field_type: FieldType,

    #[serde(default)]
    pub description: Description,

    #[serde(default)]
    pub version_added: Option<String>,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub default: Option<Value>,

    #[serde(default)]
    pub editable: bool,

    /// Names of options this one conflicts with. Informational only.
    #[serde(default)]
    pub conflicts_with: Vec<String>,

    #[serde(default)]
    pub no_log: bool,

    #[serde(default)]
    pub choices: Option<Vec<Value>>,

    /// Hidden options never show up in rendered documentation
    #[serde(default)]
    pub doc_hide: bool,

    #[serde(default)]
    pub aliases: Option<Vec<String>>,

    // Only meaningful for `list` and `dict` types
    #[serde(default)]
    pub element_type: Option<FieldType>,

    #[serde(default)]
    pub suboptions: Option<IndexMap<String, SpecField>>,

    /// Extra keys merged into the argument spec of this option
    #[serde(default)]
    pub additional_fields: Option<IndexMap<String, Value>>,
}

impl SpecField {
    /// Create a new option of the given type
    pub fn new(field_type: FieldType) -> Self {
        Self {
            field_type,
            description: Description::default(),
            version_added: None,
            required: false,
            default: None,
            editable: false,
            conflicts_with: Vec::new(),
            no_log: false,
            choices: None,
            doc_hide: false,
            aliases: None,
            element_type: None,
            suboptions: None,
            additional_fields: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<Description>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_version_added(mut self, version: impl Into<String>) -> Self {
        self.version_added = Some(version.into());
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    pub fn with_conflicts_with<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.conflicts_with = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_no_log(mut self, no_log: bool) -> Self {
        self.no_log = no_log;
        self
    }

    pub fn with_choices<I, V>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.choices = Some(choices.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_doc_hide(mut self, doc_hide: bool) -> Self {
        self.doc_hide = doc_hide;
        self
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = Some(aliases.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_element_type(mut self, element_type: FieldType) -> Self {
        self.element_type = Some(element_type);
        self
    }

    pub fn with_suboptions<I, S>(mut self, suboptions: I) -> Self
    where
        I: IntoIterator<Item = (S, SpecField)>,
        S: Into<String>,
    {
        self.suboptions = Some(
            suboptions
                .into_iter()
                .map(|(name, field)| (name.into(), field))
                .collect(),
        );
        self
    }

    pub fn with_additional_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.additional_fields
            .get_or_insert_with(IndexMap::new)
            .insert(key.into(), value.into());
        self
    }
}

fn default_returned() -> String {
    "always".to_string()
}

/// A single return value of an Ansible module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpecReturnValue {
    pub description: String,

    #[serde(rename = "type")]
    pub field_type: FieldType,

    #[serde(default = "default_returned")]
    pub returned: String,

    #[serde(default)]
    pub version_added: Option<String>,

    /// JSON text fragments; concatenated they form the sample value
    #[serde(default)]
    pub sample: Vec<String>,

    #[serde(default)]
    pub contains: Option<IndexMap<String, SpecReturnValue>>,

    #[serde(default)]
    pub docs_url: Option<String>,

    #[serde(default)]
    pub elements: Option<FieldType>,
}

impl SpecReturnValue {
    /// Create a return value that is always returned
    pub fn new(description: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            description: description.into(),
            field_type,
            returned: default_returned(),
            version_added: None,
            sample: Vec::new(),
            contains: None,
            docs_url: None,
            elements: None,
        }
    }

    pub fn with_returned(mut self, returned: impl Into<String>) -> Self {
        self.returned = returned.into();
        self
    }

    pub fn with_version_added(mut self, version: impl Into<String>) -> Self {
        self.version_added = Some(version.into());
        self
    }

    pub fn with_sample<I, S>(mut self, fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sample = fragments.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_contains<I, S>(mut self, contains: I) -> Self
    where
        I: IntoIterator<Item = (S, SpecReturnValue)>,
        S: Into<String>,
    {
        self.contains = Some(
            contains
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        );
        self
    }

    pub fn with_docs_url(mut self, url: impl Into<String>) -> Self {
        self.docs_url = Some(url.into());
        self
    }

    pub fn with_elements(mut self, elements: FieldType) -> Self {
        self.elements = Some(elements);
        self
    }
}

/// Deprecation info for a module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeprecationInfo {
    pub alternative: String,

    /// Mutually exclusive with `removed_by_date`
    #[serde(default)]
    pub removed_in: Option<String>,

    #[serde(default)]
    pub removed_by_date: Option<String>,

    #[serde(default)]
    pub why: Option<String>,
}

impl DeprecationInfo {
    pub fn new(alternative: impl Into<String>) -> Self {
        Self {
            alternative: alternative.into(),
            removed_in: None,
            removed_by_date: None,
            why: None,
        }
    }

    pub fn with_removed_in(mut self, version: impl Into<String>) -> Self {
        self.removed_in = Some(version.into());
        self
    }

    pub fn with_removed_by_date(mut self, date: impl Into<String>) -> Self {
        self.removed_by_date = Some(date.into());
        self
    }

    pub fn with_why(mut self, why: impl Into<String>) -> Self {
        self.why = Some(why.into());
        self
    }
}

/// Top-level description of an Ansible module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpecDocMeta {
    pub description: Description,

    pub options: IndexMap<String, SpecField>,

    #[serde(default)]
    pub deprecated: Option<DeprecationInfo>,

    #[serde(default)]
    pub version_added: Option<String>,

    /// Falls back to the joined description when unset
    #[serde(default)]
    pub short_description: Option<String>,

    #[serde(default)]
    pub requirements: Option<Vec<String>>,

    #[serde(default)]
    pub author: Option<Vec<String>>,

    /// Raw example blocks; joined with newlines they form one YAML document
    #[serde(default)]
    pub examples: Vec<String>,

    #[serde(default)]
    pub return_values: IndexMap<String, SpecReturnValue>,

    #[serde(default)]
    pub notes: Vec<String>,
}

impl SpecDocMeta {
    /// Create a module spec from a description and its options
    pub fn new<I, S>(description: impl Into<Description>, options: I) -> Self
    where
        I: IntoIterator<Item = (S, SpecField)>,
        S: Into<String>,
    {
        Self {
            description: description.into(),
            options: options
                .into_iter()
                .map(|(name, field)| (name.into(), field))
                .collect(),
            deprecated: None,
            version_added: None,
            short_description: None,
            requirements: None,
            author: None,
            examples: Vec::new(),
            return_values: IndexMap::new(),
            notes: Vec::new(),
        }
    }

    pub fn with_deprecated(mut self, deprecated: DeprecationInfo) -> Self {
        self.deprecated = Some(deprecated);
        self
    }

    pub fn with_version_added(mut self, version: impl Into<String>) -> Self {
        self.version_added = Some(version.into());
        self
    }

    pub fn with_short_description(mut self, short_description: impl Into<String>) -> Self {
        self.short_description = Some(short_description.into());
        self
    }

    pub fn with_requirements<I, S>(mut self, requirements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.requirements = Some(requirements.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_author<I, S>(mut self, author: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.author = Some(author.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_examples<I, S>(mut self, examples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.examples = examples.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_return_values<I, S>(mut self, return_values: I) -> Self
    where
        I: IntoIterator<Item = (S, SpecReturnValue)>,
        S: Into<String>,
    {
        self.return_values = return_values
            .into_iter()
            .map(|(name, value)| (name.into(), value))
            .collect();
        self
    }

    pub fn with_notes<I, S>(mut self, notes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.notes = notes.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_normalization_is_idempotent() {
        let description = Description::from("A really cool string");
        let once = description.normalized();
        let twice = once.normalized();
        assert_eq!(once, twice);
        assert_eq!(once, Description::Lines(vec!["A really cool string".to_string()]));
    }

    #[test]
    fn test_field_type_spelling() {
        assert_eq!(FieldType::Integer.to_string(), "int");
        assert_eq!(FieldType::JsonArg.to_string(), "jsonarg");
        let parsed: FieldType = serde_yaml::from_str("integer").unwrap();
        assert_eq!(parsed, FieldType::Integer);
    }

    #[test]
    fn test_unknown_field_type_rejected() {
        let result: Result<SpecField, _> = serde_yaml::from_str("type: tuple\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_option_key_rejected() {
        let result: Result<SpecField, _> = serde_yaml::from_str("type: str\nrequried: true\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_return_value_defaults() {
        let value: SpecReturnValue =
            serde_yaml::from_str("description: COOL\ntype: list\n").unwrap();
        assert_eq!(value.returned, "always");
        assert!(value.sample.is_empty());
    }
}
