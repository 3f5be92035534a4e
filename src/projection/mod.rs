//! Projections
//!
//! Pure functions from a module spec to output shapes. Each shape lives in its
//! own submodule as inherent methods on the schema types:
//!
//! - [`generic`]: `to_generic_doc()`, the internal documentation shape used by
//!   the YAML, JSON and template renderers
//! - [`ansible`]: `to_external_doc()`, the shape Ansible's own doc tooling
//!   expects in `DOCUMENTATION`, `RETURN` and `EXAMPLES`
//! - [`argspec`]: `to_spec()`, the executable argument spec
//!
//! None of them mutate the spec or keep state between calls.

pub mod ansible;
pub mod argspec;
pub mod generic;

use indexmap::IndexMap;
use serde_json::Value;

use crate::schema::SpecField;

/// The three documentation blocks of the Ansible convention
#[derive(Debug, Clone, PartialEq)]
pub struct AnsibleDoc {
    /// Contents of `DOCUMENTATION`
    pub documentation: Value,
    /// Contents of `RETURN`
    pub return_values: Value,
    /// Contents of `EXAMPLES`
    pub examples: Value,
}

/// Options that may appear in documentation
pub(crate) fn visible_options(
    options: &IndexMap<String, SpecField>,
) -> impl Iterator<Item = (&String, &SpecField)> {
    options.iter().filter(|(_, field)| !field.doc_hide)
}

/// Dotted path of a nested entry, for error reporting
pub(crate) fn child_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}
