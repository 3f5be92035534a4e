//! Module Spec Linting
//!
//! Informational checks over a module spec. Nothing here blocks rendering:
//! every finding is a warning, and mutual exclusivity between options is
//! never enforced.
//!
//! ## Lints
//! 1. **Type/shape mismatches**: `element_type` or `suboptions` on a type that ignores them
//! 2. **Dangling references**: `conflicts_with` naming an option that does not exist
//! 3. **Defaults**: required options with defaults, defaults outside `choices`
//! 4. **Versions and dates**: `version_added`/`removed_in` that are not semver,
//!    `removed_by_date` that is not `YYYY-MM-DD`

use chrono::NaiveDate;
use indexmap::IndexMap;
use semver::Version;

use crate::projection::child_path;
use crate::schema::{FieldType, SpecDocMeta, SpecField, SpecReturnValue};

/// Result of linting a module spec
#[derive(Debug, Default)]
pub struct LintResult {
    pub module: String,
    pub warnings: Vec<LintWarning>,
}

impl LintResult {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Whether any warning carries `code`
    pub fn has(&self, code: &str) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintWarning {
    pub code: &'static str,
    pub message: String,
    pub path: String,
}

/// The module spec linter
#[derive(Debug, Default)]
pub struct MetaLinter;

impl MetaLinter {
    pub fn new() -> Self {
        Self
    }

    /// Lint a module spec
    pub fn lint(&self, module: &str, meta: &SpecDocMeta) -> LintResult {
        let mut result = LintResult {
            module: module.to_string(),
            ..Default::default()
        };

        if let Some(version) = &meta.version_added {
            check_version(version, "version_added", "version_added", &mut result);
        }

        if let Some(deprecated) = &meta.deprecated {
            if let Some(removed_in) = &deprecated.removed_in {
                check_version(removed_in, "removed_in", "deprecated.removed_in", &mut result);
            }
            if let Some(date) = &deprecated.removed_by_date {
                if !is_iso_date(date) {
                    result.warnings.push(LintWarning {
                        code: "INVALID_REMOVAL_DATE",
                        message: format!("removed_by_date '{}' is not a YYYY-MM-DD date", date),
                        path: "deprecated.removed_by_date".to_string(),
                    });
                }
            }
        }

        self.lint_options(&meta.options, "options", &mut result);

        for (name, value) in &meta.return_values {
            self.lint_return_value(value, &child_path("return_values", name), &mut result);
        }

        result
    }

    fn lint_options(&self, options: &IndexMap<String, SpecField>, path: &str, result: &mut LintResult) {
        for (name, field) in options {
            let field_path = child_path(path, name);

            for conflict in &field.conflicts_with {
                if !options.contains_key(conflict) {
                    result.warnings.push(LintWarning {
                        code: "DANGLING_CONFLICT",
                        message: format!("conflicts_with names unknown option '{}'", conflict),
                        path: field_path.clone(),
                    });
                }
            }

            self.lint_field(field, &field_path, result);

            if let Some(suboptions) = &field.suboptions {
                self.lint_options(suboptions, &child_path(&field_path, "suboptions"), result);
            }
        }
    }

    fn lint_field(&self, field: &SpecField, path: &str, result: &mut LintResult) {
        let is_list = field.field_type == FieldType::List;

        if field.element_type.is_some() && !is_list {
            result.warnings.push(LintWarning {
                code: "ELEMENT_TYPE_ON_NON_LIST",
                message: format!("element_type is ignored for type '{}'", field.field_type),
                path: path.to_string(),
            });
        }

        if is_list && field.element_type.is_none() {
            result.warnings.push(LintWarning {
                code: "LIST_WITHOUT_ELEMENTS",
                message: "list option has no element_type".to_string(),
                path: path.to_string(),
            });
        }

        // Lists of dicts carry suboptions too
        let takes_suboptions = field.field_type == FieldType::Dict
            || (is_list && field.element_type == Some(FieldType::Dict));
        if field.suboptions.is_some() && !takes_suboptions {
            result.warnings.push(LintWarning {
                code: "SUBOPTIONS_ON_NON_DICT",
                message: format!("suboptions are ignored for type '{}'", field.field_type),
                path: path.to_string(),
            });
        }

        if field.required && field.default.is_some() {
            result.warnings.push(LintWarning {
                code: "REQUIRED_WITH_DEFAULT",
                message: "required option also sets a default".to_string(),
                path: path.to_string(),
            });
        }

        if field.doc_hide && field.required && field.default.is_none() {
            result.warnings.push(LintWarning {
                code: "HIDDEN_REQUIRED",
                message: "hidden option is required and has no default".to_string(),
                path: path.to_string(),
            });
        }

        if let (Some(default), Some(choices)) = (&field.default, &field.choices) {
            if !choices.contains(default) {
                result.warnings.push(LintWarning {
                    code: "DEFAULT_NOT_IN_CHOICES",
                    message: format!("default {} is not one of the choices", default),
                    path: path.to_string(),
                });
            }
        }

        if let Some(version) = &field.version_added {
            check_version(version, "version_added", &child_path(path, "version_added"), result);
        }
    }

    fn lint_return_value(&self, value: &SpecReturnValue, path: &str, result: &mut LintResult) {
        if let Some(version) = &value.version_added {
            check_version(version, "version_added", &child_path(path, "version_added"), result);
        }

        if value.elements.is_some() && value.field_type != FieldType::List {
            result.warnings.push(LintWarning {
                code: "ELEMENT_TYPE_ON_NON_LIST",
                message: format!("elements is ignored for type '{}'", value.field_type),
                path: path.to_string(),
            });
        }

        if let Some(contains) = &value.contains {
            for (name, child) in contains {
                let child_value_path = child_path(&child_path(path, "contains"), name);
                self.lint_return_value(child, &child_value_path, result);
            }
        }
    }
}

fn check_version(version: &str, key: &str, path: &str, result: &mut LintResult) {
    if Version::parse(version).is_err() {
        result.warnings.push(LintWarning {
            code: "INVALID_VERSION",
            message: format!("{} '{}' is not a semantic version", key, version),
            path: path.to_string(),
        });
    }
}

fn is_iso_date(date: &str) -> bool {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok()
}
