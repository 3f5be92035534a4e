//! Loaded modules
//!
//! A module unit is either a module source that assigns its spec, as YAML, to
//! `SPECDOC_META = r"""..."""`, or a YAML/JSON document with a top-level
//! `SPECDOC_META` key. Either way the unit yields exactly one [`SpecDocMeta`].

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, info};

use crate::config::SPECDOC_META_VAR;
use crate::error::{Result, SpecDocError};
use crate::inject::{AssignmentEditor, InjectedDocs, SourceEditor};
use crate::projection::AnsibleDoc;
use crate::render::{self, OutputFormat};
use crate::schema::SpecDocMeta;

/// A module spec together with the unit it came from
#[derive(Debug, Clone)]
pub struct SpecDocModule {
    name: String,
    source: String,
    meta: SpecDocMeta,
}

impl SpecDocModule {
    /// Wrap a spec built in code
    pub fn from_meta(name: impl Into<String>, meta: SpecDocMeta) -> Self {
        Self {
            name: name.into(),
            source: String::new(),
            meta,
        }
    }

    /// Load a module unit from a string
    pub fn load_str(content: &str, name: &str) -> Result<Self> {
        Self::load_str_with(content, name, SPECDOC_META_VAR, &AssignmentEditor::new())
    }

    /// Load a module unit from a string, looking up `meta_name` with `editor`
    pub fn load_str_with(
        content: &str,
        name: &str,
        meta_name: &str,
        editor: &dyn SourceEditor,
    ) -> Result<Self> {
        let meta = parse_meta(content, name, meta_name, editor)?;
        info!(module = name, options = meta.options.len(), "loaded module spec");

        Ok(Self {
            name: name.to_string(),
            source: content.to_string(),
            meta,
        })
    }

    /// Load a module file. The module name defaults to the file stem.
    pub fn load_file(path: impl AsRef<Path>, name: Option<&str>) -> Result<Self> {
        Self::load_file_with(path, name, SPECDOC_META_VAR, &AssignmentEditor::new())
    }

    pub fn load_file_with(
        path: impl AsRef<Path>,
        name: Option<&str>,
        meta_name: &str,
        editor: &dyn SourceEditor,
    ) -> Result<Self> {
        let path = path.as_ref();
        let name = match name {
            Some(name) => name.to_string(),
            None => module_name_from_path(path),
        };

        debug!(path = %path.display(), module = %name, "reading module file");
        let content = fs::read_to_string(path)?;
        Self::load_str_with(&content, &name, meta_name, editor)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Text of the unit this module was loaded from (empty for in-code specs)
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn meta(&self) -> &SpecDocMeta {
        &self.meta
    }

    /// Generic documentation with the module name under `module`
    pub fn generic_doc(&self) -> Result<Value> {
        let mut doc = self
            .meta
            .to_generic_doc()
            .map_err(|e| e.in_module(&self.name))?;
        insert_module_name(&mut doc, &self.name);
        Ok(doc)
    }

    /// Ansible documentation blocks; `DOCUMENTATION` also carries `module`
    pub fn ansible_doc(&self) -> Result<AnsibleDoc> {
        let mut doc = self
            .meta
            .to_external_doc()
            .map_err(|e| e.in_module(&self.name))?;
        insert_module_name(&mut doc.documentation, &self.name);
        Ok(doc)
    }

    /// Executable argument spec of this module
    pub fn argument_spec(&self) -> Value {
        self.meta.to_spec()
    }

    /// Key-sorted YAML documentation
    pub fn generate_yaml(&self) -> Result<String> {
        render::render_yaml(&self.generic_doc()?)
    }

    /// Compact JSON documentation
    pub fn generate_json(&self) -> Result<String> {
        render::render_json(&self.generic_doc()?)
    }

    /// Documentation rendered through a Handlebars template
    pub fn generate_template(&self, template: &str) -> Result<String> {
        render::render_template(Some(template), &self.generic_doc()?)
    }

    /// Documentation in `format`; `template` is only read for templated output
    pub fn generate(&self, format: OutputFormat, template: Option<&str>) -> Result<String> {
        debug!(module = %self.name, %format, "generating documentation");
        render::render(format, &self.generic_doc()?, template)
    }

    /// YAML text for the `DOCUMENTATION`, `RETURN` and `EXAMPLES` fields
    pub fn generate_ansible_doc_yaml(&self) -> Result<InjectedDocs> {
        let doc = self.ansible_doc()?;
        Ok(InjectedDocs {
            documentation: render::render_yaml_ordered(&doc.documentation)?,
            return_values: render::render_yaml_ordered(&doc.return_values)?,
            examples: render::render_yaml_ordered(&doc.examples)?,
        })
    }
}

fn insert_module_name(doc: &mut Value, name: &str) {
    if let Value::Object(map) = doc {
        map.insert("module".into(), Value::String(name.to_string()));
    }
}

fn module_name_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn parse_meta(
    content: &str,
    unit: &str,
    meta_name: &str,
    editor: &dyn SourceEditor,
) -> Result<SpecDocMeta> {
    if let Some(literal) = editor.find_literal(content, meta_name) {
        debug!(module = unit, "found {} assignment", meta_name);
        return serde_yaml::from_str(&literal).map_err(|e| SpecDocError::from(e).in_module(unit));
    }
    if editor.has_assignment(content, meta_name) {
        return Err(SpecDocError::NonLiteralMeta {
            unit: unit.to_string(),
            name: meta_name.to_string(),
        });
    }

    let document: Option<serde_yaml::Value> = serde_yaml::from_str(content).ok();
    match document.as_ref().and_then(|doc| doc.get(meta_name)) {
        Some(meta) => serde_yaml::from_value(meta.clone())
            .map_err(|e| SpecDocError::from(e).in_module(unit)),
        None => Err(SpecDocError::SchemaLoad {
            unit: unit.to_string(),
            name: meta_name.to_string(),
        }),
    }
}
