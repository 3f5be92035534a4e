//! Module Loading and Generation Tests
//!
//! Loads the fixture module both as a module source and as a YAML document and
//! checks every output path against the spec it was built from.

use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use ansible_specdoc::{
    check_injected, inject_docs, AssignmentEditor, FieldType, InjectedDocs, InjectionTargets,
    OutputFormat, SpecDocError, SpecDocMeta, SpecDocModule, SpecField,
};

fn fixtures_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn module_1() -> SpecDocModule {
    SpecDocModule::load_file(fixtures_path().join("module_1.py"), None).unwrap()
}

/// Recursively compare rendered options against the spec they came from
fn assert_options_match(rendered: &Value, options: &indexmap::IndexMap<String, SpecField>) {
    let rendered = rendered.as_object().unwrap();
    for (name, value) in rendered {
        let field = options.get(name).unwrap();
        assert!(!field.doc_hide, "hidden option {} was rendered", name);

        assert_eq!(value["type"], json!(field.field_type));
        assert_eq!(value["required"], json!(field.required));
        assert_eq!(value["description"], json!(field.description.lines()));
        assert_eq!(value["editable"], json!(field.editable));
        assert_eq!(value["conflicts_with"], json!(field.conflicts_with));

        if let Some(suboptions) = &field.suboptions {
            assert_options_match(&value["suboptions"], suboptions);
        }
    }

    let visible = options.values().filter(|field| !field.doc_hide).count();
    assert_eq!(rendered.len(), visible);
}

fn assert_docs_valid(meta: &SpecDocMeta, generated: &Value) {
    assert_eq!(generated["description"], json!(meta.description.lines()));
    assert_eq!(generated["requirements"], json!(meta.requirements));
    assert_eq!(generated["author"], json!(meta.author));
    assert_eq!(generated["examples"], json!(meta.examples));
    assert_eq!(
        generated["deprecated"],
        meta.deprecated.as_ref().unwrap().to_external_doc().unwrap()
    );
    assert_eq!(
        generated["return_values"]["cool"],
        meta.return_values["cool"].to_generic_doc()
    );
    assert_options_match(&generated["options"], &meta.options);
}

#[test]
fn test_module_name_defaults_to_file_stem() {
    assert_eq!(module_1().name(), "module_1");
}

#[test]
fn test_module_name_override() {
    let module =
        SpecDocModule::load_file(fixtures_path().join("module_1.py"), Some("really_cool_mod"))
            .unwrap();
    let output: Value = serde_yaml::from_str(&module.generate_yaml().unwrap()).unwrap();
    assert_eq!(output["module"], json!("really_cool_mod"));
}

#[test]
fn test_source_and_yaml_units_agree() {
    let from_source = module_1();
    let from_yaml = SpecDocModule::load_file(fixtures_path().join("module_1.yaml"), None).unwrap();
    assert_eq!(from_source.meta(), from_yaml.meta());
    assert_eq!(from_yaml.name(), "module_1");
}

#[test]
fn test_docs_yaml() {
    let module = module_1();
    let output: Value = serde_yaml::from_str(&module.generate_yaml().unwrap()).unwrap();
    assert_eq!(output["module"], json!("module_1"));
    assert_docs_valid(module.meta(), &output);
}

#[test]
fn test_docs_yaml_is_sorted() {
    let yaml = module_1().generate_yaml().unwrap();
    let top_level: Vec<&str> = yaml
        .lines()
        .filter(|line| !line.starts_with(' ') && !line.starts_with('-'))
        .filter_map(|line| line.split(':').next())
        .collect();
    let mut sorted = top_level.clone();
    sorted.sort();
    assert_eq!(top_level, sorted);
}

#[test]
fn test_docs_json() {
    let module = module_1();
    let output: Value = serde_json::from_str(&module.generate_json().unwrap()).unwrap();
    assert_eq!(output["module"], json!("module_1"));
    assert_docs_valid(module.meta(), &output);
}

#[test]
fn test_json_round_trip_is_lossless() {
    let module = module_1();
    let projected = module.generic_doc().unwrap();
    let parsed: Value = serde_json::from_str(&module.generate_json().unwrap()).unwrap();
    assert_eq!(parsed, projected);
}

#[test]
fn test_docs_template() {
    let template = std::fs::read_to_string(fixtures_path().join("template.hbs")).unwrap();
    let output = module_1().generate_template(&template).unwrap();

    assert!(output.contains("really cool module name: module_1"));
    assert!(output.contains("- `my-string` (str, required)"));
    assert!(output.contains("[\n    \"COOL\"\n]"));
    assert!(!output.contains("my-hidden-var"));
}

#[test]
fn test_template_format_requires_template() {
    let err = module_1().generate(OutputFormat::Template, None).unwrap_err();
    assert!(matches!(err, SpecDocError::MissingTemplate));
}

#[test]
fn test_ansible_doc() {
    let doc = module_1().ansible_doc().unwrap();

    assert_eq!(doc.documentation["short_description"], json!("My really cool Ansible module!"));
    assert_eq!(doc.documentation["module"], json!("module_1"));
    assert_eq!(
        doc.documentation["deprecated"],
        json!({"alternative": "use something else", "removed_in": "1.0.0", "why": "cuz"})
    );
    assert_eq!(
        doc.documentation["options"]["my-list"],
        json!({
            "type": "list",
            "required": false,
            "description": ["A really cool list of strings"],
            "elements": "str",
        })
    );
    assert!(doc.documentation["options"]["my-dict"]["suboptions"]
        .get("my-hidden-var")
        .is_none());

    assert_eq!(
        doc.return_values,
        json!({
            "cool": {
                "description": "COOL",
                "type": "list",
                "returned": "always",
                "sample": ["COOL"],
                "elements": "str",
            }
        })
    );
    assert_eq!(doc.examples, json!("blah"));
}

#[test]
fn test_ansible_doc_yaml_keeps_convention_order() {
    let docs = module_1().generate_ansible_doc_yaml().unwrap();
    assert!(docs.documentation.starts_with("description:\n- My really cool Ansible module!\nshort_description:"));
    assert!(docs.return_values.starts_with("cool:\n  description: COOL\n  type: list\n"));
    assert_eq!(docs.examples, "blah\n");
}

#[test]
fn test_docs_file_injection() {
    let module = module_1();
    let docs = module.generate_ansible_doc_yaml().unwrap();
    let output = inject_docs(
        module.source(),
        &docs,
        &AssignmentEditor::new(),
        &InjectionTargets::default(),
    )
    .unwrap();

    assert!(output.contains(&format!("DOCUMENTATION = r\"\"\"\n{}\"\"\"", docs.documentation)));
    assert!(output.contains(&format!("RETURN = r\"\"\"\n{}\"\"\"", docs.return_values)));
    assert!(output.contains(&format!("EXAMPLES = r\"\"\"\n{}\"\"\"", docs.examples)));

    // The spec itself survives injection untouched
    let reloaded = SpecDocModule::load_str(&output, "module_1").unwrap();
    assert_eq!(reloaded.meta(), module.meta());
}

#[test]
fn test_docs_file_clear() {
    let module = module_1();
    let output = inject_docs(
        module.source(),
        &InjectedDocs::cleared(),
        &AssignmentEditor::new(),
        &InjectionTargets::default(),
    )
    .unwrap();

    assert!(output.contains("DOCUMENTATION = r\"\"\"\n\"\"\""));
    assert!(output.contains("EXAMPLES = r\"\"\"\n\"\"\""));
    assert!(output.contains("RETURN = r\"\"\"\n\"\"\""));
}

#[test]
fn test_injected_file_passes_check() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("module_1.py");
    std::fs::copy(fixtures_path().join("module_1.py"), &path).unwrap();

    let module = SpecDocModule::load_file(&path, None).unwrap();
    let docs = module.generate_ansible_doc_yaml().unwrap();
    let editor = AssignmentEditor::new();
    let targets = InjectionTargets::default();

    assert_eq!(check_injected(module.source(), &docs, &editor, &targets).unwrap().len(), 3);

    let injected = inject_docs(module.source(), &docs, &editor, &targets).unwrap();
    std::fs::write(&path, injected).unwrap();

    let module = SpecDocModule::load_file(&path, None).unwrap();
    assert!(check_injected(module.source(), &docs, &editor, &targets).unwrap().is_empty());
}

#[test]
fn test_missing_meta_names_unit() {
    let source = "DOCUMENTATION = r\"\"\"\n\"\"\"\n";
    let err = SpecDocModule::load_str(source, "no_meta").unwrap_err();
    assert_eq!(
        err.to_string(),
        "failed to parse module no_meta: SPECDOC_META is not defined"
    );
}

#[test]
fn test_malformed_sample_names_module() {
    let meta = SpecDocMeta::new("module", [("label", SpecField::new(FieldType::String))])
        .with_return_values([(
            "bad",
            ansible_specdoc::SpecReturnValue::new("bad", FieldType::Dict).with_sample(["{\"a\": "]),
        )]);
    let module = SpecDocModule::from_meta("broken", meta);

    let err = module.ansible_doc().unwrap_err();
    assert!(err.to_string().starts_with("module broken: return_values.bad.sample:"));
    assert!(matches!(err.root(), SpecDocError::MalformedSample { .. }));
}

#[test]
fn test_argument_spec() {
    let spec = module_1().argument_spec();
    assert_eq!(
        spec["my-dict"]["options"]["my-hidden-var"],
        json!({"type": "bool", "no_log": false, "required": false})
    );
    assert_eq!(spec["my-list"]["elements"], json!("str"));
}
