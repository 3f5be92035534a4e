//! ansible-specdoc
//!
//! Generates Ansible module documentation from a typed module spec.
//!
//! ## Features
//!
//! - **Typed Specs**: Options, return values and deprecation info as closed Rust types
//! - **Generic Docs**: One stable documentation shape for YAML, JSON and templates
//! - **Ansible Docs**: `DOCUMENTATION`, `RETURN` and `EXAMPLES` blocks in the
//!   shape `ansible-doc` expects
//! - **Argument Specs**: The executable `argument_spec` of a module
//! - **Injection**: Rewrites the three documentation fields of a module source in place
//!
//! ## Pipeline
//!
//! ```text
//! module unit ──load──▶ SpecDocMeta ──to_generic_doc()──▶ yaml | json | template
//!                            │
//!                            ├──to_external_doc()──▶ DOCUMENTATION / RETURN / EXAMPLES ──inject──▶ module source
//!                            │
//!                            └──to_spec()──▶ argument_spec
//! ```

pub mod config;
pub mod error;
pub mod inject;
pub mod lint;
pub mod module;
pub mod projection;
pub mod render;
pub mod schema;

pub use config::{SpecDocConfig, SPECDOC_META_VAR};
pub use error::{Result, SpecDocError};
pub use inject::{check_injected, inject_docs, AssignmentEditor, InjectedDocs, InjectionTargets, SourceEditor};
pub use lint::{LintResult, MetaLinter};
pub use module::SpecDocModule;
pub use projection::AnsibleDoc;
pub use render::OutputFormat;
pub use schema::{DeprecationInfo, Description, FieldType, SpecDocMeta, SpecField, SpecReturnValue};
