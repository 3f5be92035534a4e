//! Error types for spec loading, projection and rendering

use thiserror::Error;

/// Result type for specdoc operations
pub type Result<T> = std::result::Result<T, SpecDocError>;

/// Specdoc errors
#[derive(Error, Debug)]
pub enum SpecDocError {
    #[error("failed to parse module {unit}: {name} is not defined")]
    SchemaLoad { unit: String, name: String },

    #[error("failed to parse module {unit}: {name} is assigned but not a string literal")]
    NonLiteralMeta { unit: String, name: String },

    #[error("{path}: removed_in and removed_by_date are conflicting fields")]
    ConflictingDeprecationFields { path: String },

    #[error("{path}: sample is not a valid JSON literal: {source}")]
    MalformedSample {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("examples do not form a valid YAML document: {source}")]
    MalformedExamples {
        #[source]
        source: serde_yaml::Error,
    },

    #[error("a template must be specified for templated output")]
    MissingTemplate,

    #[error("unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to inject documentation: an empty {field} field must be specified")]
    MissingInjectionField { field: String },

    #[error("failed to inject documentation: {field} content cannot be written as a raw string literal")]
    UnrepresentableLiteral { field: String },

    #[error("module {module}: {source}")]
    InModule {
        module: String,
        #[source]
        source: Box<SpecDocError>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Render error: {0}")]
    Render(#[from] handlebars::RenderError),
}

impl SpecDocError {
    /// Attach the name of the module whose projection failed
    pub fn in_module(self, module: impl Into<String>) -> Self {
        match self {
            already @ SpecDocError::InModule { .. } => already,
            other => SpecDocError::InModule {
                module: module.into(),
                source: Box::new(other),
            },
        }
    }

    /// The innermost error, skipping module context
    pub fn root(&self) -> &SpecDocError {
        match self {
            SpecDocError::InModule { source, .. } => source.root(),
            other => other,
        }
    }
}
