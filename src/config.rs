//! Configuration management for ansible-specdoc
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (specdoc.toml)
//! - Environment variables (SPECDOC__*)
//!
//! ## Example config file (specdoc.toml):
//! ```toml
//! [output]
//! format = "template"
//! template = "docs/module.md.hbs"
//!
//! [load]
//! meta_name = "SPECDOC_META"
//!
//! [inject]
//! documentation_field = "DOCUMENTATION"
//! return_field = "RETURN"
//! examples_field = "EXAMPLES"
//!
//! [lint]
//! enabled = true
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::inject::InjectionTargets;
use crate::render::OutputFormat;

/// Name of the module-level variable holding the module spec
pub const SPECDOC_META_VAR: &str = "SPECDOC_META";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpecDocConfig {
    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Module loading settings
    #[serde(default)]
    pub load: LoadConfig,

    /// Injection target names
    #[serde(default)]
    pub inject: InjectionTargets,

    /// Lint settings
    #[serde(default)]
    pub lint: LintConfig,
}

/// Output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Format used when none is given on the command line
    #[serde(default)]
    pub format: OutputFormat,

    /// Template used for templated output when none is given
    #[serde(default)]
    pub template: Option<PathBuf>,
}

/// Module loading configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    /// Variable (or document key) holding the module spec
    #[serde(default = "default_meta_name")]
    pub meta_name: String,
}

/// Lint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LintConfig {
    /// Log lint warnings for every loaded module
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_meta_name() -> String {
    SPECDOC_META_VAR.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            meta_name: default_meta_name(),
        }
    }
}

impl Default for LintConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl SpecDocConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, with an optional explicit file on top
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_locations = ["specdoc.toml", ".specdoc.toml", "config/specdoc.toml"];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // Load from XDG config directory
        if let Some(config_dir) = directories::ProjectDirs::from("com", "linode", "ansible-specdoc") {
            let xdg_config = config_dir.config_dir().join("specdoc.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // Load from environment variables (SPECDOC__*)
        builder = builder.add_source(
            Environment::with_prefix("SPECDOC")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }
}
