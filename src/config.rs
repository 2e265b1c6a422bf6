//! Configuration file support for dtassemble.
//!
//! Provides YAML-based configuration through `dtassemble.config.yml` files,
//! including data structures, file loading, and validation. Values from the
//! file are defaults only: command-line flags always take precedence.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::shared::security::validate_regular_file;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "dtassemble.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Dependency-Track base URL
    pub url: Option<String>,
    /// Dependency-Track API key (needs VIEW_PORTFOLIO)
    pub api_key: Option<String>,
    pub output_spec_version: Option<String>,
    /// Path to the `sbomasm` executable
    pub sbomasm_path: Option<PathBuf>,
    /// Per-request timeout for the Dependency-Track client
    pub timeout_secs: Option<u64>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: BTreeMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    validate_regular_file(path, "config file").with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is a regular file.",
            path.display()
        )
    })?;

    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    // An empty file deserializes to YAML null rather than an empty mapping.
    if content.trim().is_empty() {
        return Ok(ConfigFile::default());
    }

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    tracing::debug!(path = %path.display(), "loaded config file");
    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
///
/// Pairing of `url` and `api_key` is not checked here: either may be
/// completed from the command line.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if config.timeout_secs == Some(0) {
        bail!(
            "Invalid config: timeout_secs must be greater than 0.\n\n\
             💡 Hint: Remove the field to use the default of 30 seconds."
        );
    }

    if let Some(ref path) = config.sbomasm_path {
        if path.as_os_str().is_empty() {
            bail!(
                "Invalid config: sbomasm_path must not be empty.\n\n\
                 💡 Hint: Remove the field to look up `sbomasm` on PATH."
            );
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
