//! Configuration file support for iso38500-governance.
//!
//! Provides YAML-based configuration through `governance.config.yml` files,
//! including data structures, file loading, and validation.

use anyhow::{bail, Context};
use chrono::{DateTime, Utc};
use iso38500_governance::application::dto::OutputFormat;
use iso38500_governance::governance::domain::RiskLevel;
use iso38500_governance::shared::Result;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "governance.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub format: Option<String>,
    pub evaluator: Option<String>,
    /// Dataset to load; relative paths resolve against the config file's directory.
    pub data_file: Option<PathBuf>,
    pub fail_on: Option<String>,
    pub as_of: Option<String>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

impl ConfigFile {
    pub fn output_format(&self) -> Result<Option<OutputFormat>> {
        let Some(format) = self.format.as_deref() else {
            return Ok(None);
        };
        match format.parse() {
            Ok(format) => Ok(Some(format)),
            Err(e) => bail!(
                "Invalid config: {}\n\n💡 Hint: Set 'format' to one of: json, markdown, text.",
                e
            ),
        }
    }

    pub fn fail_on_level(&self) -> Result<Option<RiskLevel>> {
        let Some(level) = self.fail_on.as_deref() else {
            return Ok(None);
        };
        match level.parse() {
            Ok(level) => Ok(Some(level)),
            Err(e) => bail!(
                "Invalid config: {}\n\n💡 Hint: Set 'fail_on' to one of: low, medium, high, critical.",
                e
            ),
        }
    }

    pub fn as_of_instant(&self) -> Result<Option<DateTime<Utc>>> {
        let Some(as_of) = self.as_of.as_deref() else {
            return Ok(None);
        };
        let instant = DateTime::parse_from_rfc3339(as_of).with_context(|| {
            format!(
                "Invalid config: as_of '{}' is not an RFC 3339 timestamp.\n\n💡 Hint: Use a value such as \"2024-06-01T00:00:00Z\".",
                as_of
            )
        })?;
        Ok(Some(instant.with_timezone(&Utc)))
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let mut config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    if let (Some(data_file), Some(base)) = (config.data_file.as_mut(), path.parent()) {
        if data_file.is_relative() {
            *data_file = base.join(&*data_file);
        }
    }

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
fn validate_config(config: &ConfigFile) -> Result<()> {
    config.output_format()?;
    config.fail_on_level()?;
    config.as_of_instant()?;

    if let Some(evaluator) = config.evaluator.as_deref() {
        if evaluator.trim().is_empty() {
            bail!(
                "Invalid config: evaluator must not be empty.\n\n\
                 💡 Hint: Remove the 'evaluator' key or name the person or body performing evaluations."
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
