//! Configuration loading.
//!
//! An optional `metainfo.toml` in the working directory (or the file given
//! with `--config`) overrides stock defaults. Command-line flags override
//! both.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//! save_dir = "./save"   # Where reports are written
//! save = true           # Write a report for every analyzed file
//! recursive = false     # Descend into subfolders in folder mode
//! format = "text"       # Console output: "text" or "json"
//! quiet = false         # Don't print reports, only progress and errors
//! ```
//!
//! ## Loading
//!
//! Stock defaults are serialized to a `toml::Value`, the user file is merged
//! on top key by key ([`merge_toml`]), and the result is deserialized with
//! unknown keys rejected, then validated. A missing file is not an error; a
//! malformed one is.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Looked up in the working directory when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = "metainfo.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Console output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Analysis settings.
///
/// All fields have defaults; config files need only the keys they change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Directory for timestamped reports.
    pub save_dir: String,
    /// Whether to write reports at all.
    pub save: bool,
    /// Folder mode descends into subdirectories.
    pub recursive: bool,
    pub format: OutputFormat,
    /// Suppress report output on stdout.
    pub quiet: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            save_dir: "./save".to_string(),
            save: true,
            recursive: false,
            format: OutputFormat::Text,
            quiet: false,
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.save_dir.trim().is_empty() {
            return Err(ConfigError::Validation("save_dir must not be empty".into()));
        }
        Ok(())
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// The stock defaults as a `toml::Value::Table`, the base layer for merging.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(AnalysisConfig::default())?)
}

/// Overlay the top-level keys of `overlay` onto `base`.
///
/// The config is a flat table, so each overlay key replaces the base value
/// whole; base keys missing from the overlay are kept. A non-table overlay
/// replaces `base` outright.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            base_table.extend(overlay_table);
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file doesn't exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<AnalysisConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: AnalysisConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path`, falling back to stock defaults when absent.
pub fn load_config(path: &Path) -> Result<AnalysisConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// A fully-commented stock `metainfo.toml`. Printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# metainfo configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# metainfo reads ./metainfo.toml, or the file passed with --config.
# Command-line flags override anything set here.
# Unknown keys will cause an error.

# Directory for saved reports. Created on first save.
# Reports are named metadata_<file stem>_<YYYYMMDD_HHMMSS>.txt.
save_dir = "./save"

# Write a text report for every analyzed file (--no-save turns this off).
save = true

# In folder mode, also analyze files in subfolders (same as --recursive).
recursive = false

# Console output format: "text" for the sectioned report, "json" for the
# full record as pretty-printed JSON (same as --json).
# Saved reports are always text.
format = "text"

# Don't print reports to the console; progress, errors and the batch
# summary are still shown (same as --quiet).
quiet = false
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // =========================================================================
    // Defaults
    // =========================================================================

    #[test]
    fn default_config_values() {
        let config = AnalysisConfig::default();
        assert_eq!(config.save_dir, "./save");
        assert!(config.save);
        assert!(!config.recursive);
        assert_eq!(config.format, OutputFormat::Text);
        assert!(!config.quiet);
    }

    #[test]
    fn stock_toml_matches_defaults() {
        let parsed: AnalysisConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(parsed, AnalysisConfig::default());
    }

    // =========================================================================
    // load_config
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn load_config_reads_partial_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            r#"
save_dir = "reports"
format = "json"
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.save_dir, "reports");
        assert_eq!(config.format, OutputFormat::Json);
        // Unspecified values stay default
        assert!(config.save);
        assert!(!config.recursive);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "this is not valid toml [[[").unwrap();

        assert!(matches!(load_config(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_key_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "save_directory = \"x\"\n").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("unknown field"));
    }

    #[test]
    fn unknown_format_rejected() {
        let result: Result<AnalysisConfig, _> = toml::from_str(r#"format = "xml""#);
        assert!(result.is_err());
    }

    #[test]
    fn empty_save_dir_fails_validation() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "save_dir = \"  \"\n").unwrap();

        assert!(matches!(
            load_config(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    // =========================================================================
    // merge_toml
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str(r#"save = true"#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"save = false"#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("save").unwrap().as_bool(), Some(false));
    }

    #[test]
    fn merge_toml_preserves_base_keys() {
        let base = stock_defaults_value().unwrap();
        let overlay: toml::Value = toml::from_str(r#"quiet = true"#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("quiet").unwrap().as_bool(), Some(true));
        assert_eq!(merged.get("save_dir").unwrap().as_str(), Some("./save"));
    }

    #[test]
    fn merge_toml_replaces_values_whole() {
        let base = stock_defaults_value().unwrap();
        let overlay: toml::Value = toml::from_str(r#"save_dir = ["a", "b"]"#).unwrap();
        let merged = merge_toml(base, overlay);
        assert!(merged.get("save_dir").unwrap().is_array());
        assert!(merged.try_into::<AnalysisConfig>().is_err());
    }
}
