//! Configuration file loading with precedence handling.

use crate::layout::{
    LayoutState, OrderingConfig, DEFAULT_MARKER_RADIUS, DEFAULT_ROW_GAP, DEFAULT_TOP_PADDING,
};
use crate::model::Address;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "ARCROWS_CONFIG";

/// Environment variable overriding the row gap.
pub const ROW_GAP_ENV_VAR: &str = "ARCROWS_ROW_GAP";

/// Environment variable overriding the top padding.
pub const TOP_PADDING_ENV_VAR: &str = "ARCROWS_TOP_PADDING";

/// Environment variable overriding the marker radius.
pub const MARKER_RADIUS_ENV_VAR: &str = "ARCROWS_MARKER_RADIUS";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/arcrows/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Pixel spacing between rows.
    #[serde(default)]
    pub row_gap: Option<f64>,

    /// Pixel offset of the first row.
    #[serde(default)]
    pub top_padding: Option<f64>,

    /// Arc marker radius in pixels.
    #[serde(default)]
    pub marker_radius: Option<f64>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Row gap.
    pub row_gap: f64,
    /// Top padding.
    pub top_padding: f64,
    /// Marker radius.
    pub marker_radius: f64,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            row_gap: DEFAULT_ROW_GAP,
            top_padding: DEFAULT_TOP_PADDING,
            marker_radius: DEFAULT_MARKER_RADIUS,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Build the ordering inputs for one run.
    pub fn ordering_config<'a>(
        &self,
        shared_state: Option<&'a LayoutState>,
        external_order: Option<&'a [Address]>,
    ) -> OrderingConfig<'a> {
        OrderingConfig {
            shared_state,
            row_gap: self.row_gap,
            top_padding: self.top_padding,
            external_order,
            marker_radius: self.marker_radius,
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/arcrows/arcrows.log` on Unix-like systems,
/// or the platform's state directory elsewhere.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("arcrows").join("arcrows.log")
    } else {
        PathBuf::from("arcrows.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/arcrows/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("arcrows").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `ARCROWS_CONFIG` environment variable
/// 3. Default path `~/.config/arcrows/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks `ARCROWS_ROW_GAP`, `ARCROWS_TOP_PADDING` and `ARCROWS_MARKER_RADIUS`.
/// Values that are not finite numbers are ignored with a warning.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Some(v) = env_pixels(ROW_GAP_ENV_VAR) {
        config.row_gap = v;
    }
    if let Some(v) = env_pixels(TOP_PADDING_ENV_VAR) {
        config.top_padding = v;
    }
    if let Some(v) = env_pixels(MARKER_RADIUS_ENV_VAR) {
        config.marker_radius = v;
    }
    config
}

fn env_pixels(name: &str) -> Option<f64> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            warn!(var = name, value = %raw, "Ignoring non-numeric environment override");
            None
        }
    }
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        row_gap: config.row_gap.unwrap_or(defaults.row_gap),
        top_padding: config.top_padding.unwrap_or(defaults.top_padding),
        marker_radius: config.marker_radius.unwrap_or(defaults.marker_radius),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only flags that were explicitly set are applied.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    row_gap_override: Option<f64>,
    top_padding_override: Option<f64>,
    marker_radius_override: Option<f64>,
) -> ResolvedConfig {
    if let Some(row_gap) = row_gap_override {
        config.row_gap = row_gap;
    }
    if let Some(top_padding) = top_padding_override {
        config.top_padding = top_padding;
    }
    if let Some(marker_radius) = marker_radius_override {
        config.marker_radius = marker_radius;
    }
    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
