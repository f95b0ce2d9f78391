use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

use spindle_core::taxonomy::ClassificationRules;

use crate::batch::ErrorPolicy;

/// Configuration for spindle.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (SPINDLE_* prefix)
/// 3. Config file (~/.config/spindle/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to a classification rules file.
    ///
    /// Can be set via:
    /// - CLI: --rules /path/to/rules.toml
    /// - ENV: SPINDLE_RULES_PATH
    /// - Config: rules_path = "/path/to/rules.toml"
    /// - Default: ~/.config/spindle/rules.toml if it exists, else built-in tables
    #[serde(default)]
    pub rules_path: Option<PathBuf>,

    /// Stop at the first malformed record instead of skipping it.
    ///
    /// Can be set via:
    /// - CLI: --halt-on-error
    /// - ENV: SPINDLE_HALT_ON_ERROR=true
    /// - Config: halt_on_error = true
    #[serde(default, deserialize_with = "lenient_bool")]
    pub halt_on_error: bool,

    /// Path to the pipeline state store.
    ///
    /// Can be set via:
    /// - ENV: SPINDLE_STATE_PATH
    /// - Config: state_path = "/path/to/pipeline.db"
    /// - Default: ~/.local/share/spindle/pipeline.db
    #[serde(default = "default_state_path")]
    pub state_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rules_path: None,
            halt_on_error: false,
            state_path: default_state_path(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let config_path = config_file_path();

        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("spindle");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build().context("Failed to build configuration")?;

        Ok(config)
    }

    /// Apply command-line overrides on top of the loaded configuration.
    #[must_use]
    pub fn with_overrides(mut self, rules_path: Option<PathBuf>, halt_on_error: bool) -> Self {
        if rules_path.is_some() {
            self.rules_path = rules_path;
        }
        self.halt_on_error |= halt_on_error;
        self
    }

    pub fn error_policy(&self) -> ErrorPolicy {
        ErrorPolicy::from_halt_flag(self.halt_on_error)
    }

    /// The rules file in effect, if any.
    pub fn effective_rules_path(&self) -> Option<PathBuf> {
        self.rules_path.clone().or_else(|| {
            let default = default_rules_path();
            default.exists().then_some(default)
        })
    }

    /// Load the classification rules in effect.
    ///
    /// # Errors
    ///
    /// Returns an error if a rules file is configured (or present at the
    /// default location) but cannot be loaded.
    pub fn rules(&self) -> Result<ClassificationRules> {
        match self.effective_rules_path() {
            Some(path) => {
                log::debug!("Loading classification rules from {}", path.display());
                ClassificationRules::load(&path)
                    .with_context(|| format!("Failed to load rules from {}", path.display()))
            }
            None => {
                log::debug!("No rules file found, using built-in tables");
                Ok(ClassificationRules::default())
            }
        }
    }
}

/// Accept `true`/`false` either as TOML booleans or as environment strings.
fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    match BoolOrString::deserialize(deserializer)? {
        BoolOrString::Bool(value) => Ok(value),
        BoolOrString::String(value) => match value.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" | "" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "invalid boolean value: {other}"
            ))),
        },
    }
}

/// Get the default pipeline state path.
///
/// Returns: ~/.local/share/spindle/pipeline.db (or platform equivalent)
fn default_state_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("spindle")
        .join("pipeline.db")
}

fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("spindle")
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/spindle/config.toml
/// - macOS: ~/Library/Application Support/spindle/config.toml
/// - Windows: %APPDATA%\spindle\config.toml
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Get the default rules file path, next to the config file.
pub fn default_rules_path() -> PathBuf {
    config_dir().join("rules.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Spindle Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (SPINDLE_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Classification rules file (color, region, size and edition tables)
#
# Create one with 'spindle rules init'. When unset, spindle uses
# rules.toml next to this file if present, else the built-in tables.
#
# Can also be set via:
# - CLI: spindle normalize --rules /custom/rules.toml batch.json
# - Environment: SPINDLE_RULES_PATH=/custom/rules.toml
#rules_path = "/path/to/rules.toml"

# Stop at the first malformed record instead of skipping it
#
# Can also be set via:
# - CLI: spindle normalize --halt-on-error batch.json
# - Environment: SPINDLE_HALT_ON_ERROR=true
halt_on_error = false

# Pipeline state store used by 'spindle process'
#
# Default: Platform-specific data directory
#state_path = "/path/to/pipeline.db"
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}
