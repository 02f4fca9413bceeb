//! Configuration loader implementation

use crate::schema::{RawConfig, ThemeDefaults};
use crate::validation::ConfigValidator;
use anyhow::{Context, Result};
use figment::{providers::Env, Figment};
use serde_json::{json, Value};
use std::path::Path;
use tracing::debug;
use types::ConfigError;

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "THEME_RESOLVER_";

/// Configuration loader that handles YAML/JSON files and environment variables
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from file and environment variables
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<RawConfig> {
        let config_path = config_path.as_ref();

        let mut document = Self::read_document(config_path)?;

        // Override with environment variables, `__` separates nested keys
        let overrides: Value = Figment::new()
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))
            .context("Failed to read environment overrides")?;
        overlay(&mut document, overrides);

        let config: RawConfig = serde_json::from_value(document)
            .map_err(|e| ConfigError::ParseError(e.to_string()))
            .context("Failed to parse configuration")?;

        debug!(path = %config_path.display(), "Configuration loaded");
        Ok(config)
    }

    /// Load configuration from string (for testing)
    pub fn load_from_str(yaml_content: &str) -> Result<RawConfig> {
        let document = parse_yaml(yaml_content)?;
        let config: RawConfig = serde_json::from_value(document)
            .map_err(|e| ConfigError::ParseError(e.to_string()))
            .context("Failed to parse configuration from string")?;

        Ok(config)
    }

    /// Load a defaults theme from file and check its color sections
    pub fn load_defaults<P: AsRef<Path>>(defaults_path: P) -> Result<ThemeDefaults> {
        let defaults_path = defaults_path.as_ref();

        let document = Self::read_document(defaults_path)?;
        let defaults: ThemeDefaults = serde_json::from_value(document)
            .map_err(|e| ConfigError::ParseError(e.to_string()))
            .context("Failed to parse theme defaults")?;

        ConfigValidator::validate_defaults(&defaults)
            .into_result()
            .with_context(|| format!("Invalid theme defaults in {}", defaults_path.display()))?;

        debug!(
            path = %defaults_path.display(),
            keys = defaults.theme.len(),
            "Theme defaults loaded"
        );
        Ok(defaults)
    }

    /// Read a YAML or JSON document, picked by extension, keeping key order
    fn read_document(path: &Path) -> Result<Value> {
        // Check if config file exists
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        if !matches!(extension.as_str(), "yaml" | "yml" | "json") {
            return Err(ConfigError::UnsupportedFormat { extension }.into());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let document = if extension == "json" {
            serde_json::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?
        } else {
            parse_yaml(&contents)?
        };

        Ok(document)
    }

    /// Get the starter configuration
    pub fn default() -> RawConfig {
        RawConfig {
            content: Some(json!([
                "./src/**/*.{html,js}",
                "./components/**/*.{html,js}",
                "./templates/**/*.html"
            ])),
            theme: Some(json!({
                "extend": {
                    "colors": {
                        "green": {
                            "DEFAULT": "#10B981",
                            "light": "#6EE7B7",
                            "dark": "#064E3B"
                        },
                        "dark": {
                            "background": "#1A202C",
                            "text": "#E2E8F0"
                        }
                    }
                }
            })),
            plugins: Some(json!([])),
            ..RawConfig::default()
        }
    }

    /// Create example configuration file
    pub fn create_example<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Self::default();
        let yaml_content = serde_yaml::to_string(&config)
            .context("Failed to serialize default configuration")?;

        std::fs::write(path.as_ref(), yaml_content)
            .context("Failed to write example configuration file")?;

        Ok(())
    }
}

/// Parse YAML into JSON, turning non-string mapping keys (`128: 32rem`) into strings
fn parse_yaml(contents: &str) -> Result<Value> {
    let document: serde_yaml::Value =
        serde_yaml::from_str(contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    let document = match document {
        serde_yaml::Value::Null => json!({}),
        other => serde_json::to_value(other).map_err(|e| ConfigError::ParseError(e.to_string()))?,
    };
    Ok(document)
}

/// Merge `overrides` into `target`. Mapping keys match case-insensitively
/// since environment keys arrive lowercased.
fn overlay(target: &mut Value, overrides: Value) {
    match (target, overrides) {
        (Value::Object(target), Value::Object(overrides)) => {
            for (key, value) in overrides {
                let key = target
                    .keys()
                    .find(|existing| existing.eq_ignore_ascii_case(&key))
                    .cloned()
                    .unwrap_or(key);
                match target.get_mut(&key) {
                    Some(slot) => overlay(slot, value),
                    None => {
                        target.insert(key, value);
                    }
                }
            }
        }
        (target, overrides) => *target = overrides,
    }
}
