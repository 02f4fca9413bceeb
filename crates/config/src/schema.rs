//! Configuration schema definitions

use crate::content::ContentMatcher;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use types::utils::{preview_value, value_kind};
use types::{PluginRef, ResolveError, ThemeMap, ThemeValue};

/// Key inside `theme` that holds additive extensions
pub const EXTEND_KEY: &str = "extend";

/// User-authored configuration, as read from the config file.
///
/// `content`, `theme` and `plugins` are kept loosely typed so that shape
/// problems surface as resolver errors naming the offending key instead of
/// generic deserialization failures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawConfig {
    /// Glob patterns of files to scan for class names
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
    /// Theme overrides, with additive extensions under `extend`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Value>,
    /// Plugin references, applied in order by the plugin loader
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugins: Option<Value>,
    /// Dark mode strategy (media, class, selector)
    #[serde(
        default,
        alias = "dark_mode",
        alias = "darkmode",
        skip_serializing_if = "Option::is_none"
    )]
    pub dark_mode: Option<String>,
    /// Prefix for every generated utility class
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Mark utilities `!important`, or scope them under a selector
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub important: Option<Important>,
    /// Separator between variants and utility names
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,
    /// Class names generated regardless of scanning results
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub safelist: Vec<String>,
}

/// Theme section split into its two merge regions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThemeConfig {
    /// Entries under `theme.extend`, merged into the defaults
    pub extend: ThemeMap,
    /// Every other `theme` entry, replacing the default wholesale
    pub replace: ThemeMap,
}

/// Dark mode strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DarkMode {
    #[default]
    Media,
    Class,
    Selector,
}

/// `important` option: a flag or a scoping selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Important {
    Flag(bool),
    Selector(String),
}

/// Framework base theme supplied by the host build tool
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemeDefaults {
    pub theme: ThemeMap,
}

/// Normalized configuration handed to the scanning/CSS pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    /// Merged theme tree
    pub theme: ThemeMap,
    /// Content globs, in declaration order
    pub content: Vec<String>,
    /// Plugin references, in declaration order
    pub plugins: Vec<PluginRef>,
    pub dark_mode: DarkMode,
    pub prefix: String,
    pub important: Important,
    pub separator: String,
    pub safelist: Vec<String>,
}

impl RawConfig {
    /// Create a config scanning the given globs with an empty theme
    pub fn with_content<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            content: Some(Value::Array(
                patterns.into_iter().map(|p| Value::String(p.into())).collect(),
            )),
            ..Self::default()
        }
    }

    /// Content globs in declaration order
    pub fn content_patterns(&self) -> Result<Vec<String>, ResolveError> {
        let entries = match &self.content {
            None | Some(Value::Null) => {
                return Err(ResolveError::InvalidContentPatterns(
                    "`content` is required".to_string(),
                ))
            }
            Some(Value::Array(entries)) => entries,
            Some(other) => {
                return Err(ResolveError::InvalidContentPatterns(format!(
                    "`content` must be a sequence of glob strings, found {}",
                    value_kind(other)
                )))
            }
        };

        if entries.is_empty() {
            return Err(ResolveError::InvalidContentPatterns(
                "`content` must list at least one glob pattern".to_string(),
            ));
        }

        entries
            .iter()
            .enumerate()
            .map(|(index, entry)| match entry {
                Value::String(pattern) if !pattern.trim().is_empty() => Ok(pattern.clone()),
                Value::String(_) => Err(ResolveError::InvalidContentPatterns(format!(
                    "content[{}] is an empty pattern",
                    index
                ))),
                other => Err(ResolveError::InvalidContentPatterns(format!(
                    "content[{}] must be a string, found {}",
                    index,
                    value_kind(other)
                ))),
            })
            .collect()
    }

    /// Split `theme` into its extend and replace regions
    pub fn theme_config(&self) -> Result<ThemeConfig, ResolveError> {
        let theme = match &self.theme {
            None | Some(Value::Null) => return Ok(ThemeConfig::default()),
            Some(Value::Object(theme)) => theme,
            Some(other) => {
                return Err(ResolveError::InvalidThemeShape {
                    path: "theme".to_string(),
                    message: format!("expected a mapping, found {}", value_kind(other)),
                })
            }
        };

        let mut config = ThemeConfig::default();
        for (key, value) in theme {
            if key == EXTEND_KEY {
                match value {
                    Value::Object(_) => {
                        if let ThemeValue::Map(extend) = ThemeValue::from(value.clone()) {
                            config.extend = extend;
                        }
                    }
                    Value::Null => {}
                    other => {
                        return Err(ResolveError::InvalidThemeShape {
                            path: "theme.extend".to_string(),
                            message: format!("expected a mapping, found {}", value_kind(other)),
                        })
                    }
                }
            } else {
                config
                    .replace
                    .insert(key.clone(), ThemeValue::from(value.clone()));
            }
        }

        Ok(config)
    }

    /// Plugin references in declaration order
    pub fn plugin_list(&self) -> Result<Vec<PluginRef>, ResolveError> {
        match &self.plugins {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(entries)) => {
                Ok(entries.iter().cloned().map(PluginRef::from_value).collect())
            }
            Some(other) => Err(ResolveError::InvalidPluginList(format!(
                "`plugins` must be a sequence, found {}",
                value_kind(other)
            ))),
        }
    }

    pub fn dark_mode(&self) -> Result<DarkMode, ResolveError> {
        match self.dark_mode.as_deref().map(str::trim) {
            None => Ok(DarkMode::default()),
            Some("media") => Ok(DarkMode::Media),
            Some("class") => Ok(DarkMode::Class),
            Some("selector") => Ok(DarkMode::Selector),
            Some(other) => Err(ResolveError::InvalidOption {
                field: "darkMode".to_string(),
                message: format!("unknown strategy '{}', expected media, class or selector", other),
            }),
        }
    }

    pub fn separator(&self) -> Result<String, ResolveError> {
        match &self.separator {
            None => Ok(default_separator()),
            Some(separator) if separator.is_empty() => Err(ResolveError::InvalidOption {
                field: "separator".to_string(),
                message: "separator cannot be empty".to_string(),
            }),
            Some(separator) if separator.chars().any(char::is_whitespace) => {
                Err(ResolveError::InvalidOption {
                    field: "separator".to_string(),
                    message: format!("separator '{}' cannot contain whitespace", separator),
                })
            }
            Some(separator) => Ok(separator.clone()),
        }
    }

    pub fn prefix(&self) -> Result<String, ResolveError> {
        let prefix = self.prefix.clone().unwrap_or_default();
        if prefix.chars().any(char::is_whitespace) {
            return Err(ResolveError::InvalidOption {
                field: "prefix".to_string(),
                message: format!("prefix '{}' cannot contain whitespace", prefix),
            });
        }
        Ok(prefix)
    }

    pub fn important(&self) -> Result<Important, ResolveError> {
        match &self.important {
            None => Ok(Important::Flag(false)),
            Some(Important::Selector(selector)) if selector.trim().is_empty() => {
                Err(ResolveError::InvalidOption {
                    field: "important".to_string(),
                    message: "important selector cannot be empty".to_string(),
                })
            }
            Some(important) => Ok(important.clone()),
        }
    }
}

fn default_separator() -> String {
    ":".to_string()
}

impl ThemeDefaults {
    pub fn new(theme: ThemeMap) -> Self {
        Self { theme }
    }

    /// Defaults with no theme keys at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build defaults from a JSON mapping
    pub fn from_value(value: Value) -> Result<Self, ResolveError> {
        match ThemeValue::from(value) {
            ThemeValue::Map(theme) => Ok(Self { theme }),
            ThemeValue::Leaf(other) => Err(ResolveError::InvalidThemeShape {
                path: "defaults".to_string(),
                message: format!("expected a mapping, found {}", preview_value(&other)),
            }),
        }
    }

    /// Baseline theme used when the host tool supplies none
    pub fn framework() -> Self {
        let mut colors = ThemeMap::new();
        colors.insert("inherit".to_string(), ThemeValue::leaf("inherit"));
        colors.insert("current".to_string(), ThemeValue::leaf("currentColor"));
        colors.insert("transparent".to_string(), ThemeValue::leaf("transparent"));
        colors.insert("black".to_string(), ThemeValue::leaf("#000"));
        colors.insert("white".to_string(), ThemeValue::leaf("#fff"));
        colors.insert("gray".to_string(), shades(&[
            "#f9fafb", "#f3f4f6", "#e5e7eb", "#d1d5db", "#9ca3af", "#6b7280",
            "#4b5563", "#374151", "#1f2937", "#111827", "#030712",
        ]));
        colors.insert("red".to_string(), shades(&[
            "#fef2f2", "#fee2e2", "#fecaca", "#fca5a5", "#f87171", "#ef4444",
            "#dc2626", "#b91c1c", "#991b1b", "#7f1d1d", "#450a0a",
        ]));
        colors.insert("green".to_string(), shades(&[
            "#f0fdf4", "#dcfce7", "#bbf7d0", "#86efac", "#4ade80", "#22c55e",
            "#16a34a", "#15803d", "#166534", "#14532d", "#052e16",
        ]));
        colors.insert("blue".to_string(), shades(&[
            "#eff6ff", "#dbeafe", "#bfdbfe", "#93c5fd", "#60a5fa", "#3b82f6",
            "#2563eb", "#1d4ed8", "#1e40af", "#1e3a8a", "#172554",
        ]));

        let mut font_family = ThemeMap::new();
        font_family.insert("sans".to_string(), stack(&["ui-sans-serif", "system-ui", "sans-serif"]));
        font_family.insert("serif".to_string(), stack(&["ui-serif", "Georgia", "serif"]));
        font_family.insert("mono".to_string(), stack(&["ui-monospace", "SFMono-Regular", "monospace"]));

        let mut theme = ThemeMap::new();
        theme.insert("screens".to_string(), scale(&[
            ("sm", "640px"), ("md", "768px"), ("lg", "1024px"), ("xl", "1280px"), ("2xl", "1536px"),
        ]));
        theme.insert("colors".to_string(), ThemeValue::Map(colors));
        theme.insert("spacing".to_string(), scale(&[
            ("px", "1px"), ("0", "0px"), ("0.5", "0.125rem"), ("1", "0.25rem"), ("2", "0.5rem"),
            ("3", "0.75rem"), ("4", "1rem"), ("6", "1.5rem"), ("8", "2rem"), ("12", "3rem"),
            ("16", "4rem"),
        ]));
        theme.insert("borderRadius".to_string(), scale(&[
            ("none", "0px"), ("sm", "0.125rem"), ("DEFAULT", "0.25rem"), ("md", "0.375rem"),
            ("lg", "0.5rem"), ("full", "9999px"),
        ]));
        theme.insert("fontFamily".to_string(), ThemeValue::Map(font_family));

        Self { theme }
    }
}

const SHADE_STEPS: [&str; 11] = [
    "50", "100", "200", "300", "400", "500", "600", "700", "800", "900", "950",
];

fn shades(values: &[&str; 11]) -> ThemeValue {
    ThemeValue::Map(
        SHADE_STEPS
            .iter()
            .zip(values)
            .map(|(step, value)| (step.to_string(), ThemeValue::leaf(*value)))
            .collect(),
    )
}

fn scale(entries: &[(&str, &str)]) -> ThemeValue {
    ThemeValue::Map(
        entries
            .iter()
            .map(|(key, value)| (key.to_string(), ThemeValue::leaf(*value)))
            .collect(),
    )
}

fn stack(fonts: &[&str]) -> ThemeValue {
    ThemeValue::Leaf(Value::Array(
        fonts.iter().map(|font| Value::String(font.to_string())).collect(),
    ))
}

impl ResolvedConfig {
    /// Compile the content globs for the downstream scanner
    pub fn content_matcher(&self) -> Result<ContentMatcher, ResolveError> {
        ContentMatcher::new(&self.content)
    }

    /// Look up a color shade, e.g. `color("green", "DEFAULT")`
    pub fn color(&self, family: &str, shade: &str) -> Option<&Value> {
        self.theme
            .get("colors")
            .and_then(|colors| colors.get(family))
            .and_then(|family| family.get(shade))
            .and_then(ThemeValue::as_leaf)
    }
}

impl fmt::Display for DarkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DarkMode::Media => write!(f, "media"),
            DarkMode::Class => write!(f, "class"),
            DarkMode::Selector => write!(f, "selector"),
        }
    }
}
