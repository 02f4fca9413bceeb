//! Configuration validation utilities

use crate::content::ContentPattern;
use crate::schema::{RawConfig, ThemeDefaults};
use std::collections::HashSet;
use types::utils::{join_path, preview_value};
use types::{is_color_section, ColorValue, PluginRef, ResolveError, ThemeMap, ThemeValue};

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a raw configuration
    pub fn validate(config: &RawConfig) -> ValidationReport {
        let mut report = ValidationReport::new();

        Self::validate_content(config, &mut report);
        Self::validate_theme(config, &mut report);
        Self::validate_plugins(config, &mut report);
        Self::validate_options(config, &mut report);

        report
    }

    /// Validate a defaults theme supplied by the host tool
    pub fn validate_defaults(defaults: &ThemeDefaults) -> ValidationReport {
        let mut report = ValidationReport::new();
        Self::validate_color_sections(&defaults.theme, "defaults", &mut report);
        report
    }

    fn validate_content(config: &RawConfig, report: &mut ValidationReport) {
        let patterns = match config.content_patterns() {
            Ok(patterns) => patterns,
            Err(e) => {
                report.add_error("content", e);
                return;
            }
        };

        let mut seen = HashSet::new();
        let mut includes = 0;
        for (index, pattern) in patterns.iter().enumerate() {
            let field = format!("content[{}]", index);
            let parsed = ContentPattern::parse(pattern);

            if let Err(e) = parsed.compile() {
                report.add_error(
                    &field,
                    ResolveError::InvalidContentPatterns(format!(
                        "{} '{}' is not a valid glob: {}",
                        field, pattern, e
                    )),
                );
                continue;
            }

            if !parsed.negated {
                includes += 1;
            }

            if parsed.escapes_root() {
                report.add_warning(
                    &field,
                    &format!("Pattern '{}' reaches outside the project directory", pattern),
                );
            }

            if !seen.insert(parsed) {
                report.add_warning(&field, &format!("Duplicate content pattern '{}'", pattern));
            }
        }

        if includes == 0 && !report.has_errors() {
            report.add_error(
                "content",
                ResolveError::InvalidContentPatterns(
                    "`content` only contains exclusion patterns".to_string(),
                ),
            );
        }
    }

    fn validate_theme(config: &RawConfig, report: &mut ValidationReport) {
        let theme = match config.theme_config() {
            Ok(theme) => theme,
            Err(e) => {
                let field = match &e {
                    ResolveError::InvalidThemeShape { path, .. } => path.clone(),
                    _ => "theme".to_string(),
                };
                report.add_error(&field, e);
                return;
            }
        };

        Self::validate_color_sections(&theme.extend, "theme.extend", report);
        Self::validate_color_sections(&theme.replace, "theme", report);

        // Replacement runs after extension, so the extension is discarded
        for key in theme.extend.keys() {
            if theme.replace.contains_key(key) {
                report.add_warning(
                    &format!("theme.extend.{}", key),
                    &format!(
                        "theme.{} replaces the default wholesale; theme.extend.{} is ignored",
                        key, key
                    ),
                );
            }
        }
    }

    fn validate_color_sections(sections: &ThemeMap, prefix: &str, report: &mut ValidationReport) {
        for (section, value) in sections {
            if !is_color_section(section) {
                continue;
            }
            let path = join_path(prefix, section);

            match value {
                ThemeValue::Map(families) => {
                    for (family, shades) in families {
                        if shades.as_map().is_some_and(|shades| shades.is_empty()) {
                            report.add_warning(
                                &join_path(&path, family),
                                &format!("Color family '{}' has no shades", family),
                            );
                        }
                    }
                }
                // A color section must map family names to colors
                ThemeValue::Leaf(other) => {
                    report.add_error(
                        &path,
                        ResolveError::InvalidColorValue {
                            path: path.clone(),
                            value: format!(
                                "'{}' (expected a mapping of color families)",
                                preview_value(other)
                            ),
                        },
                    );
                    continue;
                }
            }

            let mut invalid = Vec::new();
            value.walk_leaves(&path, &mut |leaf_path: &str, leaf: &serde_json::Value| {
                if let Err(reason) = ColorValue::parse_value(leaf) {
                    invalid.push((leaf_path.to_string(), preview_value(leaf), reason));
                }
            });

            for (leaf_path, value, reason) in invalid {
                report.add_error(
                    &leaf_path,
                    ResolveError::InvalidColorValue {
                        path: leaf_path.clone(),
                        value: format!("'{}' ({})", value, reason),
                    },
                );
            }
        }
    }

    fn validate_plugins(config: &RawConfig, report: &mut ValidationReport) {
        let plugins = match config.plugin_list() {
            Ok(plugins) => plugins,
            Err(e) => {
                report.add_error("plugins", e);
                return;
            }
        };

        for (index, plugin) in plugins.iter().enumerate() {
            if let PluginRef::Opaque(value) = plugin {
                report.add_warning_error(
                    &format!("plugins[{}]", index),
                    ResolveError::UnrecognizedPluginEntry {
                        index,
                        message: format!(
                            "expected a module name or a descriptor with a name, found {}",
                            preview_value(value)
                        ),
                    },
                );
            }
        }
    }

    fn validate_options(config: &RawConfig, report: &mut ValidationReport) {
        if let Err(e) = config.dark_mode() {
            report.add_error("darkMode", e);
        }

        if let Err(e) = config.separator() {
            report.add_error("separator", e);
        }

        if let Err(e) = config.prefix() {
            report.add_error("prefix", e);
        }

        if let Err(e) = config.important() {
            report.add_error("important", e);
        }

        let mut seen = HashSet::new();
        for (index, class) in config.safelist.iter().enumerate() {
            let field = format!("safelist[{}]", index);
            if class.trim().is_empty() {
                report.add_warning(&field, "Empty safelist entry is ignored");
            } else if !seen.insert(class.as_str()) {
                report.add_warning(&field, &format!("Duplicate safelist entry '{}'", class));
            }
        }
    }
}

/// Validation report containing errors and warnings
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

/// A validation issue (error or warning)
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
    /// Typed error, present for every error and for typed warnings
    pub error: Option<ResolveError>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_error(&mut self, field: &str, error: ResolveError) {
        self.errors.push(ValidationIssue {
            field: field.to_string(),
            message: error.to_string(),
            error: Some(error),
        });
    }

    pub fn add_warning(&mut self, field: &str, message: &str) {
        self.warnings.push(ValidationIssue {
            field: field.to_string(),
            message: message.to_string(),
            error: None,
        });
    }

    pub fn add_warning_error(&mut self, field: &str, error: ResolveError) {
        self.warnings.push(ValidationIssue {
            field: field.to_string(),
            message: error.to_string(),
            error: Some(error),
        });
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    /// First error in detection order
    pub fn first_error(&self) -> Option<ResolveError> {
        self.errors.iter().find_map(|issue| issue.error.clone())
    }

    /// Fail with the first error, if any
    pub fn into_result(self) -> Result<Self, ResolveError> {
        match self.first_error() {
            Some(error) => Err(error),
            None => Ok(self),
        }
    }

    pub fn summary(&self) -> String {
        format!("Validation: {} errors, {} warnings", self.errors.len(), self.warnings.len())
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawConfig {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_valid_config() {
        let report = ConfigValidator::validate(&raw(json!({
            "content": ["./src/**/*.{html,js}", "./templates/**/*.html"],
            "theme": {
                "extend": {
                    "colors": {
                        "green": { "DEFAULT": "#10B981", "light": "#6EE7B7", "dark": "#064E3B" },
                        "dark": { "background": "#1A202C", "text": "#E2E8F0" }
                    }
                }
            },
            "plugins": []
        })));
        assert!(report.is_valid(), "{:?}", report.errors);
        assert!(!report.has_warnings());
    }

    #[test]
    fn test_empty_content_is_error() {
        let report = ConfigValidator::validate(&raw(json!({ "content": [] })));
        assert!(matches!(
            report.first_error(),
            Some(ResolveError::InvalidContentPatterns(_))
        ));
    }

    #[test]
    fn test_only_exclusions_is_error() {
        let report = ConfigValidator::validate(&raw(json!({ "content": ["!./dist/**"] })));
        assert!(report.has_errors());
    }

    #[test]
    fn test_bad_color_names_key_path() {
        let report = ConfigValidator::validate(&raw(json!({
            "content": ["./src/**/*.html"],
            "theme": { "extend": { "colors": { "green": { "light": "greenish" } } } }
        })));
        match report.first_error() {
            Some(ResolveError::InvalidColorValue { path, value }) => {
                assert_eq!(path, "theme.extend.colors.green.light");
                assert!(value.contains("greenish"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_non_color_sections_are_not_color_checked() {
        let report = ConfigValidator::validate(&raw(json!({
            "content": ["./src/**/*.html"],
            "theme": { "spacing": { "128": "32rem" }, "extend": { "fontFamily": { "sans": ["Inter"] } } }
        })));
        assert!(report.is_valid());
    }

    #[test]
    fn test_unrecognized_plugin_is_warning() {
        let report = ConfigValidator::validate(&raw(json!({
            "content": ["./src/**/*.html"],
            "plugins": ["@tailwindcss/forms", 42]
        })));
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
        assert!(matches!(
            report.warnings[0].error,
            Some(ResolveError::UnrecognizedPluginEntry { index: 1, .. })
        ));
    }

    #[test]
    fn test_extend_and_replace_conflict_warns() {
        let report = ConfigValidator::validate(&raw(json!({
            "content": ["./src/**/*.html"],
            "theme": {
                "colors": { "green": "#000000" },
                "extend": { "colors": { "blue": "#0000ff" } }
            }
        })));
        assert!(report.is_valid());
        assert_eq!(report.warnings[0].field, "theme.extend.colors");
    }

    #[test]
    fn test_options_errors() {
        let report = ConfigValidator::validate(&raw(json!({
            "content": ["./src/**/*.html"],
            "darkMode": "sometimes",
            "safelist": ["btn", "btn"]
        })));
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].field, "darkMode");
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.summary(), "Validation: 1 errors, 1 warnings");
    }

    #[test]
    fn test_bare_color_section_is_color_error() {
        let report = ConfigValidator::validate(&raw(json!({
            "content": ["./src/**/*.html"],
            "theme": { "extend": { "colors": "red" } }
        })));
        assert!(matches!(
            report.first_error(),
            Some(ResolveError::InvalidColorValue { ref path, .. }) if path == "theme.extend.colors"
        ));
    }

    #[test]
    fn test_defaults_validation() {
        let defaults = ThemeDefaults::from_value(json!({ "colors": { "brand": "nope" } })).unwrap();
        let report = ConfigValidator::validate_defaults(&defaults);
        assert!(matches!(
            report.first_error(),
            Some(ResolveError::InvalidColorValue { ref path, .. }) if path == "defaults.colors.brand"
        ));
    }
}
