//! Configuration resolution engine

use crate::merge::{extend_theme, replace_theme};
use crate::normalize::normalize_color_sections;
use config::{ConfigValidator, RawConfig, ResolvedConfig, ThemeDefaults, ValidationReport};
use tracing::{debug, info, warn};
use types::Result;

/// Resolves a raw configuration against framework defaults
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver;

impl ConfigResolver {
    /// Create a new resolver
    pub fn new() -> Self {
        Self
    }

    /// Validate `raw` and merge it over `defaults`.
    ///
    /// Warnings are logged; the first validation error aborts resolution
    /// before any output is produced.
    pub fn resolve(&self, raw: &RawConfig, defaults: &ThemeDefaults) -> Result<ResolvedConfig> {
        self.resolve_with_report(raw, defaults)
            .map(|(resolved, _)| resolved)
    }

    /// Same as [`ConfigResolver::resolve`], also returning the validation report
    pub fn resolve_with_report(
        &self,
        raw: &RawConfig,
        defaults: &ThemeDefaults,
    ) -> Result<(ResolvedConfig, ValidationReport)> {
        let report = ConfigValidator::validate(raw);
        for issue in &report.warnings {
            warn!(field = %issue.field, "{}", issue.message);
        }
        let report = report.into_result()?;

        let theme_config = raw.theme_config()?;

        let mut theme = defaults.theme.clone();
        extend_theme(&mut theme, &theme_config.extend);
        debug!(keys = theme_config.extend.len(), "Applied theme extensions");

        replace_theme(&mut theme, &theme_config.replace);
        debug!(keys = theme_config.replace.len(), "Applied theme replacements");

        let normalized = normalize_color_sections(&mut theme);
        debug!(families = normalized, "Normalized color sections");

        let resolved = ResolvedConfig {
            theme,
            content: raw.content_patterns()?,
            plugins: raw.plugin_list()?,
            dark_mode: raw.dark_mode()?,
            prefix: raw.prefix()?,
            important: raw.important()?,
            separator: raw.separator()?,
            safelist: raw
                .safelist
                .iter()
                .filter(|class| !class.trim().is_empty())
                .cloned()
                .collect(),
        };

        info!(
            content = resolved.content.len(),
            plugins = resolved.plugins.len(),
            theme_keys = resolved.theme.len(),
            warnings = report.warnings.len(),
            "Configuration resolved"
        );

        Ok((resolved, report))
    }
}

/// Resolve `raw` over `defaults` with a default [`ConfigResolver`]
pub fn resolve(raw: &RawConfig, defaults: &ThemeDefaults) -> Result<ResolvedConfig> {
    ConfigResolver::new().resolve(raw, defaults)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{DarkMode, Important};
    use serde_json::json;
    use types::{PluginRef, ResolveError, ThemeValue};

    fn raw(value: serde_json::Value) -> RawConfig {
        serde_json::from_value(value).unwrap()
    }

    fn defaults(value: serde_json::Value) -> ThemeDefaults {
        ThemeDefaults::from_value(value).unwrap()
    }

    #[test]
    fn test_green_palette_over_empty_defaults() {
        let config = raw(json!({
            "content": ["./src/**/*.html"],
            "theme": {
                "extend": {
                    "colors": {
                        "green": { "DEFAULT": "#10B981", "light": "#6EE7B7", "dark": "#064E3B" }
                    }
                }
            },
            "plugins": []
        }));

        let resolved = resolve(&config, &ThemeDefaults::empty()).unwrap();

        assert_eq!(
            resolved.theme.get("colors").unwrap().get("green").unwrap().to_json(),
            json!({ "DEFAULT": "#10B981", "light": "#6EE7B7", "dark": "#064E3B" })
        );
        assert_eq!(resolved.content, vec!["./src/**/*.html"]);
        assert!(resolved.plugins.is_empty());
        assert_eq!(resolved.dark_mode, DarkMode::Media);
        assert_eq!(resolved.important, Important::Flag(false));
        assert_eq!(resolved.separator, ":");
    }

    #[test]
    fn test_extension_merges_with_default_shades() {
        let base = defaults(json!({ "colors": { "green": { "DEFAULT": "#aaa", "light": "#bbb" } } }));
        let config = raw(json!({
            "content": ["./src/**/*.html"],
            "theme": { "extend": { "colors": { "green": { "dark": "#ccc" } } } }
        }));

        let resolved = resolve(&config, &base).unwrap();
        let green = resolved.theme.get("colors").unwrap().get("green").unwrap();
        assert_eq!(green.as_map().unwrap().len(), 3);
        assert_eq!(green.to_json(), json!({ "DEFAULT": "#aaa", "light": "#bbb", "dark": "#ccc" }));
    }

    #[test]
    fn test_replacement_overrides_fully() {
        let config = raw(json!({
            "content": ["./src/**/*.html"],
            "theme": { "colors": { "green": "#000000" } }
        }));

        let resolved = resolve(&config, &ThemeDefaults::framework()).unwrap();
        let colors = resolved.theme.get("colors").unwrap().as_map().unwrap();

        assert_eq!(colors.len(), 1);
        assert_eq!(
            colors.get("green").unwrap().to_json(),
            json!({ "DEFAULT": "#000000" })
        );
        assert_eq!(resolved.color("green", "DEFAULT"), Some(&json!("#000000")));
        assert_eq!(resolved.color("green", "500"), None);
    }

    #[test]
    fn test_untouched_defaults_are_kept() {
        let base = ThemeDefaults::framework();
        let config = raw(json!({
            "content": ["./src/**/*.html"],
            "theme": {
                "spacing": { "1": "4px" },
                "extend": { "colors": { "brand": "#ff6b35" } }
            }
        }));

        let resolved = resolve(&config, &base).unwrap();

        for key in ["screens", "borderRadius", "fontFamily"] {
            assert_eq!(resolved.theme.get(key), base.theme.get(key), "{} changed", key);
        }
        assert_eq!(
            resolved.theme.get("spacing").unwrap().to_json(),
            json!({ "1": "4px" })
        );
        // Default families survive an extension of a sibling family
        assert!(resolved.color("gray", "500").is_some());
        assert_eq!(resolved.color("brand", "DEFAULT"), Some(&json!("#ff6b35")));
    }

    #[test]
    fn test_every_color_family_is_a_shade_mapping() {
        let resolved = resolve(
            &RawConfig::with_content(["./src/**/*.html"]),
            &ThemeDefaults::framework(),
        )
        .unwrap();

        let colors = resolved.theme.get("colors").unwrap().as_map().unwrap();
        assert!(colors.values().all(ThemeValue::is_map));
        assert_eq!(resolved.color("current", "DEFAULT"), Some(&json!("currentColor")));
    }

    #[test]
    fn test_replacement_wins_over_extension_for_same_key() {
        let config = raw(json!({
            "content": ["./src/**/*.html"],
            "theme": {
                "colors": { "green": "#000000" },
                "extend": { "colors": { "blue": "#0000ff" } }
            }
        }));

        let (resolved, report) = ConfigResolver::new()
            .resolve_with_report(&config, &ThemeDefaults::framework())
            .unwrap();

        assert!(resolved.color("blue", "DEFAULT").is_none());
        assert!(resolved.color("green", "DEFAULT").is_some());
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_empty_content_fails() {
        let err = resolve(&raw(json!({ "content": [] })), &ThemeDefaults::empty()).unwrap_err();
        assert!(matches!(err, ResolveError::InvalidContentPatterns(_)));
    }

    #[test]
    fn test_invalid_color_fails_with_path() {
        let config = raw(json!({
            "content": ["./src/**/*.html"],
            "theme": { "extend": { "colors": { "dark": { "background": 1 } } } }
        }));
        let err = resolve(&config, &ThemeDefaults::empty()).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::InvalidColorValue { ref path, .. } if path == "theme.extend.colors.dark.background"
        ));
    }

    #[test]
    fn test_bare_extend_colors_fails() {
        let config = raw(json!({
            "content": ["./src/**/*.html"],
            "theme": { "extend": { "colors": "red" } }
        }));
        let err = resolve(&config, &ThemeDefaults::empty()).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::InvalidColorValue { ref path, .. } if path == "theme.extend.colors"
        ));
    }

    #[test]
    fn test_invalid_replacement_color_fails_with_path() {
        let config = raw(json!({
            "content": ["./src/**/*.html"],
            "theme": { "colors": { "green": "nope" } }
        }));
        let err = resolve(&config, &ThemeDefaults::framework()).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::InvalidColorValue { ref path, .. } if path == "theme.colors.green"
        ));
    }

    #[test]
    fn test_other_color_sections_are_validated() {
        for (section, region) in [
            ("backgroundColor", "theme"),
            ("textColor", "theme.extend"),
            ("borderColor", "theme"),
            ("ringColor", "theme.extend"),
            ("fill", "theme"),
            ("stroke", "theme.extend"),
        ] {
            let sections = json!({ section: { "brand": { "DEFAULT": "#10B981", "muted": "mud" } } });
            let theme = if region == "theme" {
                sections
            } else {
                json!({ "extend": sections })
            };
            let config = raw(json!({ "content": ["./src/**/*.html"], "theme": theme }));

            let err = resolve(&config, &ThemeDefaults::empty()).unwrap_err();
            let expected = format!("{}.{}.brand.muted", region, section);
            assert!(
                matches!(err, ResolveError::InvalidColorValue { ref path, .. } if *path == expected),
                "{}: {:?}",
                section,
                err
            );
        }
    }

    #[test]
    fn test_valid_color_sections_are_normalized() {
        let config = raw(json!({
            "content": ["./src/**/*.html"],
            "theme": { "extend": { "backgroundColor": { "page": "rgb(255 255 255)" } } }
        }));
        let resolved = resolve(&config, &ThemeDefaults::empty()).unwrap();
        assert_eq!(
            resolved.theme.get("backgroundColor").unwrap().to_json(),
            json!({ "page": { "DEFAULT": "rgb(255 255 255)" } })
        );
    }

    #[test]
    fn test_plugins_pass_through_in_order() {
        let config = raw(json!({
            "content": ["./src/**/*.html"],
            "plugins": ["@tailwindcss/forms", { "weird": true }, { "name": "typography" }]
        }));

        let (resolved, report) = ConfigResolver::new()
            .resolve_with_report(&config, &ThemeDefaults::empty())
            .unwrap();

        assert_eq!(resolved.plugins.len(), 3);
        assert_eq!(resolved.plugins[0], PluginRef::Module("@tailwindcss/forms".to_string()));
        assert_eq!(resolved.plugins[1], PluginRef::Opaque(json!({ "weird": true })));
        assert_eq!(resolved.plugins[2].name(), Some("typography"));
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_options_are_attached() {
        let config = raw(json!({
            "content": ["./src/**/*.html"],
            "darkMode": "class",
            "prefix": "tw-",
            "important": true,
            "separator": "_",
            "safelist": ["bg-green", ""]
        }));

        let resolved = resolve(&config, &ThemeDefaults::empty()).unwrap();
        assert_eq!(resolved.dark_mode, DarkMode::Class);
        assert_eq!(resolved.prefix, "tw-");
        assert_eq!(resolved.important, Important::Flag(true));
        assert_eq!(resolved.separator, "_");
        assert_eq!(resolved.safelist, vec!["bg-green"]);
    }

    #[test]
    fn test_resolved_content_matcher() {
        let resolved = resolve(
            &RawConfig::with_content(["./src/**/*.{html,js}", "!./src/vendor/**"]),
            &ThemeDefaults::empty(),
        )
        .unwrap();

        let matcher = resolved.content_matcher().unwrap();
        assert!(matcher.is_match("src/pages/index.html"));
        assert!(!matcher.is_match("src/vendor/jquery.js"));
    }

    #[test]
    fn test_defaults_are_not_mutated() {
        let base = ThemeDefaults::framework();
        let snapshot = base.clone();
        let config = raw(json!({
            "content": ["./src/**/*.html"],
            "theme": { "extend": { "colors": { "green": { "950": "#000" } } } }
        }));

        resolve(&config, &base).unwrap();
        assert_eq!(base, snapshot);
    }
}
