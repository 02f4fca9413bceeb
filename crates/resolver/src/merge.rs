//! Structural merge of theme trees
//!
//! Two entry points with different contracts:
//!
//! - [`merge_extend`]: additive. Mappings are merged key by key at every
//!   depth, new keys are added and anything else is overwritten.
//! - [`merge_replace`]: the new value takes the key wholesale.

use types::{ThemeMap, ThemeValue};

/// Merge `extension` into `theme[key]`
pub fn merge_extend(theme: &mut ThemeMap, key: &str, extension: &ThemeValue) {
    match theme.get_mut(key) {
        Some(existing) => merge_value(existing, extension),
        None => {
            theme.insert(key.to_string(), extension.clone());
        }
    }
}

/// Replace `theme[key]` with `replacement`, dropping whatever was there
pub fn merge_replace(theme: &mut ThemeMap, key: &str, replacement: &ThemeValue) {
    theme.insert(key.to_string(), replacement.clone());
}

/// Apply [`merge_extend`] for every entry of `extensions`, in order
pub fn extend_theme(theme: &mut ThemeMap, extensions: &ThemeMap) {
    for (key, extension) in extensions {
        merge_extend(theme, key, extension);
    }
}

/// Apply [`merge_replace`] for every entry of `replacements`, in order
pub fn replace_theme(theme: &mut ThemeMap, replacements: &ThemeMap) {
    for (key, replacement) in replacements {
        merge_replace(theme, key, replacement);
    }
}

fn merge_value(target: &mut ThemeValue, extension: &ThemeValue) {
    match (target, extension) {
        (ThemeValue::Map(target), ThemeValue::Map(extension)) => {
            for (key, value) in extension {
                merge_extend(target, key, value);
            }
        }
        (target, extension) => *target = extension.clone(),
    }
}
