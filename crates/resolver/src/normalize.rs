//! Color family normalization

use tracing::debug;
use types::{ThemeMap, ThemeValue, COLOR_SECTIONS, DEFAULT_SHADE};

/// Rewrite bare color families as `{ DEFAULT: value }` in every color
/// section of `theme`. Returns the number of families rewritten.
pub fn normalize_color_sections(theme: &mut ThemeMap) -> usize {
    let mut rewritten = 0;
    for section in COLOR_SECTIONS {
        if let Some(families) = theme.get_mut(*section).and_then(ThemeValue::as_map_mut) {
            rewritten += normalize_color_families(families);
        }
    }
    rewritten
}

/// Rewrite bare color families of a single section
pub fn normalize_color_families(families: &mut ThemeMap) -> usize {
    let mut rewritten = 0;
    for (family, value) in families.iter_mut() {
        if let ThemeValue::Leaf(color) = value {
            let mut shades = ThemeMap::new();
            shades.insert(DEFAULT_SHADE.to_string(), ThemeValue::Leaf(color.take()));
            *value = ThemeValue::Map(shades);
            rewritten += 1;
            debug!(family = %family, "Normalized bare color family");
        }
    }
    rewritten
}
