//! Color value parsing for theme tokens.
//!
//! Supported representations:
//!
//! - Hex: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`
//! - CSS named colors (`rebeccapurple`, `green`, ...) and the keywords
//!   `transparent`, `currentColor`, `current` and `inherit`
//! - Functional notation: `rgb()`, `rgba()`, `hsl()`, `hsla()`, `hwb()`,
//!   `lab()`, `lch()`, `oklab()`, `oklch()`, `color()` and `var()`

use crate::utils::value_kind;
use serde_json::Value;
use std::fmt;

/// Shade key used when a color family is given as a single bare value
pub const DEFAULT_SHADE: &str = "DEFAULT";

/// Theme sections whose leaves are colors
pub const COLOR_SECTIONS: &[&str] = &[
    "colors",
    "accentColor",
    "backgroundColor",
    "borderColor",
    "caretColor",
    "divideColor",
    "fill",
    "outlineColor",
    "placeholderColor",
    "ringColor",
    "stroke",
    "textColor",
];

const COLOR_KEYWORDS: &[&str] = &["transparent", "currentcolor", "current", "inherit"];

const COLOR_FUNCTIONS: &[&str] = &[
    "rgb", "rgba", "hsl", "hsla", "hwb", "lab", "lch", "oklab", "oklch", "color", "var",
];

const NAMED_COLORS: &[&str] = &[
    "aliceblue", "antiquewhite", "aqua", "aquamarine", "azure", "beige", "bisque", "black",
    "blanchedalmond", "blue", "blueviolet", "brown", "burlywood", "cadetblue", "chartreuse",
    "chocolate", "coral", "cornflowerblue", "cornsilk", "crimson", "cyan", "darkblue",
    "darkcyan", "darkgoldenrod", "darkgray", "darkgreen", "darkgrey", "darkkhaki",
    "darkmagenta", "darkolivegreen", "darkorange", "darkorchid", "darkred", "darksalmon",
    "darkseagreen", "darkslateblue", "darkslategray", "darkslategrey", "darkturquoise",
    "darkviolet", "deeppink", "deepskyblue", "dimgray", "dimgrey", "dodgerblue", "firebrick",
    "floralwhite", "forestgreen", "fuchsia", "gainsboro", "ghostwhite", "gold", "goldenrod",
    "gray", "green", "greenyellow", "grey", "honeydew", "hotpink", "indianred", "indigo",
    "ivory", "khaki", "lavender", "lavenderblush", "lawngreen", "lemonchiffon", "lightblue",
    "lightcoral", "lightcyan", "lightgoldenrodyellow", "lightgray", "lightgreen", "lightgrey",
    "lightpink", "lightsalmon", "lightseagreen", "lightskyblue", "lightslategray",
    "lightslategrey", "lightsteelblue", "lightyellow", "lime", "limegreen", "linen",
    "magenta", "maroon", "mediumaquamarine", "mediumblue", "mediumorchid", "mediumpurple",
    "mediumseagreen", "mediumslateblue", "mediumspringgreen", "mediumturquoise",
    "mediumvioletred", "midnightblue", "mintcream", "mistyrose", "moccasin", "navajowhite",
    "navy", "oldlace", "olive", "olivedrab", "orange", "orangered", "orchid",
    "palegoldenrod", "palegreen", "paleturquoise", "palevioletred", "papayawhip",
    "peachpuff", "peru", "pink", "plum", "powderblue", "purple", "rebeccapurple", "red",
    "rosybrown", "royalblue", "saddlebrown", "salmon", "sandybrown", "seagreen", "seashell",
    "sienna", "silver", "skyblue", "slateblue", "slategray", "slategrey", "snow",
    "springgreen", "steelblue", "tan", "teal", "thistle", "tomato", "turquoise", "violet",
    "wheat", "white", "whitesmoke", "yellow", "yellowgreen",
];

/// A validated color representation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorValue {
    /// Hex digits without the `#`
    Hex(String),
    /// Named color or color keyword, as written
    Named(String),
    /// Functional notation, e.g. `rgb(16 185 129 / 0.5)`
    Function { name: String, args: String },
}

impl ColorValue {
    /// Parses a color from a theme leaf. Only strings can hold colors.
    pub fn parse_value(value: &Value) -> Result<Self, String> {
        match value {
            Value::String(s) => Self::parse(s),
            other => Err(format!("expected a color string, found {}", value_kind(other))),
        }
    }

    /// Parses a color from its textual form
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err("empty color value".to_string());
        }

        if let Some(hex) = s.strip_prefix('#') {
            return Self::parse_hex(hex);
        }

        if let Some(open) = s.find('(') {
            return Self::parse_function(s, open);
        }

        Self::parse_named(s)
    }

    fn parse_hex(hex: &str) -> Result<Self, String> {
        if !matches!(hex.len(), 3 | 4 | 6 | 8) {
            return Err(format!(
                "invalid hex color #{} (must be 3, 4, 6 or 8 digits)",
                hex
            ));
        }
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("invalid hex color #{}", hex));
        }
        Ok(ColorValue::Hex(hex.to_string()))
    }

    fn parse_function(s: &str, open: usize) -> Result<Self, String> {
        let name = s[..open].trim().to_ascii_lowercase();
        if !COLOR_FUNCTIONS.contains(&name.as_str()) {
            return Err(format!("unknown color function {}()", name));
        }
        if !s.ends_with(')') {
            return Err(format!("unterminated color function: {}", s));
        }

        let args = &s[open + 1..s.len() - 1];
        let mut depth = 0i32;
        for c in args.chars() {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth < 0 {
                        return Err(format!("unbalanced parentheses in {}", s));
                    }
                }
                _ => {}
            }
        }
        if depth != 0 {
            return Err(format!("unbalanced parentheses in {}", s));
        }
        if args.trim().is_empty() {
            return Err(format!("{}() requires arguments", name));
        }

        Ok(ColorValue::Function {
            name,
            args: args.trim().to_string(),
        })
    }

    fn parse_named(name: &str) -> Result<Self, String> {
        let lower = name.to_ascii_lowercase();
        if COLOR_KEYWORDS.contains(&lower.as_str()) || NAMED_COLORS.binary_search(&lower.as_str()).is_ok() {
            Ok(ColorValue::Named(name.to_string()))
        } else {
            Err(format!("unknown color name: {}", name))
        }
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorValue::Hex(hex) => write!(f, "#{}", hex),
            ColorValue::Named(name) => write!(f, "{}", name),
            ColorValue::Function { name, args } => write!(f, "{}({})", name, args),
        }
    }
}

/// Whether a theme section holds color families
pub fn is_color_section(key: &str) -> bool {
    COLOR_SECTIONS.contains(&key)
}
