//! Shared types for the theme resolver
//!
//! This crate contains the domain types shared by the configuration schema,
//! the resolver and the command line front end.

pub mod color;
pub mod error;
pub mod plugin;
pub mod theme;
pub mod utils;

// Re-export commonly used types
pub use color::{is_color_section, ColorValue, COLOR_SECTIONS, DEFAULT_SHADE};
pub use error::{ConfigError, ResolveError, Result};
pub use plugin::PluginRef;
pub use theme::{ThemeMap, ThemeValue};
