//! Theme and content configuration resolution
//!
//! This crate merges a user configuration over the framework's default theme
//! and produces the normalized configuration consumed by the build pipeline.

pub mod engine;
pub mod merge;
pub mod normalize;

pub use engine::{resolve, ConfigResolver};
pub use merge::{extend_theme, merge_extend, merge_replace, replace_theme};
pub use normalize::normalize_color_sections;
