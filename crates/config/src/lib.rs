//! Configuration management for the theme resolver
//!
//! This crate handles parsing, validation and loading of the raw theme
//! configuration from YAML/JSON files and environment variables, and defines
//! the resolved configuration handed to the build pipeline.

pub mod content;
pub mod loader;
pub mod schema;
pub mod validation;

pub use content::{ContentMatcher, ContentPattern};
pub use loader::ConfigLoader;
pub use schema::*;
pub use validation::*;
