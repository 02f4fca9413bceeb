//! Error types for the theme resolver

use thiserror::Error;

/// Main error type for configuration resolution
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    /// `content` missing, empty, or holding a non-string / malformed glob
    #[error("Invalid content patterns: {0}")]
    InvalidContentPatterns(String),

    /// A theme color leaf is not a recognized color representation
    #[error("Invalid color value at {path}: {value}")]
    InvalidColorValue { path: String, value: String },

    /// A plugin entry is neither a module reference nor a descriptor.
    /// Reported as a warning by the validator; never returned by `resolve`.
    #[error("Unrecognized plugin entry at plugins[{index}]: {message}")]
    UnrecognizedPluginEntry { index: usize, message: String },

    /// `plugins` is present but is not a sequence
    #[error("Invalid plugin list: {0}")]
    InvalidPluginList(String),

    /// A theme region has the wrong shape (e.g. `theme.extend` is not a mapping)
    #[error("Invalid theme shape at {path}: {message}")]
    InvalidThemeShape { path: String, message: String },

    /// A top-level option such as `darkMode` or `separator` is invalid
    #[error("Invalid option {field}: {message}")]
    InvalidOption { field: String, message: String },

    /// Configuration loading errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for resolver operations
pub type Result<T> = std::result::Result<T, ResolveError>;

/// Configuration loading specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// Parse error
    #[error("Configuration parse error: {0}")]
    ParseError(String),

    /// File extension the loader has no provider for
    #[error("Unsupported configuration format: {extension}")]
    UnsupportedFormat { extension: String },
}

impl From<ConfigError> for ResolveError {
    fn from(err: ConfigError) -> Self {
        ResolveError::Config(err.to_string())
    }
}

impl ResolveError {
    /// Whether this error aborts resolution or is only reported
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ResolveError::UnrecognizedPluginEntry { .. })
    }
}
