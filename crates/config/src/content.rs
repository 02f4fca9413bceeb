//! Content glob compilation
//!
//! Patterns are relative to the project directory. A leading `./` is ignored
//! and a leading `!` turns the pattern into an exclusion.

use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use std::path::Path;
use types::ResolveError;

/// Compiled content globs
#[derive(Debug, Clone)]
pub struct ContentMatcher {
    include: GlobSet,
    exclude: GlobSet,
    include_count: usize,
}

/// A content pattern split into its polarity and glob text
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentPattern {
    pub negated: bool,
    pub glob: String,
}

impl ContentPattern {
    pub fn parse(pattern: &str) -> Self {
        let trimmed = pattern.trim();
        let (negated, rest) = match trimmed.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let mut glob = rest;
        while let Some(stripped) = glob.strip_prefix("./") {
            glob = stripped;
        }

        Self {
            negated,
            glob: glob.to_string(),
        }
    }

    /// Compile the glob; `*` does not cross directory separators
    pub fn compile(&self) -> Result<Glob, String> {
        if self.glob.is_empty() {
            return Err("pattern is empty".to_string());
        }
        GlobBuilder::new(&self.glob)
            .literal_separator(true)
            .build()
            .map_err(|e| e.to_string())
    }

    /// Whether the pattern reaches outside the project directory
    pub fn escapes_root(&self) -> bool {
        self.glob.starts_with('/') || self.glob.split('/').any(|segment| segment == "..")
    }
}

impl ContentMatcher {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, ResolveError> {
        let mut include = GlobSetBuilder::new();
        let mut exclude = GlobSetBuilder::new();
        let mut include_count = 0;

        for (index, pattern) in patterns.iter().enumerate() {
            let parsed = ContentPattern::parse(pattern.as_ref());
            let glob = parsed.compile().map_err(|e| {
                ResolveError::InvalidContentPatterns(format!(
                    "content[{}] '{}' is not a valid glob: {}",
                    index,
                    pattern.as_ref(),
                    e
                ))
            })?;

            if parsed.negated {
                exclude.add(glob);
            } else {
                include.add(glob);
                include_count += 1;
            }
        }

        let build = |builder: GlobSetBuilder| {
            builder.build().map_err(|e| {
                ResolveError::InvalidContentPatterns(format!("Failed to build glob set: {}", e))
            })
        };

        Ok(Self {
            include: build(include)?,
            exclude: build(exclude)?,
            include_count,
        })
    }

    /// Whether a project-relative path should be scanned
    pub fn is_match<P: AsRef<Path>>(&self, path: P) -> bool {
        let path = path.as_ref();
        let path = path.strip_prefix("./").unwrap_or(path);
        self.include.is_match(path) && !self.exclude.is_match(path)
    }

    /// Number of non-negated patterns
    pub fn include_count(&self) -> usize {
        self.include_count
    }
}
