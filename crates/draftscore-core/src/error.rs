//! Error types for Draftscore Core
//!
//! Scoring never fails: every detector and scorer is a total function over
//! text. Errors only arise at the edges, when loading configuration or when a
//! version store talks to its key-value backend. We use `thiserror` for the
//! Display/Error implementations.

use thiserror::Error;

/// Result type alias for Draftscore operations
pub type Result<T> = std::result::Result<T, DraftscoreError>;

/// Main error type for Draftscore operations
#[derive(Error, Debug)]
pub enum DraftscoreError {
    /// Rubric configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A persisted history record does not match its integrity hash,
    /// or its contents break the history invariants
    #[error("Integrity violation for '{key}': expected {expected}, found {actual}")]
    IntegrityViolation {
        key: String,
        expected: String,
        actual: String,
    },

    /// A persisted record was written by an unknown schema
    #[error("Unsupported schema version {found} (expected {expected})")]
    UnsupportedSchema { found: u32, expected: u32 },

    /// A lexicon term failed to compile
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// JSON serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML configuration parse errors
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// TOML configuration render errors
    #[error("Config render error: {0}")]
    ConfigRender(#[from] toml::ser::Error),

    /// SQLite backend errors
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        source: Box<DraftscoreError>,
    },
}

impl DraftscoreError {
    /// Add context to an error
    pub fn context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to a Result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add lazy context to a Result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.context(f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_context() {
        let err = DraftscoreError::InvalidConfig("max_deduction above 100".to_string());
        let err = err.context("Failed to load rubric");

        let rendered = err.to_string();
        assert!(rendered.contains("Failed to load rubric"));
        assert!(rendered.contains("max_deduction above 100"));
    }

    #[test]
    fn test_result_ext() {
        let result: Result<()> = Err(DraftscoreError::UnsupportedSchema {
            found: 7,
            expected: 1,
        });
        let result = result.with_context(|| "Loading history for project-42".to_string());

        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Loading history for project-42"));
    }

    #[test]
    fn test_integrity_violation_display() {
        let err = DraftscoreError::IntegrityViolation {
            key: "history:alpha".to_string(),
            expected: "abc".to_string(),
            actual: "def".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Integrity violation for 'history:alpha': expected abc, found def"
        );
    }
}
