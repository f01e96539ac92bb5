use std::path::{Path, PathBuf};

use thiserror::Error;

/// Unified error type for sdk-release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Version parsing error: {0}")]
    Parse(String),

    #[error("Required file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Pattern mismatch: {0}")]
    PatternMismatch(String),

    #[error("Manifest error: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Command failed: {0}")]
    Command(String),
}

/// Convenience type alias for Results in sdk-release
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a version parsing error with context
    pub fn parse(msg: impl Into<String>) -> Self {
        ReleaseError::Parse(msg.into())
    }

    /// Create a not-found error for a required path
    pub fn not_found(path: impl AsRef<Path>) -> Self {
        ReleaseError::NotFound(path.as_ref().to_path_buf())
    }

    /// Create a pattern mismatch error with context
    pub fn pattern_mismatch(msg: impl Into<String>) -> Self {
        ReleaseError::PatternMismatch(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a command error with context
    pub fn command(msg: impl Into<String>) -> Self {
        ReleaseError::Command(msg.into())
    }

    /// Whether this error should only degrade the current input instead of aborting the run
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ReleaseError::PatternMismatch(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReleaseError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ReleaseError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_not_found_shows_path() {
        let err = ReleaseError::not_found("sdk/package.json");
        assert_eq!(
            err.to_string(),
            "Required file not found: sdk/package.json"
        );
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
        let err: ReleaseError = json_err.into();
        assert!(err.to_string().starts_with("Manifest error"));
    }

    #[test]
    fn test_only_pattern_mismatch_is_recoverable() {
        assert!(ReleaseError::pattern_mismatch("no markers").is_recoverable());
        assert!(!ReleaseError::parse("x").is_recoverable());
        assert!(!ReleaseError::not_found("x").is_recoverable());
        assert!(!ReleaseError::command("x").is_recoverable());
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (ReleaseError::parse("x"), "Version parsing error"),
            (ReleaseError::pattern_mismatch("x"), "Pattern mismatch"),
            (ReleaseError::config("x"), "Configuration error"),
            (ReleaseError::command("x"), "Command failed"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }
}
