//! Error types for dotdoc.
//!
//! Library crates use [`DotdocError`] via `thiserror`.
//! The cli wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all dotdoc operations.
#[derive(Debug, thiserror::Error)]
pub enum DotdocError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Generated output does not match what is on disk, or similar.
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DotdocError>;

impl DotdocError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = DotdocError::config("unknown key `inputs`");
        assert_eq!(err.to_string(), "config error: unknown key `inputs`");

        let err = DotdocError::validation("generated_diagrams.rst is out of date");
        assert!(err.to_string().contains("out of date"));
    }

    #[test]
    fn io_error_carries_path() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = DotdocError::io("_build/doxygen-html/a.dot", source);
        let msg = err.to_string();
        assert!(msg.contains("a.dot"));
        assert!(msg.contains("gone"));
    }
}
