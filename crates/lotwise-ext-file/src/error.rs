//! Error types for file loading.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for file operations.
pub type FileResult<T> = Result<T, FileError>;

/// Errors raised while reading input files.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FileError {
    /// The file could not be opened or read.
    #[error("Failed to read {}: {message}", path.display())]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error message.
        message: String,
    },

    /// The CSV structure is malformed (bad headers, wrong field count).
    #[error("Malformed CSV in {}: {message}", path.display())]
    Csv {
        /// File involved.
        path: PathBuf,
        /// Underlying error message.
        message: String,
    },

    /// A value could not be parsed.
    #[error("Invalid value in {}: {message}", path.display())]
    Parse {
        /// File involved.
        path: PathBuf,
        /// What was wrong, including the record location when known.
        message: String,
    },
}

impl FileError {
    /// Create an I/O error.
    #[must_use]
    pub fn io(path: impl AsRef<Path>, message: impl ToString) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            message: message.to_string(),
        }
    }

    /// Create a CSV structure error.
    #[must_use]
    pub fn csv(path: impl AsRef<Path>, message: impl ToString) -> Self {
        Self::Csv {
            path: path.as_ref().to_path_buf(),
            message: message.to_string(),
        }
    }

    /// Create a parse error.
    #[must_use]
    pub fn parse(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// Classifies a csv error by what went wrong.
    pub(crate) fn from_csv(path: &Path, err: &csv::Error) -> Self {
        match err.kind() {
            csv::ErrorKind::Io(_) => Self::io(path, err),
            csv::ErrorKind::Deserialize { .. } => Self::parse(path, err.to_string()),
            _ => Self::csv(path, err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_path() {
        let err = FileError::parse("data/index.csv", "record 3: bad price 'abc'");
        assert_eq!(
            err.to_string(),
            "Invalid value in data/index.csv: record 3: bad price 'abc'"
        );
    }

    #[test]
    fn test_io_error() {
        let err = FileError::io("missing.csv", "No such file or directory");
        assert!(matches!(err, FileError::Io { .. }));
        assert!(err.to_string().contains("missing.csv"));
    }
}
