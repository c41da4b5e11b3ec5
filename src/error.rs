//! Error types for Sysdiag
//!
//! This module defines all error types used throughout the application,
//! providing detailed error information for debugging and user feedback.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Sysdiag operations
#[derive(Error, Debug)]
pub enum SysdiagError {
    /// I/O error during file operations
    #[error("I/O error at '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// External inventory command failed or is unavailable
    #[error("Command '{command}' failed: {message}")]
    CommandFailed { command: String, message: String },

    /// Memory allocation failure during the memory stress test
    #[error("Allocation failed: {0}")]
    AllocationFailed(String),

    /// Read-back data did not match what was written
    #[error("Storage verification failed at '{path}': read-back data differs from written data")]
    StorageVerification { path: PathBuf },

    /// Thread pool error
    #[error("Thread pool error: {0}")]
    ThreadPoolError(String),

    /// Report serialization/writing error
    #[error("Report error: {0}")]
    ReportError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<SysdiagError>,
    },
}

impl SysdiagError {
    /// Create an I/O error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a command failure error
    pub fn command(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CommandFailed {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError(message.into())
    }

    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Check if this error is a permission issue
    pub fn is_permission_error(&self) -> bool {
        match self {
            Self::Io { source, .. } => source.kind() == std::io::ErrorKind::PermissionDenied,
            _ => false,
        }
    }

    /// Get the path associated with this error, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. } | Self::StorageVerification { path } => Some(path),
            _ => None,
        }
    }
}

/// Result type alias for Sysdiag operations
pub type Result<T> = std::result::Result<T, SysdiagError>;

impl From<std::io::Error> for SysdiagError {
    fn from(err: std::io::Error) -> Self {
        SysdiagError::Io {
            path: std::path::PathBuf::new(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for SysdiagError {
    fn from(err: serde_json::Error) -> Self {
        SysdiagError::ReportError(err.to_string())
    }
}

/// Extension trait for adding path context to std::io::Result
pub trait IoResultExt<T> {
    /// Add path context to an I/O error
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|e| SysdiagError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_with_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = SysdiagError::io("/test/path", io_err);
        assert!(err.path().is_some());
        assert_eq!(err.path().unwrap(), &PathBuf::from("/test/path"));
    }

    #[test]
    fn test_command_error_message() {
        let err = SysdiagError::command("lspci", "No such file or directory");
        assert_eq!(
            err.to_string(),
            "Command 'lspci' failed: No such file or directory"
        );
    }

    #[test]
    fn test_permission_detection() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = SysdiagError::io("/sys/protected", io_err);
        assert!(err.is_permission_error());

        let other = SysdiagError::config("bad value");
        assert!(!other.is_permission_error());
    }

    #[test]
    fn test_with_context_chains_source() {
        let err = SysdiagError::AllocationFailed("out of memory".to_string())
            .with_context("memory stress test");
        assert!(err.to_string().starts_with("memory stress test"));
    }
}
