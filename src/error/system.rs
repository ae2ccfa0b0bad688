//! Local filesystem errors (picture uploads, CSV exports).

use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub enum SystemError {
    FileNotFound { path: PathBuf },

    PermissionDenied { path: PathBuf, operation: String },

    IoError {
        operation: String,
        path: Option<PathBuf>,
        message: String,
    },

    /// Could not determine home directory.
    NoHomeDirectory,
}

impl SystemError {
    pub fn user_message(&self) -> String {
        match self {
            SystemError::FileNotFound { path } => {
                format!("File not found: '{}'", path.display())
            }
            SystemError::PermissionDenied { path, operation } => {
                format!("Permission denied: cannot {} '{}'", operation, path.display())
            }
            SystemError::IoError {
                operation,
                path,
                message,
            } => match path {
                Some(p) => format!("Failed to {} '{}': {}", operation, p.display(), message),
                None => format!("Failed to {}: {}", operation, message),
            },
            SystemError::NoHomeDirectory => {
                "Could not determine your home directory".to_string()
            }
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            SystemError::FileNotFound { .. } => "E_SYS_NOT_FOUND",
            SystemError::PermissionDenied { .. } => "E_SYS_PERMISSION",
            SystemError::IoError { .. } => "E_SYS_IO",
            SystemError::NoHomeDirectory => "E_SYS_NO_HOME",
        }
    }
}

impl fmt::Display for SystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SystemError::FileNotFound { path } => write!(f, "File not found: {}", path.display()),
            SystemError::PermissionDenied { path, operation } => {
                write!(f, "Permission denied: {} {}", operation, path.display())
            }
            SystemError::IoError {
                operation,
                path: Some(p),
                message,
            } => write!(f, "I/O error during {} on {}: {}", operation, p.display(), message),
            SystemError::IoError {
                operation,
                path: None,
                message,
            } => write!(f, "I/O error during {}: {}", operation, message),
            SystemError::NoHomeDirectory => write!(f, "No home directory"),
        }
    }
}

impl std::error::Error for SystemError {}

/// Map an `io::Error` onto the variant that best describes it.
pub fn classify_io_error(err: &std::io::Error, path: &Path, operation: &str) -> SystemError {
    match err.kind() {
        std::io::ErrorKind::NotFound => SystemError::FileNotFound {
            path: path.to_path_buf(),
        },
        std::io::ErrorKind::PermissionDenied => SystemError::PermissionDenied {
            path: path.to_path_buf(),
            operation: operation.to_string(),
        },
        _ => SystemError::IoError {
            operation: operation.to_string(),
            path: Some(path.to_path_buf()),
            message: err.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_not_found() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let classified = classify_io_error(&err, Path::new("/tmp/pic.png"), "read");
        assert_eq!(
            classified,
            SystemError::FileNotFound {
                path: PathBuf::from("/tmp/pic.png")
            }
        );
    }

    #[test]
    fn test_classify_other_keeps_message() {
        let err = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let classified = classify_io_error(&err, Path::new("/tmp/out.csv"), "write");
        assert_eq!(classified.error_code(), "E_SYS_IO");
        assert!(classified.user_message().contains("disk on fire"));
    }
}
