// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they travel inside reports and test fixtures)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("invalid command name '{name}': {reason}")]
    IdentifierInvalid { name: String, reason: String },

    #[error("invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("application name cannot be derived from '{path}'")]
    MissingApplicationName { path: String },

    // ========================================================================
    // Not Found Errors
    // ========================================================================
    #[error("license key '{key}' is not in the catalog")]
    UnknownLicense { key: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::IdentifierInvalid { name, .. } => vec![
                format!("'{name}' cannot be used as a command name"),
                "Use letters and digits; '-' and '_' capitalize the next letter".into(),
                "Example: cobrakit add serve-http -> cmd/serveHttp.go".into(),
            ],
            Self::InvalidPath { path, .. } => vec![
                format!("Check the path: {path}"),
                "Pass an existing directory or a new directory name".into(),
            ],
            Self::MissingApplicationName { .. } => vec![
                "Run the command from inside a named directory".into(),
                "Or pass --app-name explicitly".into(),
            ],
            Self::UnknownLicense { key } => vec![
                format!("'{key}' is not a known license key"),
                "Try: cobrakit licenses".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::IdentifierInvalid { .. }
            | Self::InvalidPath { .. }
            | Self::MissingApplicationName { .. } => ErrorCategory::Validation,
            Self::UnknownLicense { .. } => ErrorCategory::NotFound,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
}
