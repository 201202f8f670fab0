//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Planning was attempted before a license was resolved.
    #[error("No license resolved for the project")]
    NoLicense,

    /// A named template is not in the store.
    #[error("Template '{name}' is missing")]
    TemplateMissing { name: String },

    /// The directory is not a project cobrakit generated.
    #[error("No generated project found at {path} (missing: {})", missing.join(", "))]
    ProjectStructureInvalid { path: PathBuf, missing: Vec<String> },

    /// Template rendering failed.
    #[error("Template '{template}' failed to render: {reason}")]
    RenderingFailed { template: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Store access failed (lock poisoned, etc.).
    #[error("Template store error")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::NoLicense => vec![
                "Resolve a license before generating files".into(),
                "This is likely a bug in the caller".into(),
            ],
            Self::TemplateMissing { name } => vec![
                format!("Template not found: {name}"),
                format!("If you use --templates, add {name}.tmpl or remove the override"),
            ],
            Self::ProjectStructureInvalid { path, missing } => vec![
                format!("Looked upward from {}", path.display()),
                format!("Could not find: {}", missing.join(", ")),
                "Run `cobrakit init` first, or pass --path to the project root".into(),
            ],
            Self::RenderingFailed { template, .. } => vec![
                format!("Check the syntax of template '{template}'"),
                "Custom templates use tera syntax".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::StoreLockError => vec![
                "The template store is locked".into(),
                "Try again in a moment".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateMissing { .. } | Self::ProjectStructureInvalid { .. } => {
                ErrorCategory::NotFound
            }
            Self::NoLicense
            | Self::RenderingFailed { .. }
            | Self::FilesystemError { .. }
            | Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structure_error_lists_missing_files() {
        let err = ApplicationError::ProjectStructureInvalid {
            path: PathBuf::from("/tmp/x"),
            missing: vec!["LICENSE".into(), "cmd/root.go".into()],
        };
        assert_eq!(
            err.to_string(),
            "No generated project found at /tmp/x (missing: LICENSE, cmd/root.go)"
        );
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn template_missing_names_the_template() {
        let err = ApplicationError::TemplateMissing {
            name: "header_mit".into(),
        };
        assert!(err.to_string().contains("header_mit"));
        assert!(err.suggestions().iter().any(|s| s.contains("header_mit.tmpl")));
    }
}
