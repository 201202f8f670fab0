//! Top-level error type returned by every public core operation.
//!
//! Layer errors convert into [`CoreError`] through `?`; front ends only need
//! [`CoreError::category`] to choose an exit status and
//! [`CoreError::suggestions`] to print hints.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::{self, DomainError};

#[derive(Debug, Error, Clone)]
pub enum CoreError {
    /// A name, license key or path was rejected.
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Generation could not complete.
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// The environment is unusable, e.g. a template directory that cannot be read.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl CoreError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { .. } => vec![
                "Check the template directory and config file paths".into(),
                "Run 'cobrakit config path' to see which config file is read".into(),
            ],
            Self::Internal { .. } => vec![
                "Re-run with -vvv and include the log when reporting the issue".into(),
                "Issues: https://github.com/cosecruz/cobrakit/issues".into(),
            ],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                domain::ErrorCategory::Validation => ErrorCategory::Validation,
                domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Coarse grouping used by front ends to pick exit codes and styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

pub type CoreResult<T> = Result<T, CoreError>;
