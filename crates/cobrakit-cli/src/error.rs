//! Error handling for the cobrakit CLI.
//!
//! [`CliError`] wraps everything a command can fail with and knows how to
//! present itself: message, suggestions, and exit code.

use std::error::Error;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use cobrakit_core::error::{CoreError, ErrorCategory as CoreCategory};

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input that clap could not catch.
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<Box<dyn Error + Send + Sync>>,
    },

    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn Error + Send + Sync>>,
    },

    /// No `go.mod` above the target directory and no `--module` given.
    #[error("No Go module found for {}", path.display())]
    ModuleNotFound { path: PathBuf },

    #[error("{0}")]
    Core(#[from] CoreError),

    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Operation cancelled")]
    Cancelled,
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            source: None,
        }
    }

    pub fn config(message: impl Into<String>, source: impl Error + Send + Sync + 'static) -> Self {
        Self::ConfigError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// User-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { message, .. } => vec![
                format!("Check your input: {message}"),
                "Use --help for usage information".into(),
            ],

            Self::ConfigError { .. } => vec![
                format!(
                    "Check your config file at {}",
                    crate::config::AppConfig::config_path().display()
                ),
                "Environment overrides use the COBRAKIT_ prefix, e.g. COBRAKIT_DEFAULTS__AUTHOR"
                    .into(),
                "Run 'cobrakit config init --force' to write a fresh default config".into(),
            ],

            Self::ModuleNotFound { .. } => vec![
                "Run inside a Go module (a directory with go.mod or below one)".into(),
                "Or pass the module path explicitly: --module example.com/app".into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::IoError { .. } => vec![
                "Check file permissions".into(),
                "Ensure the parent directory exists".into(),
            ],

            Self::Cancelled => vec!["No files were written".into()],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } | Self::Cancelled => ErrorCategory::UserError,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::ModuleNotFound { .. } => ErrorCategory::NotFound,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = format!(
            "\n{} {}\n\n  {}\n",
            "✗".red().bold(),
            "Error:".red().bold(),
            self.to_string().red()
        );

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                output.push_str(&format!("\n  {} {}\n", "→".dimmed(), err.to_string().dimmed()));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {suggestion}\n"));
            }
        }

        if !verbose {
            output.push_str(&format!(
                "\n{} {}\n",
                "\u{2139}".blue(),
                "Use -v / --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// [`Self::format_colored`] without ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = format!("\nError: {self}\n");

        if verbose {
            let mut src = self.source();
            while let Some(err) = src {
                out.push_str(&format!("  Caused by: {err}\n"));
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::NotFound => tracing::warn!("Not found: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    UserError,
    NotFound,
    Configuration,
    Internal,
}

/// Attach a context message to I/O results at call-sites.
pub trait IoContext<T> {
    fn io_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IoContext<T> for Result<T, std::io::Error> {
    fn io_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use cobrakit_core::{application::ApplicationError, domain::DomainError};

    use super::*;

    // ── exit codes ────────────────────────────────────────────────────────

    #[test]
    fn invalid_command_name_is_a_user_error() {
        let err = CliError::from(CoreError::from(DomainError::IdentifierInvalid {
            name: "root".into(),
            reason: "collides with the root command".into(),
        }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn missing_project_is_not_found() {
        let err = CliError::from(CoreError::from(ApplicationError::ProjectStructureInvalid {
            path: PathBuf::from("/tmp/x"),
            missing: vec!["LICENSE".into()],
        }));
        assert_eq!(err.exit_code(), 3);
        assert_eq!(
            CliError::ModuleNotFound {
                path: PathBuf::from("/tmp/x")
            }
            .exit_code(),
            3
        );
    }

    #[test]
    fn configuration_errors_exit_four() {
        let core = CliError::Core(CoreError::Configuration {
            message: "bad template dir".into(),
        });
        assert_eq!(core.exit_code(), 4);
        assert_eq!(
            CliError::config("x", io::Error::other("e")).exit_code(),
            4
        );
    }

    #[test]
    fn io_errors_are_internal() {
        let err: CliError = io::Error::other("disk full").into();
        assert_eq!(err.exit_code(), 1);
    }

    // ── suggestions & format ──────────────────────────────────────────────

    #[test]
    fn module_not_found_suggests_flag() {
        let err = CliError::ModuleNotFound {
            path: PathBuf::from("/tmp/app"),
        };
        assert!(err.suggestions().iter().any(|s| s.contains("--module")));
    }

    #[test]
    fn format_plain_contains_error_and_suggestions() {
        let s = CliError::invalid_input("empty name").format_plain(false);
        assert!(s.contains("Error: Invalid input: empty name"));
        assert!(s.contains("Suggestions:"));
        assert!(s.contains("--verbose"));
    }

    #[test]
    fn format_plain_verbose_shows_cause_and_omits_hint() {
        let err = CliError::config("unreadable", io::Error::other("permission denied"));
        let s = err.format_plain(true);
        assert!(s.contains("Caused by: permission denied"));
        assert!(!s.contains("--verbose"));
    }

    #[test]
    fn io_context_wraps_message() {
        let result: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let err = result.io_context(|| "reading go.mod").unwrap_err();
        assert_eq!(err.to_string(), "I/O error: reading go.mod");
    }
}
