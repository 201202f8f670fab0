//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `cobrakit-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::BoundData;
use crate::error::CoreResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `cobrakit_adapters::filesystem::LocalFilesystem` (production)
/// - `cobrakit_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories. Existing directories
    /// are not an error.
    fn create_dir_all(&self, path: &Path) -> CoreResult<()>;

    /// Create or truncate `path` and write `content`. The parent directory
    /// must already exist.
    fn write_file(&self, path: &Path, content: &str) -> CoreResult<()>;

    /// Read the whole file.
    fn read_file(&self, path: &Path) -> CoreResult<Vec<u8>>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path exists and is a regular file.
    fn is_file(&self, path: &Path) -> bool;
}

/// Port for template text, keyed by logical name (`main`, `license_mit`, ...).
///
/// Implemented by:
/// - `cobrakit_adapters::template_store::EmbeddedTemplateStore` (built-in templates)
/// - `cobrakit_adapters::template_store::DirectoryTemplateStore` (user overrides)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateStore: Send + Sync {
    /// Template text for `name`, or `TemplateMissing`.
    fn get(&self, name: &str) -> CoreResult<String>;

    fn contains(&self, name: &str) -> bool;

    /// All template names, sorted.
    fn names(&self) -> Vec<String>;
}

/// Port for template rendering.
///
/// Implemented by:
/// - `cobrakit_adapters::renderer::TeraRenderer`
#[cfg_attr(test, mockall::automock)]
pub trait TemplateEngine: Send + Sync {
    /// Render `source` with the namespace built from `data`.
    ///
    /// `name` is only used for diagnostics.
    fn render(&self, name: &str, source: &str, data: &BoundData) -> CoreResult<String>;
}
