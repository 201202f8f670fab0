//! Infrastructure adapters for cobrakit.
//!
//! Implements the ports declared in `cobrakit_core::application::ports`:
//! disk and in-memory filesystems, the embedded and directory-backed template
//! stores, and the tera renderer. All I/O lives here.

pub mod builtin_templates;
pub mod filesystem;
pub mod renderer;
pub mod template_store;

pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::TeraRenderer;
pub use template_store::{DirectoryTemplateStore, EmbeddedTemplateStore, TemplateDirError};
