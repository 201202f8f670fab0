//! Template store adapters.

mod directory;
mod embedded;

pub use directory::{DirectoryTemplateStore, TemplateDirError};
pub use embedded::EmbeddedTemplateStore;
