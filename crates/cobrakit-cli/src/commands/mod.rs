//! Command handlers, one module per subcommand.

use std::path::Path;

use tracing::debug;

use cobrakit_adapters::{DirectoryTemplateStore, EmbeddedTemplateStore, LocalFilesystem, TeraRenderer};
use cobrakit_core::application::{GeneratorService, TemplateStore};

use crate::{config::AppConfig, error::CliResult};

pub mod add;
pub mod completions;
pub mod config;
pub mod init;
pub mod licenses;

/// Generator wired to the local disk.
///
/// `templates` (or `templates.local_path` from config) names a directory of
/// overrides layered over the built-in templates.
pub(crate) fn build_generator(
    templates: Option<&Path>,
    config: &AppConfig,
) -> CliResult<GeneratorService> {
    let builtin = EmbeddedTemplateStore::with_builtin();
    let store: Box<dyn TemplateStore> = match templates.or(config.templates.local_path.as_deref()) {
        Some(dir) => {
            let store = DirectoryTemplateStore::load(dir, builtin)
                .map_err(cobrakit_core::error::CoreError::from)?;
            debug!(dir = %dir.display(), overridden = ?store.overridden(), "Using template overrides");
            Box::new(store)
        }
        None => Box::new(builtin),
    };

    Ok(GeneratorService::new(
        store,
        Box::new(TeraRenderer::new()),
        Box::new(LocalFilesystem::new()),
    ))
}
