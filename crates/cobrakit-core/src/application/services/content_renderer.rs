//! Content Renderer - materializes one planned file.

use std::path::PathBuf;

use tracing::{debug, instrument};

use crate::{
    application::ports::{Filesystem, TemplateEngine},
    domain::{ContentDescriptor, PlannedContent},
    error::CoreResult,
};

/// Renders planned content through a [`TemplateEngine`] and writes it through
/// a [`Filesystem`].
///
/// The template is rendered fully in memory before the target is opened, so a
/// template error leaves any existing file untouched. A failing write can
/// still leave a truncated file behind; there is no rollback. Parent
/// directories must already exist.
pub struct ContentRenderer<'a> {
    engine: &'a dyn TemplateEngine,
    filesystem: &'a dyn Filesystem,
}

impl<'a> ContentRenderer<'a> {
    pub fn new(engine: &'a dyn TemplateEngine, filesystem: &'a dyn Filesystem) -> Self {
        Self { engine, filesystem }
    }

    /// Render and write. `Omitted` content returns `None` without any
    /// filesystem access.
    pub fn render(&self, planned: &PlannedContent) -> CoreResult<Option<PathBuf>> {
        match planned {
            PlannedContent::Omitted { kind, reason, .. } => {
                debug!(%kind, %reason, "Skipping omitted content");
                Ok(None)
            }
            PlannedContent::Rendered(descriptor) => self.write(descriptor).map(Some),
        }
    }

    #[instrument(skip_all, fields(template = %descriptor.template_name, path = %descriptor.target_path.display()))]
    pub fn write(&self, descriptor: &ContentDescriptor) -> CoreResult<PathBuf> {
        let text = self.render_to_string(descriptor)?;
        self.filesystem.write_file(&descriptor.target_path, &text)?;
        debug!(bytes = text.len(), "Wrote file");
        Ok(descriptor.target_path.clone())
    }

    /// Render without writing.
    pub fn render_to_string(&self, descriptor: &ContentDescriptor) -> CoreResult<String> {
        self.engine.render(
            &descriptor.template_name,
            &descriptor.template_source,
            &descriptor.data,
        )
    }
}
