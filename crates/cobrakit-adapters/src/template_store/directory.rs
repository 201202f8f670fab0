//! Template store that layers a user directory over the built-in set.
//!
//! A file `<dir>/<name>.tmpl` replaces the built-in template `<name>`. Only
//! the top level of the directory is read; names cobrakit does not know
//! about are skipped with a warning.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use cobrakit_core::{
    application::ports::TemplateStore,
    error::{CoreError, CoreResult},
};

use crate::template_store::EmbeddedTemplateStore;

const EXTENSION: &str = "tmpl";

#[derive(Debug, Error)]
pub enum TemplateDirError {
    #[error("templates directory not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read templates directory '{path}': {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

impl From<TemplateDirError> for CoreError {
    fn from(e: TemplateDirError) -> Self {
        CoreError::Configuration {
            message: e.to_string(),
        }
    }
}

/// Overrides read from disk, falling back to a base store.
pub struct DirectoryTemplateStore {
    dir: PathBuf,
    overrides: HashMap<String, String>,
    base: EmbeddedTemplateStore,
}

impl DirectoryTemplateStore {
    /// Read every `<name>.tmpl` in `dir` that overrides a template in `base`.
    ///
    /// Unreadable or unknown files are skipped with a `WARN` log; only a
    /// missing or unreadable directory fails.
    #[instrument(skip(base), fields(dir = %dir.as_ref().display()))]
    pub fn load(
        dir: impl AsRef<Path>,
        base: EmbeddedTemplateStore,
    ) -> Result<Self, TemplateDirError> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(TemplateDirError::NotFound(dir.to_path_buf()));
        }

        let mut overrides = HashMap::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|source| TemplateDirError::Unreadable {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(EXTENSION)
            {
                continue;
            }

            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if !base.contains(name) {
                warn!(file = %path.display(), "unknown template name, skipping");
                continue;
            }

            match fs::read_to_string(path) {
                Ok(source) => {
                    debug!(name, "template overridden");
                    overrides.insert(name.to_string(), source);
                }
                Err(e) => warn!(file = %path.display(), error = %e, "skipping unreadable template"),
            }
        }

        debug!(count = overrides.len(), "finished loading template overrides");
        Ok(Self {
            dir: dir.to_path_buf(),
            overrides,
            base,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Names of the templates replaced from disk, sorted.
    pub fn overridden(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.overrides.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl TemplateStore for DirectoryTemplateStore {
    fn get(&self, name: &str) -> CoreResult<String> {
        match self.overrides.get(name) {
            Some(source) => Ok(source.clone()),
            None => self.base.get(name),
        }
    }

    fn contains(&self, name: &str) -> bool {
        self.overrides.contains_key(name) || self.base.contains(name)
    }

    fn names(&self) -> Vec<String> {
        self.base.names()
    }
}
