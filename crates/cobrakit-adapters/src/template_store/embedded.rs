//! In-memory template store seeded with the built-in templates.

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use cobrakit_core::{
    application::{ApplicationError, ports::TemplateStore},
    error::CoreResult,
};

use crate::builtin_templates::BUILTIN_TEMPLATES;

/// Thread-safe in-memory template store.
///
/// Clones share state.
#[derive(Debug, Clone)]
pub struct EmbeddedTemplateStore {
    inner: Arc<RwLock<HashMap<String, String>>>,
}

impl EmbeddedTemplateStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a store with the built-in templates loaded.
    pub fn with_builtin() -> Self {
        let store = Self::new();
        store.load_builtin();
        store
    }

    /// Load (or reload) the built-in templates, replacing same-named entries.
    pub fn load_builtin(&self) {
        if let Ok(mut inner) = self.inner.write() {
            for (name, source) in BUILTIN_TEMPLATES {
                inner.insert((*name).to_string(), (*source).to_string());
            }
        }
    }

    /// Insert or replace a template.
    pub fn insert(&self, name: impl Into<String>, source: impl Into<String>) -> CoreResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        inner.insert(name.into(), source.into());
        Ok(())
    }

    /// Get the number of templates.
    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.len()).unwrap_or(0)
    }

    /// Check if store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for EmbeddedTemplateStore {
    fn default() -> Self {
        Self::with_builtin()
    }
}

impl TemplateStore for EmbeddedTemplateStore {
    fn get(&self, name: &str) -> CoreResult<String> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner.get(name).cloned().ok_or_else(|| {
            ApplicationError::TemplateMissing {
                name: name.to_string(),
            }
            .into()
        })
    }

    fn contains(&self, name: &str) -> bool {
        self.inner
            .read()
            .map(|inner| inner.contains_key(name))
            .unwrap_or(false)
    }

    fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .inner
            .read()
            .map(|inner| inner.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }
}
