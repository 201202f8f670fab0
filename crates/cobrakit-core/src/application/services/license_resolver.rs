//! License Resolver - turns a license key into a populated record.
//!
//! Resolution is repeated for every request: the catalog is a constant table
//! and the author or year can change between calls.

use tracing::{debug, instrument};

use crate::{
    application::ports::TemplateStore,
    domain::{Copyright, DEFAULT_AUTHOR, LicenseCatalog, LicenseRecord, NONE_KEY},
    error::CoreResult,
};

/// Inputs for one license resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseRequest {
    pub key: String,
    pub author: String,
    /// `None` means the current calendar year.
    pub year: Option<String>,
}

impl LicenseRequest {
    pub fn new(key: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            author: author.into(),
            year: None,
        }
    }

    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    pub fn copyright(&self) -> Copyright {
        Copyright::dated(self.year.as_deref(), &self.author)
    }
}

impl Default for LicenseRequest {
    fn default() -> Self {
        Self::new(NONE_KEY, DEFAULT_AUTHOR)
    }
}

/// Resolves catalog keys against a template store.
pub struct LicenseResolver<'a> {
    catalog: LicenseCatalog,
    store: &'a dyn TemplateStore,
}

impl<'a> LicenseResolver<'a> {
    pub fn new(catalog: LicenseCatalog, store: &'a dyn TemplateStore) -> Self {
        Self { catalog, store }
    }

    /// Resolve `key` exactly; aliases are not consulted.
    ///
    /// An unknown key yields the `none` record without touching the store. A
    /// real license whose header or body template is missing is an error,
    /// since the user asked for it explicitly.
    #[instrument(skip_all, fields(key = %key))]
    pub fn resolve(&self, key: &str, author: &str, year: Option<&str>) -> CoreResult<LicenseRecord> {
        let copyright = Copyright::dated(year, author);

        let Some(definition) = self.catalog.find(key) else {
            debug!("Unknown license key, falling back to none");
            return Ok(LicenseRecord::none(*self.catalog.none(), copyright));
        };
        if definition.is_none() {
            return Ok(LicenseRecord::none(*definition, copyright));
        }

        let header = self.store.get(&definition.header_template())?;
        let body = self.store.get(&definition.body_template())?;
        debug!(code = definition.code, "License texts loaded");

        Ok(LicenseRecord::new(*definition, copyright, header, body))
    }

    pub fn resolve_request(&self, request: &LicenseRequest) -> CoreResult<LicenseRecord> {
        self.resolve(&request.key, &request.author, request.year.as_deref())
    }

    pub fn catalog(&self) -> LicenseCatalog {
        self.catalog
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::{
        application::{ApplicationError, ports::MockTemplateStore},
        error::CoreError,
    };

    fn store_with_all_texts() -> MockTemplateStore {
        let mut store = MockTemplateStore::new();
        store
            .expect_get()
            .returning(|name| Ok(format!("text of {name}")));
        store
    }

    #[test]
    fn copyright_line_for_every_catalog_key() {
        let store = store_with_all_texts();
        let resolver = LicenseResolver::new(LicenseCatalog::builtin(), &store);

        for def in LicenseCatalog::builtin().entries() {
            let record = resolver.resolve(def.key, "Jane Doe", Some("2024")).unwrap();
            assert_eq!(record.key(), def.key);
            assert_eq!(record.copyright_line(), "Copyright © 2024 Jane Doe");
        }
    }

    #[test]
    fn unknown_key_is_none_without_store_access() {
        let store = MockTemplateStore::new();
        let resolver = LicenseResolver::new(LicenseCatalog::builtin(), &store);

        let record = resolver.resolve("nonexistent-key", "a", Some("2020")).unwrap();
        assert_eq!(record.key(), "none");
        assert!(record.body_text().is_empty());
    }

    #[test]
    fn aliases_do_not_resolve() {
        let store = MockTemplateStore::new();
        let resolver = LicenseResolver::new(LicenseCatalog::builtin(), &store);
        assert!(resolver.resolve("MIT", "a", None).unwrap().is_none());
    }

    #[test]
    fn real_license_loads_header_and_body() {
        let mut store = MockTemplateStore::new();
        store
            .expect_get()
            .with(eq("header_mit"))
            .times(1)
            .returning(|_| Ok("MIT header".into()));
        store
            .expect_get()
            .with(eq("license_mit"))
            .times(1)
            .returning(|_| Ok("MIT body".into()));
        let resolver = LicenseResolver::new(LicenseCatalog::builtin(), &store);

        let record = resolver.resolve("mit", "Jane", Some("2024")).unwrap();
        assert_eq!(record.header_text(), "MIT header");
        assert_eq!(record.body_text(), "MIT body");
        assert!(record.content_hash().is_some());
    }

    #[test]
    fn missing_template_for_requested_license_is_fatal() {
        let mut store = MockTemplateStore::new();
        store.expect_get().returning(|name| {
            Err(ApplicationError::TemplateMissing { name: name.into() }.into())
        });
        let resolver = LicenseResolver::new(LicenseCatalog::builtin(), &store);

        let err = resolver.resolve("apache2", "a", None).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Application(ApplicationError::TemplateMissing { ref name }) if name == "header_apache_2"
        ));
    }

    #[test]
    fn request_defaults() {
        let request = LicenseRequest::default();
        assert_eq!(request.key, "none");
        assert_eq!(request.author, DEFAULT_AUTHOR);
        assert_eq!(
            LicenseRequest::new("mit", "x").with_year("1999").copyright().year(),
            "1999"
        );
    }
}
