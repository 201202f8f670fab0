//! cobrakit Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for cobrakit, a
//! generator for Go command-line applications built on cobra. It follows the
//! hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           cobrakit-cli (CLI)            │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (GeneratorService, LicenseResolver,    │
//! │   ContentPlanner, ContentRenderer)      │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │  (Driven: Store, Filesystem, Engine)    │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    cobrakit-adapters (Infrastructure)   │
//! │ (EmbeddedTemplateStore, TeraRenderer)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (LicenseCatalog, ProjectDescriptor,     │
//! │  CommandName, PlannedContent)           │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cobrakit_core::{
//!     application::{GeneratorService, LicenseRequest},
//!     domain::ProjectDescriptor,
//! };
//!
//! // 1. Describe the project
//! let project = ProjectDescriptor::new("/work/hello", "example.com/hello").unwrap();
//!
//! // 2. Use the generator (with injected adapters)
//! let generator = GeneratorService::new(store, engine, filesystem);
//! let report = generator
//!     .create_project(project, &LicenseRequest::new("mit", "Jane Doe"))
//!     .unwrap();
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ContentPlanner, ContentRenderer, GenerationReport, GenerationState, GeneratorService,
        LicenseRequest, LicenseResolver,
        ports::{Filesystem, TemplateEngine, TemplateStore},
    };
    pub use crate::domain::{
        BoundData, CommandName, ContentDescriptor, ContentKind, Copyright, LicenseCatalog,
        LicenseDefinition, LicenseRecord, OmissionReason, PlannedContent, ProjectDescriptor,
        normalize_command_name, reverse_resolve,
    };
    pub use crate::error::{CoreError, CoreResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
