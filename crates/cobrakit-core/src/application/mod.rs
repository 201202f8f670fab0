//! Application layer for cobrakit.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (GeneratorService and its steps)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    ContentPlanner, ContentRenderer, GenerationReport, GenerationState, GeneratorService,
    LicenseRequest, LicenseResolver,
};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, TemplateEngine, TemplateStore};

pub use error::ApplicationError;
