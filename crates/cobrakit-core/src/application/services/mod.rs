//! Application services - orchestrate use cases.
//!
//! `GeneratorService` drives both workflows ("create project" and "add
//! command"); the resolver, planner and renderer are the steps it composes.

pub mod content_planner;
pub mod content_renderer;
pub mod generator_service;
pub mod license_resolver;

pub use content_planner::ContentPlanner;
pub use content_renderer::ContentRenderer;
pub use generator_service::{GenerationReport, GenerationState, GeneratorService};
pub use license_resolver::{LicenseRequest, LicenseResolver};
