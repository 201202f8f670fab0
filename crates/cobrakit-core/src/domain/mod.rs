//! Core domain layer for cobrakit.
//!
//! Pure logic only. Template text arrives through the application ports and
//! nothing in here touches the filesystem.
//!
//! ## Contents
//!
//! - **license**: the license catalog, copyright lines, resolved records and
//!   reverse matching of an existing LICENSE file
//! - **identifier**: command name normalization and validation
//! - **project**: the target application and its file layout
//! - **content**: bound template data and planner output
//! - **source_text**: header and copyright recovery from generated files

pub mod content;
pub mod error;
pub mod identifier;
pub mod license;
pub mod project;
pub mod source_text;

mod validation;

pub use content::{
    BoundData, CommandView, ContentDescriptor, ContentKind, LicenseData, LicenseView, MainData,
    OmissionReason, PlannedContent, ProjectView, RootData, SubCommandData,
};
pub use error::{DomainError, ErrorCategory};
pub use identifier::{CommandName, DEFAULT_PARENT, ROOT_COMMAND, normalize_command_name};
pub use license::{
    Copyright, DEFAULT_AUTHOR, LicenseCatalog, LicenseDefinition, LicenseRecord, NONE_KEY,
    content_hash, current_year, reverse_resolve,
};
pub use project::{COMMAND_DIR, LICENSE_FILE, MAIN_FILE, ProjectDescriptor, ROOT_COMMAND_FILE};
pub use source_text::{extract_copyright, leading_block_comment, normalize_line_endings};
pub use validation::DomainValidator;
