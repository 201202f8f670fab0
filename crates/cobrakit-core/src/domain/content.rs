//! Planned files and the data bound into their templates.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::{identifier::CommandName, license::LicenseRecord, project::ProjectDescriptor};

/// Logical kind of a generated file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    License,
    Main,
    Root,
    AddCommand,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::License => "license",
            Self::Main => "main",
            Self::Root => "root",
            Self::AddCommand => "add_command",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Template namespaces
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectView {
    pub module_name: String,
    pub app_name: String,
}

impl From<&ProjectDescriptor> for ProjectView {
    fn from(project: &ProjectDescriptor) -> Self {
        Self {
            module_name: project.module_name().to_string(),
            app_name: project.app_name().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LicenseView {
    pub key: String,
    pub name: String,
    pub copyright: String,
    /// Source header text with trailing whitespace removed.
    pub header: String,
}

impl From<&LicenseRecord> for LicenseView {
    fn from(license: &LicenseRecord) -> Self {
        Self {
            key: license.key().to_string(),
            name: license.name().to_string(),
            copyright: license.copyright_line(),
            header: license.header_text().trim_end().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandView {
    pub name: String,
    pub parent: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MainData {
    pub project: ProjectView,
    pub license: LicenseView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RootData {
    pub project: ProjectView,
    pub license: LicenseView,
    pub viper: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LicenseData {
    pub license: LicenseView,
}

/// Data for a new sub-command file. `header` is the block comment lifted
/// verbatim from the existing root command, when it had one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubCommandData {
    pub project: ProjectView,
    pub header: Option<String>,
    pub command: CommandView,
}

/// What a template may reference, one case per file kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundData {
    Main(MainData),
    Root(RootData),
    License(LicenseData),
    SubCommand(SubCommandData),
}

impl BoundData {
    pub fn main(project: &ProjectDescriptor, license: &LicenseRecord) -> Self {
        Self::Main(MainData {
            project: project.into(),
            license: license.into(),
        })
    }

    pub fn root(project: &ProjectDescriptor, license: &LicenseRecord) -> Self {
        Self::Root(RootData {
            project: project.into(),
            license: license.into(),
            viper: project.viper(),
        })
    }

    pub fn license(license: &LicenseRecord) -> Self {
        Self::License(LicenseData {
            license: license.into(),
        })
    }

    pub fn sub_command(
        project: &ProjectDescriptor,
        command: &CommandName,
        header: Option<&str>,
    ) -> Self {
        Self::SubCommand(SubCommandData {
            project: project.into(),
            header: header.map(str::to_string),
            command: CommandView {
                name: command.to_string(),
                parent: project.parent_command().to_string(),
            },
        })
    }

    pub fn kind(&self) -> ContentKind {
        match self {
            Self::Main(_) => ContentKind::Main,
            Self::Root(_) => ContentKind::Root,
            Self::License(_) => ContentKind::License,
            Self::SubCommand(_) => ContentKind::AddCommand,
        }
    }
}

// ============================================================================
// Planner output
// ============================================================================

/// One file ready to render: where it goes, which template, and the data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDescriptor {
    pub kind: ContentKind,
    pub target_path: PathBuf,
    pub template_name: String,
    pub template_source: String,
    pub data: BoundData,
}

/// Why a file was left out of a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OmissionReason {
    /// The project carries the `none` license.
    NoLicense,
}

impl fmt::Display for OmissionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoLicense => f.write_str("project has no license"),
        }
    }
}

/// A planner decision for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedContent {
    Rendered(ContentDescriptor),
    Omitted {
        kind: ContentKind,
        target_path: PathBuf,
        reason: OmissionReason,
    },
}

impl PlannedContent {
    pub fn kind(&self) -> ContentKind {
        match self {
            Self::Rendered(d) => d.kind,
            Self::Omitted { kind, .. } => *kind,
        }
    }

    pub fn target_path(&self) -> &Path {
        match self {
            Self::Rendered(d) => &d.target_path,
            Self::Omitted { target_path, .. } => target_path,
        }
    }

    pub fn is_omitted(&self) -> bool {
        matches!(self, Self::Omitted { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::license::{Copyright, LicenseCatalog};

    fn project() -> ProjectDescriptor {
        let mut p = ProjectDescriptor::new(std::env::temp_dir().join("app"), "example.com/app")
            .unwrap();
        p.set_viper(true);
        p
    }

    fn mit() -> LicenseRecord {
        let def = *LicenseCatalog::builtin().get("mit").unwrap();
        LicenseRecord::new(def, Copyright::new("2024", "Jane"), "Use freely.\n\n", "MIT body")
    }

    #[test]
    fn license_view_trims_header_and_formats_copyright() {
        let view = LicenseView::from(&mit());
        assert_eq!(view.header, "Use freely.");
        assert_eq!(view.copyright, "Copyright © 2024 Jane");
        assert_eq!(view.key, "mit");
    }

    #[test]
    fn bound_data_kinds() {
        let p = project();
        let l = mit();
        assert_eq!(BoundData::main(&p, &l).kind(), ContentKind::Main);
        assert_eq!(BoundData::license(&l).kind(), ContentKind::License);

        let BoundData::Root(root) = BoundData::root(&p, &l) else {
            panic!("expected root data");
        };
        assert!(root.viper);
        assert_eq!(root.project.app_name, "app");
    }

    #[test]
    fn sub_command_carries_parent_and_header() {
        let mut p = project();
        p.set_parent_command("configCmd");
        let name = CommandName::parse("get-value").unwrap();
        let BoundData::SubCommand(data) = BoundData::sub_command(&p, &name, Some("hdr")) else {
            panic!("expected sub-command data");
        };
        assert_eq!(data.command.name, "getValue");
        assert_eq!(data.command.parent, "configCmd");
        assert_eq!(data.header.as_deref(), Some("hdr"));
    }

    #[test]
    fn omitted_content_exposes_kind_and_path() {
        let planned = PlannedContent::Omitted {
            kind: ContentKind::License,
            target_path: PathBuf::from("/x/LICENSE"),
            reason: OmissionReason::NoLicense,
        };
        assert!(planned.is_omitted());
        assert_eq!(planned.kind(), ContentKind::License);
        assert_eq!(planned.target_path(), Path::new("/x/LICENSE"));
        assert_eq!(OmissionReason::NoLicense.to_string(), "project has no license");
    }
}
