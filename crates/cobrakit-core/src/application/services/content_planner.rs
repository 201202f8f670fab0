//! Content Planner - decides which files a run produces and from which
//! templates.
//!
//! Header handling is a two-way branch: a file is planned either from the
//! template that carries the license block comment or from its `_none`
//! sibling that has none.

use std::path::Path;

use tracing::{debug, instrument};

use crate::{
    application::{ApplicationError, ports::TemplateStore},
    domain::{
        BoundData, ContentDescriptor, ContentKind, DomainValidator, LicenseRecord, OmissionReason,
        PlannedContent, ProjectDescriptor, leading_block_comment,
    },
    error::CoreResult,
};

const MAIN: &str = "main";
const ROOT: &str = "root";
const ADD_COMMAND: &str = "add_command";

fn variant(base: &str, with_header: bool) -> String {
    if with_header {
        base.to_string()
    } else {
        format!("{base}_none")
    }
}

pub struct ContentPlanner<'a> {
    store: &'a dyn TemplateStore,
}

impl<'a> ContentPlanner<'a> {
    pub fn new(store: &'a dyn TemplateStore) -> Self {
        Self { store }
    }

    /// Plan a fresh project: license, then `main.go`, then `cmd/root.go`.
    ///
    /// The license entry is `Omitted` for the `none` license; the two code
    /// files then use their header-free templates.
    #[instrument(skip_all, fields(root = %project.root_path().display()))]
    pub fn plan_new_project(&self, project: &ProjectDescriptor) -> CoreResult<Vec<PlannedContent>> {
        let license = project.license().ok_or(ApplicationError::NoLicense)?;
        let with_header = !license.is_none();

        let license_entry = if with_header {
            PlannedContent::Rendered(ContentDescriptor {
                kind: ContentKind::License,
                target_path: project.license_path(),
                template_name: license.definition().body_template(),
                template_source: license.body_text().to_string(),
                data: BoundData::license(license),
            })
        } else {
            PlannedContent::Omitted {
                kind: ContentKind::License,
                target_path: project.license_path(),
                reason: OmissionReason::NoLicense,
            }
        };

        let main = self.descriptor(
            ContentKind::Main,
            &project.main_path(),
            variant(MAIN, with_header),
            BoundData::main(project, license),
        )?;
        let root = self.descriptor(
            ContentKind::Root,
            &project.root_command_path(),
            variant(ROOT, with_header),
            BoundData::root(project, license),
        )?;

        debug!(license = license.key(), "Planned new project");
        Ok(vec![
            license_entry,
            PlannedContent::Rendered(main),
            PlannedContent::Rendered(root),
        ])
    }

    /// Plan `cmd/<name>.go` for an existing project.
    ///
    /// A block comment directly above `package` in `existing_root` is reused
    /// verbatim as the new file's header.
    #[instrument(skip_all, fields(root = %project.root_path().display()))]
    pub fn plan_add_command(
        &self,
        project: &ProjectDescriptor,
        existing_root: &[u8],
    ) -> CoreResult<ContentDescriptor> {
        let name = DomainValidator::validate_add_command(project)?;
        let target_path = project.cmd_dir().join(name.file_name());

        let root_source = String::from_utf8_lossy(existing_root);
        let header = leading_block_comment(&root_source);
        debug!(command = %name, header = header.is_some(), "Planned sub-command");

        self.descriptor(
            ContentKind::AddCommand,
            &target_path,
            variant(ADD_COMMAND, header.is_some()),
            BoundData::sub_command(project, name, header),
        )
    }

    /// License descriptors for every real license in `licenses`, keyed by
    /// catalog key and targeting the project's LICENSE. Rendered, they are
    /// compared against the file on disk.
    pub fn license_candidates<'r>(
        project: &ProjectDescriptor,
        licenses: impl IntoIterator<Item = &'r LicenseRecord>,
    ) -> Vec<(&'static str, ContentDescriptor)> {
        licenses
            .into_iter()
            .filter(|l| !l.is_none())
            .map(|license| {
                let descriptor = ContentDescriptor {
                    kind: ContentKind::License,
                    target_path: project.license_path(),
                    template_name: license.definition().body_template(),
                    template_source: license.body_text().to_string(),
                    data: BoundData::license(license),
                };
                (license.key(), descriptor)
            })
            .collect()
    }

    fn descriptor(
        &self,
        kind: ContentKind,
        target_path: &Path,
        template_name: String,
        data: BoundData,
    ) -> CoreResult<ContentDescriptor> {
        let template_source = self.store.get(&template_name)?;
        Ok(ContentDescriptor {
            kind,
            target_path: target_path.to_path_buf(),
            template_name,
            template_source,
            data,
        })
    }
}
