//! Generator Service - main application orchestrator.
//!
//! Both workflows walk the same states:
//!
//! ```text
//! Init -> DirectoryEnsured -> Planned -> Rendered -> Done
//!   \__________\________________\__________\______-> Failed
//! ```
//!
//! The first error moves the run to `Failed` and aborts it. Nothing is
//! retried or rolled back; files written before the failure stay on disk.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateEngine, TemplateStore},
        services::{
            content_planner::ContentPlanner,
            content_renderer::ContentRenderer,
            license_resolver::{LicenseRequest, LicenseResolver},
        },
    },
    domain::{
        COMMAND_DIR, CommandName, ContentKind, Copyright, LICENSE_FILE, LicenseCatalog,
        LicenseRecord, OmissionReason, PlannedContent, ProjectDescriptor, ROOT_COMMAND_FILE,
        content_hash, extract_copyright, reverse_resolve,
    },
    error::{CoreError, CoreResult},
};

/// Where a generation run is, or where it stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationState {
    Init,
    DirectoryEnsured,
    Planned,
    Rendered,
    Done,
    Failed,
}

impl fmt::Display for GenerationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Init => "init",
            Self::DirectoryEnsured => "directory-ensured",
            Self::Planned => "planned",
            Self::Rendered => "rendered",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub root: PathBuf,
    pub state: GenerationState,
    /// Files written, in the order they were written.
    pub written: Vec<PathBuf>,
    pub omitted: Vec<(ContentKind, OmissionReason)>,
    /// License key the project ended up with.
    pub license_key: &'static str,
}

/// Tracks and logs state transitions for one run.
struct Progress {
    root: PathBuf,
    state: GenerationState,
}

impl Progress {
    fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            state: GenerationState::Init,
        }
    }

    fn advance(&mut self, next: GenerationState) {
        debug!(from = %self.state, to = %next, "Generation state changed");
        self.state = next;
    }

    fn fail(&mut self, error: CoreError) -> CoreError {
        warn!(
            root = %self.root.display(),
            state = %self.state,
            error = %error,
            "Generation failed"
        );
        self.state = GenerationState::Failed;
        error
    }
}

/// Main generation service.
///
/// Owns the adapters and hands borrowed views of them to the resolver,
/// planner and renderer for each run.
pub struct GeneratorService {
    catalog: LicenseCatalog,
    store: Box<dyn TemplateStore>,
    engine: Box<dyn TemplateEngine>,
    filesystem: Box<dyn Filesystem>,
}

impl GeneratorService {
    /// Create a generator with the built-in license catalog.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use cobrakit_core::application::GeneratorService;
    ///
    /// let generator = GeneratorService::new(
    ///     store,      // impl TemplateStore
    ///     engine,     // impl TemplateEngine
    ///     filesystem, // impl Filesystem
    /// );
    /// ```
    pub fn new(
        store: Box<dyn TemplateStore>,
        engine: Box<dyn TemplateEngine>,
        filesystem: Box<dyn Filesystem>,
    ) -> Self {
        Self {
            catalog: LicenseCatalog::builtin(),
            store,
            engine,
            filesystem,
        }
    }

    pub fn with_catalog(mut self, catalog: LicenseCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn catalog(&self) -> LicenseCatalog {
        self.catalog
    }

    fn resolver(&self) -> LicenseResolver<'_> {
        LicenseResolver::new(self.catalog, self.store.as_ref())
    }

    fn planner(&self) -> ContentPlanner<'_> {
        ContentPlanner::new(self.store.as_ref())
    }

    fn renderer(&self) -> ContentRenderer<'_> {
        ContentRenderer::new(self.engine.as_ref(), self.filesystem.as_ref())
    }

    // -------------------------------------------------------------------------
    // New project
    // -------------------------------------------------------------------------

    /// Resolve and plan without writing anything.
    pub fn plan_project(
        &self,
        mut project: ProjectDescriptor,
        license: &LicenseRequest,
    ) -> CoreResult<Vec<PlannedContent>> {
        project.set_license(self.resolver().resolve_request(license)?);
        self.planner().plan_new_project(&project)
    }

    /// Generate `main.go`, `cmd/root.go` and, unless the license is `none`,
    /// `LICENSE`. Existing files are overwritten.
    #[instrument(
        skip_all,
        fields(
            root = %project.root_path().display(),
            license = %license.key
        )
    )]
    pub fn create_project(
        &self,
        mut project: ProjectDescriptor,
        license: &LicenseRequest,
    ) -> CoreResult<GenerationReport> {
        let mut progress = Progress::new(project.root_path());
        self.run_create(&mut project, license, &mut progress)
            .map_err(|e| progress.fail(e))
    }

    fn run_create(
        &self,
        project: &mut ProjectDescriptor,
        license: &LicenseRequest,
        progress: &mut Progress,
    ) -> CoreResult<GenerationReport> {
        self.filesystem.create_dir_all(project.root_path())?;
        self.filesystem.create_dir_all(&project.cmd_dir())?;
        progress.advance(GenerationState::DirectoryEnsured);

        let record = self.resolver().resolve_request(license)?;
        let license_key = record.key();
        project.set_license(record);
        let plan = self.planner().plan_new_project(project)?;
        progress.advance(GenerationState::Planned);

        let renderer = self.renderer();
        let mut written = Vec::new();
        let mut omitted = Vec::new();
        for planned in &plan {
            match renderer.render(planned)? {
                Some(path) => written.push(path),
                None => {
                    if let PlannedContent::Omitted { kind, reason, .. } = planned {
                        omitted.push((*kind, *reason));
                    }
                }
            }
        }
        progress.advance(GenerationState::Rendered);

        progress.advance(GenerationState::Done);
        info!(files = written.len(), "Project generated");
        Ok(GenerationReport {
            root: project.root_path().to_path_buf(),
            state: progress.state,
            written,
            omitted,
            license_key,
        })
    }

    // -------------------------------------------------------------------------
    // Add command
    // -------------------------------------------------------------------------

    /// Directory holding `cmd/root.go`, searched from `start` upward.
    ///
    /// Fails with `ProjectStructureInvalid` unless both the root command file
    /// and a `LICENSE` file can be found.
    pub fn locate_project(&self, start: &Path) -> CoreResult<PathBuf> {
        let root_file = Path::new(COMMAND_DIR).join(ROOT_COMMAND_FILE);
        let project_root = self.find_upward(start, &root_file);
        let license = self.find_upward(start, Path::new(LICENSE_FILE));

        match (project_root, license) {
            (Some(root), Some(_)) => Ok(root),
            (root, license) => {
                let mut missing = Vec::new();
                if license.is_none() {
                    missing.push(LICENSE_FILE.to_string());
                }
                if root.is_none() {
                    missing.push(format!("{COMMAND_DIR}/{ROOT_COMMAND_FILE}"));
                }
                Err(ApplicationError::ProjectStructureInvalid {
                    path: start.to_path_buf(),
                    missing,
                }
                .into())
            }
        }
    }

    fn find_upward(&self, start: &Path, relative: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .find(|dir| self.filesystem.is_file(&dir.join(relative)))
            .map(Path::to_path_buf)
    }

    /// Add `cmd/<name>.go` to the project containing `start`.
    ///
    /// The new file reuses the root command's header verbatim. The project's
    /// license is recovered by matching its LICENSE against every catalog
    /// license rendered with the recovered copyright; `fallback` supplies the
    /// author and year when no copyright line can be found.
    #[instrument(skip_all, fields(start = %start.display(), command = %raw_name))]
    pub fn add_command(
        &self,
        start: &Path,
        raw_name: &str,
        parent: Option<&str>,
        fallback: &LicenseRequest,
    ) -> CoreResult<GenerationReport> {
        let mut progress = Progress::new(start);
        self.run_add(start, raw_name, parent, fallback, &mut progress)
            .map_err(|e| progress.fail(e))
    }

    fn run_add(
        &self,
        start: &Path,
        raw_name: &str,
        parent: Option<&str>,
        fallback: &LicenseRequest,
        progress: &mut Progress,
    ) -> CoreResult<GenerationReport> {
        let name = CommandName::parse(raw_name)?;
        let root = self.locate_project(start)?;
        let mut project = ProjectDescriptor::new(&root, "")?;
        project.set_command_name(name);
        if let Some(parent) = parent {
            project.set_parent_command(parent);
        }

        self.filesystem.create_dir_all(&project.cmd_dir())?;
        progress.advance(GenerationState::DirectoryEnsured);

        let root_source = self.filesystem.read_file(&project.root_command_path())?;
        let license_path = self
            .find_upward(start, Path::new(LICENSE_FILE))
            .map(|dir| dir.join(LICENSE_FILE))
            .unwrap_or_else(|| project.license_path());
        let license_text = self.filesystem.read_file(&license_path)?;

        let copyright = recover_copyright(&root_source, &license_text, fallback);
        let record = self.detect_license(&project, &license_text, &copyright)?;
        let license_key = record.key();
        project.set_license(record);

        let descriptor = self.planner().plan_add_command(&project, &root_source)?;
        progress.advance(GenerationState::Planned);

        let path = self.renderer().write(&descriptor)?;
        progress.advance(GenerationState::Rendered);

        progress.advance(GenerationState::Done);
        info!(path = %path.display(), "Command added");
        Ok(GenerationReport {
            root,
            state: progress.state,
            written: vec![path],
            omitted: Vec::new(),
            license_key,
        })
    }

    /// Match an existing LICENSE against every catalog license rendered for
    /// `copyright`. No match yields the `none` record.
    fn detect_license(
        &self,
        project: &ProjectDescriptor,
        existing: &[u8],
        copyright: &Copyright,
    ) -> CoreResult<LicenseRecord> {
        let resolver = self.resolver();
        let mut records = BTreeMap::new();
        for definition in self.catalog.licenses() {
            let record =
                resolver.resolve(definition.key, copyright.author(), Some(copyright.year()))?;
            records.insert(definition.key.to_string(), record);
        }

        let renderer = self.renderer();
        let mut candidates = BTreeMap::new();
        for (key, descriptor) in ContentPlanner::license_candidates(project, records.values()) {
            let text = renderer.render_to_string(&descriptor)?;
            candidates.insert(key.to_string(), text.into_bytes());
        }

        match reverse_resolve(existing, &candidates).and_then(|key| records.remove(key)) {
            Some(record) => {
                debug!(
                    license = record.key(),
                    template_sha256 = record.content_hash().unwrap_or_default(),
                    "Recognized existing license"
                );
                Ok(record)
            }
            None => {
                info!(
                    sha256 = %content_hash(existing),
                    "Existing LICENSE does not match any known license"
                );
                Ok(LicenseRecord::none(*self.catalog.none(), copyright.clone()))
            }
        }
    }
}

/// Copyright from the root command header, then the LICENSE, then `fallback`.
fn recover_copyright(
    root_source: &[u8],
    license_text: &[u8],
    fallback: &LicenseRequest,
) -> Copyright {
    extract_copyright(&String::from_utf8_lossy(root_source))
        .or_else(|| extract_copyright(&String::from_utf8_lossy(license_text)))
        .unwrap_or_else(|| fallback.copyright())
}
