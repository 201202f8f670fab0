//! Workflow tests for cobrakit-core, driven through small in-test adapters.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use cobrakit_core::{
    application::{ApplicationError, GenerationState, GeneratorService, LicenseRequest},
    domain::{BoundData, ProjectDescriptor},
    error::{CoreError, CoreResult},
};

// ============================================================================
// Test adapters
// ============================================================================

#[derive(Clone, Default)]
struct SharedFs(Arc<Mutex<BTreeMap<PathBuf, Vec<u8>>>>);

impl SharedFs {
    fn with_file(self, path: &str, content: &str) -> Self {
        self.0
            .lock()
            .unwrap()
            .insert(PathBuf::from(path), content.as_bytes().to_vec());
        self
    }

    fn text(&self, path: &str) -> Option<String> {
        self.0
            .lock()
            .unwrap()
            .get(Path::new(path))
            .map(|b| String::from_utf8_lossy(b).into_owned())
    }

    fn paths(&self) -> Vec<PathBuf> {
        self.0.lock().unwrap().keys().cloned().collect()
    }
}

impl cobrakit_core::application::Filesystem for SharedFs {
    fn create_dir_all(&self, _path: &Path) -> CoreResult<()> {
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> CoreResult<()> {
        self.0
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.as_bytes().to_vec());
        Ok(())
    }

    fn read_file(&self, path: &Path) -> CoreResult<Vec<u8>> {
        self.0.lock().unwrap().get(path).cloned().ok_or_else(|| {
            ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "not found".into(),
            }
            .into()
        })
    }

    fn exists(&self, path: &Path) -> bool {
        self.is_file(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.0.lock().unwrap().contains_key(path)
    }
}

struct Store;

impl cobrakit_core::application::TemplateStore for Store {
    fn get(&self, name: &str) -> CoreResult<String> {
        Ok(match name {
            "license_mit" => "MIT\n{{copyright}}\n".to_string(),
            "license_apache_2" => "Apache\n".to_string(),
            other => format!("[{other}]{{{{copyright}}}}\n"),
        })
    }

    fn contains(&self, _name: &str) -> bool {
        true
    }

    fn names(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Replaces `{{copyright}}`, and appends the header for sub-commands.
struct Engine;

impl cobrakit_core::application::TemplateEngine for Engine {
    fn render(&self, _name: &str, source: &str, data: &BoundData) -> CoreResult<String> {
        let copyright = match data {
            BoundData::Main(d) => d.license.copyright.clone(),
            BoundData::Root(d) => d.license.copyright.clone(),
            BoundData::License(d) => d.license.copyright.clone(),
            BoundData::SubCommand(d) => d.header.clone().unwrap_or_default(),
        };
        Ok(source.replace("{{copyright}}", &copyright))
    }
}

fn generator(fs: &SharedFs) -> GeneratorService {
    GeneratorService::new(Box::new(Store), Box::new(Engine), Box::new(fs.clone()))
}

// ============================================================================
// Create
// ============================================================================

#[test]
fn create_reports_written_files_in_plan_order() {
    let fs = SharedFs::default();
    let project = ProjectDescriptor::new("/w/app", "example.com/app").unwrap();

    let report = generator(&fs)
        .create_project(project, &LicenseRequest::new("mit", "Jane").with_year("2024"))
        .unwrap();

    assert_eq!(report.state, GenerationState::Done);
    assert_eq!(report.license_key, "mit");
    assert_eq!(
        report.written,
        [
            PathBuf::from("/w/app/LICENSE"),
            PathBuf::from("/w/app/main.go"),
            PathBuf::from("/w/app/cmd/root.go"),
        ]
    );
    assert_eq!(
        fs.text("/w/app/LICENSE").unwrap(),
        "MIT\nCopyright © 2024 Jane\n"
    );
}

#[test]
fn plan_project_writes_nothing() {
    let fs = SharedFs::default();
    let project = ProjectDescriptor::new("/w/app", "").unwrap();

    let plan = generator(&fs)
        .plan_project(project, &LicenseRequest::new("none", "x"))
        .unwrap();

    assert_eq!(plan.len(), 3);
    assert!(plan[0].is_omitted());
    assert!(fs.paths().is_empty());
}

// ============================================================================
// Add command
// ============================================================================

#[test]
fn add_command_in_empty_directory_fails_without_writing() {
    let fs = SharedFs::default();

    let err = generator(&fs)
        .add_command(Path::new("/w/empty"), "server", None, &LicenseRequest::default())
        .unwrap_err();

    let CoreError::Application(ApplicationError::ProjectStructureInvalid { missing, .. }) = err
    else {
        panic!("unexpected error: {err}");
    };
    assert_eq!(missing, ["LICENSE", "cmd/root.go"]);
    assert!(fs.paths().is_empty());
}

#[test]
fn add_command_finds_project_from_a_subdirectory() {
    let fs = SharedFs::default()
        .with_file("/w/app/LICENSE", "MIT\nCopyright © 2022 Ann\n")
        .with_file(
            "/w/app/cmd/root.go",
            "/*\nCopyright © 2022 Ann\n*/\npackage cmd\n",
        );

    let report = generator(&fs)
        .add_command(Path::new("/w/app/cmd"), "serve-http", None, &LicenseRequest::default())
        .unwrap();

    assert_eq!(report.root, PathBuf::from("/w/app"));
    assert_eq!(report.license_key, "mit");
    assert_eq!(
        fs.text("/w/app/cmd/serveHttp.go").unwrap(),
        "[add_command]Copyright © 2022 Ann\n"
    );
}

#[test]
fn unrecognized_license_is_not_an_error() {
    let fs = SharedFs::default()
        .with_file("/w/app/LICENSE", "Proprietary. All rights reserved.\n")
        .with_file("/w/app/cmd/root.go", "package cmd\n");

    let report = generator(&fs)
        .add_command(Path::new("/w/app"), "worker", None, &LicenseRequest::default())
        .unwrap();

    assert_eq!(report.license_key, "none");
    assert_eq!(
        fs.text("/w/app/cmd/worker.go").unwrap(),
        "[add_command_none]\n"
    );
}

#[test]
fn root_collision_is_rejected_before_touching_files() {
    let fs = SharedFs::default();
    let err = generator(&fs)
        .add_command(Path::new("/w/app"), "root", None, &LicenseRequest::default())
        .unwrap_err();
    assert!(matches!(err, CoreError::Domain(_)));
}
