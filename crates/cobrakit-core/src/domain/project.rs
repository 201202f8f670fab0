//! The Go application being generated or extended.

use std::path::{Path, PathBuf};

use crate::domain::{
    error::DomainError,
    identifier::{CommandName, DEFAULT_PARENT},
    license::LicenseRecord,
};

pub const MAIN_FILE: &str = "main.go";
pub const COMMAND_DIR: &str = "cmd";
pub const ROOT_COMMAND_FILE: &str = "root.go";
pub const LICENSE_FILE: &str = "LICENSE";

/// Everything the planner needs to know about the target application.
///
/// Built once per invocation, adjusted through the setters, then handed to
/// the generator. The license starts unresolved; planning without one is an
/// error rather than an implicit `none`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDescriptor {
    root_path: PathBuf,
    module_name: String,
    app_name: String,
    command_name: Option<CommandName>,
    parent_command: String,
    viper: bool,
    license: Option<LicenseRecord>,
}

impl ProjectDescriptor {
    /// Describe the project rooted at `root_path`.
    ///
    /// The application name is the last path segment. An empty `module_name`
    /// falls back to the application name.
    pub fn new(root_path: impl Into<PathBuf>, module_name: impl Into<String>) -> Result<Self, DomainError> {
        let root_path = root_path.into();
        if !root_path.is_absolute() {
            return Err(DomainError::InvalidPath {
                path: root_path.display().to_string(),
                reason: "project root must be an absolute path".into(),
            });
        }

        let app_name = root_path
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| DomainError::MissingApplicationName {
                path: root_path.display().to_string(),
            })?
            .to_string();

        let module_name = module_name.into();
        let module_name = if module_name.trim().is_empty() {
            app_name.clone()
        } else {
            module_name.trim().to_string()
        };

        Ok(Self {
            root_path,
            module_name,
            app_name,
            command_name: None,
            parent_command: DEFAULT_PARENT.to_string(),
            viper: false,
            license: None,
        })
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn command_name(&self) -> Option<&CommandName> {
        self.command_name.as_ref()
    }

    pub fn parent_command(&self) -> &str {
        &self.parent_command
    }

    pub fn viper(&self) -> bool {
        self.viper
    }

    pub fn license(&self) -> Option<&LicenseRecord> {
        self.license.as_ref()
    }

    pub fn set_module_name(&mut self, module_name: impl Into<String>) {
        self.module_name = module_name.into();
    }

    /// Override the derived application name. Blank input is rejected.
    pub fn set_app_name(&mut self, app_name: impl Into<String>) -> Result<(), DomainError> {
        let app_name = app_name.into();
        if app_name.trim().is_empty() {
            return Err(DomainError::MissingApplicationName {
                path: self.root_path.display().to_string(),
            });
        }
        self.app_name = app_name.trim().to_string();
        Ok(())
    }

    pub fn set_command_name(&mut self, name: CommandName) {
        self.command_name = Some(name);
    }

    /// Blank input keeps `rootCmd`.
    pub fn set_parent_command(&mut self, parent: impl Into<String>) {
        let parent = parent.into();
        if !parent.trim().is_empty() {
            self.parent_command = parent.trim().to_string();
        }
    }

    pub fn set_viper(&mut self, viper: bool) {
        self.viper = viper;
    }

    pub fn set_license(&mut self, license: LicenseRecord) {
        self.license = Some(license);
    }

    // ------------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------------

    pub fn main_path(&self) -> PathBuf {
        self.root_path.join(MAIN_FILE)
    }

    pub fn cmd_dir(&self) -> PathBuf {
        self.root_path.join(COMMAND_DIR)
    }

    pub fn root_command_path(&self) -> PathBuf {
        self.cmd_dir().join(ROOT_COMMAND_FILE)
    }

    pub fn license_path(&self) -> PathBuf {
        self.root_path.join(LICENSE_FILE)
    }

    /// `cmd/<name>.go` for the configured sub-command, if any.
    pub fn command_path(&self) -> Option<PathBuf> {
        self.command_name
            .as_ref()
            .map(|name| self.cmd_dir().join(name.file_name()))
    }
}
