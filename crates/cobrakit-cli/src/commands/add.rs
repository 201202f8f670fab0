//! `cobrakit add` - add a command file to an existing application.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::instrument;

use cobrakit_core::{
    application::LicenseRequest,
    domain::{CommandName, NONE_KEY},
    error::CoreError,
};

use crate::{
    cli::AddArgs,
    config::AppConfig,
    error::{CliResult, IoContext},
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct AddSummary<'a> {
    command: &'a str,
    parent: &'a str,
    root: &'a Path,
    file: Option<&'a Path>,
    license: &'a str,
}

#[instrument(skip_all, fields(name = %args.name))]
pub fn execute(args: AddArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    // Fail on a bad name before looking for the project.
    let name = CommandName::parse(&args.name).map_err(CoreError::from)?;

    let cwd = std::env::current_dir().io_context(|| "failed to read the current directory")?;
    let start = start_dir(&cwd, args.path.as_deref());

    let fallback = LicenseRequest {
        key: NONE_KEY.into(),
        author: args.author.unwrap_or(config.defaults.author.clone()),
        year: args.year.or(config.defaults.year.clone()),
    };

    let generator = super::build_generator(args.templates.as_deref(), &config)?;
    let report = generator.add_command(&start, name.as_str(), Some(args.parent.as_str()), &fallback)?;

    if output.is_json() {
        output.json(&AddSummary {
            command: name.as_str(),
            parent: &args.parent,
            root: &report.root,
            file: report.written.first().map(PathBuf::as_path),
            license: report.license_key,
        })?;
        return Ok(());
    }

    output.print(&format!("{name} created at {}", report.root.display()))?;
    Ok(())
}

/// `--path` relative to `cwd`, or `cwd` itself.
fn start_dir(cwd: &Path, path: Option<&Path>) -> PathBuf {
    path.map(|p| cwd.join(p)).unwrap_or_else(|| cwd.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_dir_defaults_to_cwd() {
        assert_eq!(start_dir(Path::new("/w"), None), PathBuf::from("/w"));
        assert_eq!(start_dir(Path::new("/w"), Some(Path::new("app/cmd"))), PathBuf::from("/w/app/cmd"));
        assert_eq!(start_dir(Path::new("/w"), Some(Path::new("/abs"))), PathBuf::from("/abs"));
    }
}
