//! `cobrakit init` - create a new Cobra application.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, instrument, warn};

use cobrakit_core::{
    application::{GenerationReport, LicenseRequest},
    domain::{LicenseCatalog, PlannedContent, ProjectDescriptor},
    error::CoreError,
};

use crate::{
    cli::InitArgs,
    config::AppConfig,
    error::{CliError, CliResult, IoContext},
    gomod,
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct InitSummary<'a> {
    root: &'a Path,
    module: &'a str,
    license: &'a str,
    dry_run: bool,
    written: Vec<&'a Path>,
    skipped: Vec<&'a Path>,
}

#[instrument(skip_all)]
pub fn execute(args: InitArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let cwd = std::env::current_dir().io_context(|| "failed to read the current directory")?;
    let target = resolve_target(&cwd, args.path.as_deref());

    let module = match &args.module {
        Some(module) => module.clone(),
        None => gomod::import_path(&target)?,
    };
    let mut project = ProjectDescriptor::new(&target, module.clone()).map_err(CoreError::from)?;
    if let Some(app_name) = &args.app_name {
        project.set_app_name(app_name.as_str()).map_err(CoreError::from)?;
    }
    project.set_viper(args.viper);

    let request = license_request(&args, &config);
    check_license_key(&request.key, &output)?;

    let generator = super::build_generator(args.templates.as_deref(), &config)?;

    if args.dry_run {
        let plan = generator.plan_project(project, &request)?;
        return print_plan(&target, &module, &request.key, &plan, &output);
    }

    confirm_overwrite(&project, args.yes, &output)?;

    info!(root = %target.display(), module = %module, "Initializing application");
    let report = generator.create_project(project, &request)?;
    print_report(&module, &report, &output)
}

/// `.` or nothing means `cwd`; anything else is joined onto it.
pub fn resolve_target(cwd: &Path, path: Option<&Path>) -> PathBuf {
    match path {
        None => cwd.to_path_buf(),
        Some(p) if p == Path::new(".") => cwd.to_path_buf(),
        Some(p) => cwd.join(p),
    }
}

/// Flags first, then configuration.
fn license_request(args: &InitArgs, config: &AppConfig) -> LicenseRequest {
    LicenseRequest {
        key: args
            .license
            .clone()
            .unwrap_or_else(|| config.defaults.license.clone()),
        author: args
            .author
            .clone()
            .unwrap_or_else(|| config.defaults.author.clone()),
        year: args.year.clone().or_else(|| config.defaults.year.clone()),
    }
}

/// Unknown keys fall back to `none`; say so, and point at the closest match.
fn check_license_key(key: &str, output: &OutputManager) -> CliResult<()> {
    let catalog = LicenseCatalog::builtin();
    if catalog.find(key).is_some() {
        return Ok(());
    }

    warn!(license = key, "Unknown license key, generating without a license");
    let hint = catalog
        .suggest(key)
        .map(|d| format!(" Did you mean '{}'?", d.key))
        .unwrap_or_default();
    output.warning(&format!(
        "Unknown license '{key}', the project will have no license.{hint}"
    ))?;
    Ok(())
}

fn confirm_overwrite(project: &ProjectDescriptor, yes: bool, output: &OutputManager) -> CliResult<()> {
    let existing: Vec<PathBuf> = [
        project.main_path(),
        project.root_command_path(),
        project.license_path(),
    ]
    .into_iter()
    .filter(|p| p.is_file())
    .collect();

    if existing.is_empty() || yes {
        return Ok(());
    }

    let listing = existing
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");

    if prompt_overwrite(&listing)? {
        output.warning(&format!("Overwriting {listing}"))?;
        Ok(())
    } else {
        Err(CliError::Cancelled)
    }
}

#[cfg(feature = "interactive")]
fn prompt_overwrite(listing: &str) -> CliResult<bool> {
    use std::io::IsTerminal as _;

    if !(std::io::stdin().is_terminal() && std::io::stderr().is_terminal()) {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(format!("{listing} already exist. Overwrite?"))
        .default(false)
        .interact()
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation".into(),
            source: std::io::Error::other(e),
        })
}

#[cfg(not(feature = "interactive"))]
fn prompt_overwrite(_listing: &str) -> CliResult<bool> {
    Ok(true)
}

fn print_plan(
    root: &Path,
    module: &str,
    license: &str,
    plan: &[PlannedContent],
    output: &OutputManager,
) -> CliResult<()> {
    if output.is_json() {
        let summary = InitSummary {
            root,
            module,
            license,
            dry_run: true,
            written: plan
                .iter()
                .filter(|p| !p.is_omitted())
                .map(PlannedContent::target_path)
                .collect(),
            skipped: plan
                .iter()
                .filter(|p| p.is_omitted())
                .map(PlannedContent::target_path)
                .collect(),
        };
        output.json(&summary)?;
        return Ok(());
    }

    output.header(&format!("Would create {} ({module})", root.display()))?;
    for planned in plan {
        match planned {
            PlannedContent::Rendered(descriptor) => output.print(&format!(
                "  write  {}  [{}]",
                descriptor.target_path.display(),
                descriptor.template_name
            ))?,
            PlannedContent::Omitted {
                target_path,
                reason,
                ..
            } => output.print(&format!("  skip   {}  ({reason})", target_path.display()))?,
        }
    }
    Ok(())
}

fn print_report(module: &str, report: &GenerationReport, output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        let summary = InitSummary {
            root: &report.root,
            module,
            license: report.license_key,
            dry_run: false,
            written: report.written.iter().map(PathBuf::as_path).collect(),
            skipped: Vec::new(),
        };
        output.json(&summary)?;
        return Ok(());
    }

    for (kind, reason) in &report.omitted {
        output.info(&format!("Skipped {kind}: {reason}"))?;
    }
    output.print(&format!(
        "Your Cobra application is ready at\n{}",
        report.root.display()
    ))?;
    Ok(())
}
