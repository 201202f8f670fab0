//! `cobrakit config` - inspect and initialise configuration.

use std::path::{Path, PathBuf};

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult, IoContext},
    output::OutputManager,
};

/// `config_file` is the `--config` value, when given.
pub fn execute(
    cmd: ConfigCommands,
    config_file: Option<&Path>,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let path = active_path(config_file);

    match cmd {
        ConfigCommands::Get { key } => {
            let value = config.get(&key).ok_or_else(|| {
                CliError::invalid_input(format!(
                    "unknown config key '{key}' (known keys: {})",
                    AppConfig::KEYS.join(", ")
                ))
            })?;
            output.print(&value)?;
        }

        ConfigCommands::List => {
            if output.is_json() {
                output.json(&config)?;
            } else {
                output.header(&format!("# {}", path.display()))?;
                output.print(to_toml(&config)?.trim_end())?;
            }
        }

        ConfigCommands::Path => {
            output.print(&path.display().to_string())?;
        }

        ConfigCommands::Init { force } => {
            if path.exists() && !force {
                output.warning(&format!(
                    "Config already exists at {} (use --force to overwrite)",
                    path.display(),
                ))?;
                return Ok(());
            }
            write_default(&path)?;
            output.success(&format!("Configuration created at {}", path.display()))?;
        }
    }

    Ok(())
}

fn active_path(config_file: Option<&Path>) -> PathBuf {
    config_file
        .map(Path::to_path_buf)
        .unwrap_or_else(AppConfig::config_path)
}

fn to_toml(config: &AppConfig) -> CliResult<String> {
    toml::to_string_pretty(config).map_err(|e| CliError::config("failed to serialise config", e))
}

fn write_default(path: &Path) -> CliResult<()> {
    let text = to_toml(&AppConfig::default())?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .io_context(|| format!("failed to create config directory '{}'", parent.display()))?;
    }
    std::fs::write(path, text)
        .io_context(|| format!("failed to write config to '{}'", path.display()))
}
