//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (applied at the call-site, not here)
//! 2. Environment variables: `COBRAKIT_DEFAULTS__AUTHOR`, `COBRAKIT_OUTPUT__NO_COLOR`, ...
//! 3. Config file: `--config FILE`, else the per-user `config.toml`
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use cobrakit_core::domain::{DEFAULT_AUTHOR, NONE_KEY};

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "COBRAKIT";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Values used when a flag is not given.
    pub defaults: Defaults,
    pub output: OutputConfig,
    pub templates: TemplateConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub author: String,
    pub license: String,
    /// Copyright year; the current year when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Directory of template overrides used when `--templates` is absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_path: Option<PathBuf>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            author: DEFAULT_AUTHOR.into(),
            license: NONE_KEY.into(),
            year: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl AppConfig {
    /// Merge defaults, the config file and the environment.
    ///
    /// An explicit `config_file` must exist; the default location is optional.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.to_path_buf(), true),
            None => (Self::config_path(), false),
        };
        debug!(path = %path.display(), required, "Loading configuration");

        let defaults = Config::try_from(&Self::default())
            .context("failed to seed configuration defaults")?;

        Config::builder()
            .add_source(defaults)
            .add_source(File::from(path.as_path()).format(FileFormat::Toml).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .with_context(|| format!("failed to read configuration from {}", path.display()))?
            .try_deserialize()
            .context("invalid configuration")
    }

    /// Per-user configuration file, falling back to `.cobrakit.toml` in the
    /// current directory when no home directory is known.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "cobrakit", "cobrakit")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".cobrakit.toml"))
    }

    /// Look up a dotted key.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "defaults.author" => self.defaults.author.clone(),
            "defaults.license" => self.defaults.license.clone(),
            "defaults.year" => self.defaults.year.clone().unwrap_or_default(),
            "output.no_color" => self.output.no_color.to_string(),
            "output.format" => self.output.format.clone(),
            "templates.local_path" => self
                .templates
                .local_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            _ => return None,
        };
        Some(value)
    }

    /// Every key [`Self::get`] answers to.
    pub const KEYS: [&'static str; 6] = [
        "defaults.author",
        "defaults.license",
        "defaults.year",
        "output.no_color",
        "output.format",
        "templates.local_path",
    ];
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn defaults_match_generator_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.defaults.license, "none");
        assert_eq!(cfg.defaults.author, DEFAULT_AUTHOR);
        assert!(cfg.defaults.year.is_none());
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[defaults]\nauthor = \"Jane Doe\"\nlicense = \"mit\"\n\n[output]\nno_color = true\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.defaults.author, "Jane Doe");
        assert_eq!(cfg.defaults.license, "mit");
        assert!(cfg.output.no_color);
        assert_eq!(cfg.output.format, "auto");
    }

    #[test]
    fn explicit_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AppConfig::load(Some(&dir.path().join("missing.toml"))).is_err());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[defaults\nauthor = ").unwrap();
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn every_key_resolves() {
        let cfg = AppConfig::default();
        for key in AppConfig::KEYS {
            assert!(cfg.get(key).is_some(), "{key}");
        }
        assert!(cfg.get("defaults.lang").is_none());
    }

    #[test]
    fn serializes_to_toml() {
        let text = toml::to_string_pretty(&AppConfig::default()).unwrap();
        assert!(text.contains("[defaults]"));
        assert!(text.contains("license = \"none\""));
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
