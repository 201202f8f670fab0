//! Go module discovery from `go.mod` text.
//!
//! Only the `module` directive is read; the go toolchain is never invoked.

use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::error::{CliError, CliResult, IoContext};

pub const GO_MOD: &str = "go.mod";

/// A `go.mod` found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoModule {
    /// Module path from the `module` directive.
    pub path: String,
    /// Directory containing `go.mod`.
    pub dir: PathBuf,
}

impl GoModule {
    /// Import path of the package in `dir`, which must lie inside the module.
    pub fn import_path_for(&self, dir: &Path) -> String {
        let Ok(relative) = dir.strip_prefix(&self.dir) else {
            return self.path.clone();
        };
        let segments: Vec<_> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => Some(s.to_string_lossy()),
                _ => None,
            })
            .collect();
        if segments.is_empty() {
            self.path.clone()
        } else {
            format!("{}/{}", self.path, segments.join("/"))
        }
    }
}

/// Nearest `go.mod` at or above `start` that declares a module.
pub fn find_module(start: &Path) -> CliResult<Option<GoModule>> {
    for dir in start.ancestors() {
        let candidate = dir.join(GO_MOD);
        if !candidate.is_file() {
            continue;
        }
        let text = std::fs::read_to_string(&candidate)
            .io_context(|| format!("failed to read {}", candidate.display()))?;
        match parse_module_directive(&text) {
            Some(path) => {
                debug!(go_mod = %candidate.display(), module = %path, "Found Go module");
                return Ok(Some(GoModule {
                    path,
                    dir: dir.to_path_buf(),
                }));
            }
            None => debug!(go_mod = %candidate.display(), "go.mod has no module directive"),
        }
    }
    Ok(None)
}

/// Import path for a project rooted at `dir`: the enclosing module path
/// joined with `dir`'s location inside the module.
pub fn import_path(dir: &Path) -> CliResult<String> {
    find_module(dir)?
        .map(|module| module.import_path_for(dir))
        .ok_or_else(|| CliError::ModuleNotFound {
            path: dir.to_path_buf(),
        })
}

/// Value of the `module` directive, without quotes or trailing comment.
pub fn parse_module_directive(text: &str) -> Option<String> {
    text.lines().find_map(|line| {
        let line = line.split("//").next().unwrap_or_default().trim();
        let rest = line.strip_prefix("module")?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let value = rest.trim().trim_matches(|c| c == '"' || c == '`');
        (!value.is_empty()).then(|| value.to_string())
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn parses_plain_and_quoted_directives() {
        assert_eq!(
            parse_module_directive("module example.com/app\n\ngo 1.22\n").as_deref(),
            Some("example.com/app")
        );
        assert_eq!(
            parse_module_directive("// comment\nmodule \"example.com/q\" // trailing\n").as_deref(),
            Some("example.com/q")
        );
    }

    #[test]
    fn ignores_lookalike_lines() {
        assert!(parse_module_directive("modules x\ngo 1.22\n").is_none());
        assert!(parse_module_directive("// module example.com/app\n").is_none());
        assert!(parse_module_directive("module\n").is_none());
    }

    #[test]
    fn import_path_appends_relative_directory() {
        let module = GoModule {
            path: "example.com/mono".into(),
            dir: PathBuf::from("/src/mono"),
        };
        assert_eq!(module.import_path_for(Path::new("/src/mono")), "example.com/mono");
        assert_eq!(
            module.import_path_for(Path::new("/src/mono/tools/cli")),
            "example.com/mono/tools/cli"
        );
    }

    #[test]
    fn finds_nearest_go_mod_for_missing_directory() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join(GO_MOD), "module example.com/root\n").unwrap();

        // The project directory does not exist yet.
        let target = temp.path().join("apps").join("hello");
        assert_eq!(import_path(&target).unwrap(), "example.com/root/apps/hello");
    }

    #[test]
    fn no_go_mod_is_module_not_found() {
        let temp = tempfile::tempdir().unwrap();
        let err = import_path(&temp.path().join("x")).unwrap_err();
        assert!(matches!(err, CliError::ModuleNotFound { .. }));
    }
}
