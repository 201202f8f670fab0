//! Command identifiers.
//!
//! A raw name typed on the command line (`serve-http`) becomes a Go
//! identifier (`serveHttp`) that names both the generated file and the
//! `*Cmd` variable inside it.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::error::DomainError;

/// Name of the root command every generated project owns.
pub const ROOT_COMMAND: &str = "root";

/// Go variable a new sub-command is attached to unless told otherwise.
pub const DEFAULT_PARENT: &str = "rootCmd";

/// Drop `-` and `_`, upper-casing the character that follows a run of them.
///
/// Input without either character is returned unchanged. Only ASCII letters
/// change case; every other byte passes through.
///
/// ```
/// use cobrakit_core::domain::normalize_command_name;
///
/// assert_eq!(normalize_command_name("cmd-name"), "cmdName");
/// assert_eq!(normalize_command_name("cmd______Name"), "cmdName");
/// assert_eq!(normalize_command_name("cmdname-"), "cmdname");
/// ```
pub fn normalize_command_name(input: &str) -> String {
    if !input.contains(['-', '_']) {
        return input.to_string();
    }

    let mut out = String::with_capacity(input.len());
    let mut capitalize_next = false;
    for c in input.chars() {
        match c {
            '-' | '_' => capitalize_next = true,
            _ if capitalize_next => {
                out.push(c.to_ascii_uppercase());
                capitalize_next = false;
            }
            _ => out.push(c),
        }
    }
    out
}

/// A normalized, validated sub-command identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CommandName(String);

impl CommandName {
    /// Normalize `raw` and check it can name a Go command variable.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let name = normalize_command_name(raw.trim());
        let invalid = |reason: &str| DomainError::IdentifierInvalid {
            name: raw.to_string(),
            reason: reason.to_string(),
        };

        let mut chars = name.chars();
        let Some(first) = chars.next() else {
            return Err(invalid("name is empty after normalization"));
        };
        if name.eq_ignore_ascii_case(ROOT_COMMAND) {
            return Err(invalid("collides with the root command"));
        }
        if !first.is_alphabetic() {
            return Err(invalid("must start with a letter"));
        }
        if !chars.all(char::is_alphanumeric) {
            return Err(invalid("only letters, digits, '-' and '_' are allowed"));
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `<name>.go`
    pub fn file_name(&self) -> String {
        format!("{}.go", self.0)
    }
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CommandName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for CommandName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("cmd_name", "cmdName")]
    #[case("cmd-Name", "cmdName")]
    #[case("cmd-name", "cmdName")]
    #[case("cmd______Name", "cmdName")]
    #[case("cmd------Name", "cmdName")]
    #[case("cmd------", "cmd")]
    #[case("cmdname-", "cmdname")]
    #[case("plainname", "plainname")]
    #[case("PlainName", "PlainName")]
    #[case("-name", "Name")]
    #[case("--", "")]
    #[case("héllo-wörld", "hélloWörld")]
    #[case("serve-http_v2", "serveHttpV2")]
    fn normalizes(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_command_name(input), expected);
    }

    #[rstest]
    #[case("cmd-name")]
    #[case("a__b--c")]
    #[case("-x-")]
    #[case("plain")]
    fn normalization_is_idempotent(#[case] input: &str) {
        let once = normalize_command_name(input);
        assert_eq!(normalize_command_name(&once), once);
    }

    #[test]
    fn non_ascii_after_elision_is_untouched() {
        assert_eq!(normalize_command_name("a-é"), "aé");
    }

    #[test]
    fn parse_accepts_and_normalizes() {
        let name = CommandName::parse("serve-http").unwrap();
        assert_eq!(name.as_str(), "serveHttp");
        assert_eq!(name.file_name(), "serveHttp.go");
        assert_eq!(name.to_string(), "serveHttp");
    }

    #[rstest]
    #[case("")]
    #[case("---")]
    #[case("root")]
    #[case("Root")]
    #[case("1st")]
    #[case("my.cmd")]
    #[case("has space")]
    fn parse_rejects(#[case] raw: &str) {
        let err = CommandName::parse(raw).unwrap_err();
        assert!(matches!(err, DomainError::IdentifierInvalid { .. }), "{raw}");
    }

    #[test]
    fn from_str_matches_parse() {
        let name: CommandName = "config_get".parse().unwrap();
        assert_eq!(name.as_ref(), "configGet");
    }
}
