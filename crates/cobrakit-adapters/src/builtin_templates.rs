//! Built-in template resources.
//!
//! Every template ships inside the binary via `include_str!`, keyed by the
//! logical name the planner and resolver ask for:
//!
//! - `main`, `root`, `add_command`: code files carrying the license header
//! - `main_none`, `root_none`, `add_command_none`: the same files without one
//! - `license_<code>`: full license text, `{{ license.copyright }}` available
//! - `header_<code>`: notice placed in source-file headers
//!
//! Templates use tera syntax with autoescaping disabled.

macro_rules! builtin {
    ($($name:literal),+ $(,)?) => {
        &[$(($name, include_str!(concat!("../templates/", $name, ".tmpl")))),+]
    };
}

/// `(name, source)` for every built-in template.
pub static BUILTIN_TEMPLATES: &[(&str, &str)] = builtin![
    "main",
    "main_none",
    "root",
    "root_none",
    "add_command",
    "add_command_none",
    "license_apache_2",
    "header_apache_2",
    "license_mit",
    "header_mit",
    "license_bsd_clause_3",
    "header_bsd_clause_3",
    "license_bsd_clause_2",
    "header_bsd_clause_2",
    "license_gpl_2",
    "header_gpl_2",
    "license_gpl_3",
    "header_gpl_3",
    "license_lgpl",
    "header_lgpl",
    "license_agpl",
    "header_agpl",
];

/// Look up a built-in template by name.
pub fn builtin(name: &str) -> Option<&'static str> {
    BUILTIN_TEMPLATES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, source)| *source)
}
