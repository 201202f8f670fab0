//! CLI argument definitions using the clap derive API.
//!
//! This module is the only place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name     = "cobrakit",
    bin_name = "cobrakit",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Cobra application generator",
    long_about = "cobrakit bootstraps Go command-line applications built on \
                  spf13/cobra: main.go, cmd/root.go, a LICENSE, and one file \
                  per added command.",
    after_help = "EXAMPLES:\n\
        \x20 cobrakit init my-app --license mit --author \"Jane Doe\"\n\
        \x20 cobrakit add serve\n\
        \x20 cobrakit add config-get --parent serveCmd\n\
        \x20 cobrakit completions bash > /usr/share/bash-completion/completions/cobrakit",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Initialize a Cobra application.
    #[command(
        visible_aliases = ["initialize", "initialise", "create"],
        about = "Initialize a Cobra application",
        long_about = "Initialize (cobrakit init) creates a new Cobra application \
                      with the appropriate structure for a Cobra-based CLI. \
                      It must be run inside a Go module unless --module is given.",
        after_help = "EXAMPLES:\n\
            \x20 cobrakit init                 # current directory\n\
            \x20 cobrakit init my-app          # ./my-app\n\
            \x20 cobrakit init --license apache2 --author \"ACME Corp\" --viper"
    )]
    Init(InitArgs),

    /// Add a command to a Cobra application.
    #[command(
        visible_alias = "command",
        about = "Add a command to a Cobra application",
        long_about = "Add (cobrakit add) creates cmd/<name>.go in the project \
                      containing the current directory. Names are camelCased: \
                      `serve-http` becomes `serveHttp`.",
        after_help = "EXAMPLES:\n\
            \x20 cobrakit add serve\n\
            \x20 cobrakit add get-value --parent configCmd"
    )]
    Add(AddArgs),

    /// List the licenses `init --license` accepts.
    #[command(visible_alias = "ls", about = "List available licenses")]
    Licenses(LicensesArgs),

    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 cobrakit completions bash > ~/.local/share/bash-completion/completions/cobrakit\n\
            \x20 cobrakit completions zsh  > ~/.zfunc/_cobrakit\n\
            \x20 cobrakit completions fish > ~/.config/fish/completions/cobrakit.fish"
    )]
    Completions(CompletionsArgs),

    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 cobrakit config get defaults.author\n\
            \x20 cobrakit config list\n\
            \x20 cobrakit config init"
    )]
    Config(ConfigCommands),
}

// ── init ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Where to create the application. `.` or nothing means the current
    /// directory; anything else is taken relative to it.
    #[arg(value_name = "PATH", help = "Application directory")]
    pub path: Option<PathBuf>,

    #[arg(short = 'a', long = "author", value_name = "NAME", help = "Author name for the copyright line")]
    pub author: Option<String>,

    #[arg(short = 'l', long = "license", value_name = "KEY", help = "License key (see `cobrakit licenses`)")]
    pub license: Option<String>,

    #[arg(long = "year", value_name = "YEAR", help = "Copyright year (default: current year)")]
    pub year: Option<String>,

    /// Go module path. Discovered from the nearest go.mod when omitted.
    #[arg(short = 'm', long = "module", value_name = "MODULE", help = "Go module path")]
    pub module: Option<String>,

    #[arg(long = "app-name", value_name = "NAME", help = "Application name (default: directory name)")]
    pub app_name: Option<String>,

    #[arg(long = "viper", help = "Use Viper for configuration")]
    pub viper: bool,

    #[arg(long = "dry-run", help = "Show what would be created without writing")]
    pub dry_run: bool,

    #[arg(short = 'y', long = "yes", help = "Overwrite existing files without asking")]
    pub yes: bool,

    /// Directory of `<name>.tmpl` files overriding the built-in templates.
    #[arg(long = "templates", value_name = "DIR", help = "Template override directory")]
    pub templates: Option<PathBuf>,
}

// ── add ───────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(value_name = "NAME", help = "Command name")]
    pub name: String,

    /// Variable name of the parent command.
    #[arg(short = 'p', long = "parent", value_name = "VAR", default_value = "rootCmd", help = "Parent command variable")]
    pub parent: String,

    /// Directory inside the project. Defaults to the current directory.
    #[arg(long = "path", value_name = "DIR", help = "Directory inside the project")]
    pub path: Option<PathBuf>,

    #[arg(short = 'a', long = "author", value_name = "NAME", help = "Author used when no copyright line is found")]
    pub author: Option<String>,

    #[arg(long = "year", value_name = "YEAR", help = "Year used when no copyright line is found")]
    pub year: Option<String>,

    #[arg(long = "templates", value_name = "DIR", help = "Template override directory")]
    pub templates: Option<PathBuf>,
}

// ── licenses ──────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LicensesArgs {
    #[arg(long = "format", value_enum, default_value = "table", help = "Output format")]
    pub format: ListFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Aligned key, name and aliases.
    Table,
    /// One key per line.
    List,
    /// JSON array.
    Json,
}

// ── completions ───────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.author`.
        key: String,
    },
    /// Print the effective configuration as TOML.
    List,
    /// Print the path of the configuration file in use.
    Path,
    /// Write a default configuration file.
    Init {
        #[arg(short = 'f', long = "force", help = "Overwrite an existing file")]
        force: bool,
    },
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn init_defaults() {
        let cli = Cli::parse_from(["cobrakit", "init"]);
        let Commands::Init(args) = cli.command else {
            panic!("expected init");
        };
        assert!(args.path.is_none());
        assert!(args.license.is_none());
        assert!(!args.viper);
    }

    #[test]
    fn init_aliases() {
        for alias in ["initialize", "initialise", "create"] {
            let cli = Cli::parse_from(["cobrakit", alias, "app"]);
            assert!(matches!(cli.command, Commands::Init(_)), "{alias}");
        }
    }

    #[test]
    fn add_parent_defaults_to_root() {
        let cli = Cli::parse_from(["cobrakit", "add", "serve"]);
        let Commands::Add(args) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(args.name, "serve");
        assert_eq!(args.parent, "rootCmd");
    }

    #[test]
    fn add_alias_and_short_parent() {
        let cli = Cli::parse_from(["cobrakit", "command", "get", "-p", "configCmd"]);
        let Commands::Add(args) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(args.parent, "configCmd");
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["cobrakit", "--quiet", "--verbose", "licenses"]);
        assert!(result.is_err());
    }

    #[test]
    fn config_init_force() {
        let cli = Cli::parse_from(["cobrakit", "config", "init", "--force"]);
        assert!(matches!(
            cli.command,
            Commands::Config(ConfigCommands::Init { force: true })
        ));
    }

    #[test]
    fn output_format_from_config() {
        assert_eq!(OutputFormat::from_config("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_config("fancy"), None);
    }
}
