//! `cobrakit licenses` - list the license catalog.

use serde::Serialize;

use cobrakit_core::domain::{LicenseCatalog, LicenseDefinition};

use crate::{
    cli::{LicensesArgs, ListFormat},
    error::CliResult,
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct LicenseEntry {
    key: &'static str,
    name: &'static str,
    aliases: &'static [&'static str],
}

impl From<&LicenseDefinition> for LicenseEntry {
    fn from(def: &LicenseDefinition) -> Self {
        Self {
            key: def.key,
            name: def.name,
            aliases: def.aliases,
        }
    }
}

pub fn execute(args: LicensesArgs, output: OutputManager) -> CliResult<()> {
    let catalog = LicenseCatalog::builtin();
    let entries: Vec<LicenseEntry> = catalog.entries().iter().map(LicenseEntry::from).collect();

    // `--output-format json` wins over the default table.
    let format = if output.is_json() { ListFormat::Json } else { args.format };

    match format {
        ListFormat::Table => {
            output.header("Available licenses:")?;
            for line in table_lines(&entries) {
                output.print(&line)?;
            }
        }
        ListFormat::List => {
            for entry in &entries {
                output.print(entry.key)?;
            }
        }
        ListFormat::Json => output.json(&entries)?,
    }
    Ok(())
}

fn table_lines(entries: &[LicenseEntry]) -> Vec<String> {
    let key_width = entries.iter().map(|e| e.key.len()).max().unwrap_or(0);
    let name_width = entries.iter().map(|e| e.name.len()).max().unwrap_or(0);
    entries
        .iter()
        .map(|e| {
            format!(
                "  {:key_width$}  {:name_width$}  {}",
                e.key,
                e.name,
                e.aliases.join(", ")
            )
            .trim_end()
            .to_string()
        })
        .collect()
}
