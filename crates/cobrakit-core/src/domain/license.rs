//! License catalog, copyright lines and resolved license records.
//!
//! The catalog is a constant table. It is wrapped in [`LicenseCatalog`], a
//! `Copy` handle that services receive at construction time, so nothing in
//! the crate reaches for global state.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::domain::{error::DomainError, source_text::normalize_line_endings};

/// Key of the catalog entry that stands for "no license".
pub const NONE_KEY: &str = "none";

/// Author used when neither the command line nor the config supply one.
pub const DEFAULT_AUTHOR: &str = "NAME HERE <EMAIL ADDRESS>";

/// Static description of one licensing option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LicenseDefinition {
    /// Identifier accepted on the command line and in config (`"apache2"`).
    pub key: &'static str,
    /// Slug used to locate template resources (`"apache_2"`).
    pub code: &'static str,
    /// Human readable name.
    pub name: &'static str,
    /// Alternative spellings users tend to type.
    pub aliases: &'static [&'static str],
}

impl LicenseDefinition {
    pub fn is_none(&self) -> bool {
        self.key == NONE_KEY
    }

    /// Template holding the full license text (`license_<code>`).
    pub fn body_template(&self) -> String {
        format!("license_{}", self.code)
    }

    /// Template holding the source-file header (`header_<code>`).
    pub fn header_template(&self) -> String {
        format!("header_{}", self.code)
    }

    fn answers_to(&self, input: &str) -> bool {
        self.key.eq_ignore_ascii_case(input)
            || self.code.eq_ignore_ascii_case(input)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(input))
    }
}

const NONE_LICENSE: LicenseDefinition = LicenseDefinition {
    key: NONE_KEY,
    code: "none",
    name: "None",
    aliases: &["none", "false"],
};

static BUILTIN_LICENSES: [LicenseDefinition; 9] = [
    LicenseDefinition {
        key: "apache2",
        code: "apache_2",
        name: "Apache 2.0",
        aliases: &[
            "Apache-2.0",
            "apache",
            "apache20",
            "apache 2.0",
            "apache2.0",
            "apache-2.0",
        ],
    },
    LicenseDefinition {
        key: "mit",
        code: "mit",
        name: "MIT License",
        aliases: &["MIT", "mit"],
    },
    LicenseDefinition {
        key: "bsd-3",
        code: "bsd_clause_3",
        name: "NewBSD",
        aliases: &["BSD-3-Clause", "bsd", "newbsd", "3 clause bsd", "3-clause bsd"],
    },
    LicenseDefinition {
        key: "bsd-2",
        code: "bsd_clause_2",
        name: "Simplified BSD License",
        aliases: &[
            "BSD-2-Clause",
            "freebsd",
            "simpbsd",
            "simple bsd",
            "2-clause bsd",
            "2 clause bsd",
            "simplified bsd license",
        ],
    },
    LicenseDefinition {
        key: "gpl-2",
        code: "gpl_2",
        name: "GNU General Public License 2.0",
        aliases: &["GPL-2.0", "gpl2", "gnu gpl2", "gplv2"],
    },
    LicenseDefinition {
        key: "gpl-3",
        code: "gpl_3",
        name: "GNU General Public License 3.0",
        aliases: &["GPL-3.0", "gpl3", "gplv3", "gpl", "gnu gpl3", "gnu gpl"],
    },
    LicenseDefinition {
        key: "lgpl",
        code: "lgpl",
        name: "GNU Lesser General Public License",
        aliases: &["LGPL-3.0", "lgpl", "lesser gpl", "gnu lgpl"],
    },
    LicenseDefinition {
        key: "agpl",
        code: "agpl",
        name: "GNU Affero General Public License",
        aliases: &["AGPL-3.0", "agpl", "affero gpl", "gnu agpl"],
    },
    NONE_LICENSE,
];

/// Read-only registry of the licenses cobrakit knows about.
#[derive(Debug, Clone, Copy)]
pub struct LicenseCatalog {
    entries: &'static [LicenseDefinition],
}

impl LicenseCatalog {
    /// The nine built-in entries (eight licenses plus `none`).
    pub fn builtin() -> Self {
        Self {
            entries: &BUILTIN_LICENSES,
        }
    }

    pub fn entries(&self) -> &'static [LicenseDefinition] {
        self.entries
    }

    /// Every entry except `none`, in catalog order.
    pub fn licenses(&self) -> impl Iterator<Item = &'static LicenseDefinition> {
        self.entries.iter().filter(|d| !d.is_none())
    }

    /// Exact, case-sensitive key lookup. Aliases are not consulted.
    pub fn find(&self, key: &str) -> Option<&'static LicenseDefinition> {
        self.entries.iter().find(|d| d.key == key)
    }

    pub fn get(&self, key: &str) -> Result<&'static LicenseDefinition, DomainError> {
        self.find(key).ok_or_else(|| DomainError::UnknownLicense { key: key.into() })
    }

    /// The `none` entry.
    pub fn none(&self) -> &'static LicenseDefinition {
        self.find(NONE_KEY).unwrap_or(&NONE_LICENSE)
    }

    /// Best guess for a key the user probably meant, matching keys, codes and
    /// aliases case-insensitively.
    pub fn suggest(&self, input: &str) -> Option<&'static LicenseDefinition> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        self.entries.iter().find(|d| d.answers_to(input))
    }
}

impl Default for LicenseCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// `Copyright © <year> <author>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Copyright {
    year: String,
    author: String,
}

impl Copyright {
    pub fn new(year: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            year: year.into(),
            author: author.into(),
        }
    }

    /// Copyright for `author`, dated with `year` or the current calendar year.
    pub fn dated(year: Option<&str>, author: &str) -> Self {
        match year.map(str::trim).filter(|y| !y.is_empty()) {
            Some(year) => Self::new(year, author),
            None => Self::new(current_year(), author),
        }
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn line(&self) -> String {
        format!("Copyright © {} {}", self.year, self.author)
    }
}

impl fmt::Display for Copyright {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Copyright © {} {}", self.year, self.author)
    }
}

/// Current calendar year in local time, e.g. `"2026"`.
pub fn current_year() -> String {
    chrono::Local::now().format("%Y").to_string()
}

/// A license resolved for one request: catalog metadata plus the texts loaded
/// from the template store and a copyright line for the requesting author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseRecord {
    definition: LicenseDefinition,
    header_text: String,
    body_text: String,
    copyright: Copyright,
    content_hash: Option<String>,
}

impl LicenseRecord {
    /// Record for the `none` entry: no texts, no digest.
    pub fn none(definition: LicenseDefinition, copyright: Copyright) -> Self {
        Self {
            definition,
            header_text: String::new(),
            body_text: String::new(),
            copyright,
            content_hash: None,
        }
    }

    pub fn new(
        definition: LicenseDefinition,
        copyright: Copyright,
        header_text: impl Into<String>,
        body_text: impl Into<String>,
    ) -> Self {
        let body_text = body_text.into();
        let content_hash = Some(content_hash(body_text.as_bytes()));
        Self {
            definition,
            header_text: header_text.into(),
            body_text,
            copyright,
            content_hash,
        }
    }

    pub fn key(&self) -> &'static str {
        self.definition.key
    }

    pub fn code(&self) -> &'static str {
        self.definition.code
    }

    pub fn name(&self) -> &'static str {
        self.definition.name
    }

    pub fn aliases(&self) -> &'static [&'static str] {
        self.definition.aliases
    }

    pub fn definition(&self) -> &LicenseDefinition {
        &self.definition
    }

    pub fn is_none(&self) -> bool {
        self.definition.is_none()
    }

    pub fn header_text(&self) -> &str {
        &self.header_text
    }

    pub fn body_text(&self) -> &str {
        &self.body_text
    }

    pub fn copyright(&self) -> &Copyright {
        &self.copyright
    }

    pub fn copyright_line(&self) -> String {
        self.copyright.line()
    }

    /// Hex SHA-256 of the LF-normalized body; `None` for the `none` record.
    pub fn content_hash(&self) -> Option<&str> {
        self.content_hash.as_deref()
    }
}

/// Lowercase hex SHA-256 of `bytes` after CRLF -> LF normalization.
pub fn content_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(normalize_line_endings(bytes));
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Find which candidate body an existing license file was produced from.
///
/// Both sides are compared after CRLF -> LF normalization and the first
/// byte-exact match wins. `None` means the file carries an unrecognized
/// license, which callers must not treat as an error.
pub fn reverse_resolve<'a>(
    existing: &[u8],
    candidates: &'a BTreeMap<String, Vec<u8>>,
) -> Option<&'a str> {
    let existing = normalize_line_endings(existing);
    candidates
        .iter()
        .find(|(_, body)| normalize_line_endings(body) == existing)
        .map(|(key, _)| key.as_str())
}
