//! Text inspection of previously generated files.
//!
//! cobrakit never parses Go. It only recognizes the two shapes it writes
//! itself: a leading `/* ... */` license header in front of the package
//! clause, and a `Copyright © <year> <author>` line.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex_lite::Regex;

use crate::domain::license::Copyright;

static COPYRIGHT_LINE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^Copyright © (\d{4})\s+(.+?)\s*$").ok());

/// Convert every CRLF pair to LF. Borrows when there is nothing to convert.
pub fn normalize_line_endings(bytes: &[u8]) -> Cow<'_, [u8]> {
    if !bytes.windows(2).any(|w| w == b"\r\n") {
        return Cow::Borrowed(bytes);
    }

    let mut out = Vec::with_capacity(bytes.len());
    let mut iter = bytes.iter().peekable();
    while let Some(&b) = iter.next() {
        if b == b'\r' && iter.peek() == Some(&&b'\n') {
            continue;
        }
        out.push(b);
    }
    Cow::Owned(out)
}

/// Trimmed interior of a block comment that opens the file and sits directly
/// in front of the `package` clause.
///
/// Returns `None` when the file does not start with `/*`, the comment is not
/// closed, something other than whitespace separates it from `package`, or
/// the comment is empty.
pub fn leading_block_comment(source: &str) -> Option<&str> {
    let body = source.trim_start_matches('\u{feff}').trim_start().strip_prefix("/*")?;
    let end = body.find("*/")?;

    let after = body[end + 2..].trim_start();
    let is_package_clause = after
        .strip_prefix("package")
        .is_some_and(|rest| rest.starts_with(char::is_whitespace));
    if !is_package_clause {
        return None;
    }

    let interior = body[..end].trim();
    (!interior.is_empty()).then_some(interior)
}

/// First `Copyright © <year> <author>` line in `text`.
pub fn extract_copyright(text: &str) -> Option<Copyright> {
    let re = COPYRIGHT_LINE.as_ref()?;
    text.lines().find_map(|line| {
        let caps = re.captures(line.trim_start())?;
        Some(Copyright::new(&caps[1], &caps[2]))
    })
}
