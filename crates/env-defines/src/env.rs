//! Parsing of `KEY=VALUE` environment files.

use std::{borrow::Cow, collections::HashMap, fs, io, path::Path};
use tracing::{trace, warn};

/// Key/value pairs read from an environment file.
///
/// Keys are unique; when a file assigns the same key twice the later line wins.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EnvTable {
    entries: HashMap<String, String>,
}

impl EnvTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns the value for `key`, or `default` when the key is absent.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Returns the value for `key` only when it is present and non-empty.
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.is_empty())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Reads and parses the file at `path`.
///
/// Never fails: a missing or unreadable file yields an empty table, and bytes
/// that are not valid UTF-8 are replaced so only the affected values change.
pub fn parse(path: &Path) -> EnvTable {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            trace!(path = %path.display(), "no env file, using an empty table");
            return EnvTable::new();
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "unreadable env file, using an empty table");
            return EnvTable::new();
        }
    };

    let text = String::from_utf8_lossy(&bytes);
    if let Cow::Owned(_) = text {
        warn!(path = %path.display(), "env file is not valid UTF-8");
    }

    parse_str(&text)
}

/// Parses environment file contents.
///
/// Blank lines, lines starting with `#` and lines without `=` are skipped.
pub fn parse_str(text: &str) -> EnvTable {
    let mut table = EnvTable::new();

    for (number, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            trace!(line = number + 1, "skipping line without '='");
            continue;
        };

        table.insert(key.trim(), unquote(value.trim()));
    }

    table
}

/// Strips one layer of matching single or double quotes.
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}
