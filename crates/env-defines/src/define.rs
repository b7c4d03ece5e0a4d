use std::fmt;

/// A single compile-time definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Define {
    /// Rendered as a quoted string literal.
    Str { key: String, value: String },
    /// Rendered as a bare token. The value is never parsed.
    Int { key: String, value: String },
}

impl Define {
    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Str {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn int(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Int {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Self::Str { key, .. } | Self::Int { key, .. } => key,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::Str { value, .. } | Self::Int { value, .. } => value,
        }
    }
}

/// Formats as a compiler flag, e.g. `-DDEVICE_ID=\"esp32_001\"` or `-DMQTT_PORT=1883`.
///
/// String values are written verbatim between the escaped quotes. A value that itself
/// contains `"` or `\` produces a broken literal; use the header format for such values,
/// which escapes them.
impl fmt::Display for Define {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str { key, value } => write!(f, "-D{key}=\\\"{value}\\\""),
            Self::Int { key, value } => write!(f, "-D{key}={value}"),
        }
    }
}

/// Receiver for definitions produced by the loader.
///
/// Implemented by whatever owns the build's definition list.
pub trait DefineSink {
    fn append(&mut self, define: Define);
}

impl DefineSink for Vec<Define> {
    fn append(&mut self, define: Define) {
        self.push(define);
    }
}

/// Ordered, append-only list of definitions.
///
/// Duplicate keys are kept as separate entries in the order they were added.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DefineSet {
    defines: Vec<Define>,
}

impl DefineSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the last definition registered for `key`.
    pub fn get(&self, key: &str) -> Option<&Define> {
        self.defines.iter().rev().find(|d| d.key() == key)
    }

    /// Counts every entry registered for `key`, duplicates included.
    pub fn count(&self, key: &str) -> usize {
        self.defines.iter().filter(|d| d.key() == key).count()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Define> {
        self.defines.iter()
    }

    /// Iterates definitions with duplicates collapsed to their last entry,
    /// keeping the position of the first occurrence.
    pub fn resolved(&self) -> impl Iterator<Item = &Define> {
        let mut seen = std::collections::HashSet::new();
        self.defines
            .iter()
            .filter(move |d| seen.insert(d.key()))
            .filter_map(move |d| self.get(d.key()))
    }

    pub fn len(&self) -> usize {
        self.defines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defines.is_empty()
    }
}

impl DefineSink for DefineSet {
    fn append(&mut self, define: Define) {
        self.defines.push(define);
    }
}

impl<'a> IntoIterator for &'a DefineSet {
    type Item = &'a Define;
    type IntoIter = std::slice::Iter<'a, Define>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
