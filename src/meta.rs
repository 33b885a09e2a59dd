//! Annotation parsing.
//!
//! Registration calls carry their metadata as free-form text: a
//! comma-separated annotation string per member, and a C-style parameter
//! list per function. Both parsers are best-effort and never fail; malformed
//! tokens degrade to whatever key or type text can still be extracted.

use indexmap::IndexMap;

/// Parsed key/value annotations attached to a property or function.
///
/// Built once from a raw annotation string and immutable afterward. An entry
/// with an empty value is a bare flag (`"Transient"`); an entry with a value
/// came from a `key = value` token (`"Category = Combat"`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSet {
    data: IndexMap<String, String>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw annotation string such as `"EditAnywhere, Category = Combat"`.
    ///
    /// Tokens are split on `,`, then on the first `=`. Keys and values are
    /// trimmed on both sides. A token without `=` becomes a flag with an
    /// empty value. Empty tokens (trailing commas, stray whitespace) are
    /// dropped. A duplicated key keeps the later value.
    pub fn parse(raw: &str) -> Self {
        let mut data = IndexMap::new();
        for token in raw.split(',') {
            match token.split_once('=') {
                Some((key, value)) => {
                    let key = key.trim();
                    if key.is_empty() {
                        continue;
                    }
                    data.insert(key.to_string(), value.trim().to_string());
                }
                None => {
                    let flag = token.trim();
                    if flag.is_empty() {
                        continue;
                    }
                    data.insert(flag.to_string(), String::new());
                }
            }
        }
        Self { data }
    }

    /// True if the key is present at all, flag or valued.
    pub fn has_flag(&self, flag: &str) -> bool {
        self.data.contains_key(flag)
    }

    /// Value stored under `key`; a bare flag yields `Some("")`.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(|v| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Entries in the order they first appeared in the raw string.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.data.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Extract the type text from a C-style parameter list such as
/// `"i64 count, String name"`.
///
/// Each comma-separated token is trimmed and its trailing identifier (the
/// text after the last space) stripped, leaving only the declared type.
/// A token with no space is taken as a bare type name. Empty tokens are
/// dropped; parsing never fails.
pub fn parse_parameter_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter_map(|token| {
            let token = token.trim();
            if token.is_empty() {
                return None;
            }
            let ty = match token.rfind(' ') {
                Some(pos) => token[..pos].trim(),
                None => token,
            };
            Some(ty.to_string())
        })
        .collect()
}
