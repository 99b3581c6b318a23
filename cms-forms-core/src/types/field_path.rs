//! Path-indexed field addressing and validation results

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Dotted path to a form field, with list indices in brackets.
///
/// Examples: `email`, `seo.openGraph.image`, `content.tags.list[0].text`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPath(String);

impl FieldPath {
    pub fn new(root: impl Into<String>) -> Self {
        Self(root.into())
    }

    /// Child field `self.name`.
    #[must_use]
    pub fn field(&self, name: &str) -> Self {
        Self(format!("{}.{name}", self.0))
    }

    /// List element `self[index]`.
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        Self(format!("{}[{index}]", self.0))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `self` equals `prefix` or lies underneath it.
    #[must_use]
    pub fn is_within(&self, prefix: &Self) -> bool {
        match self.0.strip_prefix(prefix.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('.') || rest.starts_with('['),
            None => false,
        }
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldPath {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for FieldPath {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Validation result: field path → message.
///
/// A path that is absent is valid. Only the first failing rule of a field is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<FieldPath, String>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` for `path` unless the field already has an error.
    pub fn add(&mut self, path: impl Into<FieldPath>, message: impl Into<String>) {
        self.0.entry(path.into()).or_insert_with(|| message.into());
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.0.get(&FieldPath::from(path)).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldPath, &str)> {
        self.0.iter().map(|(k, v)| (k, v.as_str()))
    }

    /// Keep only errors whose path satisfies `keep`.
    #[must_use]
    pub fn filtered(&self, mut keep: impl FnMut(&FieldPath) -> bool) -> Self {
        Self(
            self.0
                .iter()
                .filter(|(path, _)| keep(path))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }
}
