//! Ordered output of one generation run

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Generated files keyed by output path, in render order
///
/// Paths are unique. Inserting an existing path replaces its content in place,
/// keeping the position of the first entry. Serializes as a JSON object whose
/// keys follow that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedFileSet {
    entries: Vec<(String, String)>,
}

impl GeneratedFileSet {
    /// Create an empty file set
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert a file, returning the content it replaced
    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<String>) -> Option<String> {
        let path = path.into();
        let content = content.into();

        if let Some((_, existing)) = self.entries.iter_mut().find(|(p, _)| *p == path) {
            return Some(std::mem::replace(existing, content));
        }

        self.entries.push((path, content));
        None
    }

    /// Content of one file
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, content)| content.as_str())
    }

    /// Whether a path is present
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Output paths in order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(path, _)| path.as_str())
    }

    /// `(path, content)` pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(path, content)| (path.as_str(), content.as_str()))
    }

    /// Number of files
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<P: Into<String>, C: Into<String>> FromIterator<(P, C)> for GeneratedFileSet {
    fn from_iter<I: IntoIterator<Item = (P, C)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (path, content) in iter {
            set.insert(path, content);
        }
        set
    }
}

impl IntoIterator for GeneratedFileSet {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for GeneratedFileSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (path, content) in &self.entries {
            map.serialize_entry(path, content)?;
        }
        map.end()
    }
}
