use std::collections::HashMap;

/// Position of an entry inside a bundle file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct EntryLocation {
    /// Path to the bundle file (e.g., "src/main/resources/messages.properties").
    pub file_path: String,
    /// Line number (1-indexed) where the entry's logical line starts.
    pub line: usize,
}

impl EntryLocation {
    pub fn new(file_path: impl Into<String>, line: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
        }
    }
}

/// A single key/value pair from a bundle file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleEntry {
    /// The dotted key (e.g., "errors.notFound").
    pub key: String,
    /// The raw format string.
    pub value: String,
    /// Line where the most recent definition of this key starts.
    pub line: usize,
}

/// Ordered contents of one bundle file.
///
/// Entries keep the position of the first definition of their key.
/// Redefining a key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bundle {
    entries: Vec<BundleEntry>,
    index: HashMap<String, usize>,
}

impl Bundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or redefine a key. Returns the previous value, if any.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
        line: usize,
    ) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.index.get(&key) {
            Some(&position) => {
                let entry = &mut self.entries[position];
                entry.line = line;
                Some(std::mem::replace(&mut entry.value, value))
            }
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push(BundleEntry { key, value, line });
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&BundleEntry> {
        self.index.get(key).map(|&position| &self.entries[position])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Entries in first-definition order.
    pub fn entries(&self) -> &[BundleEntry] {
        &self.entries
    }

    /// `(key, value)` pairs in first-definition order, ready for tree building.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|entry| (entry.key.as_str(), entry.value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_insert_keeps_first_position() {
        let mut bundle = Bundle::new();
        assert_eq!(bundle.insert("b", "1", 1), None);
        assert_eq!(bundle.insert("a", "2", 2), None);
        assert_eq!(bundle.insert("b", "3", 3), Some("1".to_string()));

        let keys: Vec<&str> = bundle.pairs().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["b", "a"]);

        let entry = bundle.get("b").unwrap();
        assert_eq!(entry.value, "3");
        assert_eq!(entry.line, 3);
        assert_eq!(bundle.len(), 2);
    }

    #[test]
    fn test_bundle_lookup() {
        let mut bundle = Bundle::new();
        assert!(bundle.is_empty());
        bundle.insert("greeting", "Hello", 4);
        assert!(bundle.contains_key("greeting"));
        assert!(!bundle.contains_key("farewell"));
        assert!(bundle.get("farewell").is_none());
    }

    #[test]
    fn test_entry_location_new() {
        let loc = EntryLocation::new("messages.properties", 7);
        assert_eq!(loc.file_path, "messages.properties");
        assert_eq!(loc.line, 7);
    }
}
