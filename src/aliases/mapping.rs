// Alias mapping - the derived word -> aliases view the rewriter consumes

use serde::Serialize;

use super::AliasEntry;

/// Capitalize the first character and lowercase the rest.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Lowercase word -> ordered list of aliases.
///
/// Words iterate in the order they were first inserted, and each word's
/// aliases keep their insertion order. The mapping is rebuilt from storage on
/// every lookup and never cached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AliasMapping {
    words: Vec<(String, Vec<String>)>,
}

impl AliasMapping {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the mapping from stored entries, capitalizing proper-noun aliases
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a AliasEntry>) -> Self {
        let mut mapping = Self::new();
        for entry in entries {
            mapping.insert(&entry.word, entry.display_alias());
        }
        mapping
    }

    /// Append an alias to a word's list, creating the word if needed
    pub fn insert(&mut self, word: &str, alias: impl Into<String>) {
        let key = word.to_lowercase();
        let alias = alias.into();
        match self.words.iter_mut().find(|(w, _)| *w == key) {
            Some((_, aliases)) => aliases.push(alias),
            None => self.words.push((key, vec![alias])),
        }
    }

    /// Aliases for a word, or None when the word has none registered
    pub fn get(&self, word: &str) -> Option<&[String]> {
        let key = word.to_lowercase();
        self.words
            .iter()
            .find(|(w, _)| *w == key)
            .map(|(_, aliases)| aliases.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.words
            .iter()
            .map(|(word, aliases)| (word.as_str(), aliases.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
#[path = "mapping_test.rs"]
mod tests;
