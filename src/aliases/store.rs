// Alias store - persists and loads word -> alias entries
// The file backend writes one JSON array atomically; the libsql backend in
// turso/aliases.rs implements the same trait.

use async_trait::async_trait;
use parking_lot::Mutex;
use regex::RegexBuilder;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use super::{capitalize, AliasMapping};

/// A single registered alias for a word
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AliasEntry {
    /// Unique identifier for the entry
    pub id: String,
    /// Trigger word, stored lowercase (e.g., "cat")
    pub word: String,
    /// Replacement text, stored lowercase (e.g., "song")
    pub alias: String,
    /// Whether the alias is capitalized when substituted
    #[serde(default, alias = "is_proper_noun")]
    pub is_proper_noun: bool,
    /// RFC 3339 creation time
    #[serde(default)]
    pub created_at: String,
}

impl AliasEntry {
    /// Build a new lowercase entry with a fresh ID
    pub fn new(word: &str, alias: &str, is_proper_noun: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            word: word.to_lowercase(),
            alias: alias.to_lowercase(),
            is_proper_noun,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// The alias as it appears in rewritten text
    pub fn display_alias(&self) -> String {
        if self.is_proper_noun {
            capitalize(&self.alias)
        } else {
            self.alias.clone()
        }
    }
}

/// Error types for alias store operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AliasError {
    /// Word or alias was blank
    #[error("Word and alias cannot be empty")]
    EmptyValue,
    /// Alias already registered for the word
    #[error("Alias \"{alias}\" already exists for \"{word}.\"")]
    DuplicateAlias { word: String, alias: String },
    /// Alias not registered for the word
    #[error("\"{alias}\" is not an alias of \"{word}.\"")]
    NotFound { word: String, alias: String },
    /// Failed to persist entries
    #[error("Failed to persist aliases: {0}")]
    Persistence(String),
    /// Failed to load entries
    #[error("Failed to load aliases: {0}")]
    Load(String),
}

/// Whether a candidate alias collides with the aliases already registered for a word.
///
/// The candidate is treated as a case-insensitive pattern searched anywhere in the
/// space-joined alias list, so "son" collides with an existing "Song". Text that is
/// not a valid pattern is searched for literally.
pub fn alias_conflicts(existing: &[String], candidate: &str) -> bool {
    if existing.is_empty() {
        return false;
    }
    let haystack = existing.join(" ");
    let regex = RegexBuilder::new(candidate)
        .case_insensitive(true)
        .build()
        .or_else(|_| {
            RegexBuilder::new(&regex::escape(candidate))
                .case_insensitive(true)
                .build()
        });
    match regex {
        Ok(regex) => regex.is_match(&haystack),
        Err(e) => {
            crate::warn!("Could not compile alias '{}' for duplicate check: {}", candidate, e);
            existing.iter().any(|a| a.eq_ignore_ascii_case(candidate))
        }
    }
}

pub(crate) fn validate(word: &str, alias: &str) -> Result<(), AliasError> {
    if word.trim().is_empty() || alias.trim().is_empty() {
        return Err(AliasError::EmptyValue);
    }
    Ok(())
}

/// Backend trait for alias persistence.
///
/// `list_alias_entries`, `add_alias` and `remove_alias` are the storage primitives;
/// the derived lookups are shared by every backend. The store does not serialize
/// concurrent writers itself beyond what each backend documents.
#[async_trait]
pub trait AliasStore: Send + Sync {
    /// Every stored entry in storage order
    async fn list_alias_entries(&self) -> Result<Vec<AliasEntry>, AliasError>;

    /// Register a new alias for a word.
    ///
    /// Fails with `DuplicateAlias` if the alias collides with one already registered.
    async fn add_alias(
        &self,
        word: &str,
        alias: &str,
        is_proper_noun: bool,
    ) -> Result<AliasEntry, AliasError>;

    /// Remove an alias from a word.
    ///
    /// Fails with `NotFound` if the alias is not registered for the word.
    async fn remove_alias(&self, word: &str, alias: &str) -> Result<(), AliasError>;

    /// The full word -> aliases mapping, proper nouns capitalized
    async fn get_all_aliases(&self) -> Result<AliasMapping, AliasError> {
        let entries = self.list_alias_entries().await?;
        Ok(AliasMapping::from_entries(&entries))
    }

    /// Aliases for one word; `None` when the word has no aliases at all
    async fn get_alias(&self, word: &str) -> Result<Option<Vec<String>>, AliasError> {
        let mapping = self.get_all_aliases().await?;
        Ok(mapping.get(word).map(|aliases| aliases.to_vec()))
    }
}

/// Alias store with file-based persistence.
///
/// Writers are serialized by an in-process lock; two processes sharing one file
/// are not supported.
#[derive(Debug)]
pub struct FileAliasStore {
    /// Entries in insertion order
    entries: Mutex<Vec<AliasEntry>>,
    /// Path to persistence file
    config_path: PathBuf,
}

impl FileAliasStore {
    /// Create an empty store that will persist to the given path
    pub fn new(config_path: PathBuf) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            config_path,
        }
    }

    /// Create a store and load any entries already on disk
    pub fn open(config_path: PathBuf) -> Result<Self, AliasError> {
        let store = Self::new(config_path);
        store.load()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Load entries from the persistence file
    pub fn load(&self) -> Result<(), AliasError> {
        crate::debug!("Loading aliases from {:?}", self.config_path);

        if !self.config_path.exists() {
            crate::debug!("No alias file found, starting with empty store");
            return Ok(());
        }

        let content =
            fs::read_to_string(&self.config_path).map_err(|e| AliasError::Load(e.to_string()))?;

        let loaded: Vec<AliasEntry> =
            serde_json::from_str(&content).map_err(|e| AliasError::Load(e.to_string()))?;

        let mut entries = self.entries.lock();
        *entries = loaded;

        crate::info!("Loaded {} alias entries", entries.len());
        Ok(())
    }

    /// Persist entries to the file using atomic write (temp file + rename)
    fn save(&self, entries: &[AliasEntry]) -> Result<(), AliasError> {
        crate::debug!(
            "Persisting {} alias entries to {:?}",
            entries.len(),
            self.config_path
        );

        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| AliasError::Persistence(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(entries)
            .map_err(|e| AliasError::Persistence(e.to_string()))?;

        let temp_path = self.config_path.with_extension("tmp");

        {
            let mut file = File::create(&temp_path).map_err(|e| {
                AliasError::Persistence(format!("Failed to create temp file: {}", e))
            })?;
            file.write_all(content.as_bytes())
                .map_err(|e| AliasError::Persistence(format!("Failed to write: {}", e)))?;
            file.sync_all()
                .map_err(|e| AliasError::Persistence(format!("Failed to sync: {}", e)))?;
        }

        fs::rename(&temp_path, &self.config_path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            AliasError::Persistence(format!("Failed to rename: {}", e))
        })?;

        Ok(())
    }
}

#[async_trait]
impl AliasStore for FileAliasStore {
    async fn list_alias_entries(&self) -> Result<Vec<AliasEntry>, AliasError> {
        Ok(self.entries.lock().clone())
    }

    async fn add_alias(
        &self,
        word: &str,
        alias: &str,
        is_proper_noun: bool,
    ) -> Result<AliasEntry, AliasError> {
        validate(word, alias)?;

        // Check and insert under one lock so concurrent adds cannot both pass
        let mut entries = self.entries.lock();
        let existing = AliasMapping::from_entries(entries.iter());
        if let Some(aliases) = existing.get(word) {
            if alias_conflicts(aliases, alias) {
                return Err(AliasError::DuplicateAlias {
                    word: word.to_string(),
                    alias: alias.to_string(),
                });
            }
        }

        let entry = AliasEntry::new(word, alias, is_proper_noun);
        entries.push(entry.clone());
        if let Err(e) = self.save(&entries) {
            entries.pop();
            return Err(e);
        }

        crate::info!("Added alias: {} -> {}", entry.word, entry.alias);
        Ok(entry)
    }

    async fn remove_alias(&self, word: &str, alias: &str) -> Result<(), AliasError> {
        let word_key = word.to_lowercase();
        let alias_key = alias.to_lowercase();

        let mut entries = self.entries.lock();
        let position = entries
            .iter()
            .position(|e| e.word == word_key && e.alias.to_lowercase() == alias_key)
            .ok_or_else(|| AliasError::NotFound {
                word: word.to_string(),
                alias: alias.to_string(),
            })?;

        let removed = entries.remove(position);
        if let Err(e) = self.save(&entries) {
            entries.insert(position, removed);
            return Err(e);
        }

        crate::info!("Removed alias: {} -> {}", word_key, alias_key);
        Ok(())
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
