// Tests for FileAliasStore
// Test cases:
// - Add, list, look up and remove aliases
// - Case-insensitive duplicate rejection (including substring collisions)
// - Removing an unknown alias reports NotFound
// - Entries persist across store reload (save/load cycle)

use super::*;
use tempfile::TempDir;

/// Helper to create a store with a temporary config path
fn create_test_store() -> (FileAliasStore, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("aliases.json");
    let store = FileAliasStore::new(config_path);
    (store, temp_dir)
}

#[tokio::test]
async fn test_add_stores_lowercase_and_capitalizes_proper_nouns() {
    let (store, _temp) = create_test_store();

    let entry = store.add_alias("Cat", "Song", true).await.unwrap();
    assert_eq!(entry.word, "cat");
    assert_eq!(entry.alias, "song");
    assert!(entry.is_proper_noun);
    assert!(!entry.id.is_empty());

    store.add_alias("cat", "Kitty", false).await.unwrap();

    let aliases = store.get_alias("cat").await.unwrap().unwrap();
    assert_eq!(aliases, vec!["Song".to_string(), "kitty".to_string()]);
}

#[tokio::test]
async fn test_get_alias_missing_word_is_none() {
    let (store, _temp) = create_test_store();
    assert_eq!(store.get_alias("dog").await.unwrap(), None);
}

#[tokio::test]
async fn test_case_insensitive_duplicate_rejected() {
    let (store, _temp) = create_test_store();

    store.add_alias("cat", "Song", true).await.unwrap();
    let result = store.add_alias("cat", "song", true).await;

    assert_eq!(
        result,
        Err(AliasError::DuplicateAlias {
            word: "cat".to_string(),
            alias: "song".to_string(),
        })
    );
    assert_eq!(store.list_alias_entries().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_substring_of_existing_alias_is_duplicate() {
    let (store, _temp) = create_test_store();

    store.add_alias("cat", "Tweyen", true).await.unwrap();
    let result = store.add_alias("cat", "wey", false).await;
    assert!(matches!(result, Err(AliasError::DuplicateAlias { .. })));
}

#[tokio::test]
async fn test_same_alias_allowed_for_different_words() {
    let (store, _temp) = create_test_store();

    store.add_alias("cat", "Song", true).await.unwrap();
    store.add_alias("kitten", "Song", true).await.unwrap();

    let mapping = store.get_all_aliases().await.unwrap();
    assert_eq!(mapping.len(), 2);
}

#[tokio::test]
async fn test_remove_alias() {
    let (store, _temp) = create_test_store();

    store.add_alias("cat", "Song", true).await.unwrap();
    store.add_alias("cat", "Tweyen", true).await.unwrap();

    store.remove_alias("cat", "SONG").await.unwrap();

    let aliases = store.get_alias("cat").await.unwrap().unwrap();
    assert_eq!(aliases, vec!["Tweyen".to_string()]);
}

#[tokio::test]
async fn test_remove_last_alias_makes_word_absent() {
    let (store, _temp) = create_test_store();

    store.add_alias("cat", "Song", true).await.unwrap();
    store.remove_alias("cat", "Song").await.unwrap();

    assert_eq!(store.get_alias("cat").await.unwrap(), None);
}

#[tokio::test]
async fn test_remove_unknown_alias_is_not_found() {
    let (store, _temp) = create_test_store();

    store.add_alias("cat", "Song", true).await.unwrap();
    let result = store.remove_alias("cat", "Tweyen").await;

    assert!(matches!(result, Err(AliasError::NotFound { .. })));
}

#[tokio::test]
async fn test_empty_values_rejected() {
    let (store, _temp) = create_test_store();

    assert_eq!(
        store.add_alias("cat", "  ", true).await,
        Err(AliasError::EmptyValue)
    );
    assert_eq!(
        store.add_alias("", "Song", true).await,
        Err(AliasError::EmptyValue)
    );
}

#[tokio::test]
async fn test_entries_persist_across_reload() {
    let (store, temp) = create_test_store();

    store.add_alias("cat", "Song", true).await.unwrap();
    store.add_alias("dog", "Pup", false).await.unwrap();

    let reloaded = FileAliasStore::open(temp.path().join("aliases.json")).unwrap();
    let entries = reloaded.list_alias_entries().await.unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].word, "cat");
    assert_eq!(entries[1].alias, "pup");
}

#[test]
fn test_open_missing_file_is_empty() {
    let temp = TempDir::new().unwrap();
    let store = FileAliasStore::open(temp.path().join("nothing.json")).unwrap();
    assert!(store.entries.lock().is_empty());
}

#[test]
fn test_load_corrupt_file_fails() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("aliases.json");
    std::fs::write(&path, "not json").unwrap();

    let result = FileAliasStore::open(path);
    assert!(matches!(result, Err(AliasError::Load(_))));
}

#[test]
fn test_deserialize_entry_without_optional_fields() {
    let json = r#"[{"id": "a", "word": "cat", "alias": "song"}]"#;
    let entries: Vec<AliasEntry> = serde_json::from_str(json).unwrap();
    assert!(!entries[0].is_proper_noun);
    assert_eq!(entries[0].created_at, "");
}

#[test]
fn test_alias_conflicts_with_invalid_pattern_falls_back_to_literal() {
    let existing = vec!["Song (the archer)".to_string()];
    assert!(alias_conflicts(&existing, "(the"));
    assert!(!alias_conflicts(&existing, "[tweyen"));
    assert!(!alias_conflicts(&[], "song"));
}

