use super::*;
use tempfile::TempDir;

async fn new_client() -> (TursoClient, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let client = TursoClient::new(temp_dir.path().to_path_buf())
        .await
        .expect("Failed to create client");
    (client, temp_dir)
}

async fn table_exists(client: &TursoClient, kind: &str, name: &str) -> bool {
    let mut rows = client
        .query(
            "SELECT 1 FROM sqlite_master WHERE type = ?1 AND name = ?2",
            libsql::params![kind, name],
        )
        .await
        .expect("query sqlite_master");
    rows.next().await.expect("read row").is_some()
}

#[tokio::test]
async fn test_initialize_creates_tables() {
    let (client, _temp) = new_client().await;
    initialize_schema(&client).await.expect("init schema");

    assert!(table_exists(&client, "table", "alias").await);
    assert!(table_exists(&client, "table", "feed_post").await);
    assert!(table_exists(&client, "index", "idx_alias_word_alias").await);
    assert_eq!(get_schema_version(&client).await.unwrap(), SCHEMA_VERSION);
}

#[tokio::test]
async fn test_initialize_is_idempotent() {
    let (client, _temp) = new_client().await;
    initialize_schema(&client).await.expect("first init");
    initialize_schema(&client).await.expect("second init");
    assert_eq!(get_schema_version(&client).await.unwrap(), SCHEMA_VERSION);
}

#[tokio::test]
async fn test_imports_legacy_aliases_table() {
    let (client, _temp) = new_client().await;
    client
        .execute(
            "CREATE TABLE aliases (id INTEGER PRIMARY KEY, word TEXT, alias TEXT, is_proper_noun BOOLEAN)",
            (),
        )
        .await
        .unwrap();
    for (word, alias, proper) in [("cat", "song", 1), ("dog", "vyrn", 0), ("cat", "Song", 1)] {
        client
            .execute(
                "INSERT INTO aliases (word, alias, is_proper_noun) VALUES (?1, ?2, ?3)",
                libsql::params![word, alias, proper],
            )
            .await
            .unwrap();
    }

    initialize_schema(&client).await.expect("init schema");

    let mut rows = client
        .query("SELECT word, alias, is_proper_noun FROM alias ORDER BY rowid", ())
        .await
        .unwrap();
    let mut imported = Vec::new();
    while let Some(row) = rows.next().await.unwrap() {
        let word: String = row.get(0).unwrap();
        let alias: String = row.get(1).unwrap();
        let proper: i32 = row.get(2).unwrap();
        imported.push((word, alias, proper));
    }
    // The case-insensitive duplicate "Song" is skipped
    assert_eq!(
        imported,
        vec![
            ("cat".to_string(), "song".to_string(), 1),
            ("dog".to_string(), "vyrn".to_string(), 0),
        ]
    );
}

#[tokio::test]
async fn test_legacy_import_runs_only_on_fresh_database() {
    let (client, _temp) = new_client().await;
    initialize_schema(&client).await.expect("first init");
    client
        .execute(
            "CREATE TABLE aliases (word TEXT, alias TEXT, is_proper_noun INTEGER)",
            (),
        )
        .await
        .unwrap();
    client
        .execute(
            "INSERT INTO aliases (word, alias, is_proper_noun) VALUES ('cat', 'song', 1)",
            (),
        )
        .await
        .unwrap();

    initialize_schema(&client).await.expect("second init");

    let mut rows = client.query("SELECT COUNT(*) FROM alias", ()).await.unwrap();
    let count: i64 = rows.next().await.unwrap().unwrap().get(0).unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_newer_schema_version_is_left_alone() {
    let (client, _temp) = new_client().await;
    initialize_schema(&client).await.expect("init schema");
    set_schema_version(&client, SCHEMA_VERSION + 1).await.unwrap();

    initialize_schema(&client).await.expect("reinit");
    assert_eq!(get_schema_version(&client).await.unwrap(), SCHEMA_VERSION + 1);
}

#[tokio::test]
async fn test_db_file_lives_in_data_dir() {
    let (client, temp) = new_client().await;
    assert!(client.db_path().starts_with(temp.path()));
}
