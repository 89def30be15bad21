// Database schema definitions
//
// This module defines the SQLite schema for the alias and feed tables. A fresh
// database also picks up rows from the legacy `aliases(word, alias,
// is_proper_noun)` table when one is present.

use libsql::params;

use super::client::{TursoClient, TursoError};
use crate::aliases::AliasEntry;

/// Current schema version
const SCHEMA_VERSION: i32 = 1;

/// SQL statements to create all tables (each as a separate string)
const CREATE_TABLES: &[&str] = &[
    // Word -> alias entries, in insertion order by rowid
    r#"CREATE TABLE IF NOT EXISTS alias (
        id TEXT PRIMARY KEY,
        word TEXT NOT NULL,
        alias TEXT NOT NULL,
        is_proper_noun INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL
    )"#,
    // Backs the alias duplicate check across concurrent writers
    r#"CREATE UNIQUE INDEX IF NOT EXISTS idx_alias_word_alias
        ON alias(word, alias COLLATE NOCASE)"#,
    // Feed posts waiting to be relayed, one row per (account, post)
    r#"CREATE TABLE IF NOT EXISTS feed_post (
        account TEXT NOT NULL,
        post_id TEXT NOT NULL,
        posted_at TEXT NOT NULL,
        relayed INTEGER NOT NULL DEFAULT 0,
        PRIMARY KEY (account, post_id)
    )"#,
    r#"CREATE INDEX IF NOT EXISTS idx_feed_post_unread ON feed_post(account, relayed)"#,
];

/// Initialize the database schema.
///
/// Creates all tables if they don't exist and records the schema version.
/// Call once at startup after the TursoClient is created.
pub async fn initialize_schema(client: &TursoClient) -> Result<(), TursoError> {
    client
        .execute(
            "CREATE TABLE IF NOT EXISTS schema_version (version INTEGER PRIMARY KEY)",
            (),
        )
        .await?;

    let current_version = get_schema_version(client).await?;

    if current_version == 0 {
        crate::info!("Initializing database schema (version {})", SCHEMA_VERSION);

        for statement in CREATE_TABLES {
            client.execute(statement, ()).await?;
        }
        let imported = import_legacy_aliases(client).await?;
        if imported > 0 {
            crate::info!("Imported {} aliases from the legacy aliases table", imported);
        }

        set_schema_version(client, SCHEMA_VERSION).await?;

        crate::info!("Database schema initialized successfully");
    } else if current_version > SCHEMA_VERSION {
        crate::warn!(
            "Database schema version {} is newer than this build ({})",
            current_version,
            SCHEMA_VERSION
        );
    } else {
        crate::debug!("Database schema is up to date (version {})", current_version);
    }

    Ok(())
}

/// Get the current schema version from the database.
/// Returns 0 when no version has been recorded yet.
async fn get_schema_version(client: &TursoClient) -> Result<i32, TursoError> {
    let mut rows = client
        .query(
            "SELECT version FROM schema_version ORDER BY version DESC LIMIT 1",
            (),
        )
        .await?;

    match rows.next().await? {
        Some(row) => {
            let version: i32 = row.get(0)?;
            Ok(version)
        }
        None => Ok(0),
    }
}

async fn set_schema_version(client: &TursoClient, version: i32) -> Result<(), TursoError> {
    client
        .execute(
            "INSERT OR REPLACE INTO schema_version (version) VALUES (?1)",
            libsql::params![version],
        )
        .await?;
    Ok(())
}

/// Copy rows from the legacy `aliases` table into `alias`, in rowid order.
///
/// Rows that collide with an existing alias are skipped. Returns the number
/// of rows copied; 0 when there is no legacy table.
async fn import_legacy_aliases(client: &TursoClient) -> Result<u64, TursoError> {
    let mut tables = client
        .query(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'aliases'",
            (),
        )
        .await?;
    if tables.next().await?.is_none() {
        return Ok(0);
    }

    let mut rows = client
        .query(
            "SELECT word, alias, is_proper_noun FROM aliases ORDER BY rowid",
            (),
        )
        .await?;

    let mut legacy = Vec::new();
    while let Some(row) = rows.next().await? {
        let word: String = row.get(0)?;
        let alias: String = row.get(1)?;
        let is_proper_noun = match row.get_value(2)? {
            libsql::Value::Integer(flag) => flag != 0,
            libsql::Value::Text(flag) => matches!(flag.to_lowercase().as_str(), "1" | "true"),
            _ => false,
        };
        legacy.push(AliasEntry::new(&word, &alias, is_proper_noun));
    }

    let mut imported = 0;
    for entry in legacy {
        imported += client
            .execute(
                "INSERT OR IGNORE INTO alias (id, word, alias, is_proper_noun, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    entry.id,
                    entry.word,
                    entry.alias,
                    i32::from(entry.is_proper_noun),
                    entry.created_at
                ],
            )
            .await?;
    }
    Ok(imported)
}

#[cfg(test)]
#[path = "schema_test.rs"]
mod tests;
