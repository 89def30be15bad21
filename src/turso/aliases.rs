// AliasStore backed by the libsql `alias` table
//
// Rows are returned in rowid order, which is insertion order. The unique
// (word, alias COLLATE NOCASE) index rejects exact duplicates that slip past
// the pattern check when two writers race.

use async_trait::async_trait;
use libsql::params;

use super::client::{TursoClient, TursoError};
use crate::aliases::{alias_conflicts, validate, AliasEntry, AliasError, AliasStore};

impl TursoClient {
    /// Display aliases registered for a lowercase word
    async fn aliases_for_word(&self, word: &str) -> Result<Vec<String>, AliasError> {
        let mut rows = self
            .query(
                "SELECT id, word, alias, is_proper_noun, created_at FROM alias WHERE word = ?1 ORDER BY rowid",
                params![word.to_string()],
            )
            .await
            .map_err(|e| AliasError::Load(e.to_string()))?;

        let mut aliases = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| AliasError::Load(e.to_string()))?
        {
            aliases.push(entry_from_row(&row)?.display_alias());
        }
        Ok(aliases)
    }
}

fn entry_from_row(row: &libsql::Row) -> Result<AliasEntry, AliasError> {
    let load = |e: libsql::Error| AliasError::Load(e.to_string());
    let is_proper_noun: i32 = row.get(3).map_err(load)?;
    Ok(AliasEntry {
        id: row.get(0).map_err(load)?,
        word: row.get(1).map_err(load)?,
        alias: row.get(2).map_err(load)?,
        is_proper_noun: is_proper_noun != 0,
        created_at: row.get(4).map_err(load)?,
    })
}

#[async_trait]
impl AliasStore for TursoClient {
    async fn list_alias_entries(&self) -> Result<Vec<AliasEntry>, AliasError> {
        let mut rows = self
            .query(
                "SELECT id, word, alias, is_proper_noun, created_at FROM alias ORDER BY rowid",
                (),
            )
            .await
            .map_err(|e| AliasError::Load(e.to_string()))?;

        let mut entries = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| AliasError::Load(e.to_string()))?
        {
            entries.push(entry_from_row(&row)?);
        }
        Ok(entries)
    }

    async fn add_alias(
        &self,
        word: &str,
        alias: &str,
        is_proper_noun: bool,
    ) -> Result<AliasEntry, AliasError> {
        validate(word, alias)?;

        let entry = AliasEntry::new(word, alias, is_proper_noun);
        let duplicate = || AliasError::DuplicateAlias {
            word: word.to_string(),
            alias: alias.to_string(),
        };

        let existing = self.aliases_for_word(&entry.word).await?;
        if alias_conflicts(&existing, alias) {
            return Err(duplicate());
        }

        self.execute(
            r#"INSERT INTO alias (id, word, alias, is_proper_noun, created_at)
               VALUES (?1, ?2, ?3, ?4, ?5)"#,
            params![
                entry.id.clone(),
                entry.word.clone(),
                entry.alias.clone(),
                entry.is_proper_noun as i32,
                entry.created_at.clone()
            ],
        )
        .await
        .map_err(|e| match e {
            TursoError::Constraint(_) => duplicate(),
            other => AliasError::Persistence(other.to_string()),
        })?;

        crate::info!("Added alias: {} -> {}", entry.word, entry.alias);
        Ok(entry)
    }

    async fn remove_alias(&self, word: &str, alias: &str) -> Result<(), AliasError> {
        let removed = self
            .execute(
                "DELETE FROM alias WHERE word = ?1 AND alias = ?2 COLLATE NOCASE",
                params![word.to_lowercase(), alias.to_lowercase()],
            )
            .await
            .map_err(|e| AliasError::Persistence(e.to_string()))?;

        if removed == 0 {
            return Err(AliasError::NotFound {
                word: word.to_string(),
                alias: alias.to_string(),
            });
        }

        crate::info!("Removed alias: {} -> {}", word.to_lowercase(), alias.to_lowercase());
        Ok(())
    }
}

#[cfg(test)]
#[path = "aliases_test.rs"]
mod tests;
