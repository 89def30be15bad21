// FeedSource backed by the libsql `feed_post` table

use async_trait::async_trait;
use libsql::params;

use super::client::TursoClient;
use crate::relay::{FeedError, FeedPost, FeedSource};

impl TursoClient {
    /// Store a post fetched from the feed.
    ///
    /// Returns false if the post was already known; its relayed flag is left as is.
    pub async fn record_feed_post(&self, post: &FeedPost) -> Result<bool, FeedError> {
        let inserted = self
            .execute(
                r#"INSERT OR IGNORE INTO feed_post (account, post_id, posted_at, relayed)
                   VALUES (?1, ?2, ?3, 0)"#,
                params![
                    post.account.clone(),
                    post.post_id.clone(),
                    post.posted_at.clone()
                ],
            )
            .await
            .map_err(|e| FeedError::Source(e.to_string()))?;

        if inserted > 0 {
            crate::debug!("Recorded feed post {}/{}", post.account, post.post_id);
        }
        Ok(inserted > 0)
    }
}

#[async_trait]
impl FeedSource for TursoClient {
    async fn unread_posts(&self, account: &str) -> Result<Vec<FeedPost>, FeedError> {
        let source = |e: libsql::Error| FeedError::Source(e.to_string());

        let mut rows = self
            .query(
                r#"SELECT account, post_id, posted_at FROM feed_post
                   WHERE account = ?1 AND relayed = 0
                   ORDER BY posted_at, rowid"#,
                params![account.to_string()],
            )
            .await
            .map_err(|e| FeedError::Source(e.to_string()))?;

        let mut posts = Vec::new();
        while let Some(row) = rows.next().await.map_err(source)? {
            posts.push(FeedPost {
                account: row.get(0).map_err(source)?,
                post_id: row.get(1).map_err(source)?,
                posted_at: row.get(2).map_err(source)?,
            });
        }
        Ok(posts)
    }

    async fn mark_read(&self, account: &str, post_id: &str) -> Result<(), FeedError> {
        self.execute(
            "UPDATE feed_post SET relayed = 1 WHERE account = ?1 AND post_id = ?2",
            params![account.to_string(), post_id.to_string()],
        )
        .await
        .map_err(|e| FeedError::Source(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "feed_test.rs"]
mod tests;
