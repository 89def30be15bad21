//! Feed relay - forwards unread feed posts into the news channel.
//!
//! The relay pulls from a `FeedSource` (the libsql `feed_post` table in
//! production) and pushes links through a `ChannelSink`, which is whatever chat
//! client the binary is wired to. Only one follower loop may run per session.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use crate::session::BotSession;

/// A post from a followed feed account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPost {
    pub account: String,
    pub post_id: String,
    /// RFC 3339 time the post was published
    pub posted_at: String,
}

impl FeedPost {
    /// Embed-friendly link to the post
    pub fn link(&self) -> String {
        format!("https://fxtwitter.com/{}/status/{}", self.account, self.post_id)
    }
}

/// Error types for the feed relay
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FeedError {
    /// Reading or updating the feed source failed
    #[error("Feed source error: {0}")]
    Source(String),
    /// Delivering a message to the channel failed
    #[error("Failed to send to channel {channel_id}: {message}")]
    Send { channel_id: u64, message: String },
}

/// Source of feed posts with a per-post read marker.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Posts for the account not yet relayed, oldest first
    async fn unread_posts(&self, account: &str) -> Result<Vec<FeedPost>, FeedError>;

    /// Mark a post as relayed so it is never sent again
    async fn mark_read(&self, account: &str, post_id: &str) -> Result<(), FeedError>;
}

/// Destination for outgoing chat messages.
#[async_trait]
pub trait ChannelSink: Send + Sync {
    async fn send(&self, channel_id: u64, content: &str) -> Result<(), FeedError>;
}

/// Relays unread posts for every followed account in the session
pub struct FeedRelay<F: FeedSource, C: ChannelSink> {
    source: Arc<F>,
    sink: Arc<C>,
    session: Arc<BotSession>,
}

impl<F: FeedSource, C: ChannelSink> Clone for FeedRelay<F, C> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            sink: Arc::clone(&self.sink),
            session: Arc::clone(&self.session),
        }
    }
}

impl<F: FeedSource, C: ChannelSink> FeedRelay<F, C> {
    pub fn new(source: Arc<F>, sink: Arc<C>, session: Arc<BotSession>) -> Self {
        Self {
            source,
            sink,
            session,
        }
    }

    /// One pass over every followed account. Returns the number of posts sent.
    ///
    /// A post is marked read only after it was sent, so a failed send is
    /// retried on the next pass. A failing account is logged and skipped; the
    /// remaining accounts are still relayed.
    pub async fn relay_once(&self) -> usize {
        let Some(channel_id) = self.session.news_channel_id else {
            crate::debug!("No news channel configured, skipping feed relay");
            return 0;
        };

        let mut relayed = 0;
        for account in &self.session.followed_accounts {
            match self.relay_account(channel_id, account).await {
                Ok(sent) => relayed += sent,
                Err((sent, e)) => {
                    relayed += sent;
                    crate::warn!("Feed relay for {} failed: {}", account, e);
                }
            }
        }

        if relayed > 0 {
            crate::info!("Relayed {} feed posts to channel {}", relayed, channel_id);
        }
        relayed
    }

    /// Relay one account's unread posts, oldest first. On failure, reports how
    /// many posts were sent before the error.
    async fn relay_account(
        &self,
        channel_id: u64,
        account: &str,
    ) -> Result<usize, (usize, FeedError)> {
        let posts = self.source.unread_posts(account).await.map_err(|e| (0, e))?;
        let mut sent = 0;
        for post in posts {
            self.sink
                .send(channel_id, &post.link())
                .await
                .map_err(|e| (sent, e))?;
            self.source
                .mark_read(account, &post.post_id)
                .await
                .map_err(|e| (sent + 1, e))?;
            sent += 1;
        }
        Ok(sent)
    }

    /// Relay every `interval` until `shutdown` becomes true or its sender drops.
    ///
    /// Returns false without doing anything if another follower already holds
    /// the session's following flag.
    pub async fn follow(&self, interval: Duration, mut shutdown: watch::Receiver<bool>) -> bool {
        if !self.session.begin_following() {
            crate::info!("Feed relay already running, not starting another");
            return false;
        }
        crate::info!(
            "Following {} feed accounts every {:?}",
            self.session.followed_accounts.len(),
            interval
        );

        let mut ticker = tokio::time::interval(interval);
        loop {
            let stopping = *shutdown.borrow();
            if stopping {
                break;
            }
            tokio::select! {
                _ = ticker.tick() => {
                    self.relay_once().await;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }

        self.session.end_following();
        crate::info!("Feed relay stopped");
        true
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
