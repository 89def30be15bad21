// Tests for the feed relay
// In-memory feed and sink stand in for the database and chat client.

use super::*;
use crate::util::Settings;
use parking_lot::Mutex;

#[derive(Default)]
struct MemoryFeed {
    /// (post, relayed)
    posts: Mutex<Vec<(FeedPost, bool)>>,
    fail_reads: bool,
}

impl MemoryFeed {
    fn with_posts(posts: &[(&str, &str, &str)]) -> Self {
        let posts = posts
            .iter()
            .map(|(account, id, at)| {
                (
                    FeedPost {
                        account: account.to_string(),
                        post_id: id.to_string(),
                        posted_at: at.to_string(),
                    },
                    false,
                )
            })
            .collect();
        Self {
            posts: Mutex::new(posts),
            fail_reads: false,
        }
    }

    fn unread_count(&self) -> usize {
        self.posts.lock().iter().filter(|(_, read)| !read).count()
    }
}

#[async_trait]
impl FeedSource for MemoryFeed {
    async fn unread_posts(&self, account: &str) -> Result<Vec<FeedPost>, FeedError> {
        if self.fail_reads {
            return Err(FeedError::Source("feed unavailable".to_string()));
        }
        let mut posts: Vec<FeedPost> = self
            .posts
            .lock()
            .iter()
            .filter(|(post, read)| !read && post.account == account)
            .map(|(post, _)| post.clone())
            .collect();
        posts.sort_by(|a, b| a.posted_at.cmp(&b.posted_at));
        Ok(posts)
    }

    async fn mark_read(&self, account: &str, post_id: &str) -> Result<(), FeedError> {
        for (post, read) in self.posts.lock().iter_mut() {
            if post.account == account && post.post_id == post_id {
                *read = true;
            }
        }
        Ok(())
    }
}

#[derive(Default)]
struct RecordingSink {
    sent: Mutex<Vec<(u64, String)>>,
    /// Links containing this text fail to send
    reject: Option<&'static str>,
}

#[async_trait]
impl ChannelSink for RecordingSink {
    async fn send(&self, channel_id: u64, content: &str) -> Result<(), FeedError> {
        if self.reject.is_some_and(|text| content.contains(text)) {
            return Err(FeedError::Send {
                channel_id,
                message: "rejected".to_string(),
            });
        }
        self.sent.lock().push((channel_id, content.to_string()));
        Ok(())
    }
}

fn session(accounts: &[&str], news_channel: Option<u64>) -> Arc<BotSession> {
    let settings = Settings {
        followed_accounts: accounts.iter().map(|a| a.to_string()).collect(),
        news_channel_id: news_channel,
        ..Settings::default()
    };
    Arc::new(BotSession::from_settings(&settings))
}

fn sample_feed() -> MemoryFeed {
    MemoryFeed::with_posts(&[
        ("granblue_en", "300", "2024-03-03T00:00:00Z"),
        ("granblue_en", "100", "2024-03-01T00:00:00Z"),
        ("granblue_en", "200", "2024-03-02T00:00:00Z"),
        ("other", "999", "2024-03-01T00:00:00Z"),
    ])
}

#[test]
fn test_post_link() {
    let post = FeedPost {
        account: "granblue_en".to_string(),
        post_id: "123".to_string(),
        posted_at: String::new(),
    };
    assert_eq!(post.link(), "https://fxtwitter.com/granblue_en/status/123");
}

#[tokio::test]
async fn test_relay_once_sends_oldest_first() {
    let feed = Arc::new(sample_feed());
    let sink = Arc::new(RecordingSink::default());
    let relay = FeedRelay::new(feed.clone(), sink.clone(), session(&["granblue_en"], Some(7)));

    let relayed = relay.relay_once().await;

    assert_eq!(relayed, 3);
    let sent = sink.sent.lock().clone();
    assert_eq!(
        sent,
        vec![
            (7, "https://fxtwitter.com/granblue_en/status/100".to_string()),
            (7, "https://fxtwitter.com/granblue_en/status/200".to_string()),
            (7, "https://fxtwitter.com/granblue_en/status/300".to_string()),
        ]
    );
    // Unfollowed account is left alone
    assert_eq!(feed.unread_count(), 1);
}

#[tokio::test]
async fn test_relay_never_sends_twice() {
    let feed = Arc::new(sample_feed());
    let sink = Arc::new(RecordingSink::default());
    let relay = FeedRelay::new(feed, sink.clone(), session(&["granblue_en"], Some(7)));

    assert_eq!(relay.relay_once().await, 3);
    assert_eq!(relay.relay_once().await, 0);
    assert_eq!(sink.sent.lock().len(), 3);
}

#[tokio::test]
async fn test_relay_without_news_channel_does_nothing() {
    let feed = Arc::new(sample_feed());
    let sink = Arc::new(RecordingSink::default());
    let relay = FeedRelay::new(feed.clone(), sink.clone(), session(&["granblue_en"], None));

    assert_eq!(relay.relay_once().await, 0);
    assert!(sink.sent.lock().is_empty());
    assert_eq!(feed.unread_count(), 4);
}

#[tokio::test]
async fn test_relay_source_errors_send_nothing() {
    let feed = Arc::new(MemoryFeed {
        fail_reads: true,
        ..MemoryFeed::default()
    });
    let sink = Arc::new(RecordingSink::default());
    let relay = FeedRelay::new(feed, sink.clone(), session(&["granblue_en"], Some(7)));

    assert_eq!(relay.relay_once().await, 0);
    assert!(sink.sent.lock().is_empty());
}

#[tokio::test]
async fn test_failed_send_does_not_block_later_accounts() {
    let feed = Arc::new(sample_feed());
    let sink = Arc::new(RecordingSink {
        reject: Some("status/200"),
        ..RecordingSink::default()
    });
    let relay = FeedRelay::new(
        feed.clone(),
        sink.clone(),
        session(&["granblue_en", "other"], Some(7)),
    );

    assert_eq!(relay.relay_once().await, 2);
    let sent = sink.sent.lock().clone();
    assert_eq!(
        sent,
        vec![
            (7, "https://fxtwitter.com/granblue_en/status/100".to_string()),
            (7, "https://fxtwitter.com/other/status/999".to_string()),
        ]
    );
    // 200 failed, so it and the newer 300 stay unread for the next pass
    assert_eq!(feed.unread_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_follow_runs_until_shutdown() {
    let feed = Arc::new(sample_feed());
    let sink = Arc::new(RecordingSink::default());
    let session = session(&["granblue_en", "other"], Some(7));
    let relay = FeedRelay::new(feed.clone(), sink.clone(), session.clone());

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let follower = {
        let relay = relay.clone();
        tokio::spawn(async move { relay.follow(Duration::from_secs(10), shutdown_rx).await })
    };

    tokio::time::sleep(Duration::from_secs(25)).await;
    assert!(session.is_following());

    shutdown_tx.send(true).unwrap();
    assert!(follower.await.unwrap());

    assert!(!session.is_following());
    assert_eq!(sink.sent.lock().len(), 4);
    assert_eq!(feed.unread_count(), 0);
}

#[tokio::test]
async fn test_second_follow_returns_immediately() {
    let feed = Arc::new(sample_feed());
    let sink = Arc::new(RecordingSink::default());
    let session = session(&["granblue_en"], Some(7));
    let relay = FeedRelay::new(feed, sink.clone(), session.clone());

    assert!(session.begin_following());
    let (_shutdown_tx, shutdown_rx) = watch::channel(false);
    assert!(!relay.follow(Duration::from_secs(1), shutdown_rx).await);

    // The running follower still owns the flag
    assert!(session.is_following());
    assert!(sink.sent.lock().is_empty());
}

#[tokio::test]
async fn test_follow_with_shutdown_already_set() {
    let feed = Arc::new(sample_feed());
    let sink = Arc::new(RecordingSink::default());
    let session = session(&["granblue_en"], Some(7));
    let relay = FeedRelay::new(feed, sink.clone(), session.clone());

    let (_shutdown_tx, shutdown_rx) = watch::channel(true);
    assert!(relay.follow(Duration::from_secs(1), shutdown_rx).await);
    assert!(!session.is_following());
    assert!(sink.sent.lock().is_empty());
}
