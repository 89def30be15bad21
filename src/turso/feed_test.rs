use crate::relay::{FeedPost, FeedSource};
use crate::turso::{initialize_schema, TursoClient};
use tempfile::TempDir;

async fn setup_client() -> (TursoClient, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let client = TursoClient::new(temp_dir.path().to_path_buf())
        .await
        .expect("Failed to create client");
    initialize_schema(&client)
        .await
        .expect("Failed to initialize schema");
    (client, temp_dir)
}

fn post(account: &str, id: &str, at: &str) -> FeedPost {
    FeedPost {
        account: account.to_string(),
        post_id: id.to_string(),
        posted_at: at.to_string(),
    }
}

#[tokio::test]
async fn test_record_feed_post_is_idempotent() {
    let (client, _temp) = setup_client().await;
    let p = post("granblue_en", "1", "2024-01-01T00:00:00Z");

    assert!(client.record_feed_post(&p).await.unwrap());
    assert!(!client.record_feed_post(&p).await.unwrap());
    assert_eq!(client.unread_posts("granblue_en").await.unwrap(), vec![p]);
}

#[tokio::test]
async fn test_unread_posts_oldest_first_per_account() {
    let (client, _temp) = setup_client().await;
    client
        .record_feed_post(&post("granblue_en", "b", "2024-01-02T00:00:00Z"))
        .await
        .unwrap();
    client
        .record_feed_post(&post("granblue_en", "a", "2024-01-01T00:00:00Z"))
        .await
        .unwrap();
    client
        .record_feed_post(&post("other", "z", "2023-12-31T00:00:00Z"))
        .await
        .unwrap();

    let ids: Vec<String> = client
        .unread_posts("granblue_en")
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.post_id)
        .collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[tokio::test]
async fn test_mark_read_hides_post() {
    let (client, _temp) = setup_client().await;
    client
        .record_feed_post(&post("granblue_en", "1", "2024-01-01T00:00:00Z"))
        .await
        .unwrap();
    client
        .record_feed_post(&post("granblue_en", "2", "2024-01-02T00:00:00Z"))
        .await
        .unwrap();

    client.mark_read("granblue_en", "1").await.unwrap();

    let unread = client.unread_posts("granblue_en").await.unwrap();
    assert_eq!(unread.len(), 1);
    assert_eq!(unread[0].post_id, "2");
}

#[tokio::test]
async fn test_rerecording_read_post_stays_read() {
    let (client, _temp) = setup_client().await;
    let p = post("granblue_en", "1", "2024-01-01T00:00:00Z");
    client.record_feed_post(&p).await.unwrap();
    client.mark_read("granblue_en", "1").await.unwrap();

    client.record_feed_post(&p).await.unwrap();
    assert!(client.unread_posts("granblue_en").await.unwrap().is_empty());
}
