use chrono::{TimeDelta, Utc};
use std::time::Duration;
use teloxide::types::{ChatId, MessageId};

use hotel_menu_bot::session::{Session, SessionStore, ViewMode};

/// Sessions are created on first contact but only stored once committed
#[tokio::test]
async fn test_checkout_creates_idle_session() {
    let store = SessionStore::new(Duration::from_secs(60));

    let session = store.checkout(ChatId(1)).await;

    assert_eq!(session.mode, ViewMode::Idle);
    assert!(session.displayed.is_empty());
    assert_eq!(store.len().await, 0);
}

#[tokio::test]
async fn test_commit_persists_changes_per_chat() {
    let store = SessionStore::new(Duration::from_secs(60));

    let mut session = store.checkout(ChatId(1)).await;
    session.mode = ViewMode::BrowsingCarousel { position: 2 };
    session.record(MessageId(5));
    store.commit(ChatId(1), session).await;

    let again = store.checkout(ChatId(1)).await;
    assert_eq!(again.carousel_position(), Some(2));
    assert_eq!(again.displayed, vec![MessageId(5)]);

    let other = store.checkout(ChatId(2)).await;
    assert_eq!(other.carousel_position(), None);
    assert_eq!(store.len().await, 1);
}

/// Committing refreshes the activity timestamp used for eviction
#[tokio::test]
async fn test_activity_keeps_session_alive() {
    let store = SessionStore::new(Duration::from_secs(60));
    let start = Utc::now();

    store.commit_at(ChatId(1), Session::new(start), start).await;
    let session = store.checkout_at(ChatId(1), start).await;
    store
        .commit_at(ChatId(1), session, start + TimeDelta::seconds(50))
        .await;

    assert_eq!(store.evict_idle(start + TimeDelta::seconds(90)).await, 0);
    assert_eq!(store.evict_idle(start + TimeDelta::seconds(111)).await, 1);
    assert!(store.get(ChatId(1)).await.is_none());
}

#[test]
fn test_session_serializes_tagged_mode() {
    let mut session = Session::new(Utc::now());
    session.mode = ViewMode::BrowsingCarousel { position: 3 };

    let json = serde_json::to_string(&session).unwrap();
    assert!(json.contains("BrowsingCarousel"));

    let restored: Session = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, session);
}
