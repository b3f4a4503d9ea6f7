//! Unit tests for the in-memory token repository

use chrono::{Duration, Utc};

use crate::domain::entities::token::{TokenKind, TokenRecord};
use crate::repositories::token::{InMemoryTokenRepository, TokenRepository};

fn record(user_id: i64, kind: TokenKind, token: &str, ttl: i64) -> TokenRecord {
    TokenRecord::issue(user_id, kind, token.to_string(), ttl)
}

#[tokio::test]
async fn test_insert_assigns_increasing_ids() {
    let repo = InMemoryTokenRepository::new();

    let first = repo
        .insert(record(1, TokenKind::Refresh, "a", 60))
        .await
        .unwrap();
    let second = repo
        .insert(record(1, TokenKind::Refresh, "b", 60))
        .await
        .unwrap();

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
    assert_eq!(first.token, "a");
    assert_eq!(repo.len().await, 2);
}

#[tokio::test]
async fn test_find_scopes_by_user_and_kind() {
    let repo = InMemoryTokenRepository::new();
    repo.insert(record(1, TokenKind::Refresh, "shared", 60))
        .await
        .unwrap();
    repo.insert(record(2, TokenKind::Refresh, "shared", 60))
        .await
        .unwrap();

    let found = repo
        .find_by_token(1, &TokenKind::Refresh, "shared")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.user_id, 1);

    // Same value under another kind is not a match
    let missing = repo
        .find_by_token(1, &TokenKind::from("password_reset"), "shared")
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_take_consumes_exactly_once() {
    let repo = InMemoryTokenRepository::new();
    repo.insert(record(1, TokenKind::Refresh, "once", 60))
        .await
        .unwrap();

    let taken = repo
        .take_by_token(1, &TokenKind::Refresh, "once")
        .await
        .unwrap();
    assert!(taken.is_some());

    let again = repo
        .take_by_token(1, &TokenKind::Refresh, "once")
        .await
        .unwrap();
    assert!(again.is_none());
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_take_wrong_user_touches_nothing() {
    let repo = InMemoryTokenRepository::new();
    repo.insert(record(1, TokenKind::Refresh, "mine", 60))
        .await
        .unwrap();

    let taken = repo
        .take_by_token(2, &TokenKind::Refresh, "mine")
        .await
        .unwrap();
    assert!(taken.is_none());
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_list_orders_newest_first() {
    let repo = InMemoryTokenRepository::new();

    let mut old = record(1, TokenKind::Refresh, "old", 600);
    old.created_at = Utc::now() - Duration::seconds(100);
    let mut older = record(1, TokenKind::Refresh, "older", 600);
    older.created_at = Utc::now() - Duration::seconds(200);

    // Insert out of creation order
    repo.insert(older).await.unwrap();
    repo.insert(record(1, TokenKind::Refresh, "new", 600))
        .await
        .unwrap();
    repo.insert(old).await.unwrap();

    let listed = repo.list_for_user(1, &TokenKind::Refresh).await.unwrap();
    let tokens: Vec<&str> = listed.iter().map(|r| r.token.as_str()).collect();
    assert_eq!(tokens, vec!["new", "old", "older"]);
}

#[tokio::test]
async fn test_list_breaks_created_at_ties_by_id() {
    let repo = InMemoryTokenRepository::new();

    let now = Utc::now();
    let mut a = record(1, TokenKind::Refresh, "a", 600);
    a.created_at = now;
    let mut b = record(1, TokenKind::Refresh, "b", 600);
    b.created_at = now;

    repo.insert(a).await.unwrap();
    repo.insert(b).await.unwrap();

    let listed = repo.list_for_user(1, &TokenKind::Refresh).await.unwrap();
    // Later insert wins the tie
    assert_eq!(listed[0].token, "b");
    assert_eq!(listed[1].token, "a");
}

#[tokio::test]
async fn test_remove_reports_whether_row_existed() {
    let repo = InMemoryTokenRepository::new();
    let stored = repo
        .insert(record(1, TokenKind::Refresh, "x", 60))
        .await
        .unwrap();

    assert!(repo.remove(stored.id).await.unwrap());
    assert!(!repo.remove(stored.id).await.unwrap());
    assert!(!repo.remove(999).await.unwrap());
}

#[tokio::test]
async fn test_remove_expired_is_strict() {
    let repo = InMemoryTokenRepository::new();

    let live = repo
        .insert(record(1, TokenKind::Refresh, "live", 600))
        .await
        .unwrap();
    repo.insert(record(1, TokenKind::Refresh, "dead", -600))
        .await
        .unwrap();

    let removed = repo
        .remove_expired(1, &TokenKind::Refresh, Utc::now())
        .await
        .unwrap();
    assert_eq!(removed, 1);

    // A record expiring exactly at the cutoff survives
    let removed = repo
        .remove_expired(1, &TokenKind::Refresh, live.expires_at)
        .await
        .unwrap();
    assert_eq!(removed, 0);
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_remove_expired_leaves_other_kinds_alone() {
    let repo = InMemoryTokenRepository::new();
    repo.insert(record(1, TokenKind::Refresh, "a", -60))
        .await
        .unwrap();
    repo.insert(record(1, TokenKind::from("verify_email"), "b", -60))
        .await
        .unwrap();
    repo.insert(record(2, TokenKind::Refresh, "c", -60))
        .await
        .unwrap();

    let removed = repo
        .remove_expired(1, &TokenKind::Refresh, Utc::now())
        .await
        .unwrap();

    assert_eq!(removed, 1);
    assert_eq!(repo.len().await, 2);
}
