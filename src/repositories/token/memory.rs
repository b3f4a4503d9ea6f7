//! In-memory implementation of the token repository.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::entities::token::{TokenKind, TokenRecord};
use crate::errors::StoreError;

use super::r#trait::TokenRepository;

struct Inner {
    next_id: i64,
    records: HashMap<i64, TokenRecord>,
}

/// In-memory token repository
///
/// Reference implementation used in tests and by integrators that do not
/// need durable storage. The take operation runs under the write lock, so
/// single-use claims are atomic here the same way a conditional DELETE is
/// in a SQL store.
pub struct InMemoryTokenRepository {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryTokenRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                next_id: 0,
                records: HashMap::new(),
            })),
        }
    }

    /// Number of records currently stored, across all users and kinds
    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    /// Whether the repository holds no records
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.records.is_empty()
    }
}

impl Default for InMemoryTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn matches(record: &TokenRecord, user_id: i64, kind: &TokenKind) -> bool {
    record.user_id == user_id && record.token_type == *kind
}

#[async_trait]
impl TokenRepository for InMemoryTokenRepository {
    async fn insert(&self, record: TokenRecord) -> Result<TokenRecord, StoreError> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;

        let mut record = record;
        record.id = inner.next_id;
        inner.records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_token(
        &self,
        user_id: i64,
        kind: &TokenKind,
        token: &str,
    ) -> Result<Option<TokenRecord>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .records
            .values()
            .find(|r| matches(r, user_id, kind) && r.token == token)
            .cloned())
    }

    async fn list_for_user(
        &self,
        user_id: i64,
        kind: &TokenKind,
    ) -> Result<Vec<TokenRecord>, StoreError> {
        let inner = self.inner.read().await;
        let mut records: Vec<TokenRecord> = inner
            .records
            .values()
            .filter(|r| matches(r, user_id, kind))
            .cloned()
            .collect();
        records.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(records)
    }

    async fn remove(&self, id: i64) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        Ok(inner.records.remove(&id).is_some())
    }

    async fn take_by_token(
        &self,
        user_id: i64,
        kind: &TokenKind,
        token: &str,
    ) -> Result<Option<TokenRecord>, StoreError> {
        let mut inner = self.inner.write().await;
        let id = inner
            .records
            .values()
            .find(|r| matches(r, user_id, kind) && r.token == token)
            .map(|r| r.id);
        Ok(id.and_then(|id| inner.records.remove(&id)))
    }

    async fn remove_expired(
        &self,
        user_id: i64,
        kind: &TokenKind,
        before: DateTime<Utc>,
    ) -> Result<u64, StoreError> {
        let mut inner = self.inner.write().await;
        let initial = inner.records.len();
        inner
            .records
            .retain(|_, r| !(matches(r, user_id, kind) && r.expires_at < before));
        Ok((initial - inner.records.len()) as u64)
    }
}
