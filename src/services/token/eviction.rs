//! Expiry sweeps and per-user token count enforcement.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use crate::domain::entities::token::TokenKind;
use crate::errors::StoreError;
use crate::repositories::TokenRepository;

/// Removes expired and over-quota token records
///
/// Both operations are scoped to one user and one kind and are idempotent.
pub struct EvictionPolicy<S: TokenRepository> {
    store: Arc<S>,
}

impl<S: TokenRepository> Clone for EvictionPolicy<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: TokenRepository> EvictionPolicy<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Delete the user's records of `kind` that expired before now
    ///
    /// # Returns
    ///
    /// * `Ok(u64)` - Number of records deleted
    pub async fn remove_expired(&self, user_id: i64, kind: &TokenKind) -> Result<u64, StoreError> {
        let removed = self.store.remove_expired(user_id, kind, Utc::now()).await?;
        if removed > 0 {
            debug!(user_id, token_type = %kind, removed, "removed expired tokens");
        }
        Ok(removed)
    }

    /// Sweep expired records, then delete the oldest live ones over the cap
    ///
    /// Live records are ranked newest first; counting from 1, every record
    /// at position `max` or beyond is deleted. At most `max - 1` records
    /// survive a pass, leaving room for the record the caller is about to
    /// insert.
    ///
    /// # Returns
    ///
    /// * `Ok(u64)` - Number of records evicted over the cap, not counting
    ///   the expired sweep
    pub async fn enforce_max_count(
        &self,
        user_id: i64,
        kind: &TokenKind,
        max: u32,
    ) -> Result<u64, StoreError> {
        self.remove_expired(user_id, kind).await?;

        let records = self.store.list_for_user(user_id, kind).await?;
        let mut evicted = 0u64;
        for (position, record) in records.iter().enumerate() {
            // 1-based rank from the newest record
            if position as u32 + 1 >= max && self.store.remove(record.id).await? {
                evicted += 1;
            }
        }
        if evicted > 0 {
            debug!(user_id, token_type = %kind, evicted, max, "evicted tokens over allowed count");
        }
        Ok(evicted)
    }
}
