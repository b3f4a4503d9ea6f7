//! Token repository trait defining the interface for token record persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::token::{TokenKind, TokenRecord};
use crate::errors::StoreError;

/// Repository trait for [`TokenRecord`] persistence
///
/// Implementations back the eviction policy, the simple token generators,
/// and refresh token rotation. Every query is scoped to one user and one
/// token kind; nothing in the engine looks across users.
///
/// Absence is reported with `None`, never with an error. `StoreError` is
/// reserved for infrastructure failures and passes through the engine
/// uninterpreted.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Persist a new record and assign its id
    ///
    /// # Arguments
    /// * `record` - The record to persist, id still 0
    ///
    /// # Returns
    /// * `Ok(TokenRecord)` - The stored record with its assigned id
    /// * `Err(StoreError)` - Insert failed
    async fn insert(&self, record: TokenRecord) -> Result<TokenRecord, StoreError>;

    /// Find the record matching an exact token value
    ///
    /// # Arguments
    /// * `user_id` - Owner of the record
    /// * `kind` - Token kind to match
    /// * `token` - Exact token value as presented by the client
    async fn find_by_token(
        &self,
        user_id: i64,
        kind: &TokenKind,
        token: &str,
    ) -> Result<Option<TokenRecord>, StoreError>;

    /// List a user's records of one kind, newest first
    ///
    /// Ordered by creation time descending; records created at the same
    /// instant are ordered by id descending so eviction stays deterministic.
    async fn list_for_user(
        &self,
        user_id: i64,
        kind: &TokenKind,
    ) -> Result<Vec<TokenRecord>, StoreError>;

    /// Delete one record by id
    ///
    /// # Returns
    /// * `Ok(true)` - Record existed and was deleted
    /// * `Ok(false)` - No record with that id
    async fn remove(&self, id: i64) -> Result<bool, StoreError>;

    /// Atomically claim the record matching an exact token value
    ///
    /// Removes and returns the record in one step. `None` means zero rows
    /// were affected: the token was never issued or was already consumed.
    /// Single-use semantics (refresh rotation, one-time simple tokens) rest
    /// on this operation; SQL implementations should use a conditional
    /// DELETE and check the affected row count.
    ///
    /// # Example
    /// ```no_run
    /// # use tokenauth::repositories::TokenRepository;
    /// # use tokenauth::domain::entities::token::TokenKind;
    /// # async fn example(repo: &impl TokenRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// match repo.take_by_token(42, &TokenKind::Refresh, "opaque-value").await? {
    ///     Some(record) => println!("consumed token issued at {}", record.created_at),
    ///     None => println!("already consumed or never issued"),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    async fn take_by_token(
        &self,
        user_id: i64,
        kind: &TokenKind,
        token: &str,
    ) -> Result<Option<TokenRecord>, StoreError>;

    /// Delete a user's records of one kind that expired strictly before `before`
    ///
    /// A record whose `expires_at` equals `before` survives.
    ///
    /// # Returns
    /// * `Ok(u64)` - Number of records deleted
    async fn remove_expired(
        &self,
        user_id: i64,
        kind: &TokenKind,
        before: DateTime<Utc>,
    ) -> Result<u64, StoreError>;
}
