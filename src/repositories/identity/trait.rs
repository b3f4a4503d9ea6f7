//! Identity repository trait for resolving users.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::identity::Identity;
use crate::errors::StoreError;

/// Repository trait for looking up the application's user entities
///
/// The engine resolves users twice: by username during authentication and by
/// the UUID carried in a token's subject claim during validation. A missing
/// user is `None`; the session layer turns that into an authorization
/// failure without leaking which lookup missed.
#[async_trait]
pub trait IdentityRepository: Send + Sync {
    /// The application's user entity
    type User: Identity;

    /// Find a user by login name
    async fn find_by_username(&self, username: &str) -> Result<Option<Self::User>, StoreError>;

    /// Find a user by public UUID
    async fn find_by_uuid(&self, uuid: Uuid) -> Result<Option<Self::User>, StoreError>;
}
