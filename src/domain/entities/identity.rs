//! Identity trait binding the engine to the application's user model.

use uuid::Uuid;

/// Read-only view of an authenticated user
///
/// Implemented by the application's user entity. The engine never mutates a
/// user; it only reads the fields the token lifecycle needs. Which columns
/// back these accessors is the application's concern (see
/// [`ModelConfig`](crate::config::ModelConfig)).
pub trait Identity: Send + Sync {
    /// Integer primary key, used to scope token records
    fn id(&self) -> i64;

    /// Public UUID, carried as the subject claim of signed tokens
    fn uuid(&self) -> Uuid;

    /// Login name
    fn username(&self) -> &str;

    /// Stored password value, in whatever form the credential pipeline
    /// produced at registration time
    fn password_hash(&self) -> &str;
}
