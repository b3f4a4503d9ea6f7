//! Error types for the token lifecycle engine.

mod types;

// Re-export all error types
pub use types::{ConfigError, StoreError, TokenError};

use thiserror::Error;

/// Top-level error for authentication and token operations
#[derive(Error, Debug)]
pub enum AuthError {
    /// Credentials were rejected or a presented token does not belong to an
    /// active session. Deliberately carries no detail.
    #[error("Authorization failed")]
    AuthorizationFailed,

    // Bridge to specific error types
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type AuthResult<T> = Result<T, AuthError>;
