//! Signed token value objects returned to the caller.

use serde::{Deserialize, Serialize};

/// A signed bearer token together with its lifetime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedToken {
    /// Lifetime in seconds from issuance
    pub ttl: i64,

    /// The signed token string
    pub token: String,
}

impl SignedToken {
    pub fn new(token: String, ttl: i64) -> Self {
        Self { ttl, token }
    }
}

/// Access and refresh tokens issued together
///
/// Only the refresh token is mirrored into the store; the access token lives
/// solely in its signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived access token
    pub access: SignedToken,

    /// Longer-lived, single-use refresh token
    pub refresh: SignedToken,
}
