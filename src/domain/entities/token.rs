//! Token entities: signed-token claims and stored token records.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of a stored token
///
/// Access and refresh tokens are fixed kinds; everything else is a named
/// simple token type ("password_reset", "verify_email", ...). Persisted as a
/// plain string of at most 30 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Access,
    Refresh,
    Simple(String),
}

impl TokenKind {
    /// The persisted string form of this kind
    pub fn as_str(&self) -> &str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
            TokenKind::Simple(name) => name,
        }
    }
}

impl From<&str> for TokenKind {
    fn from(value: &str) -> Self {
        match value {
            "access" => TokenKind::Access,
            "refresh" => TokenKind::Refresh,
            other => TokenKind::Simple(other.to_string()),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TokenKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TokenKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(TokenKind::from(value.as_str()))
    }
}

/// Claims structure for the JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Issuer
    pub iss: String,

    /// Subject (the user's UUID)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

impl Claims {
    /// Creates claims for a token expiring `ttl_seconds` from now
    pub fn new(issuer: &str, subject: Uuid, ttl_seconds: i64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            iss: issuer.to_string(),
            sub: subject.to_string(),
            iat: now,
            exp: now + ttl_seconds,
        }
    }

    /// Gets the subject as a UUID
    ///
    /// # Returns
    ///
    /// `Ok(Uuid)` if the subject parses as a UUID, `Err` otherwise
    pub fn subject(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }

    /// Checks if the claims have expired
    ///
    /// The expiry instant itself is still valid.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// Token record persisted by a [`TokenRepository`](crate::repositories::TokenRepository)
///
/// Stored schema: `{id: auto-increment, user_id, token_type: string(30),
/// token: text, expires_at, created_at, updated_at}`. The store does not
/// enforce uniqueness on the token value; duplicates are prevented only by
/// the eviction policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    /// Store-assigned identifier, 0 until inserted
    pub id: i64,

    /// User this token belongs to
    pub user_id: i64,

    /// Kind of token
    pub token_type: TokenKind,

    /// Opaque token value as presented by the client
    pub token: String,

    /// Timestamp after which the token is no longer valid
    pub expires_at: DateTime<Utc>,

    /// Timestamp when the record was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the record was last updated
    pub updated_at: DateTime<Utc>,
}

impl TokenRecord {
    /// Creates a record expiring `ttl_seconds` from now
    ///
    /// The id stays 0 until the store assigns one on insert.
    pub fn issue(user_id: i64, token_type: TokenKind, token: String, ttl_seconds: i64) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            user_id,
            token_type,
            token,
            expires_at: now + Duration::seconds(ttl_seconds),
            created_at: now,
            updated_at: now,
        }
    }

    /// Checks if the record has expired
    ///
    /// A record is valid while `expires_at` has not passed; the expiry
    /// instant itself still counts as valid.
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}
