//! One-time simple tokens: generation and single-use validation.

use std::sync::Arc;

use rand::{rngs::OsRng, RngCore};
use tracing::info;
use uuid::Uuid;

use crate::config::{AuthConfig, TokenTypeProfile};
use crate::domain::entities::identity::Identity;
use crate::domain::entities::token::{TokenKind, TokenRecord};
use crate::errors::{AuthResult, ConfigError};
use crate::repositories::TokenRepository;
use crate::services::digest::DigestAlgorithm;
use crate::services::token::eviction::EvictionPolicy;

/// Characters used for random codes. Ambiguous glyphs (0, 1, l, I, O) are
/// left out so codes survive being read aloud or retyped.
const CODE_ALPHABET: &[u8] = b"23456789abcdefghijkmnopqrstuvwxyzABCDEFGHIJKLMNPQRSTUVWXYZ";

const DEFAULT_CODE_LENGTH: usize = 8;

/// Length of the throwaway code hashed for digest-valued tokens
const HASHED_CODE_LENGTH: usize = 32;

/// How a simple token value is produced
#[derive(Debug, Clone, PartialEq, Eq)]
enum TokenAlgorithm {
    Uuid,
    Code(usize),
    Digest(DigestAlgorithm),
}

impl TokenAlgorithm {
    fn parse(name: &str) -> Result<Self, ConfigError> {
        if name == "uuid" {
            return Ok(Self::Uuid);
        }
        if name == "code" {
            return Ok(Self::Code(DEFAULT_CODE_LENGTH));
        }
        if let Some(length) = name.strip_prefix("code:") {
            return match length.parse::<usize>() {
                Ok(length) if length > 0 => Ok(Self::Code(length)),
                _ => Err(ConfigError::UnsupportedAlgorithm {
                    name: name.to_string(),
                }),
            };
        }
        match DigestAlgorithm::parse(name) {
            Some(digest) => Ok(Self::Digest(digest)),
            None => Err(ConfigError::UnsupportedAlgorithm {
                name: name.to_string(),
            }),
        }
    }
}

/// Generates and validates one-time tokens of a named type for one user
///
/// The type's profile and value algorithm are resolved at construction, so
/// misconfiguration surfaces before any token is minted. Each token is
/// consumed on its first successful validation.
pub struct SimpleTokenGenerator<S: TokenRepository> {
    store: Arc<S>,
    eviction: EvictionPolicy<S>,
    user_id: i64,
    kind: TokenKind,
    profile: TokenTypeProfile,
    algorithm: TokenAlgorithm,
}

impl<S: TokenRepository> SimpleTokenGenerator<S> {
    /// Creates a generator for `type_name` tokens belonging to `user`
    ///
    /// # Returns
    ///
    /// * `Ok(SimpleTokenGenerator)` - Profile resolved and algorithm parsed
    /// * `Err(ConfigError)` - Unknown type name or unsupported algorithm
    pub fn new<I: Identity>(
        store: Arc<S>,
        config: &AuthConfig,
        user: &I,
        type_name: &str,
    ) -> Result<Self, ConfigError> {
        let profile = config.simple_token(type_name)?;
        let algorithm = TokenAlgorithm::parse(&profile.algorithm)?;
        Ok(Self {
            eviction: EvictionPolicy::new(Arc::clone(&store)),
            store,
            user_id: user.id(),
            kind: TokenKind::from(type_name),
            profile,
            algorithm,
        })
    }

    /// Mints and persists a new token
    ///
    /// Expired tokens of this type are swept and the per-user cap enforced
    /// before the new record is inserted, so the user ends up with at most
    /// `max` live tokens. Expiry is stamped here, not at construction.
    pub async fn generate(&self) -> AuthResult<TokenRecord> {
        self.eviction
            .enforce_max_count(self.user_id, &self.kind, self.profile.max)
            .await?;

        let value = self.mint();
        let record =
            TokenRecord::issue(self.user_id, self.kind.clone(), value, self.profile.expires);
        let stored = self.store.insert(record).await?;

        info!(user_id = self.user_id, token_type = %self.kind, "issued simple token");
        Ok(stored)
    }

    /// Validates and consumes a presented token
    ///
    /// The matching record is claimed in the same step that checks it
    /// exists, so a token validates at most once. A match that turns out
    /// to be expired yields `false` and sweeps the user's other expired
    /// tokens of this type; no match yields `false` without a sweep.
    pub async fn validate(&self, candidate: &str) -> AuthResult<bool> {
        let record = match self
            .store
            .take_by_token(self.user_id, &self.kind, candidate)
            .await?
        {
            Some(record) => record,
            None => return Ok(false),
        };

        if record.is_expired() {
            self.eviction.remove_expired(self.user_id, &self.kind).await?;
            return Ok(false);
        }

        info!(user_id = self.user_id, token_type = %self.kind, "consumed simple token");
        Ok(true)
    }

    fn mint(&self) -> String {
        match &self.algorithm {
            TokenAlgorithm::Uuid => Uuid::new_v4().to_string(),
            TokenAlgorithm::Code(length) => generate_code(*length),
            TokenAlgorithm::Digest(digest) => {
                digest.hex_digest(generate_code(HASHED_CODE_LENGTH).as_bytes())
            }
        }
    }
}

/// Draws a random code from the alphabet using the OS CSPRNG
///
/// The modulo introduces a slight bias, negligible at this alphabet size.
fn generate_code(length: usize) -> String {
    let mut rng = OsRng;
    (0..length)
        .map(|_| {
            let index = rng.next_u32() as usize % CODE_ALPHABET.len();
            CODE_ALPHABET[index] as char
        })
        .collect()
}
