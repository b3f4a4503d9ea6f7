//! Session orchestration: login, bearer validation, and refresh rotation

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::{AuthConfig, JwtConfig};
use crate::domain::entities::identity::Identity;
use crate::domain::entities::token::{TokenKind, TokenRecord};
use crate::domain::value_objects::credentials::Credentials;
use crate::domain::value_objects::signed_token::TokenPair;
use crate::errors::{AuthError, AuthResult, ConfigError};
use crate::repositories::{IdentityRepository, TokenRepository};
use crate::services::credentials::CredentialVerifier;
use crate::services::token::codec::TokenCodec;
use crate::services::token::eviction::EvictionPolicy;

/// Issues, validates, and rotates session token pairs
///
/// Access tokens live only in their signed form; refresh tokens are also
/// mirrored into the store so rotation can consume them. A refresh token
/// is good for exactly one rotation.
pub struct SessionIssuer<U, T, V>
where
    U: IdentityRepository,
    T: TokenRepository,
    V: CredentialVerifier,
{
    /// Identity lookups by username and UUID
    identities: Arc<U>,
    /// Persisted refresh token records
    tokens: Arc<T>,
    /// Pluggable password comparison
    verifier: V,
    /// JWT signing and verification
    codec: TokenCodec,
    /// Expiry sweeps and the concurrent login cap
    eviction: EvictionPolicy<T>,
    /// Token lifetimes and the login cap
    config: JwtConfig,
}

impl<U, T, V> SessionIssuer<U, T, V>
where
    U: IdentityRepository,
    T: TokenRepository,
    V: CredentialVerifier,
{
    /// Create a session issuer from configuration
    ///
    /// # Returns
    ///
    /// * `Ok(SessionIssuer)` - Model bindings validated, codec keys resolved
    /// * `Err(ConfigError)` - Empty model binding or unusable JWT settings
    pub fn new(
        identities: Arc<U>,
        tokens: Arc<T>,
        verifier: V,
        config: &AuthConfig,
    ) -> Result<Self, ConfigError> {
        config.model.validate()?;
        let codec = TokenCodec::new(&config.jwt)?;

        Ok(Self {
            identities,
            eviction: EvictionPolicy::new(Arc::clone(&tokens)),
            tokens,
            verifier,
            codec,
            config: config.jwt.clone(),
        })
    }

    /// Authenticate credentials and open a session
    ///
    /// Resolves the user by username, checks the password through the
    /// configured verifier, and signs a fresh token pair. Both failure
    /// modes collapse into `AuthorizationFailed` so a caller cannot probe
    /// which half was wrong.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Access and refresh tokens with their TTLs
    /// * `Err(AuthError::AuthorizationFailed)` - Unknown user or bad password
    pub async fn authenticate(&self, credentials: &Credentials) -> AuthResult<TokenPair> {
        let user = match self
            .identities
            .find_by_username(&credentials.username)
            .await?
        {
            Some(user) => user,
            None => {
                warn!(
                    username = %credentials.username,
                    event = "unknown_username",
                    "Login rejected"
                );
                return Err(AuthError::AuthorizationFailed);
            }
        };

        if !self.verifier.verify(&credentials.password, user.password_hash()) {
            warn!(
                user_id = user.id(),
                event = "password_mismatch",
                "Login rejected"
            );
            return Err(AuthError::AuthorizationFailed);
        }

        let pair = self.issue_pair(&user).await?;

        info!(user_id = user.id(), event = "session_opened", "Session opened");
        Ok(pair)
    }

    /// Validate a bearer token and load the user it names
    ///
    /// Accepts the signed string with or without a case-insensitive
    /// `Bearer ` prefix.
    ///
    /// # Returns
    ///
    /// * `Ok(user)` - Signature and expiry check out and the subject exists
    /// * `Err(AuthError::Token(_))` - Signature, expiry, or parse failure
    /// * `Err(AuthError::AuthorizationFailed)` - Subject names no known user
    pub async fn validate_bearer(&self, token: &str) -> AuthResult<U::User> {
        let claims = self.codec.decode(strip_bearer(token))?;
        let subject = claims
            .subject()
            .map_err(|_| AuthError::AuthorizationFailed)?;

        match self.identities.find_by_uuid(subject).await? {
            Some(user) => Ok(user),
            None => {
                warn!(
                    subject = %subject,
                    event = "unknown_subject",
                    "Bearer token names no user"
                );
                Err(AuthError::AuthorizationFailed)
            }
        }
    }

    /// Rotate a refresh token into a new access and refresh pair
    ///
    /// The cap on concurrent logins is enforced before the presented token
    /// is claimed, so a token that has already fallen over the cap cannot
    /// be rotated. The claim itself is conditional: consuming the record
    /// and checking it exists are one step, and a token that was already
    /// rotated (or never persisted) fails that claim.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - A fresh pair; the presented token is now dead
    /// * `Err(AuthError::Token(_))` - Signature, expiry, or parse failure
    /// * `Err(AuthError::AuthorizationFailed)` - Replayed or unknown token
    pub async fn refresh(&self, token: &str) -> AuthResult<TokenPair> {
        let stripped = strip_bearer(token);
        let user = self.validate_bearer(stripped).await?;

        self.eviction
            .enforce_max_count(
                user.id(),
                &TokenKind::Refresh,
                self.config.max_concurrent_logins,
            )
            .await?;

        if self
            .tokens
            .take_by_token(user.id(), &TokenKind::Refresh, stripped)
            .await?
            .is_none()
        {
            warn!(
                user_id = user.id(),
                event = "refresh_replay_detected",
                "Refresh token already consumed or never issued"
            );
            return Err(AuthError::AuthorizationFailed);
        }

        let pair = self.issue_pair(&user).await?;

        info!(user_id = user.id(), event = "session_rotated", "Session rotated");
        Ok(pair)
    }

    /// Sign an access and refresh pair and persist the refresh half
    async fn issue_pair(&self, user: &U::User) -> AuthResult<TokenPair> {
        let access = self.codec.sign(user, self.config.access_expires)?;
        let refresh = self.codec.sign(user, self.config.refresh_expires)?;

        self.eviction
            .enforce_max_count(
                user.id(),
                &TokenKind::Refresh,
                self.config.max_concurrent_logins,
            )
            .await?;

        let record = TokenRecord::issue(
            user.id(),
            TokenKind::Refresh,
            refresh.token.clone(),
            self.config.refresh_expires,
        );
        self.tokens.insert(record).await?;

        Ok(TokenPair { access, refresh })
    }
}

/// Strip an optional case-insensitive `Bearer ` prefix and outer whitespace
fn strip_bearer(token: &str) -> &str {
    let trimmed = token.trim();
    match trimmed.get(..7) {
        Some(prefix) if prefix.eq_ignore_ascii_case("bearer ") => trimmed[7..].trim_start(),
        _ => trimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::strip_bearer;

    #[test]
    fn test_strips_the_prefix_case_insensitively() {
        assert_eq!(strip_bearer("Bearer abc.def.ghi"), "abc.def.ghi");
        assert_eq!(strip_bearer("bearer abc.def.ghi"), "abc.def.ghi");
        assert_eq!(strip_bearer("BEARER abc.def.ghi"), "abc.def.ghi");
    }

    #[test]
    fn test_leaves_bare_tokens_alone() {
        assert_eq!(strip_bearer("abc.def.ghi"), "abc.def.ghi");
        assert_eq!(strip_bearer("bearer"), "bearer");
        assert_eq!(strip_bearer(""), "");
    }

    #[test]
    fn test_trims_surrounding_whitespace() {
        assert_eq!(strip_bearer("  Bearer   abc  "), "abc");
        assert_eq!(strip_bearer("  abc  "), "abc");
    }

    #[test]
    fn test_ignores_prefixes_that_are_not_ascii() {
        // Multibyte input must not split inside a character
        assert_eq!(strip_bearer("béarer abc"), "béarer abc");
    }
}
