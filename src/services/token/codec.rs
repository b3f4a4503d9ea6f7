//! JWT signing and verification.

use std::str::FromStr;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::config::JwtConfig;
use crate::domain::entities::identity::Identity;
use crate::domain::entities::token::Claims;
use crate::domain::value_objects::signed_token::SignedToken;
use crate::errors::{ConfigError, TokenError};

/// Signs and verifies bearer tokens
///
/// Key material is resolved once at construction: the HMAC algorithms key
/// from the configured secret, the RSA algorithms from the configured PEM
/// pair. Verification runs with zero leeway, so the expiry instant is the
/// last valid moment of a token's life.
pub struct TokenCodec {
    issuer: String,
    header: Header,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    /// Creates a codec from JWT configuration
    ///
    /// # Returns
    ///
    /// * `Ok(TokenCodec)` - Keys resolved for the configured algorithm
    /// * `Err(ConfigError)` - Unknown algorithm or unusable key material
    pub fn new(config: &JwtConfig) -> Result<Self, ConfigError> {
        let algorithm = Algorithm::from_str(&config.algorithm).map_err(|_| {
            ConfigError::UnsupportedAlgorithm {
                name: config.algorithm.clone(),
            }
        })?;

        let (encoding_key, decoding_key) = match algorithm {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => (
                EncodingKey::from_secret(config.secret.as_bytes()),
                DecodingKey::from_secret(config.secret.as_bytes()),
            ),
            Algorithm::RS256 | Algorithm::RS384 | Algorithm::RS512 => {
                let private_pem = config.rsa_private_key_pem.as_deref().ok_or_else(|| {
                    ConfigError::MissingSetting {
                        name: "jwt.rsa_private_key_pem".to_string(),
                    }
                })?;
                let public_pem = config.rsa_public_key_pem.as_deref().ok_or_else(|| {
                    ConfigError::MissingSetting {
                        name: "jwt.rsa_public_key_pem".to_string(),
                    }
                })?;

                let encoding_key = EncodingKey::from_rsa_pem(private_pem.as_bytes()).map_err(
                    |e| ConfigError::InvalidSetting {
                        name: "jwt.rsa_private_key_pem".to_string(),
                        message: e.to_string(),
                    },
                )?;
                let decoding_key = DecodingKey::from_rsa_pem(public_pem.as_bytes()).map_err(
                    |e| ConfigError::InvalidSetting {
                        name: "jwt.rsa_public_key_pem".to_string(),
                        message: e.to_string(),
                    },
                )?;
                (encoding_key, decoding_key)
            }
            _ => {
                return Err(ConfigError::UnsupportedAlgorithm {
                    name: config.algorithm.clone(),
                })
            }
        };

        let mut validation = Validation::new(algorithm);
        validation.leeway = 0;
        validation.validate_exp = true;

        Ok(Self {
            issuer: config.issuer.clone(),
            header: Header::new(algorithm),
            encoding_key,
            decoding_key,
            validation,
        })
    }

    /// Signs a token for a user, expiring `ttl_seconds` from now
    ///
    /// Pure: nothing is persisted here.
    pub fn sign<I: Identity>(&self, user: &I, ttl_seconds: i64) -> Result<SignedToken, TokenError> {
        let claims = Claims::new(&self.issuer, user.uuid(), ttl_seconds);
        let token = encode(&self.header, &claims, &self.encoding_key)
            .map_err(|_| TokenError::SigningFailed)?;
        Ok(SignedToken::new(token, ttl_seconds))
    }

    /// Verifies a token's signature and expiry and returns its claims
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The decoded claims
    /// * `Err(TokenError)` - `SignatureInvalid`, `Expired`, or `Malformed`
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        TokenError::SignatureInvalid
                    }
                    _ => TokenError::Malformed,
                }
            })?;
        Ok(data.claims)
    }
}
