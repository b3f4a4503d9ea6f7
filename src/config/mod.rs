//! Authentication configuration: JWT settings, user model bindings, and
//! simple token profiles.
//!
//! Everything is an explicit struct handed to the services at construction.
//! All fields carry serde defaults so a partial document deserializes into a
//! working configuration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

const DEFAULT_SECRET: &str = "development-secret-please-change-in-production";

/// JWT signing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens (HMAC algorithms)
    #[serde(default = "default_secret")]
    pub secret: String,

    /// Algorithm for JWT signing (default: HS256)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// JWT issuer claim
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// Access token expiry time in seconds
    #[serde(default = "default_access_expires")]
    pub access_expires: i64,

    /// Refresh token expiry time in seconds
    #[serde(default = "default_refresh_expires")]
    pub refresh_expires: i64,

    /// Maximum refresh tokens kept per user
    #[serde(default = "default_max_concurrent_logins")]
    pub max_concurrent_logins: u32,

    /// PEM-encoded RSA private key, required for the RS* algorithms
    #[serde(default)]
    pub rsa_private_key_pem: Option<String>,

    /// PEM-encoded RSA public key, required for the RS* algorithms
    #[serde(default)]
    pub rsa_public_key_pem: Option<String>,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: default_secret(),
            algorithm: default_algorithm(),
            issuer: default_issuer(),
            access_expires: default_access_expires(),
            refresh_expires: default_refresh_expires(),
            max_concurrent_logins: default_max_concurrent_logins(),
            rsa_private_key_pem: None,
            rsa_public_key_pem: None,
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set the issuer claim
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    /// Set access token expiry in seconds
    pub fn with_access_expires(mut self, seconds: i64) -> Self {
        self.access_expires = seconds;
        self
    }

    /// Set refresh token expiry in seconds
    pub fn with_refresh_expires(mut self, seconds: i64) -> Self {
        self.refresh_expires = seconds;
        self
    }

    /// Set the per-user refresh token cap
    pub fn with_max_concurrent_logins(mut self, max: u32) -> Self {
        self.max_concurrent_logins = max;
        self
    }

    /// Set the signing algorithm by name (e.g. "HS256", "RS256")
    pub fn with_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = algorithm.into();
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }
}

/// User model bindings
///
/// Field names are data for store implementations; the engine itself only
/// checks they are present and consumes the password pipeline settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelConfig {
    /// Name of the user model or table
    #[serde(default = "default_user")]
    pub user: String,

    /// Column holding the login name
    #[serde(default = "default_username_field")]
    pub username_field: String,

    /// Column holding the integer primary key
    #[serde(default = "default_id_field")]
    pub id_field: String,

    /// Column holding the public UUID
    #[serde(default = "default_uuid_field")]
    pub uuid_field: String,

    /// Column holding the stored password value
    #[serde(default = "default_password_field")]
    pub password_field: String,

    /// Digest applied to passwords before comparison (e.g. "sha256")
    #[serde(default)]
    pub password_algorithm: Option<String>,

    /// Whether stored passwords go through an application cipher
    #[serde(default)]
    pub password_encrypt: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            user: default_user(),
            username_field: default_username_field(),
            id_field: default_id_field(),
            uuid_field: default_uuid_field(),
            password_field: default_password_field(),
            password_algorithm: None,
            password_encrypt: false,
        }
    }
}

impl ModelConfig {
    /// Check that every binding is present
    pub fn validate(&self) -> Result<(), ConfigError> {
        let bindings = [
            ("model.user", &self.user),
            ("model.username_field", &self.username_field),
            ("model.id_field", &self.id_field),
            ("model.uuid_field", &self.uuid_field),
            ("model.password_field", &self.password_field),
        ];
        for (name, value) in bindings {
            if value.trim().is_empty() {
                return Err(ConfigError::UserModelMisconfigured {
                    message: format!("{name} is empty"),
                });
            }
        }
        Ok(())
    }
}

/// Settings for one named simple token type
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TokenTypeProfile {
    /// Token lifetime in seconds
    #[serde(default = "default_profile_expires")]
    pub expires: i64,

    /// Value algorithm: "uuid", "code", "code:<len>", or a digest name
    #[serde(default = "default_profile_algorithm")]
    pub algorithm: String,

    /// Maximum live tokens of this type per user
    #[serde(default = "default_profile_max")]
    pub max: u32,
}

impl Default for TokenTypeProfile {
    fn default() -> Self {
        Self {
            expires: default_profile_expires(),
            algorithm: default_profile_algorithm(),
            max: default_profile_max(),
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    #[serde(default)]
    pub jwt: JwtConfig,

    /// User model bindings
    #[serde(default)]
    pub model: ModelConfig,

    /// Simple token profiles, keyed by type name
    #[serde(default)]
    pub simple_tokens: HashMap<String, TokenTypeProfile>,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| default_secret());
        let algorithm = std::env::var("JWT_ALGORITHM").unwrap_or_else(|_| default_algorithm());
        let issuer = std::env::var("JWT_ISSUER").unwrap_or_else(|_| default_issuer());
        let access_expires = std::env::var("JWT_ACCESS_EXPIRES")
            .unwrap_or_else(|_| "3600".to_string())
            .parse()
            .unwrap_or(default_access_expires());
        let refresh_expires = std::env::var("JWT_REFRESH_EXPIRES")
            .unwrap_or_else(|_| "86400".to_string())
            .parse()
            .unwrap_or(default_refresh_expires());
        let max_concurrent_logins = std::env::var("JWT_MAX_CONCURRENT_LOGINS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .unwrap_or(default_max_concurrent_logins());

        Self {
            jwt: JwtConfig {
                secret,
                algorithm,
                issuer,
                access_expires,
                refresh_expires,
                max_concurrent_logins,
                rsa_private_key_pem: None,
                rsa_public_key_pem: None,
            },
            model: ModelConfig::default(),
            simple_tokens: HashMap::new(),
        }
    }

    /// Register a simple token profile under a type name
    pub fn with_simple_token(
        mut self,
        name: impl Into<String>,
        profile: TokenTypeProfile,
    ) -> Self {
        self.simple_tokens.insert(name.into(), profile);
        self
    }

    /// Look up the profile for a named simple token type
    pub fn simple_token(&self, name: &str) -> Result<TokenTypeProfile, ConfigError> {
        self.simple_tokens
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownTokenType {
                name: name.to_string(),
            })
    }
}

fn default_secret() -> String {
    String::from(DEFAULT_SECRET)
}

fn default_algorithm() -> String {
    String::from("HS256")
}

fn default_issuer() -> String {
    String::from("tokenauth")
}

fn default_access_expires() -> i64 {
    3600 // 1 hour
}

fn default_refresh_expires() -> i64 {
    86400 // 24 hours
}

fn default_max_concurrent_logins() -> u32 {
    5
}

fn default_user() -> String {
    String::from("users")
}

fn default_username_field() -> String {
    String::from("username")
}

fn default_id_field() -> String {
    String::from("id")
}

fn default_uuid_field() -> String {
    String::from("uid")
}

fn default_password_field() -> String {
    String::from("password")
}

fn default_profile_expires() -> i64 {
    3600
}

fn default_profile_algorithm() -> String {
    String::from("uuid")
}

fn default_profile_max() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.algorithm, "HS256");
        assert_eq!(config.access_expires, 3600);
        assert_eq!(config.refresh_expires, 86400);
        assert_eq!(config.max_concurrent_logins, 5);
        assert!(config.is_using_default_secret());
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("my-secret")
            .with_issuer("my-app")
            .with_access_expires(600)
            .with_refresh_expires(7200)
            .with_max_concurrent_logins(2);

        assert_eq!(config.issuer, "my-app");
        assert_eq!(config.access_expires, 600);
        assert_eq!(config.refresh_expires, 7200);
        assert_eq!(config.max_concurrent_logins, 2);
        assert!(!config.is_using_default_secret());
    }

    #[test]
    fn test_model_config_defaults() {
        let config = ModelConfig::default();
        assert_eq!(config.user, "users");
        assert_eq!(config.username_field, "username");
        assert_eq!(config.id_field, "id");
        assert_eq!(config.uuid_field, "uid");
        assert_eq!(config.password_field, "password");
        assert_eq!(config.password_algorithm, None);
        assert!(!config.password_encrypt);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_model_config_rejects_empty_binding() {
        let config = ModelConfig {
            user: String::new(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::UserModelMisconfigured { .. }));
    }

    #[test]
    fn test_simple_token_profile_defaults() {
        let profile = TokenTypeProfile::default();
        assert_eq!(profile.expires, 3600);
        assert_eq!(profile.algorithm, "uuid");
        assert_eq!(profile.max, 1);
    }

    #[test]
    fn test_simple_token_lookup() {
        let config = AuthConfig::default().with_simple_token(
            "password_reset",
            TokenTypeProfile {
                expires: 600,
                algorithm: "code".to_string(),
                max: 1,
            },
        );

        let profile = config.simple_token("password_reset").unwrap();
        assert_eq!(profile.expires, 600);
        assert_eq!(profile.algorithm, "code");

        let err = config.simple_token("unknown").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnknownTokenType { name } if name == "unknown"
        ));
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let config: AuthConfig = serde_json::from_str(
            r#"{
                "jwt": { "secret": "doc-secret", "access_expires": 120 },
                "simple_tokens": { "verify_email": { "algorithm": "sha256" } }
            }"#,
        )
        .unwrap();

        assert_eq!(config.jwt.secret, "doc-secret");
        assert_eq!(config.jwt.access_expires, 120);
        assert_eq!(config.jwt.refresh_expires, 86400);
        assert_eq!(config.jwt.algorithm, "HS256");
        assert_eq!(config.model.user, "users");

        let profile = config.simple_token("verify_email").unwrap();
        assert_eq!(profile.algorithm, "sha256");
        assert_eq!(profile.expires, 3600);
        assert_eq!(profile.max, 1);
    }
}
