//! Credential verification pipeline.

use constant_time_eq::constant_time_eq;

use crate::config::ModelConfig;
use crate::errors::ConfigError;
use crate::services::digest::DigestAlgorithm;

/// Strategy for comparing a presented password against the stored value
///
/// The session layer only needs a yes/no answer; swapping in bcrypt, argon2,
/// or an external verifier is a matter of implementing this trait.
pub trait CredentialVerifier: Send + Sync {
    /// Whether `candidate` matches the stored value
    fn verify(&self, candidate: &str, stored: &str) -> bool;
}

/// Deterministic cipher applied to passwords after hashing
///
/// Stands in for the application's encryption facility when
/// `model.password_encrypt` is enabled. Must be deterministic: comparison
/// happens on encoded values.
pub trait PasswordCipher: Send + Sync {
    fn encrypt(&self, plaintext: &str) -> String;
}

/// Default verifier driven by the model's password settings
///
/// Encodes the candidate the same way registration encoded the stored value
/// (optional digest, then optional cipher) and compares in constant time.
pub struct CredentialValidator {
    algorithm: Option<DigestAlgorithm>,
    cipher: Option<Box<dyn PasswordCipher>>,
}

impl std::fmt::Debug for CredentialValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialValidator")
            .field("algorithm", &self.algorithm)
            .field("cipher", &self.cipher.as_ref().map(|_| "<dyn PasswordCipher>"))
            .finish()
    }
}

impl CredentialValidator {
    /// Create a validator without a cipher
    ///
    /// Fails if the configuration enables `password_encrypt`, since that
    /// requires a cipher; use [`CredentialValidator::with_cipher`] instead.
    pub fn new(config: &ModelConfig) -> Result<Self, ConfigError> {
        if config.password_encrypt {
            return Err(ConfigError::InvalidSetting {
                name: "model.password_encrypt".to_string(),
                message: "enabled but no password cipher provided".to_string(),
            });
        }
        Ok(Self {
            algorithm: Self::parse_algorithm(config)?,
            cipher: None,
        })
    }

    /// Create a validator backed by an application cipher
    ///
    /// The cipher is only used when the configuration enables
    /// `password_encrypt`.
    pub fn with_cipher(
        config: &ModelConfig,
        cipher: Box<dyn PasswordCipher>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            algorithm: Self::parse_algorithm(config)?,
            cipher: config.password_encrypt.then_some(cipher),
        })
    }

    fn parse_algorithm(config: &ModelConfig) -> Result<Option<DigestAlgorithm>, ConfigError> {
        match config.password_algorithm.as_deref() {
            Some(name) => DigestAlgorithm::parse(name)
                .map(Some)
                .ok_or_else(|| ConfigError::UnsupportedAlgorithm {
                    name: name.to_string(),
                }),
            None => Ok(None),
        }
    }

    /// Encode a plaintext password into its stored form
    ///
    /// Registration-side counterpart of [`CredentialVerifier::verify`]:
    /// whatever this returns is what the application should persist.
    pub fn encode(&self, password: &str) -> String {
        let mut value = password.to_string();
        if let Some(algorithm) = self.algorithm {
            value = algorithm.hex_digest(value.as_bytes());
        }
        if let Some(cipher) = &self.cipher {
            value = cipher.encrypt(&value);
        }
        value
    }
}

impl CredentialVerifier for CredentialValidator {
    fn verify(&self, candidate: &str, stored: &str) -> bool {
        let encoded = self.encode(candidate);
        if encoded.len() != stored.len() {
            return false;
        }
        constant_time_eq(encoded.as_bytes(), stored.as_bytes())
    }
}
