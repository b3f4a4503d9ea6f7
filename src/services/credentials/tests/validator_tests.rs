//! Unit tests for the credential validator

use crate::config::ModelConfig;
use crate::errors::ConfigError;
use crate::services::credentials::{CredentialValidator, CredentialVerifier, PasswordCipher};
use crate::services::digest::DigestAlgorithm;

/// Toy deterministic cipher standing in for an application one
struct PrefixCipher;

impl PasswordCipher for PrefixCipher {
    fn encrypt(&self, plaintext: &str) -> String {
        format!("enc:{plaintext}")
    }
}

fn config_with_algorithm(algorithm: Option<&str>, encrypt: bool) -> ModelConfig {
    ModelConfig {
        password_algorithm: algorithm.map(str::to_string),
        password_encrypt: encrypt,
        ..Default::default()
    }
}

#[test]
fn test_plain_comparison() {
    let validator = CredentialValidator::new(&ModelConfig::default()).unwrap();

    assert!(validator.verify("s3cret", "s3cret"));
    assert!(!validator.verify("s3cret", "other"));
    assert!(!validator.verify("s3cret", "s3cret "));
}

#[test]
fn test_hashed_comparison() {
    let config = config_with_algorithm(Some("sha256"), false);
    let validator = CredentialValidator::new(&config).unwrap();

    let stored = DigestAlgorithm::Sha256.hex_digest(b"s3cret");
    assert_eq!(validator.encode("s3cret"), stored);
    assert!(validator.verify("s3cret", &stored));
    assert!(!validator.verify("wrong", &stored));
}

#[test]
fn test_hash_then_encrypt_pipeline() {
    let config = config_with_algorithm(Some("sha256"), true);
    let validator = CredentialValidator::with_cipher(&config, Box::new(PrefixCipher)).unwrap();

    let stored = format!("enc:{}", DigestAlgorithm::Sha256.hex_digest(b"s3cret"));
    assert_eq!(validator.encode("s3cret"), stored);
    assert!(validator.verify("s3cret", &stored));
    assert!(!validator.verify("wrong", &stored));
}

#[test]
fn test_cipher_ignored_when_encrypt_disabled() {
    let config = config_with_algorithm(None, false);
    let validator = CredentialValidator::with_cipher(&config, Box::new(PrefixCipher)).unwrap();

    assert_eq!(validator.encode("s3cret"), "s3cret");
}

#[test]
fn test_encrypt_without_cipher_is_rejected() {
    let config = config_with_algorithm(None, true);
    let err = CredentialValidator::new(&config).unwrap_err();

    assert!(matches!(
        err,
        ConfigError::InvalidSetting { name, .. } if name == "model.password_encrypt"
    ));
}

#[test]
fn test_unknown_algorithm_is_rejected() {
    let config = config_with_algorithm(Some("argon2"), false);
    let err = CredentialValidator::new(&config).unwrap_err();

    assert!(matches!(
        err,
        ConfigError::UnsupportedAlgorithm { name } if name == "argon2"
    ));
}
