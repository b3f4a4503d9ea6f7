//! Specific error types for token, configuration, and store failures.
//!
//! Messages here are terse and English-only; callers that need richer
//! presentation map these variants in their own layer.

use thiserror::Error;

/// Token codec errors
///
/// These cover everything that can go wrong while signing or verifying a
/// bearer token. Signature, expiry, and malformed-input failures are kept
/// distinct so callers can react differently to each.
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token signature invalid")]
    SignatureInvalid,

    #[error("Token expired")]
    Expired,

    #[error("Malformed token")]
    Malformed,

    #[error("Token signing failed")]
    SigningFailed,
}

/// Configuration errors
///
/// Raised while resolving configuration at construction time, never during
/// a token operation.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown token type: {name}")]
    UnknownTokenType { name: String },

    #[error("Unsupported algorithm: {name}")]
    UnsupportedAlgorithm { name: String },

    #[error("Missing setting: {name}")]
    MissingSetting { name: String },

    #[error("Invalid setting {name}: {message}")]
    InvalidSetting { name: String, message: String },

    #[error("User model misconfigured: {message}")]
    UserModelMisconfigured { message: String },
}

/// Store errors
///
/// Infrastructure failures reported by a repository implementation. A
/// missing row is never a store error; lookups signal absence with `None`.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store connection error: {message}")]
    Connection { message: String },

    #[error("Store backend error: {message}")]
    Backend { message: String },
}
