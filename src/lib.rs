//! # tokenauth
//!
//! Token lifecycle engine for a user-identity backend: short-lived signed
//! access tokens, rotating single-use refresh tokens, and a family of
//! one-time "simple tokens" (verification codes, reset tokens) with
//! per-type expiry and per-user concurrency caps.
//!
//! The engine is storage-agnostic: durable state lives behind the
//! [`repositories::TokenRepository`] and [`repositories::IdentityRepository`]
//! traits, and password comparison behind
//! [`services::credentials::CredentialVerifier`]. In-memory reference
//! implementations back the test suite and small deployments.
//!
//! ## Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use tokenauth::config::AuthConfig;
//! use tokenauth::domain::Credentials;
//! use tokenauth::repositories::{InMemoryIdentityRepository, InMemoryTokenRepository};
//! use tokenauth::services::credentials::CredentialValidator;
//! use tokenauth::services::session::SessionIssuer;
//! # use tokenauth::domain::Identity;
//! # #[derive(Clone)]
//! # struct User;
//! # impl Identity for User {
//! #     fn id(&self) -> i64 { 1 }
//! #     fn uuid(&self) -> uuid::Uuid { uuid::Uuid::new_v4() }
//! #     fn username(&self) -> &str { "alice" }
//! #     fn password_hash(&self) -> &str { "" }
//! # }
//!
//! # async fn demo() -> tokenauth::errors::AuthResult<()> {
//! let config = AuthConfig::from_env();
//! let identities = Arc::new(InMemoryIdentityRepository::<User>::new());
//! let tokens = Arc::new(InMemoryTokenRepository::new());
//! let verifier = CredentialValidator::new(&config.model)?;
//!
//! let issuer = SessionIssuer::new(identities, tokens, verifier, &config)?;
//! let pair = issuer.authenticate(&Credentials::new("alice", "secret")).await?;
//! let user = issuer.validate_bearer(&pair.access.token).await?;
//! let rotated = issuer.refresh(&pair.refresh.token).await?;
//! # let _ = (user, rotated);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use config::{AuthConfig, JwtConfig, ModelConfig, TokenTypeProfile};
pub use domain::*;
pub use errors::*;
pub use repositories::{
    IdentityRepository, InMemoryIdentityRepository, InMemoryTokenRepository, TokenRepository,
};
pub use services::{
    CredentialValidator, CredentialVerifier, DigestAlgorithm, EvictionPolicy, PasswordCipher,
    SessionIssuer, SimpleTokenGenerator, TokenCodec,
};
