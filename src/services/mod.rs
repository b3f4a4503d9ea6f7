//! Services containing the token lifecycle logic.

pub mod credentials;
pub mod digest;
pub mod session;
pub mod token;

// Re-export commonly used types
pub use credentials::{CredentialValidator, CredentialVerifier, PasswordCipher};
pub use digest::DigestAlgorithm;
pub use session::SessionIssuer;
pub use token::{EvictionPolicy, SimpleTokenGenerator, TokenCodec};
