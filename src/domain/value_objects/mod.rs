//! Value objects representing immutable domain concepts.

pub mod credentials;
pub mod signed_token;

// Re-export commonly used types
pub use credentials::Credentials;
pub use signed_token::{SignedToken, TokenPair};
