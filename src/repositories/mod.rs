//! Repository traits and in-memory reference implementations.

pub mod identity;
pub mod token;

pub use identity::{IdentityRepository, InMemoryIdentityRepository};
pub use token::{InMemoryTokenRepository, TokenRepository};
