//! Domain entities representing core objects of the token lifecycle.

pub mod identity;
pub mod token;

// Re-export commonly used types
pub use identity::Identity;
pub use token::{Claims, TokenKind, TokenRecord};
