//! Credential verification: the pluggable password comparison strategy.

mod service;

#[cfg(test)]
mod tests;

pub use service::{CredentialValidator, CredentialVerifier, PasswordCipher};
