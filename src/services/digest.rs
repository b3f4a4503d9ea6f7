//! Digest algorithms for hashed tokens and the credential pipeline.

use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};

/// Supported digest algorithms
///
/// Parsed from configuration strings at construction time; an unknown name
/// is reported as a configuration error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestAlgorithm {
    Sha224,
    Sha256,
    Sha384,
    Sha512,
}

impl DigestAlgorithm {
    /// Parse a configuration name into an algorithm
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "sha224" => Some(Self::Sha224),
            "sha256" => Some(Self::Sha256),
            "sha384" => Some(Self::Sha384),
            "sha512" => Some(Self::Sha512),
            _ => None,
        }
    }

    /// The configuration name of this algorithm
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sha224 => "sha224",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
        }
    }

    /// Hex-encoded digest of `data`
    pub fn hex_digest(&self, data: &[u8]) -> String {
        match self {
            Self::Sha224 => hex::encode(Sha224::digest(data)),
            Self::Sha256 => hex::encode(Sha256::digest(data)),
            Self::Sha384 => hex::encode(Sha384::digest(data)),
            Self::Sha512 => hex::encode(Sha512::digest(data)),
        }
    }
}
