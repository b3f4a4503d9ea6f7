//! Token services: JWT signing and decoding, per-user eviction, and
//! one-time simple tokens.

pub mod codec;
pub mod eviction;
pub mod simple;

#[cfg(test)]
mod tests;

pub use codec::TokenCodec;
pub use eviction::EvictionPolicy;
pub use simple::SimpleTokenGenerator;
