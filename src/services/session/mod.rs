//! Session issuance, validation, and refresh rotation

mod service;

#[cfg(test)]
mod tests;

pub use service::SessionIssuer;
