//! Tests for the credential verification pipeline

#[cfg(test)]
mod validator_tests;
