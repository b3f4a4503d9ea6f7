//! Tests for the in-memory token repository

#[cfg(test)]
mod memory_tests;
