//! Unit tests for floe-credential
//!
//! Tests individual components in isolation:
//! - Encryption and cryptographic operations
//! - Validation logic for credentials
//! - Error handling and error types
//! - Storage trait contracts

mod encryption_tests;
mod error_tests;
mod storage_trait_tests;
mod validation_tests;
