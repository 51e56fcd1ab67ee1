//! Composable input validation for the Floe workflow engine.
//!
//! [`core::Validate`] is the base trait; [`combinators`] compose leaf
//! validators from [`validators`] into larger rules with `.and()`, `.or()`,
//! and `not()`. `floe-parameter` and `floe-node` build their configuration
//! constraint checks on top of this crate.

pub mod combinators;
pub mod core;
pub mod prelude;
pub mod validators;

pub use core::{Validate, ValidationComplexity, ValidationError, ValidatorMetadata};

#[cfg(feature = "network")]
pub mod network;

#[cfg(feature = "temporal")]
pub mod temporal;
