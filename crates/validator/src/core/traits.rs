//! Combinator methods available on every [`super::Validate`] implementation.

use super::Validate;
use crate::combinators::{And, Not, Or};

/// Fluent combinator methods for building compound validators.
pub trait ValidateExt: Validate + Sized {
    /// Require both `self` and `other` to pass.
    fn and<R>(self, other: R) -> And<Self, R>
    where
        R: Validate<Input = Self::Input>,
    {
        And::new(self, other)
    }

    /// Require either `self` or `other` to pass.
    fn or<R>(self, other: R) -> Or<Self, R>
    where
        R: Validate<Input = Self::Input>,
    {
        Or::new(self, other)
    }

    /// Negate this validator: passes exactly when `self` fails.
    fn not(self) -> Not<Self> {
        Not::new(self)
    }
}

impl<V: Validate> ValidateExt for V {}
