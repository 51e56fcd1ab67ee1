//! NOT combinator - negates a validator

use crate::core::{Validate, ValidationComplexity, ValidationError, ValidatorMetadata};

/// Negates a validator: passes exactly when the inner validator fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Not<V> {
    inner: V,
}

impl<V> Not<V> {
    pub fn new(inner: V) -> Self {
        Self { inner }
    }
}

impl<V> Validate for Not<V>
where
    V: Validate,
{
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        match self.inner.validate(input) {
            Ok(()) => Err(ValidationError::new(
                "negated",
                format!("{} unexpectedly passed", self.inner.metadata().name),
            )),
            Err(_) => Ok(()),
        }
    }

    fn metadata(&self) -> ValidatorMetadata {
        let inner_meta = self.inner.metadata();
        ValidatorMetadata {
            name: format!("Not({})", inner_meta.name).into(),
            description: Some(format!("{} must fail", inner_meta.name).into()),
            complexity: inner_meta.complexity,
            cacheable: inner_meta.cacheable,
            estimated_time: None,
            tags: inner_meta.tags,
            version: None,
            custom: Vec::new(),
        }
    }
}

/// Creates a NOT combinator from a validator.
pub fn not<V: Validate>(inner: V) -> Not<V> {
    Not::new(inner)
}
