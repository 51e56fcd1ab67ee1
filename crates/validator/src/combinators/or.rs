//! OR combinator - logical disjunction of validators

use crate::core::{Validate, ValidationComplexity, ValidationError, ValidatorMetadata};
use std::borrow::Cow;

/// Combines two validators with logical OR: passes if either passes.
///
/// On failure, reports the right-hand validator's error (the left's is
/// discarded) since combinators are typically chained left-to-right from
/// the more specific check to the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Or<L, R> {
    left: L,
    right: R,
}

impl<L, R> Or<L, R> {
    pub fn new(left: L, right: R) -> Self {
        Self { left, right }
    }
}

impl<L, R> Validate for Or<L, R>
where
    L: Validate,
    R: Validate<Input = L::Input>,
{
    type Input = L::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        match self.left.validate(input) {
            Ok(()) => Ok(()),
            Err(_) => self.right.validate(input),
        }
    }

    fn metadata(&self) -> ValidatorMetadata {
        let left_meta = self.left.metadata();
        let right_meta = self.right.metadata();
        let complexity = std::cmp::max(left_meta.complexity, right_meta.complexity);
        let cacheable = left_meta.cacheable && right_meta.cacheable;

        ValidatorMetadata {
            name: format!("Or({}, {})", left_meta.name, right_meta.name).into(),
            description: Some(
                format!("Either {} or {} must pass", left_meta.name, right_meta.name).into(),
            ),
            complexity,
            cacheable,
            estimated_time: None,
            tags: {
                let mut tags = left_meta.tags;
                tags.extend(right_meta.tags);
                tags.push(Cow::Borrowed("combinator"));
                tags
            },
            version: None,
            custom: Vec::new(),
        }
    }
}
