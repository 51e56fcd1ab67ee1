//! Convenience re-exports: `use floe_validator::prelude::*;`.

pub use crate::combinators::{and, and_all, cached, not, And, AndAll, Cached, Not, Or};
pub use crate::core::{Validate, ValidateExt, ValidationComplexity, ValidationError, ValidatorMetadata};
pub use crate::validators::number::{max, min, range};
pub use crate::validators::string::{contains, email, exact_length, max_length, min_length, pattern};

#[cfg(feature = "network")]
pub use crate::network::{Hostname, IpAddr, Ipv4, Ipv6};

#[cfg(feature = "temporal")]
pub use crate::temporal::{Date, DateTime, Time, Uuid};
