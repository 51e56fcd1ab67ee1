//! Node schema definitions: the `configurations`/`input schema`/`output
//! schema` triple a node specification declares, and validation of a node
//! instance's configuration against it.
//!
//! [`NodeSchema`] is consumed by the Spec Registry's `ValidateConfig` and
//! `Materialize` operations; [`SecretString`] is the runtime representation
//! of a `sensitive` configuration value once resolved.

pub mod error;
pub mod field;
pub mod schema;
pub mod secret;

pub use error::SchemaError;
pub use field::{ConfigField, FieldType, IoField};
pub use schema::NodeSchema;
pub use secret::SecretString;
