pub use domain_key::KeyParseError;
use domain_key::{define_domain, key_type};

define_domain!(PrameterDomain, "parameter");
key_type!(ParameterKey, PrameterDomain);

define_domain!(CredentialDomain, "credential");
key_type!(CredentialKey, CredentialDomain);

define_domain!(NodeDomain, "node");
key_type!(NodeKey, NodeDomain);

/// Alias for the shared parse-error type, under the name node registry
/// callers (`floe-node`) expect.
pub type NodeKeyError = KeyParseError;
