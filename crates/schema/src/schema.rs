//! Node schemas: the `configurations` + `input schema` + `output schema`
//! triple a node specification declares, and validation of a node instance's
//! configuration against it.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::field::{ConfigField, IoField};

/// The full schema surface of a node specification.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct NodeSchema {
    #[serde(default)]
    pub configurations: IndexMap<String, ConfigField>,
    #[serde(default)]
    pub input: IndexMap<String, IoField>,
    #[serde(default)]
    pub output: IndexMap<String, IoField>,
}

impl NodeSchema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(mut self, key: impl Into<String>, field: ConfigField) -> Self {
        self.configurations.insert(key.into(), field);
        self
    }

    #[must_use]
    pub fn with_input(mut self, key: impl Into<String>, field: IoField) -> Self {
        self.input.insert(key.into(), field);
        self
    }

    #[must_use]
    pub fn with_output(mut self, key: impl Into<String>, field: IoField) -> Self {
        self.output.insert(key.into(), field);
        self
    }

    /// Validate a proposed configuration map against this schema, per the
    /// Spec Registry's `ValidateConfig`: every required key present (or
    /// defaulted), values type-compatible, enum values in the allowed set,
    /// numerics within bounds. Accumulates every failure rather than
    /// stopping at the first.
    #[must_use]
    pub fn validate_config(
        &self,
        config: &IndexMap<String, serde_json::Value>,
    ) -> Vec<SchemaError> {
        let mut errors = Vec::new();

        for (key, value) in config {
            if !self.configurations.contains_key(key) {
                errors.push(SchemaError::UnknownKey { key: key.clone() });
            }
        }

        for (key, field) in &self.configurations {
            let value = match config.get(key).or(field.default.as_ref()) {
                Some(value) => value,
                None => {
                    if field.required {
                        errors.push(SchemaError::ConfigMissing { key: key.clone() });
                    }
                    continue;
                }
            };

            if !field.field_type.accepts(value) {
                errors.push(SchemaError::ConfigType {
                    key: key.clone(),
                    expected: field.field_type.to_string(),
                    actual: json_type_name(value).to_owned(),
                });
                continue;
            }

            if field.field_type == crate::field::FieldType::Enum {
                if let Some(s) = value.as_str() {
                    if !field.options.is_empty() && !field.options.iter().any(|o| o == s) {
                        errors.push(SchemaError::EnumNotAllowed {
                            key: key.clone(),
                            value: s.to_owned(),
                        });
                    }
                }
            }

            if field.min.is_some() || field.max.is_some() {
                if let Some(n) = value.as_f64() {
                    let below = field.min.is_some_and(|min| n < min);
                    let above = field.max.is_some_and(|max| n > max);
                    if below || above {
                        errors.push(SchemaError::NumericOutOfRange {
                            key: key.clone(),
                            value: n,
                            min: field.min,
                            max: field.max,
                        });
                    }
                }
            }
        }

        errors
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldType;
    use serde_json::json;

    fn sample_schema() -> NodeSchema {
        NodeSchema::new()
            .with_config("url", ConfigField::required(FieldType::Url))
            .with_config(
                "timeout",
                ConfigField::optional(FieldType::Int, json!(30)).with_range(Some(1.0), Some(300.0)),
            )
            .with_config(
                "method",
                ConfigField::optional(FieldType::Enum, json!("GET"))
                    .with_options(vec!["GET".into(), "POST".into()]),
            )
    }

    #[test]
    fn missing_required_key_is_reported() {
        let errors = sample_schema().validate_config(&IndexMap::new());
        assert!(errors
            .iter()
            .any(|e| matches!(e, SchemaError::ConfigMissing { key } if key == "url")));
    }

    #[test]
    fn defaults_satisfy_optional_keys() {
        let mut config = IndexMap::new();
        config.insert("url".to_string(), json!("https://example.com"));
        let errors = sample_schema().validate_config(&config);
        assert!(errors.is_empty());
    }

    #[test]
    fn type_mismatch_is_reported() {
        let mut config = IndexMap::new();
        config.insert("url".to_string(), json!("https://example.com"));
        config.insert("timeout".to_string(), json!("not-a-number"));
        let errors = sample_schema().validate_config(&config);
        assert!(errors
            .iter()
            .any(|e| matches!(e, SchemaError::ConfigType { key, .. } if key == "timeout")));
    }

    #[test]
    fn out_of_range_numeric_is_reported() {
        let mut config = IndexMap::new();
        config.insert("url".to_string(), json!("https://example.com"));
        config.insert("timeout".to_string(), json!(1000));
        let errors = sample_schema().validate_config(&config);
        assert!(errors
            .iter()
            .any(|e| matches!(e, SchemaError::NumericOutOfRange { key, .. } if key == "timeout")));
    }

    #[test]
    fn disallowed_enum_value_is_reported() {
        let mut config = IndexMap::new();
        config.insert("url".to_string(), json!("https://example.com"));
        config.insert("method".to_string(), json!("DELETE"));
        let errors = sample_schema().validate_config(&config);
        assert!(errors
            .iter()
            .any(|e| matches!(e, SchemaError::EnumNotAllowed { key, .. } if key == "method")));
    }

    #[test]
    fn unknown_key_is_reported() {
        let mut config = IndexMap::new();
        config.insert("url".to_string(), json!("https://example.com"));
        config.insert("bogus".to_string(), json!(1));
        let errors = sample_schema().validate_config(&config);
        assert!(errors
            .iter()
            .any(|e| matches!(e, SchemaError::UnknownKey { key } if key == "bogus")));
    }
}
