use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A condition that determines parameter visibility based on another field's value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "condition", rename_all = "snake_case")]
pub enum DisplayCondition {
    /// Field value equals the given value.
    Equals { value: serde_json::Value },
    /// Field value does not equal the given value.
    NotEquals { value: serde_json::Value },
    /// Field has a value (not null and not missing).
    IsSet,
    /// Field value is null.
    IsNull,
    /// Field value is an empty string or empty array.
    IsEmpty,
    /// Field value is a non-empty string or non-empty array.
    IsNotEmpty,
    /// Field value is boolean true.
    IsTrue,
    /// Field value is boolean false.
    IsFalse,
    /// Field numeric value is greater than the threshold.
    GreaterThan { value: f64 },
    /// Field numeric value is less than the threshold.
    LessThan { value: f64 },
    /// Field numeric value is within the inclusive range.
    InRange { min: f64, max: f64 },
    /// Field value (string or array) contains the given value.
    Contains { value: serde_json::Value },
    /// Field string value starts with the given prefix.
    StartsWith { prefix: String },
    /// Field string value ends with the given suffix.
    EndsWith { suffix: String },
    /// Field value is one of the given values.
    OneOf { values: Vec<serde_json::Value> },
    /// Field passes its own validation rules.
    IsValid,
}

impl DisplayCondition {
    /// Evaluate this condition against a concrete value.
    #[must_use]
    pub fn evaluate(&self, value: &serde_json::Value) -> bool {
        match self {
            Self::Equals { value: expected } => value == expected,
            Self::NotEquals { value: expected } => value != expected,
            Self::IsSet => !value.is_null(),
            Self::IsNull => value.is_null(),
            Self::IsEmpty => match value {
                serde_json::Value::String(s) => s.is_empty(),
                serde_json::Value::Array(a) => a.is_empty(),
                serde_json::Value::Null => true,
                _ => false,
            },
            Self::IsNotEmpty => match value {
                serde_json::Value::String(s) => !s.is_empty(),
                serde_json::Value::Array(a) => !a.is_empty(),
                serde_json::Value::Null => false,
                _ => true,
            },
            Self::IsTrue => value.as_bool() == Some(true),
            Self::IsFalse => value.as_bool() == Some(false),
            Self::GreaterThan { value: threshold } => {
                value.as_f64().is_some_and(|n| n > *threshold)
            }
            Self::LessThan { value: threshold } => value.as_f64().is_some_and(|n| n < *threshold),
            Self::InRange { min, max } => value.as_f64().is_some_and(|n| n >= *min && n <= *max),
            Self::Contains {
                value: search_value,
            } => match value {
                serde_json::Value::String(s) => {
                    if let Some(needle) = search_value.as_str() {
                        s.contains(needle)
                    } else {
                        false
                    }
                }
                serde_json::Value::Array(arr) => arr.contains(search_value),
                _ => false,
            },
            Self::StartsWith { prefix } => value
                .as_str()
                .is_some_and(|s| s.starts_with(prefix.as_str())),
            Self::EndsWith { suffix } => {
                value.as_str().is_some_and(|s| s.ends_with(suffix.as_str()))
            }
            Self::OneOf { values } => values.contains(value),
            // IsValid cannot be evaluated from the value alone; it requires
            // validation state from the context. Always returns false here.
            Self::IsValid => false,
        }
    }
}

/// Holds current parameter values and validation state for display rule evaluation.
#[derive(Debug, Clone, Default)]
pub struct DisplayContext {
    values: HashMap<String, serde_json::Value>,
    validation: HashMap<String, bool>,
}

impl DisplayContext {
    /// Create an empty display context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a parameter value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.values.get(key)
    }

    /// Look up whether a parameter is currently valid.
    #[must_use]
    pub fn get_validation(&self, key: &str) -> Option<bool> {
        self.validation.get(key).copied()
    }

    /// Set a parameter value (builder-style, consuming).
    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    /// Set a parameter's validation state (builder-style, consuming).
    #[must_use]
    pub fn with_validation(mut self, key: impl Into<String>, valid: bool) -> Self {
        self.validation.insert(key.into(), valid);
        self
    }
}

/// A single display rule: check a named field against a condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayRule {
    /// The parameter key to check.
    pub field: String,
    /// The condition to evaluate against that field's value.
    pub condition: DisplayCondition,
}

impl DisplayRule {
    /// Evaluate this rule against a display context.
    #[must_use]
    pub fn evaluate(&self, context: &DisplayContext) -> bool {
        // Special case: IsValid checks validation state, not value.
        if self.condition == DisplayCondition::IsValid {
            return context.get_validation(&self.field).unwrap_or(false);
        }

        let value = context
            .get(&self.field)
            .cloned()
            .unwrap_or(serde_json::Value::Null);
        self.condition.evaluate(&value)
    }
}

/// Composable display logic: combine rules with AND, OR, NOT.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "logic", rename_all = "snake_case")]
pub enum DisplayRuleSet {
    /// A single rule.
    Single(DisplayRule),
    /// All nested rules must match.
    All { rules: Vec<DisplayRuleSet> },
    /// At least one nested rule must match.
    Any { rules: Vec<DisplayRuleSet> },
    /// Negates the nested rule.
    Not { rule: Box<DisplayRuleSet> },
}

impl DisplayRuleSet {
    /// Evaluate the rule set against a display context.
    #[must_use]
    pub fn evaluate(&self, context: &DisplayContext) -> bool {
        match self {
            Self::Single(rule) => rule.evaluate(context),
            Self::All { rules } => rules.iter().all(|r| r.evaluate(context)),
            Self::Any { rules } => rules.iter().any(|r| r.evaluate(context)),
            Self::Not { rule } => !rule.evaluate(context),
        }
    }

    /// Collect all field names referenced by this rule set.
    #[must_use]
    pub fn dependencies(&self) -> Vec<String> {
        let mut deps = Vec::new();
        self.collect_dependencies(&mut deps);
        deps.sort();
        deps.dedup();
        deps
    }

    fn collect_dependencies(&self, deps: &mut Vec<String>) {
        match self {
            Self::Single(rule) => deps.push(rule.field.clone()),
            Self::All { rules } | Self::Any { rules } => {
                for r in rules {
                    r.collect_dependencies(deps);
                }
            }
            Self::Not { rule } => rule.collect_dependencies(deps),
        }
    }
}

/// Controls when a parameter is shown or hidden in the UI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterDisplay {
    /// Rules that must match for the parameter to be visible.
    /// If empty, the parameter is visible by default.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub show_when: Vec<DisplayRuleSet>,

    /// Rules that, if matched, hide the parameter.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hide_when: Vec<DisplayRuleSet>,
}

impl ParameterDisplay {
    /// Determine whether the parameter should be displayed given current context.
    ///
    /// Logic:
    /// - If `show_when` is empty, the parameter is visible by default.
    /// - If `show_when` is non-empty, at least one rule set must match.
    /// - If any `hide_when` rule set matches, the parameter is hidden.
    #[must_use]
    pub fn should_display(&self, context: &DisplayContext) -> bool {
        // Check hide rules first — any match hides the parameter.
        if self.hide_when.iter().any(|r| r.evaluate(context)) {
            return false;
        }

        // If no show rules, visible by default.
        if self.show_when.is_empty() {
            return true;
        }

        // At least one show rule must match.
        self.show_when.iter().any(|r| r.evaluate(context))
    }

    /// Whether this display configuration has no rules at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.show_when.is_empty() && self.hide_when.is_empty()
    }

    /// Collect all field names that this display configuration depends on.
    #[must_use]
    pub fn dependencies(&self) -> Vec<String> {
        let mut deps = Vec::new();
        for rule_set in &self.show_when {
            for dep in rule_set.dependencies() {
                deps.push(dep);
            }
        }
        for rule_set in &self.hide_when {
            for dep in rule_set.dependencies() {
                deps.push(dep);
            }
        }
        deps.sort();
        deps.dedup();
        deps
    }
}
